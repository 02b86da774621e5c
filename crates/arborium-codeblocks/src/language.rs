//! Reading the language of a code block from its classes.

use arborium_hast::{ClassList, Element};
use std::fmt;

/// Class prefix that marks a code block's language.
pub const LANGUAGE_PREFIX: &str = "language-";

/// The language identifier of a code block, e.g. `rust` for `language-rust`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The identifier from the first `language-*` class of `element`.
    ///
    /// Returns `None` when the element has no classes, when its `class`
    /// property is not a token list, or when no class has the prefix. A bare
    /// `language-` class yields an empty identifier.
    pub fn from_element(element: &Element) -> Option<Self> {
        let ClassList::Present(classes) = element.class_list() else {
            return None;
        };
        Self::from_classes(classes)
    }

    /// The identifier from the first class with the `language-` prefix.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Option<Self> {
        classes
            .iter()
            .find_map(|class| class.as_ref().strip_prefix(LANGUAGE_PREFIX))
            .map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
