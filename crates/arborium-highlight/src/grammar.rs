//! Grammar definitions.

use std::borrow::Cow;
use std::fmt;
use tree_sitter::Language;

/// Everything the engine needs to know about one language.
///
/// A grammar is identified by its scope name (`source.js`, `text.html.basic`)
/// and found through its names (`javascript`, `js`) or file extensions
/// (`.js`). Dependencies list the scopes this grammar embeds through
/// injections.
///
/// ```rust,ignore
/// let grammar = Grammar::new("source.js", tree_sitter_javascript::LANGUAGE.into())
///     .with_names(["javascript", "js"])
///     .with_extensions([".js", ".mjs"])
///     .with_highlights_query(tree_sitter_javascript::HIGHLIGHT_QUERY);
/// ```
#[derive(Clone)]
pub struct Grammar {
    scope_name: String,
    names: Vec<String>,
    extensions: Vec<String>,
    dependencies: Vec<String>,
    language: Language,
    highlights_query: Cow<'static, str>,
    injections_query: Cow<'static, str>,
}

impl Grammar {
    pub fn new(scope_name: impl Into<String>, language: Language) -> Self {
        Self {
            scope_name: scope_name.into(),
            names: Vec::new(),
            extensions: Vec::new(),
            dependencies: Vec::new(),
            language,
            highlights_query: Cow::Borrowed(""),
            injections_query: Cow::Borrowed(""),
        }
    }

    /// Replace the scope name.
    pub fn with_scope_name(mut self, scope_name: impl Into<String>) -> Self {
        self.scope_name = scope_name.into();
        self
    }

    /// Replace the names and aliases. Names are matched case-insensitively.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(|n| n.into().to_lowercase()).collect();
        self
    }

    /// Replace the file extensions, written with their leading dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();
        self
    }

    /// Replace the scopes this grammar embeds.
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_highlights_query(mut self, query: impl Into<Cow<'static, str>>) -> Self {
        self.highlights_query = query.into();
        self
    }

    pub fn with_injections_query(mut self, query: impl Into<Cow<'static, str>>) -> Self {
        self.injections_query = query.into();
        self
    }

    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn highlights_query(&self) -> &str {
        &self.highlights_query
    }

    pub fn injections_query(&self) -> &str {
        &self.injections_query
    }

    /// Whether `flag` (already lowercased) names this grammar.
    pub(crate) fn matches_name(&self, flag: &str) -> bool {
        self.names.iter().any(|name| name == flag)
    }

    /// Whether `flag` (already lowercased) is one of this grammar's extensions,
    /// with or without its leading dot.
    pub(crate) fn matches_extension(&self, flag: &str) -> bool {
        let bare = flag.strip_prefix('.').unwrap_or(flag);
        !bare.is_empty()
            && self
                .extensions
                .iter()
                .any(|ext| ext.strip_prefix('.').unwrap_or(ext) == bare)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("scope_name", &self.scope_name)
            .field("names", &self.names)
            .field("extensions", &self.extensions)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
