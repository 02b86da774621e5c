//! Highlight categories.
//!
//! Highlight queries from different sources (nvim-treesitter, helix, the
//! upstream grammar repositories) use a large vocabulary of capture names.
//! This module folds that vocabulary into a fixed set of [`ThemeSlot`]s.
//!
//! Each slot has a short tag (used for custom elements like `<a-k>`) and a
//! long name (used for class names like `pl-keyword`).
//!
//! Capture names are resolved from most to least specific: `keyword.control.import`
//! is looked up as-is, then as `keyword.control`, then as `keyword`.

/// The fixed set of color categories a theme defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
    Keyword,
    Function,
    String,
    Comment,
    Type,
    Variable,
    Constant,
    Number,
    Operator,
    Punctuation,
    Property,
    Attribute,
    Tag,
    Macro,
    Label,
    Namespace,
    Constructor,
    /// Markup: headings, titles
    Title,
    /// Markup: bold text
    Strong,
    /// Markup: italic text
    Emphasis,
    /// Markup: links/URLs
    Link,
    /// Markup: raw/literal/code blocks
    Literal,
    /// Markup: strikethrough
    Strikethrough,
    DiffAdd,
    DiffDelete,
    /// Embedded content
    Embedded,
    Error,
    /// No styling (invisible captures like spell, nospell)
    None,
}

impl ThemeSlot {
    /// Every slot that produces styling.
    pub const STYLED: [ThemeSlot; 27] = [
        ThemeSlot::Keyword,
        ThemeSlot::Function,
        ThemeSlot::String,
        ThemeSlot::Comment,
        ThemeSlot::Type,
        ThemeSlot::Variable,
        ThemeSlot::Constant,
        ThemeSlot::Number,
        ThemeSlot::Operator,
        ThemeSlot::Punctuation,
        ThemeSlot::Property,
        ThemeSlot::Attribute,
        ThemeSlot::Tag,
        ThemeSlot::Macro,
        ThemeSlot::Label,
        ThemeSlot::Namespace,
        ThemeSlot::Constructor,
        ThemeSlot::Title,
        ThemeSlot::Strong,
        ThemeSlot::Emphasis,
        ThemeSlot::Link,
        ThemeSlot::Literal,
        ThemeSlot::Strikethrough,
        ThemeSlot::DiffAdd,
        ThemeSlot::DiffDelete,
        ThemeSlot::Embedded,
        ThemeSlot::Error,
    ];

    /// Short tag suffix, e.g. `k` for `<a-k>`.
    pub fn tag(self) -> Option<&'static str> {
        let tag = match self {
            ThemeSlot::Keyword => "k",
            ThemeSlot::Function => "f",
            ThemeSlot::String => "s",
            ThemeSlot::Comment => "c",
            ThemeSlot::Type => "t",
            ThemeSlot::Variable => "v",
            ThemeSlot::Constant => "co",
            ThemeSlot::Number => "n",
            ThemeSlot::Operator => "o",
            ThemeSlot::Punctuation => "p",
            ThemeSlot::Property => "pr",
            ThemeSlot::Attribute => "at",
            ThemeSlot::Tag => "tg",
            ThemeSlot::Macro => "m",
            ThemeSlot::Label => "l",
            ThemeSlot::Namespace => "ns",
            ThemeSlot::Constructor => "cr",
            ThemeSlot::Title => "tt",
            ThemeSlot::Strong => "st",
            ThemeSlot::Emphasis => "em",
            ThemeSlot::Link => "tu",
            ThemeSlot::Literal => "tl",
            ThemeSlot::Strikethrough => "tx",
            ThemeSlot::DiffAdd => "da",
            ThemeSlot::DiffDelete => "dd",
            ThemeSlot::Embedded => "eb",
            ThemeSlot::Error => "er",
            ThemeSlot::None => return None,
        };
        Some(tag)
    }

    /// Long name, e.g. `keyword`, used for class-based output.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            ThemeSlot::Keyword => "keyword",
            ThemeSlot::Function => "function",
            ThemeSlot::String => "string",
            ThemeSlot::Comment => "comment",
            ThemeSlot::Type => "type",
            ThemeSlot::Variable => "variable",
            ThemeSlot::Constant => "constant",
            ThemeSlot::Number => "number",
            ThemeSlot::Operator => "operator",
            ThemeSlot::Punctuation => "punctuation",
            ThemeSlot::Property => "property",
            ThemeSlot::Attribute => "attribute",
            ThemeSlot::Tag => "tag",
            ThemeSlot::Macro => "macro",
            ThemeSlot::Label => "label",
            ThemeSlot::Namespace => "namespace",
            ThemeSlot::Constructor => "constructor",
            ThemeSlot::Title => "title",
            ThemeSlot::Strong => "strong",
            ThemeSlot::Emphasis => "emphasis",
            ThemeSlot::Link => "link",
            ThemeSlot::Literal => "literal",
            ThemeSlot::Strikethrough => "strikethrough",
            ThemeSlot::DiffAdd => "diff-add",
            ThemeSlot::DiffDelete => "diff-delete",
            ThemeSlot::Embedded => "embedded",
            ThemeSlot::Error => "error",
            ThemeSlot::None => return None,
        };
        Some(name)
    }
}

/// Slot for a capture name or one of its dotted prefixes, if it is known.
fn known_slot(capture: &str) -> Option<ThemeSlot> {
    let slot = match capture {
        "keyword" | "include" | "conditional" | "repeat" | "exception" | "storageclass"
        | "preproc" | "define" | "structure" => ThemeSlot::Keyword,

        "function" | "method" => ThemeSlot::Function,
        "string" | "character" | "escape" => ThemeSlot::String,
        "comment" => ThemeSlot::Comment,
        "type" => ThemeSlot::Type,
        "variable" | "parameter" | "field" => ThemeSlot::Variable,
        "constant" | "boolean" => ThemeSlot::Constant,
        "number" | "float" | "constant.numeric" => ThemeSlot::Number,
        "operator" => ThemeSlot::Operator,
        "punctuation" | "markup.list" | "markup.quote" => ThemeSlot::Punctuation,
        "property" => ThemeSlot::Property,
        "attribute" => ThemeSlot::Attribute,
        "tag" => ThemeSlot::Tag,
        "macro" | "function.macro" | "preproc.macro" => ThemeSlot::Macro,
        "label" => ThemeSlot::Label,
        "namespace" | "module" => ThemeSlot::Namespace,
        "constructor" => ThemeSlot::Constructor,

        "text.title" | "markup.heading" => ThemeSlot::Title,
        "text.strong" | "markup.bold" => ThemeSlot::Strong,
        "text.emphasis" | "markup.italic" => ThemeSlot::Emphasis,
        "text.uri" | "text.reference" | "markup.link" => ThemeSlot::Link,
        "text.literal" | "markup.raw" | "markup.inline" => ThemeSlot::Literal,
        "text.strikethrough" | "markup.strikethrough" => ThemeSlot::Strikethrough,

        "diff.addition" | "diff.plus" | "diff.delta" => ThemeSlot::DiffAdd,
        "diff.deletion" | "diff.minus" => ThemeSlot::DiffDelete,

        "embedded" => ThemeSlot::Embedded,
        "error" => ThemeSlot::Error,

        "none" | "nospell" | "spell" | "text" | "markup" => ThemeSlot::None,

        _ => return None,
    };
    Some(slot)
}

/// Map any capture name to its theme slot.
///
/// A leading `@` is ignored. Unknown captures produce [`ThemeSlot::None`].
pub fn capture_to_slot(capture: &str) -> ThemeSlot {
    let mut name = capture.strip_prefix('@').unwrap_or(capture);

    loop {
        if let Some(slot) = known_slot(name) {
            return slot;
        }
        match name.rsplit_once('.') {
            Some((parent, _)) => name = parent,
            None => return ThemeSlot::None,
        }
    }
}

/// Short tag for a capture name, or `None` when the capture is unstyled.
///
/// ```
/// use arborium_theme::tag_for_capture;
///
/// assert_eq!(tag_for_capture("keyword.control.import"), Some("k"));
/// assert_eq!(tag_for_capture("include"), Some("k"));
/// assert_eq!(tag_for_capture("nospell"), None);
/// ```
pub fn tag_for_capture(capture: &str) -> Option<&'static str> {
    capture_to_slot(capture).tag()
}

/// Long name for a short tag: `k` becomes `keyword`.
pub fn tag_to_name(tag: &str) -> Option<&'static str> {
    ThemeSlot::STYLED
        .iter()
        .find(|slot| slot.tag() == Some(tag))
        .and_then(|slot| slot.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_variants() {
        for capture in [
            "keyword",
            "keyword.function",
            "keyword.control.import",
            "@keyword.return",
            "include",
            "conditional",
            "repeat",
            "storageclass",
        ] {
            assert_eq!(capture_to_slot(capture), ThemeSlot::Keyword, "{capture}");
        }
    }

    #[test]
    fn test_more_specific_name_wins() {
        assert_eq!(capture_to_slot("constant.numeric.integer"), ThemeSlot::Number);
        assert_eq!(capture_to_slot("constant.builtin"), ThemeSlot::Constant);
        assert_eq!(capture_to_slot("function.macro"), ThemeSlot::Macro);
        assert_eq!(capture_to_slot("function.method.call"), ThemeSlot::Function);
        assert_eq!(capture_to_slot("preproc.macro"), ThemeSlot::Macro);
        assert_eq!(capture_to_slot("preproc"), ThemeSlot::Keyword);
    }

    #[test]
    fn test_markup() {
        assert_eq!(capture_to_slot("markup.heading.1"), ThemeSlot::Title);
        assert_eq!(capture_to_slot("text.title"), ThemeSlot::Title);
        assert_eq!(capture_to_slot("markup.link.url"), ThemeSlot::Link);
        assert_eq!(capture_to_slot("markup.raw.block"), ThemeSlot::Literal);
        assert_eq!(capture_to_slot("markup.list.checked"), ThemeSlot::Punctuation);
        assert_eq!(capture_to_slot("markup.underline"), ThemeSlot::None);
        assert_eq!(capture_to_slot("text"), ThemeSlot::None);
    }

    #[test]
    fn test_unstyled_and_unknown() {
        assert_eq!(capture_to_slot("spell"), ThemeSlot::None);
        assert_eq!(capture_to_slot("nospell"), ThemeSlot::None);
        assert_eq!(capture_to_slot("local.definition"), ThemeSlot::None);
        assert_eq!(capture_to_slot(""), ThemeSlot::None);
    }

    #[test]
    fn test_tags_and_names_are_unique() {
        let mut tags: Vec<_> = ThemeSlot::STYLED.iter().filter_map(|s| s.tag()).collect();
        let mut names: Vec<_> = ThemeSlot::STYLED.iter().filter_map(|s| s.name()).collect();
        tags.sort_unstable();
        tags.dedup();
        names.sort_unstable();
        names.dedup();
        assert_eq!(tags.len(), ThemeSlot::STYLED.len());
        assert_eq!(names.len(), ThemeSlot::STYLED.len());
    }

    #[test]
    fn test_tag_to_name() {
        assert_eq!(tag_to_name("k"), Some("keyword"));
        assert_eq!(tag_to_name("co"), Some("constant"));
        assert_eq!(tag_to_name("dd"), Some("diff-delete"));
        assert_eq!(tag_to_name("zz"), None);
    }
}
