use arborium_highlight::{Grammar, HighlightConfig};
use std::collections::HashSet;

/// Configuration for a [`CodeBlockHighlighter`](crate::CodeBlockHighlighter).
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Grammars to load. `None` loads [`arborium_highlight::common`].
    pub grammars: Option<Vec<Grammar>>,

    /// Language identifiers that are left alone without a warning, e.g.
    /// `text` or `txt`. Compared against the identifier as written.
    pub plain_text: HashSet<String>,

    /// Do not warn when a loaded grammar embeds a scope that is not loaded.
    pub allow_missing_scopes: bool,

    /// Passed through to the engine.
    pub highlight: HighlightConfig,
}

impl Options {
    pub fn with_grammars(mut self, grammars: Vec<Grammar>) -> Self {
        self.grammars = Some(grammars);
        self
    }

    pub fn with_plain_text<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plain_text.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn allow_missing_scopes(mut self, allow: bool) -> Self {
        self.allow_missing_scopes = allow;
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    /// Whether `id` should be skipped silently.
    pub(crate) fn is_plain_text(&self, id: &str) -> bool {
        self.plain_text.contains(id)
    }
}
