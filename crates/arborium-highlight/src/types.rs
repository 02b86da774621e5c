//! Types shared between grammar parsing and rendering.

use std::fmt;

/// A highlighted byte range produced by a highlight query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where the span starts (inclusive).
    pub start: u32,
    /// Byte offset where the span ends (exclusive).
    pub end: u32,
    /// The capture name, e.g. `keyword.function`.
    pub capture: String,
    /// Index of the query pattern that matched. Later patterns override
    /// earlier ones on identical ranges.
    pub pattern_index: u32,
}

/// A region of the source written in another language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub start: u32,
    pub end: u32,
    /// Language name as written in the query or the document, e.g. `css`.
    pub language: String,
    pub include_children: bool,
}

/// Result of parsing one piece of text with one grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub spans: Vec<Span>,
    pub injections: Vec<Injection>,
}

/// Errors from a single highlight call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// No loaded grammar has this scope name.
    UnsupportedScope(String),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::UnsupportedScope(scope) => {
                write!(f, "No grammar loaded for scope `{scope}`")
            }
        }
    }
}

impl std::error::Error for HighlightError {}
