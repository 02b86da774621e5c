//! Warnings collected while rewriting a document.

use arborium_hast::Position;
use std::fmt;
use std::path::PathBuf;

/// Value of [`Message::source`] for every message this crate emits.
pub const SOURCE: &str = "arborium-codeblocks";

/// Which check produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// A code block names a language no loaded grammar answers to.
    MissingLanguage,
    /// A loaded grammar embeds a scope that is not loaded.
    MissingScopes,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::MissingLanguage => "missing-language",
            RuleId::MissingScopes => "missing-scopes",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
}

/// A single warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub reason: String,
    /// Where in the document the problem is, when known.
    pub place: Option<Position>,
    /// Tag names from the root down to and including the offending element.
    pub ancestors: Vec<String>,
    pub source: &'static str,
    pub rule_id: RuleId,
    pub severity: Severity,
    /// Path of the file the message belongs to.
    pub file: Option<PathBuf>,
}

impl Message {
    pub(crate) fn warning(rule_id: RuleId, reason: String) -> Self {
        Self {
            reason,
            place: None,
            ancestors: Vec::new(),
            source: SOURCE,
            rule_id,
            severity: Severity::Warning,
            file: None,
        }
    }

    /// The code miette shows, e.g. `arborium-codeblocks::missing-language`.
    pub fn code(&self) -> String {
        format!("{}::{}", self.source, self.rule_id)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file.display())?;
        }
        if let Some(place) = &self.place {
            write!(f, "{place}:")?;
        }
        if self.file.is_some() || self.place.is_some() {
            f.write_str(" ")?;
        }
        f.write_str(&self.reason)
    }
}

impl std::error::Error for Message {}

impl miette::Diagnostic for Message {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(Message::code(self)))
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self.severity {
            Severity::Warning => Some(miette::Severity::Warning),
        }
    }
}

/// A document being processed and the messages reported about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub path: Option<PathBuf>,
    pub messages: Vec<Message>,
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            messages: Vec::new(),
        }
    }

    /// Record `message`, stamping it with this file's path.
    pub fn report(&mut self, mut message: Message) {
        message.file = self.path.clone();
        self.messages.push(message);
    }
}

/// Backtick every item and join them, e.g. `` `a`, `b`, or `c` ``.
pub fn format_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("`{}`", i.as_ref())).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} {conjunction} {b}"),
        [init @ .., last] => format!("{}, {conjunction} {last}", init.join(", ")),
    }
}

/// Reason text for a code block whose language is unknown.
pub(crate) fn missing_language_reason<S: AsRef<str>>(id: &str, suggestions: &[S]) -> String {
    let mut reason = format!(
        "Unexpected unknown language `{id}` defined with `language-` class, expected a known name"
    );
    if !suggestions.is_empty() {
        reason.push_str("; did you mean ");
        reason.push_str(&format_list(suggestions, "or"));
    }
    reason
}

/// Reason text for grammars that embed scopes that are not loaded.
pub(crate) fn missing_scopes_reason<S: AsRef<str>>(scopes: &[S]) -> String {
    format!(
        "Unexpected missing scope{} likely embedded in grammars, expected grammars for {}",
        if scopes.len() == 1 { "" } else { "s" },
        format_list(scopes, "and")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborium_hast::Point;

    #[test]
    fn list_formatting() {
        assert_eq!(format_list::<&str>(&[], "or"), "");
        assert_eq!(format_list(&["a"], "or"), "`a`");
        assert_eq!(format_list(&["a", "b"], "or"), "`a` or `b`");
        assert_eq!(format_list(&["a", "b", "c"], "and"), "`a`, `b`, and `c`");
    }

    #[test]
    fn missing_language_reasons() {
        assert_eq!(
            missing_language_reason::<&str>("hypescript", &[]),
            "Unexpected unknown language `hypescript` defined with `language-` class, expected a known name"
        );
        assert_eq!(
            missing_language_reason("hypescript", &["typescript", "cakescript"]),
            "Unexpected unknown language `hypescript` defined with `language-` class, expected a known name; did you mean `typescript` or `cakescript`"
        );
    }

    #[test]
    fn missing_scopes_reason_pluralizes() {
        assert_eq!(
            missing_scopes_reason(&["source.css"]),
            "Unexpected missing scope likely embedded in grammars, expected grammars for `source.css`"
        );
        assert!(missing_scopes_reason(&["a", "b"]).contains("scopes"));
    }

    #[test]
    fn report_stamps_path_and_displays() {
        let mut file = File::with_path("docs/index.html");
        let mut message = Message::warning(RuleId::MissingLanguage, "nope".into());
        message.place = Some(Position::new(Point::new(3, 1), Point::new(3, 20)));
        file.report(message);

        let message = &file.messages[0];
        assert_eq!(message.file.as_deref(), Some(std::path::Path::new("docs/index.html")));
        assert_eq!(message.to_string(), "docs/index.html:3:1-3:20: nope");
        assert_eq!(message.code(), "arborium-codeblocks::missing-language");
        assert_eq!(message.source, "arborium-codeblocks");
    }

    #[test]
    fn display_without_location() {
        let message = Message::warning(RuleId::MissingScopes, "nope".into());
        assert_eq!(message.to_string(), "nope");
        assert_eq!(
            miette::Diagnostic::severity(&message),
            Some(miette::Severity::Warning)
        );
    }
}
