use crate::tree_sitter::QueryKind;
use std::fmt;

/// Errors that prevent an [`Engine`](crate::Engine) from being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The grammar's language is incompatible with the linked tree-sitter.
    Language { scope: String, message: String },
    /// One of the grammar's queries failed to compile.
    Query {
        scope: String,
        kind: QueryKind,
        message: String,
    },
    /// Two grammars were registered under the same scope name.
    DuplicateScope(String),
    /// The background compilation task did not finish.
    Interrupted(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Language { scope, message } => {
                write!(f, "Failed to load language for `{scope}`: {message}")
            }
            EngineError::Query {
                scope,
                kind,
                message,
            } => write!(f, "Invalid {kind} query for `{scope}`: {message}"),
            EngineError::DuplicateScope(scope) => {
                write!(f, "Scope `{scope}` is defined by more than one grammar")
            }
            EngineError::Interrupted(reason) => {
                write!(f, "Grammar compilation was interrupted: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
