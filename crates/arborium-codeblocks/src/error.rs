use arborium_highlight::EngineError;

/// Errors that stop a transform.
///
/// Unknown languages and missing scopes are not errors: they are reported as
/// [`Message`](crate::Message)s on the [`File`](crate::File) and processing
/// continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The highlighting engine could not be created.
    #[error("failed to create highlighting engine: {0}")]
    Engine(#[from] EngineError),

    /// lol_html could not rewrite the document.
    #[error("failed to rewrite HTML: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}
