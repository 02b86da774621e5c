//! Syntax highlighting for `language-*` code blocks.
//!
//! Walks an HTML syntax tree (or HTML text), finds `<code>` elements with a
//! `language-<name>` class, and replaces their text with highlighted markup
//! produced by [`arborium_highlight`]. Code blocks without a language class
//! are left alone.
//!
//! Problems that do not stop processing are reported as [`Message`]s on a
//! [`File`]:
//!
//! - `missing-language`: a block names a language no grammar answers to. The
//!   message suggests up to four close names.
//! - `missing-scopes`: a loaded grammar embeds a scope that is not loaded.
//!   Reported once per [`CodeBlockHighlighter`], and never when
//!   [`Options::allow_missing_scopes`] is set.
//!
//! # Example
//!
//! ```rust,ignore
//! use arborium_codeblocks::{CodeBlockHighlighter, File, Options};
//!
//! let highlighter = CodeBlockHighlighter::new(Options::default().with_plain_text(["text"]));
//! let mut file = File::new();
//! let html = highlighter
//!     .run_html(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#, &mut file)
//!     .await?;
//! assert!(html.contains(r#"<span class="pl-keyword">fn</span>"#));
//! ```

mod diagnostics;
mod error;
mod html;
mod language;
mod options;
pub mod processor;
mod suggest;
mod transform;

pub use diagnostics::{File, Message, RuleId, SOURCE, Severity, format_list};
pub use error::Error;
pub use language::{LANGUAGE_PREFIX, LanguageTag};
pub use options::Options;
pub use suggest::{MAX_RATIO, MAX_SUGGESTIONS, Suggestion, levenshtein, suggest, suggest_with};
pub use transform::{CodeBlockHighlighter, RewriteStats};

pub use arborium_highlight::{HighlightConfig, HtmlFormat};
