//! Tree-sitter syntax highlighting for arborium, producing HTML syntax trees.
//!
//! # Architecture
//!
//! - [`Grammar`]: what a language is: its scope name (`source.js`), the names
//!   and file extensions it answers to, the scopes it embeds, and its
//!   tree-sitter language and queries.
//! - [`Engine`]: a compiled set of grammars. It resolves language flags to
//!   scopes and turns source text into [`arborium_hast`] nodes.
//! - [`grammars`]: bundled grammars, one `lang-*` feature each.
//!
//! Highlighting handles language injections (CSS inside HTML, code inside
//! Markdown fences) recursively, up to
//! [`HighlightConfig::max_injection_depth`]. Injections naming a language that
//! is not loaded are skipped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use arborium_highlight::{Engine, HighlightConfig, grammars};
//!
//! let engine = Engine::create(grammars::common(), HighlightConfig::default()).await?;
//! let scope = engine.flag_to_scope("ts").unwrap();
//! let root = engine.highlight("const hi = 'Hello'", scope)?;
//! assert_eq!(root.text_content(), "const hi = 'Hello'");
//! // <span class="pl-keyword">const</span> <span class="pl-variable">hi</span> ...
//! println!("{}", root.to_html());
//! ```
//!
//! # HTML Output Formats
//!
//! The elements wrapping highlighted text are controlled by [`HtmlFormat`]:
//!
//! - **`CustomElements`**: compact custom elements like `<a-k>`, `<a-f>`
//! - **`CustomElementsWithPrefix(prefix)`**: custom elements with your prefix, e.g. `<code-k>`
//! - **`ClassNames`**: `<span class="keyword">`
//! - **`ClassNamesWithPrefix(prefix)`**: namespaced classes like `<span class="pl-keyword">`
//!   (the default, with prefix `pl`)

mod engine;
mod error;
mod grammar;
pub mod grammars;
mod render;
pub mod tree_sitter;
mod types;

pub use engine::Engine;
pub use error::EngineError;
pub use grammar::Grammar;
pub use grammars::{all, common};
pub use render::spans_to_nodes;
pub use types::{HighlightError, Injection, ParseResult, Span};

/// Shape of the elements that wrap highlighted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlFormat {
    /// Custom elements with the default prefix: `<a-k>`, `<a-f>`, etc.
    ///
    /// ```html
    /// <a-k>fn</a-k> <a-f>main</a-f>()
    /// ```
    CustomElements,

    /// Custom elements with a custom prefix: `<prefix-k>`, `<prefix-f>`, etc.
    ///
    /// ```html
    /// <!-- With prefix "code" -->
    /// <code-k>fn</code-k> <code-f>main</code-f>()
    /// ```
    CustomElementsWithPrefix(String),

    /// Class-based spans: `<span class="keyword">`, etc.
    ///
    /// ```html
    /// <span class="keyword">fn</span> <span class="function">main</span>()
    /// ```
    ClassNames,

    /// Class-based spans with a prefix: `<span class="prefix-keyword">`, etc.
    ///
    /// ```html
    /// <!-- With prefix "pl" -->
    /// <span class="pl-keyword">fn</span> <span class="pl-function">main</span>()
    /// ```
    ClassNamesWithPrefix(String),
}

/// Configuration passed through to engine creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Maximum depth for processing language injections.
    ///
    /// - `0`: No injections (just the primary language)
    /// - `3`: Default, handles most cases
    /// - Higher: For deeply nested content
    pub max_injection_depth: u32,

    /// Shape of the elements wrapping highlighted text.
    pub html_format: HtmlFormat,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_injection_depth: 3,
            html_format: HtmlFormat::ClassNamesWithPrefix("pl".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborium_hast::Node;

    fn classes(root: &arborium_hast::Root) -> Vec<(String, String)> {
        root.children
            .iter()
            .filter_map(Node::as_element)
            .map(|el| {
                let class = match el.class_list() {
                    arborium_hast::ClassList::Present(classes) => classes.join(" "),
                    _ => el.tag_name.clone(),
                };
                (class, el.text_content())
            })
            .collect()
    }

    #[cfg(feature = "lang-rust")]
    #[tokio::test]
    async fn test_basic_highlighting() {
        let engine = Engine::create(vec![grammars::rust()], HighlightConfig::default())
            .await
            .unwrap();
        let root = engine.highlight("fn main() {}\n", "source.rust").unwrap();
        assert_eq!(root.text_content(), "fn main() {}\n");
        assert!(classes(&root).contains(&("pl-keyword".into(), "fn".into())));
        assert!(classes(&root).contains(&("pl-function".into(), "main".into())));
    }

    #[cfg(feature = "lang-rust")]
    #[tokio::test]
    async fn test_custom_elements() {
        let config = HighlightConfig {
            html_format: HtmlFormat::CustomElements,
            ..Default::default()
        };
        let engine = Engine::create(vec![grammars::rust()], config).await.unwrap();
        let root = engine.highlight("fn main() {}", "source.rust").unwrap();
        assert!(root.to_html().starts_with("<a-k>fn</a-k> <a-f>main</a-f>"));
    }

    #[cfg(all(feature = "lang-html", feature = "lang-css"))]
    #[tokio::test]
    async fn test_injection() {
        let engine = Engine::create(
            vec![grammars::html(), grammars::css()],
            HighlightConfig::default(),
        )
        .await
        .unwrap();
        let source = "<style>a { color: red }</style>";
        let root = engine.highlight(source, "text.html.basic").unwrap();
        assert_eq!(root.text_content(), source);
        // `color` only gets a style through the CSS grammar.
        assert!(
            classes(&root).contains(&("pl-property".into(), "color".into())),
            "{}",
            root.to_html()
        );
    }

    #[cfg(all(feature = "lang-markdown", feature = "lang-rust"))]
    #[tokio::test]
    async fn test_markdown_fence_injection() {
        let source = indoc::indoc! {"
            # Title

            ```rust
            fn main() {}
            ```
        "};
        let engine = Engine::create(
            vec![grammars::markdown(), grammars::markdown_inline(), grammars::rust()],
            HighlightConfig::default(),
        )
        .await
        .unwrap();
        let root = engine.highlight(source, "text.md").unwrap();
        assert_eq!(root.text_content(), source);
        assert!(
            classes(&root).contains(&("pl-keyword".into(), "fn".into())),
            "{}",
            root.to_html()
        );
        assert!(engine.missing_scopes().is_empty());
    }

    #[cfg(feature = "lang-html")]
    #[tokio::test]
    async fn test_injection_without_grammar_is_skipped() {
        let engine = Engine::create(vec![grammars::html()], HighlightConfig::default())
            .await
            .unwrap();
        let source = "<script>let x = 1</script>";
        let root = engine.highlight(source, "text.html.basic").unwrap();
        assert_eq!(root.text_content(), source);
        assert_eq!(engine.missing_scopes(), ["source.css", "source.js"]);
    }

    #[cfg(all(feature = "lang-html", feature = "lang-css"))]
    #[tokio::test]
    async fn test_zero_injection_depth() {
        let config = HighlightConfig {
            max_injection_depth: 0,
            ..Default::default()
        };
        let engine = Engine::create(vec![grammars::html(), grammars::css()], config)
            .await
            .unwrap();
        let root = engine
            .highlight("<style>a { color: red }</style>", "text.html.basic")
            .unwrap();
        assert!(!classes(&root).contains(&("pl-property".into(), "color".into())));
    }

    #[cfg(feature = "lang-typescript")]
    #[tokio::test]
    async fn test_flag_to_scope() {
        let engine = Engine::create(
            vec![grammars::typescript(), grammars::tsx()],
            HighlightConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(engine.flag_to_scope("ts"), Some("source.ts"));
        assert_eq!(engine.flag_to_scope("TypeScript"), Some("source.ts"));
        assert_eq!(engine.flag_to_scope(".mts"), Some("source.ts"));
        assert_eq!(engine.flag_to_scope("tsx"), Some("source.tsx"));
        assert_eq!(engine.flag_to_scope("hypescript"), None);
        assert_eq!(engine.flag_to_scope(""), None);
        assert_eq!(engine.flags(), ["typescript", "ts", "tsx"]);
        assert_eq!(engine.scopes(), ["source.ts", "source.tsx"]);
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn test_unsupported_scope() {
        let engine = Engine::create(vec![grammars::json()], HighlightConfig::default())
            .await
            .unwrap();
        assert_eq!(
            engine.highlight("{}", "source.nope"),
            Err(HighlightError::UnsupportedScope("source.nope".into()))
        );
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn test_empty_source() {
        let engine = Engine::create(vec![grammars::json()], HighlightConfig::default())
            .await
            .unwrap();
        let root = engine.highlight("", "source.json").unwrap();
        assert!(root.children.is_empty());
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn test_duplicate_scope() {
        let err = Engine::create(
            vec![grammars::json(), grammars::json()],
            HighlightConfig::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, EngineError::DuplicateScope("source.json".into()));
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn test_invalid_query() {
        let broken = grammars::json().with_highlights_query("(((");
        let err = Engine::create(vec![broken], HighlightConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid highlights query for `source.json`"));
    }
}
