//! Rewriting code blocks in a syntax tree.

use crate::diagnostics::{File, Message, RuleId, missing_language_reason, missing_scopes_reason};
use crate::language::LanguageTag;
use crate::suggest::suggest;
use crate::{Error, Options};
use arborium_hast::{Element, Root, Visit, visit_elements_mut};
use arborium_highlight::Engine;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, trace};

/// Counts from rewriting one or more documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Code blocks whose children were replaced.
    pub highlighted: usize,
    /// Code blocks skipped because their language is plain text.
    pub plain: usize,
    /// Code blocks naming an unknown language.
    pub unknown: usize,
    /// Code blocks with a known language that highlighted to nothing.
    pub unchanged: usize,
    /// Unknown language identifiers, first occurrence first, without repeats.
    pub unknown_languages: Vec<String>,
}

impl RewriteStats {
    /// Code blocks that were looked at but left as they were.
    pub fn skipped(&self) -> usize {
        self.plain + self.unknown + self.unchanged
    }

    pub fn merge(&mut self, other: RewriteStats) {
        self.highlighted += other.highlighted;
        self.plain += other.plain;
        self.unknown += other.unknown;
        self.unchanged += other.unchanged;
        for language in other.unknown_languages {
            if !self.unknown_languages.contains(&language) {
                self.unknown_languages.push(language);
            }
        }
    }
}

/// Highlights `language-*` code blocks.
///
/// The engine is created on first use and shared by every later run, including
/// concurrent ones. The missing-scopes warning is reported at most once per
/// highlighter, on the first document that has a code block needing it.
///
/// ```rust,ignore
/// let highlighter = CodeBlockHighlighter::new(Options::default());
/// let mut file = File::new();
/// highlighter.run(&mut tree, &mut file).await?;
/// for message in &file.messages {
///     eprintln!("{message}");
/// }
/// ```
#[derive(Debug)]
pub struct CodeBlockHighlighter {
    options: Options,
    engine: OnceCell<Engine>,
    missing_scopes_reported: AtomicBool,
}

impl CodeBlockHighlighter {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            engine: OnceCell::new(),
            missing_scopes_reported: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The engine, created on the first call.
    ///
    /// A failed creation is returned as an error and retried on the next call.
    pub async fn engine(&self) -> Result<&Engine, Error> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let grammars = self
                    .options
                    .grammars
                    .clone()
                    .unwrap_or_else(arborium_highlight::common);
                Engine::create(grammars, self.options.highlight.clone()).await
            })
            .await?;
        Ok(engine)
    }

    /// Highlight every code block in `tree`, reporting warnings to `file`.
    pub async fn run<'t>(&self, tree: &'t mut Root, file: &mut File) -> Result<&'t mut Root, Error> {
        let engine = self.engine().await?;
        self.rewrite(engine, tree, file);
        Ok(tree)
    }

    /// The synchronous part of [`run`](Self::run), for callers that already
    /// hold an engine.
    pub fn rewrite(&self, engine: &Engine, tree: &mut Root, file: &mut File) -> RewriteStats {
        let mut stats = RewriteStats::default();

        visit_elements_mut(tree, |element, ancestors| {
            if element.tag_name != "code" {
                return Visit::Continue;
            }

            if let Some(tag) = LanguageTag::from_element(element) {
                self.rewrite_block(engine, element, ancestors, &tag, file, &mut stats);
            }

            Visit::Skip
        });

        stats
    }

    fn rewrite_block(
        &self,
        engine: &Engine,
        element: &mut Element,
        ancestors: &[String],
        tag: &LanguageTag,
        file: &mut File,
        stats: &mut RewriteStats,
    ) {
        let id = tag.as_str();
        if self.options.is_plain_text(id) {
            trace!(language = id, "plain text code block");
            stats.plain += 1;
            return;
        }

        self.report_missing_scopes(engine, element, ancestors, file);

        let Some(scope) = engine.flag_to_scope(id) else {
            trace!(language = id, "unknown language");
            let flags = engine.flags();
            let suggestions = suggest(id, flags.iter().copied());
            file.report(located(
                Message::warning(RuleId::MissingLanguage, missing_language_reason(id, &suggestions)),
                element,
                ancestors,
            ));
            stats.unknown += 1;
            if !stats.unknown_languages.iter().any(|l| l == id) {
                stats.unknown_languages.push(id.to_string());
            }
            return;
        };

        let source = element.text_content();
        match engine.highlight(&source, scope) {
            Ok(root) if !root.children.is_empty() => {
                trace!(language = id, scope, nodes = root.children.len(), "highlighted code block");
                element.children = root.children;
                stats.highlighted += 1;
            }
            Ok(_) => stats.unchanged += 1,
            Err(e) => {
                debug!(language = id, scope, "{e}");
                stats.unchanged += 1;
            }
        }
    }

    fn report_missing_scopes(
        &self,
        engine: &Engine,
        element: &Element,
        ancestors: &[String],
        file: &mut File,
    ) {
        if self.options.allow_missing_scopes
            || self.missing_scopes_reported.swap(true, Ordering::AcqRel)
        {
            return;
        }

        let missing = engine.missing_scopes();
        if missing.is_empty() {
            return;
        }

        debug!(?missing, "grammars embed scopes that are not loaded");
        file.report(located(
            Message::warning(RuleId::MissingScopes, missing_scopes_reason(&missing)),
            element,
            ancestors,
        ));
    }
}

/// Attach the element's position and ancestor chain to `message`.
fn located(mut message: Message, element: &Element, ancestors: &[String]) -> Message {
    message.place = element.position;
    message.ancestors = ancestors
        .iter()
        .cloned()
        .chain(std::iter::once(element.tag_name.clone()))
        .collect();
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborium_hast::{CLASS, Node, Point, Position};
    use arborium_highlight::grammars;

    fn code_block(class: &str, text: &str) -> Element {
        Element::new("code").with_class(class).with_text(text)
    }

    fn document(code: Element) -> Root {
        Root::new(vec![Element::new("pre").with_child(code).into()])
    }

    fn first_code(root: &Root) -> &Element {
        root.children[0].as_element().unwrap().children[0]
            .as_element()
            .unwrap()
    }

    #[test]
    fn stats_merge_dedupes_languages() {
        let mut a = RewriteStats {
            highlighted: 1,
            unknown: 1,
            unknown_languages: vec!["foo".into()],
            ..Default::default()
        };
        a.merge(RewriteStats {
            plain: 2,
            unknown: 2,
            unknown_languages: vec!["foo".into(), "bar".into()],
            ..Default::default()
        });
        assert_eq!(a.highlighted, 1);
        assert_eq!(a.skipped(), 5);
        assert_eq!(a.unknown_languages, ["foo", "bar"]);
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn highlights_and_replaces_children() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let mut tree = document(code_block("language-json", "{\"a\": 1}"));
        let mut file = File::new();

        highlighter.run(&mut tree, &mut file).await.unwrap();

        let code = first_code(&tree);
        assert_eq!(code.text_content(), "{\"a\": 1}");
        assert!(code.children.iter().any(|n| matches!(n, Node::Element(_))));
        assert!(file.messages.is_empty());
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn code_without_language_is_untouched() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let mut file = File::new();

        let mut tree = document(Element::new("code").with_class("hljs").with_text("{}"));
        let before = tree.clone();
        highlighter.run(&mut tree, &mut file).await.unwrap();
        assert_eq!(tree, before);

        let mut tree = document(
            Element::new("code")
                .with_property(CLASS, "language-json")
                .with_text("{}"),
        );
        let before = tree.clone();
        highlighter.run(&mut tree, &mut file).await.unwrap();
        assert_eq!(tree, before);

        assert!(file.messages.is_empty());
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn plain_text_is_skipped_even_when_known() {
        let highlighter = CodeBlockHighlighter::new(
            Options::default()
                .with_grammars(vec![grammars::json()])
                .with_plain_text(["json", "text"]),
        );
        let mut tree = Root::new(vec![
            code_block("language-json", "{}").into(),
            code_block("language-text", "hello").into(),
        ]);
        let before = tree.clone();
        let mut file = File::new();
        let engine = highlighter.engine().await.unwrap();

        let stats = highlighter.rewrite(engine, &mut tree, &mut file);

        assert_eq!(tree, before);
        assert!(file.messages.is_empty());
        assert_eq!(stats.plain, 2);
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn unknown_language_is_reported_with_location() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let place = Position::new(Point::new(2, 7), Point::new(2, 40));
        let mut tree = document(code_block("language-jsn", "{}").with_position(place));
        let before = tree.clone();
        let mut file = File::with_path("page.html");

        highlighter.run(&mut tree, &mut file).await.unwrap();

        assert_eq!(tree, before);
        assert_eq!(file.messages.len(), 1);
        let message = &file.messages[0];
        assert_eq!(message.rule_id, RuleId::MissingLanguage);
        assert_eq!(message.place, Some(place));
        assert_eq!(message.ancestors, ["pre", "code"]);
        assert_eq!(
            message.reason,
            "Unexpected unknown language `jsn` defined with `language-` class, expected a known name"
        );
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn empty_code_keeps_its_children() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let mut tree = document(Element::new("code").with_class("language-json"));
        let mut file = File::new();
        let engine = highlighter.engine().await.unwrap();

        let stats = highlighter.rewrite(engine, &mut tree, &mut file);

        assert!(first_code(&tree).children.is_empty());
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.highlighted, 0);
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn engine_is_created_once() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let a = highlighter.engine().await.unwrap() as *const Engine;
        let b = highlighter.engine().await.unwrap() as *const Engine;
        assert_eq!(a, b);
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn concurrent_first_use_creates_one_engine() {
        let highlighter =
            CodeBlockHighlighter::new(Options::default().with_grammars(vec![grammars::json()]));
        let (a, b) = tokio::join!(highlighter.engine(), highlighter.engine());
        assert!(std::ptr::eq(a.unwrap(), b.unwrap()));
    }

    #[cfg(feature = "lang-json")]
    #[tokio::test]
    async fn engine_errors_are_fatal() {
        let highlighter = CodeBlockHighlighter::new(
            Options::default().with_grammars(vec![grammars::json(), grammars::json()]),
        );
        let mut tree = document(code_block("language-json", "{}"));
        let before = tree.clone();
        let mut file = File::new();

        let err = highlighter.run(&mut tree, &mut file).await.unwrap_err();

        assert!(matches!(err, Error::Engine(_)));
        assert_eq!(tree, before);
    }
}
