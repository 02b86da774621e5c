//! Tree-sitter backed grammar compilation and parsing.
//!
//! A [`CompiledGrammar`] owns the compiled highlight and injection queries for
//! one [`Grammar`]. Parsing creates a fresh parser and query cursor per call,
//! so a compiled grammar can be shared across threads.

use crate::Grammar;
use crate::error::EngineError;
use crate::types::{Injection, ParseResult, Span};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

/// Which query of a grammar failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Highlights,
    Injections,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Highlights => write!(f, "highlights"),
            QueryKind::Injections => write!(f, "injections"),
        }
    }
}

struct InjectionQuery {
    query: Query,
    content_idx: Option<u32>,
    language_idx: Option<u32>,
}

/// A grammar whose queries have been compiled against its language.
pub struct CompiledGrammar {
    definition: Grammar,
    language: Language,
    highlights: Query,
    injections: Option<InjectionQuery>,
}

impl CompiledGrammar {
    /// Compile the grammar's queries.
    pub fn compile(definition: Grammar) -> Result<Self, EngineError> {
        let language = definition.language().clone();
        let scope = definition.scope_name().to_string();

        // Catch ABI mismatches up front rather than on the first parse.
        Parser::new()
            .set_language(&language)
            .map_err(|e| EngineError::Language {
                scope: scope.clone(),
                message: e.to_string(),
            })?;

        let highlights = Query::new(&language, definition.highlights_query()).map_err(|e| {
            EngineError::Query {
                scope: scope.clone(),
                kind: QueryKind::Highlights,
                message: e.to_string(),
            }
        })?;

        let injections = if definition.injections_query().trim().is_empty() {
            None
        } else {
            let query = Query::new(&language, definition.injections_query()).map_err(|e| {
                EngineError::Query {
                    scope: scope.clone(),
                    kind: QueryKind::Injections,
                    message: e.to_string(),
                }
            })?;

            let mut content_idx = None;
            let mut language_idx = None;
            for (i, name) in query.capture_names().iter().enumerate() {
                match *name {
                    "injection.content" => content_idx = Some(i as u32),
                    "injection.language" => language_idx = Some(i as u32),
                    _ => {}
                }
            }

            Some(InjectionQuery {
                query,
                content_idx,
                language_idx,
            })
        };

        Ok(Self {
            definition,
            language,
            highlights,
            injections,
        })
    }

    pub fn definition(&self) -> &Grammar {
        &self.definition
    }

    pub fn scope_name(&self) -> &str {
        self.definition.scope_name()
    }

    /// Parse `text` and collect highlight spans and injection points.
    pub fn parse(&self, text: &str) -> ParseResult {
        let mut parser = Parser::new();
        if parser.set_language(&self.language).is_err() {
            return ParseResult::default();
        }
        let Some(tree) = parser.parse(text, None) else {
            return ParseResult::default();
        };

        let root_node = tree.root_node();
        let source = text.as_bytes();
        let mut cursor = QueryCursor::new();

        let spans = self.collect_spans(&mut cursor, root_node, source);
        let injections = self.collect_injections(&mut cursor, root_node, source);
        ParseResult { spans, injections }
    }

    fn collect_spans(&self, cursor: &mut QueryCursor, root: Node<'_>, source: &[u8]) -> Vec<Span> {
        let capture_names = self.highlights.capture_names();
        let mut spans = Vec::new();

        let mut matches = cursor.matches(&self.highlights, root, source);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let capture_name = capture_names[capture.index as usize];

                // Internal captures (`_foo`) and injection markers carry no style.
                if capture_name.starts_with('_') || capture_name.starts_with("injection.") {
                    continue;
                }

                spans.push(Span {
                    start: capture.node.start_byte() as u32,
                    end: capture.node.end_byte() as u32,
                    capture: capture_name.to_string(),
                    pattern_index: m.pattern_index as u32,
                });
            }
        }

        spans
    }

    fn collect_injections(
        &self,
        cursor: &mut QueryCursor,
        root: Node<'_>,
        source: &[u8],
    ) -> Vec<Injection> {
        let Some(injection_query) = &self.injections else {
            return Vec::new();
        };
        let query = &injection_query.query;
        let mut injections = Vec::new();

        let mut matches = cursor.matches(query, root, source);
        while let Some(m) = matches.next() {
            let mut content_node = None;
            let mut language_name = None;
            let mut include_children = false;

            // `#set! injection.language "css"` takes precedence over a captured name.
            for prop in query.property_settings(m.pattern_index) {
                match prop.key.as_ref() {
                    "injection.language" => {
                        if let Some(value) = &prop.value {
                            language_name = Some(value.to_string());
                        }
                    }
                    "injection.include-children" => include_children = true,
                    _ => {}
                }
            }

            for capture in m.captures {
                if Some(capture.index) == injection_query.content_idx {
                    content_node = Some(capture.node);
                } else if Some(capture.index) == injection_query.language_idx
                    && language_name.is_none()
                    && let Ok(lang) = capture.node.utf8_text(source)
                {
                    language_name = Some(lang.trim().to_string());
                }
            }

            if let (Some(node), Some(language)) = (content_node, language_name)
                && !language.is_empty()
            {
                injections.push(Injection {
                    start: node.start_byte() as u32,
                    end: node.end_byte() as u32,
                    language,
                    include_children,
                });
            }
        }

        injections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "lang-rust")]
    #[test]
    fn rust_keywords_are_captured() {
        let grammar = CompiledGrammar::compile(crate::grammars::rust()).unwrap();
        let result = grammar.parse("fn main() {}");
        let fn_span = result
            .spans
            .iter()
            .find(|s| s.start == 0 && s.end == 2)
            .expect("a span for `fn`");
        assert!(fn_span.capture.starts_with("keyword"));
    }

    #[cfg(feature = "lang-html")]
    #[test]
    fn html_reports_script_and_style_injections() {
        let grammar = CompiledGrammar::compile(crate::grammars::html()).unwrap();
        let source = "<style>a { color: red }</style><script>let x = 1</script>";
        let result = grammar.parse(source);
        let languages: Vec<_> = result
            .injections
            .iter()
            .map(|i| i.language.as_str())
            .collect();
        assert!(languages.contains(&"css"), "{languages:?}");
        assert!(languages.contains(&"javascript"), "{languages:?}");

        let css = result
            .injections
            .iter()
            .find(|i| i.language == "css")
            .unwrap();
        assert_eq!(&source[css.start as usize..css.end as usize], "a { color: red }");
    }

    #[cfg(feature = "lang-json")]
    #[test]
    fn broken_query_is_reported_with_its_scope() {
        let grammar = crate::grammars::json().with_highlights_query("(not_a_node) @oops");
        let err = match CompiledGrammar::compile(grammar) {
            Ok(_) => panic!("query should not compile"),
            Err(err) => err,
        };
        assert!(matches!(
            err,
            EngineError::Query { ref scope, kind: QueryKind::Highlights, .. } if scope == "source.json"
        ));
    }

    #[cfg(feature = "lang-json")]
    #[test]
    fn empty_text_parses_to_nothing() {
        let grammar = CompiledGrammar::compile(crate::grammars::json()).unwrap();
        assert_eq!(grammar.parse(""), ParseResult::default());
    }
}
