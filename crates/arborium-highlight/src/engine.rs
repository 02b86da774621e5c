use crate::error::EngineError;
use crate::render::spans_to_nodes;
use crate::tree_sitter::CompiledGrammar;
use crate::types::{HighlightError, Injection, Span};
use crate::{Grammar, HighlightConfig};
use arborium_hast::Root;
use std::collections::HashSet;
use tracing::{debug, trace};

/// A set of compiled grammars, ready to highlight.
///
/// Creating an engine compiles every grammar's queries, which is slow enough
/// that it runs on Tokio's blocking pool. Once created, an engine is
/// immutable and can be shared freely across threads.
pub struct Engine {
    grammars: Vec<CompiledGrammar>,
    config: HighlightConfig,
}

impl Engine {
    /// Compile `grammars` into an engine.
    ///
    /// Must be awaited from within a Tokio runtime. Fails if two grammars share
    /// a scope name or any query does not compile.
    pub async fn create(
        grammars: Vec<Grammar>,
        config: HighlightConfig,
    ) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for grammar in &grammars {
            if !seen.insert(grammar.scope_name().to_string()) {
                return Err(EngineError::DuplicateScope(grammar.scope_name().to_string()));
            }
        }

        let count = grammars.len();
        let grammars = tokio::task::spawn_blocking(move || {
            grammars
                .into_iter()
                .map(|grammar| {
                    trace!(scope = grammar.scope_name(), "compiling grammar");
                    CompiledGrammar::compile(grammar)
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| EngineError::Interrupted(e.to_string()))??;

        debug!(grammars = count, "highlighting engine ready");
        Ok(Self { grammars, config })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Resolve a language flag (a name, alias, or file extension) to a scope.
    ///
    /// Matching is case-insensitive. Names take precedence over extensions,
    /// and earlier grammars over later ones.
    pub fn flag_to_scope(&self, flag: &str) -> Option<&str> {
        let flag = flag.to_lowercase();
        self.grammars
            .iter()
            .find(|g| g.definition().matches_name(&flag))
            .or_else(|| {
                self.grammars
                    .iter()
                    .find(|g| g.definition().matches_extension(&flag))
            })
            .map(|g| g.scope_name())
    }

    /// Every known name and alias, in grammar order.
    pub fn flags(&self) -> Vec<&str> {
        self.grammars
            .iter()
            .flat_map(|g| g.definition().names())
            .map(String::as_str)
            .collect()
    }

    /// Scope names of the loaded grammars, in grammar order.
    pub fn scopes(&self) -> Vec<&str> {
        self.grammars.iter().map(|g| g.scope_name()).collect()
    }

    /// Scopes that loaded grammars depend on but that are not loaded themselves.
    pub fn missing_scopes(&self) -> Vec<String> {
        let loaded: HashSet<&str> = self.grammars.iter().map(|g| g.scope_name()).collect();
        let mut missing: Vec<String> = Vec::new();

        for grammar in &self.grammars {
            for dependency in grammar.definition().dependencies() {
                if !loaded.contains(dependency.as_str()) && !missing.contains(dependency) {
                    missing.push(dependency.clone());
                }
            }
        }

        missing
    }

    fn grammar(&self, scope: &str) -> Option<&CompiledGrammar> {
        self.grammars.iter().find(|g| g.scope_name() == scope)
    }

    /// Raw spans for `source`, including spans from nested languages.
    pub fn highlight_spans(&self, source: &str, scope: &str) -> Result<Vec<Span>, HighlightError> {
        let grammar = self
            .grammar(scope)
            .ok_or_else(|| HighlightError::UnsupportedScope(scope.into()))?;

        let result = grammar.parse(source);
        let mut all_spans = result.spans;

        if self.config.max_injection_depth > 0 {
            self.process_injections(
                source,
                result.injections,
                0,
                self.config.max_injection_depth,
                &mut all_spans,
            );
        }

        Ok(all_spans)
    }

    /// Highlight `source` with the grammar for `scope`.
    ///
    /// The returned root holds a flat list of text nodes and styled elements
    /// whose text is exactly `source`. Empty source yields an empty root.
    pub fn highlight(&self, source: &str, scope: &str) -> Result<Root, HighlightError> {
        let spans = self.highlight_spans(source, scope)?;
        Ok(Root::new(spans_to_nodes(
            source,
            spans,
            &self.config.html_format,
        )))
    }

    fn process_injections(
        &self,
        source: &str,
        injections: Vec<Injection>,
        base_offset: u32,
        remaining_depth: u32,
        all_spans: &mut Vec<Span>,
    ) {
        if remaining_depth == 0 {
            return;
        }

        for injection in injections {
            let start = injection.start as usize;
            let end = injection.end as usize;
            if end > source.len() || start >= end {
                continue;
            }

            let Some(grammar) = self
                .flag_to_scope(&injection.language)
                .and_then(|scope| self.grammar(scope))
            else {
                debug!(language = %injection.language, "no grammar for injection, skipping");
                continue;
            };

            let Some(injected_text) = source.get(start..end) else {
                continue;
            };
            let result = grammar.parse(injected_text);

            let offset = base_offset + injection.start;
            all_spans.extend(result.spans.into_iter().map(|mut span| {
                span.start += offset;
                span.end += offset;
                span
            }));

            if !result.injections.is_empty() {
                self.process_injections(
                    injected_text,
                    result.injections,
                    offset,
                    remaining_depth - 1,
                    all_spans,
                );
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("scopes", &self.scopes())
            .field("config", &self.config)
            .finish()
    }
}
