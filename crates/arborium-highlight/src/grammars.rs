//! Bundled grammars.
//!
//! Each grammar is behind its own `lang-*` feature. [`common`] returns every
//! enabled grammar from the `common` set and [`all`] adds the rest. Both are
//! closed under dependencies when their whole feature set is enabled.

use crate::Grammar;

/// Shell scripts.
#[cfg(feature = "lang-bash")]
pub fn bash() -> Grammar {
    Grammar::new("source.shell", tree_sitter_bash::LANGUAGE.into())
        .with_names(["shell", "bash", "sh", "zsh", "shell-script"])
        .with_extensions([".sh", ".bash", ".zsh"])
        .with_highlights_query(tree_sitter_bash::HIGHLIGHT_QUERY)
}

#[cfg(feature = "lang-c")]
pub fn c() -> Grammar {
    Grammar::new("source.c", tree_sitter_c::LANGUAGE.into())
        .with_names(["c"])
        .with_extensions([".c", ".h"])
        .with_highlights_query(tree_sitter_c::HIGHLIGHT_QUERY)
}

/// C++. The C++ query only covers what C++ adds, so it is layered on the C query.
#[cfg(feature = "lang-cpp")]
pub fn cpp() -> Grammar {
    Grammar::new("source.cpp", tree_sitter_cpp::LANGUAGE.into())
        .with_names(["cpp", "c++"])
        .with_extensions([".cpp", ".cc", ".cxx", ".hpp", ".hh", ".c++"])
        .with_highlights_query(format!(
            "{}\n{}",
            tree_sitter_c::HIGHLIGHT_QUERY,
            tree_sitter_cpp::HIGHLIGHT_QUERY
        ))
}

#[cfg(feature = "lang-css")]
pub fn css() -> Grammar {
    Grammar::new("source.css", tree_sitter_css::LANGUAGE.into())
        .with_names(["css"])
        .with_extensions([".css"])
        .with_highlights_query(tree_sitter_css::HIGHLIGHTS_QUERY)
}

#[cfg(feature = "lang-go")]
pub fn go() -> Grammar {
    Grammar::new("source.go", tree_sitter_go::LANGUAGE.into())
        .with_names(["go", "golang"])
        .with_extensions([".go"])
        .with_highlights_query(tree_sitter_go::HIGHLIGHTS_QUERY)
}

/// HTML, with `<style>` and `<script>` contents highlighted as CSS and JavaScript.
#[cfg(feature = "lang-html")]
pub fn html() -> Grammar {
    Grammar::new("text.html.basic", tree_sitter_html::LANGUAGE.into())
        .with_names(["html", "xhtml"])
        .with_extensions([".html", ".htm", ".xhtml"])
        .with_dependencies(["source.css", "source.js"])
        .with_highlights_query(tree_sitter_html::HIGHLIGHTS_QUERY)
        .with_injections_query(tree_sitter_html::INJECTIONS_QUERY)
}

#[cfg(feature = "lang-javascript")]
pub fn javascript() -> Grammar {
    Grammar::new("source.js", tree_sitter_javascript::LANGUAGE.into())
        .with_names(["javascript", "js", "node"])
        .with_extensions([".js", ".cjs", ".mjs", ".jsx"])
        .with_highlights_query(tree_sitter_javascript::HIGHLIGHT_QUERY)
        .with_injections_query(tree_sitter_javascript::INJECTIONS_QUERY)
}

#[cfg(feature = "lang-json")]
pub fn json() -> Grammar {
    Grammar::new("source.json", tree_sitter_json::LANGUAGE.into())
        .with_names(["json", "jsonc"])
        .with_extensions([".json", ".jsonc"])
        .with_highlights_query(tree_sitter_json::HIGHLIGHTS_QUERY)
}

/// Markdown block structure. Inline content is injected as `markdown_inline`
/// and fenced code as whatever language its info string names.
#[cfg(feature = "lang-markdown")]
pub fn markdown() -> Grammar {
    Grammar::new("text.md", tree_sitter_md::LANGUAGE.into())
        .with_names(["markdown", "md"])
        .with_extensions([".md", ".markdown"])
        .with_dependencies(["text.md.inline"])
        .with_highlights_query(tree_sitter_md::HIGHLIGHT_QUERY_BLOCK)
        .with_injections_query(tree_sitter_md::INJECTION_QUERY_BLOCK)
}

#[cfg(feature = "lang-markdown")]
pub fn markdown_inline() -> Grammar {
    Grammar::new("text.md.inline", tree_sitter_md::INLINE_LANGUAGE.into())
        .with_names(["markdown_inline"])
        .with_highlights_query(tree_sitter_md::HIGHLIGHT_QUERY_INLINE)
        .with_injections_query(tree_sitter_md::INJECTION_QUERY_INLINE)
}

#[cfg(feature = "lang-python")]
pub fn python() -> Grammar {
    Grammar::new("source.python", tree_sitter_python::LANGUAGE.into())
        .with_names(["python", "py", "python3"])
        .with_extensions([".py", ".pyi", ".pyw"])
        .with_highlights_query(tree_sitter_python::HIGHLIGHTS_QUERY)
}

#[cfg(feature = "lang-rust")]
pub fn rust() -> Grammar {
    Grammar::new("source.rust", tree_sitter_rust::LANGUAGE.into())
        .with_names(["rust", "rs"])
        .with_extensions([".rs"])
        .with_highlights_query(tree_sitter_rust::HIGHLIGHTS_QUERY)
        .with_injections_query(tree_sitter_rust::INJECTIONS_QUERY)
}

#[cfg(feature = "lang-toml")]
pub fn toml() -> Grammar {
    Grammar::new("source.toml", tree_sitter_toml_ng::LANGUAGE.into())
        .with_names(["toml"])
        .with_extensions([".toml"])
        .with_highlights_query(tree_sitter_toml_ng::HIGHLIGHTS_QUERY)
}

/// The TypeScript query only covers what TypeScript adds to JavaScript.
#[cfg(feature = "lang-typescript")]
fn typescript_query() -> String {
    format!(
        "{}\n{}",
        tree_sitter_javascript::HIGHLIGHT_QUERY,
        tree_sitter_typescript::HIGHLIGHTS_QUERY
    )
}

#[cfg(feature = "lang-typescript")]
pub fn typescript() -> Grammar {
    Grammar::new("source.ts", tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .with_names(["typescript", "ts"])
        .with_extensions([".ts", ".cts", ".mts"])
        .with_highlights_query(typescript_query())
}

#[cfg(feature = "lang-typescript")]
pub fn tsx() -> Grammar {
    Grammar::new("source.tsx", tree_sitter_typescript::LANGUAGE_TSX.into())
        .with_names(["tsx"])
        .with_extensions([".tsx"])
        .with_highlights_query(typescript_query())
}

/// Grammars for the most common languages on the web.
pub fn common() -> Vec<Grammar> {
    #[allow(unused_mut)]
    let mut grammars = Vec::new();

    #[cfg(feature = "lang-bash")]
    grammars.push(bash());
    #[cfg(feature = "lang-c")]
    grammars.push(c());
    #[cfg(feature = "lang-css")]
    grammars.push(css());
    #[cfg(feature = "lang-go")]
    grammars.push(go());
    #[cfg(feature = "lang-html")]
    grammars.push(html());
    #[cfg(feature = "lang-javascript")]
    grammars.push(javascript());
    #[cfg(feature = "lang-json")]
    grammars.push(json());
    #[cfg(feature = "lang-markdown")]
    {
        grammars.push(markdown());
        grammars.push(markdown_inline());
    }
    #[cfg(feature = "lang-python")]
    grammars.push(python());
    #[cfg(feature = "lang-rust")]
    grammars.push(rust());
    #[cfg(feature = "lang-typescript")]
    {
        grammars.push(typescript());
        grammars.push(tsx());
    }

    grammars
}

/// Every bundled grammar that is enabled.
pub fn all() -> Vec<Grammar> {
    #[allow(unused_mut)]
    let mut grammars = common();

    #[cfg(feature = "lang-cpp")]
    grammars.push(cpp());
    #[cfg(feature = "lang-toml")]
    grammars.push(toml());

    grammars
}
