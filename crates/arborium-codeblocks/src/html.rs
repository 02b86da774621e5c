//! Highlighting code blocks in HTML text.
//!
//! Documents are streamed through lol_html twice. The first pass collects
//! every `code` element's classes, text, start tag location and open
//! ancestors. Those are run through the tree rewriter as a small [`Root`],
//! one ancestor chain per block. The second pass replaces the inner HTML of
//! the blocks that changed. Everything else is passed through byte for byte.

use crate::diagnostics::File;
use crate::transform::{CodeBlockHighlighter, RewriteStats};
use crate::Error;
use arborium_hast::{CLASS, Element, LineIndex, Node, PropertyValue, Root, decode_entities};
use arborium_highlight::Engine;
use lol_html::html_content::{ContentType, EndTag};
use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

/// A `code` element as seen by the first pass.
#[derive(Debug, Default)]
struct CollectedBlock {
    class: Option<String>,
    raw_text: String,
    /// Contains child elements, so it is already marked up.
    nested: bool,
    /// Byte range of the start tag.
    location: Range<usize>,
    /// Tag names of the open elements around the block, outermost first.
    ancestors: Vec<String>,
}

impl CollectedBlock {
    fn to_element(&self) -> Element {
        let mut code = Element::new("code");
        if let Some(class) = &self.class {
            let classes: Vec<String> = class.split_whitespace().map(String::from).collect();
            code = code.with_property(CLASS, PropertyValue::List(classes));
        }
        let text = decode_entities(&self.raw_text);
        if !text.is_empty() {
            code = code.with_text(text);
        }
        code
    }

    /// The block wrapped in bare copies of its ancestors.
    fn to_node(&self, lines: &LineIndex<'_>) -> Node {
        let code = self
            .to_element()
            .with_position(lines.position(self.location.clone()));
        self.ancestors
            .iter()
            .rev()
            .fold(code, |child, tag| Element::new(tag.as_str()).with_child(child))
            .into()
    }
}

/// The `code` element at the bottom of a chain built by [`CollectedBlock::to_node`].
fn innermost_code(node: &Node) -> Option<&Element> {
    let mut element = node.as_element()?;
    while element.tag_name != "code" {
        element = element.children.first()?.as_element()?;
    }
    Some(element)
}

impl CodeBlockHighlighter {
    /// Highlight every code block in an HTML document or fragment.
    pub async fn run_html(&self, html: &str, file: &mut File) -> Result<String, Error> {
        let engine = self.engine().await?;
        let (output, _) = self.rewrite_html(engine, html, file)?;
        Ok(output)
    }

    /// The synchronous part of [`run_html`](Self::run_html).
    pub fn rewrite_html(
        &self,
        engine: &Engine,
        html: &str,
        file: &mut File,
    ) -> Result<(String, RewriteStats), Error> {
        // Most pages have no tagged code at all.
        if !html.contains("language-") {
            return Ok((html.to_string(), RewriteStats::default()));
        }

        let blocks = collect_blocks(html)?;

        let candidates: Vec<usize> = (0..blocks.len()).filter(|&i| !blocks[i].nested).collect();
        let lines = LineIndex::new(html);
        let mut tree = Root::new(
            candidates
                .iter()
                .map(|&i| blocks[i].to_node(&lines))
                .collect(),
        );
        let before = tree.clone();

        let stats = self.rewrite(engine, &mut tree, file);

        let replacements: HashMap<usize, String> = candidates
            .iter()
            .zip(tree.children.iter().zip(&before.children))
            .filter(|(_, (after, before))| after != before)
            .filter_map(|(&i, (after, _))| innermost_code(after).map(|el| (i, el.inner_html())))
            .collect();

        if replacements.is_empty() {
            return Ok((html.to_string(), stats));
        }

        let mut index = 0usize;
        let output = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("code", |el| {
                    if let Some(inner) = replacements.get(&index) {
                        el.set_inner_content(inner, ContentType::Html);
                    }
                    index += 1;
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )?;

        Ok((output, stats))
    }
}

/// Every `code` element in document order.
fn collect_blocks(html: &str) -> Result<Vec<CollectedBlock>, Error> {
    let blocks = RefCell::new(Vec::<CollectedBlock>::new());
    let open = Rc::new(RefCell::new(Vec::<String>::new()));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("*", |el: &mut lol_html::html_content::Element<'_, '_>| {
                    let tag = el.tag_name().to_ascii_lowercase();
                    let Some(handlers) = el.end_tag_handlers() else {
                        // Void elements never hold anything.
                        return Ok(());
                    };
                    open.borrow_mut().push(tag);

                    let open = Rc::clone(&open);
                    handlers.push(Box::new(move |end: &mut EndTag<'_>| {
                        close(&mut open.borrow_mut(), &end.name());
                        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
                    }));
                    Ok(())
                }),
                element!("code", |el| {
                    let mut ancestors = open.borrow().clone();
                    if ancestors.last().is_some_and(|tag| tag == "code") {
                        ancestors.pop();
                    }
                    blocks.borrow_mut().push(CollectedBlock {
                        class: el.get_attribute("class"),
                        location: el.source_location().bytes(),
                        ancestors,
                        ..Default::default()
                    });
                    Ok(())
                }),
                element!("code *", |el| {
                    let mut blocks = blocks.borrow_mut();
                    let len = blocks.len();
                    if let Some(last) = blocks.last_mut() {
                        last.nested = true;
                    }
                    // A `code` directly inside a `code` was just pushed, so
                    // its container is the one before it.
                    if el.tag_name() == "code" && len >= 2 {
                        blocks[len - 2].nested = true;
                    }
                    Ok(())
                }),
                text!("code", |chunk| {
                    if let Some(last) = blocks.borrow_mut().last_mut() {
                        last.raw_text.push_str(chunk.as_str());
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(blocks.into_inner())
}

/// Pop the open element stack down to and including `name`.
///
/// Elements above it were closed implicitly. A stray end tag leaves the
/// stack alone.
fn close(open: &mut Vec<String>, name: &str) {
    if let Some(at) = open.iter().rposition(|tag| tag.eq_ignore_ascii_case(name)) {
        open.truncate(at);
    }
}
