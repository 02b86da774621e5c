//! Rendering highlight spans into HTML syntax tree nodes.
//!
//! Raw spans from grammar parsers overlap, repeat, and use many capture names
//! for the same color. Rendering:
//!
//! 1. deduplicates spans with identical ranges (styled beats unstyled, then
//!    the later query pattern wins),
//! 2. maps captures to theme slots and merges adjacent spans of the same slot,
//! 3. flattens nesting so every piece of text is wrapped by at most one
//!    element, the innermost span covering it.
//!
//! The concatenated text of the produced nodes is always exactly the source.

use crate::{HtmlFormat, Span};
use arborium_hast::{Element, Node};
use arborium_theme::{tag_for_capture, tag_to_name};
use std::collections::HashMap;
use std::ops::Range;

/// A span mapped onto a theme slot tag.
#[derive(Debug, Clone)]
struct NormalizedSpan {
    start: u32,
    end: u32,
    tag: &'static str,
}

/// Keep one span per `(start, end)` range.
fn dedupe(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let mut deduped: HashMap<(u32, u32), Span> = HashMap::new();
    for span in spans {
        let key = (span.start, span.end);
        let Some(existing) = deduped.get(&key) else {
            deduped.insert(key, span);
            continue;
        };

        let new_styled = tag_for_capture(&span.capture).is_some();
        let existing_styled = tag_for_capture(&existing.capture).is_some();
        let replace = match (new_styled, existing_styled) {
            (true, false) => true,
            (false, true) => false,
            _ => span.pattern_index >= existing.pattern_index,
        };
        if replace {
            deduped.insert(key, span);
        }
    }

    deduped.into_values().collect()
}

/// Map captures to slot tags and merge touching spans that share a tag.
fn normalize_and_coalesce(spans: Vec<Span>) -> Vec<NormalizedSpan> {
    let mut normalized: Vec<NormalizedSpan> = spans
        .into_iter()
        .filter_map(|span| {
            tag_for_capture(&span.capture).map(|tag| NormalizedSpan {
                start: span.start,
                end: span.end,
                tag,
            })
        })
        .collect();

    normalized.sort_by_key(|s| (s.start, s.end));

    let mut coalesced: Vec<NormalizedSpan> = Vec::with_capacity(normalized.len());
    for span in normalized {
        if let Some(last) = coalesced.last_mut()
            && span.tag == last.tag
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        coalesced.push(span);
    }

    coalesced
}

/// Build the element wrapping text of one slot.
fn make_element(tag: &str, format: &HtmlFormat) -> Element {
    match format {
        HtmlFormat::CustomElements => Element::new(format!("a-{tag}")),
        HtmlFormat::CustomElementsWithPrefix(prefix) => Element::new(format!("{prefix}-{tag}")),
        HtmlFormat::ClassNames => match tag_to_name(tag) {
            Some(name) => Element::new("span").with_class(name),
            None => Element::new("span"),
        },
        HtmlFormat::ClassNamesWithPrefix(prefix) => match tag_to_name(tag) {
            Some(name) => Element::new("span").with_class(format!("{prefix}-{name}")),
            None => Element::new("span"),
        },
    }
}

/// Split `source` into byte ranges, each tagged by the innermost covering span.
///
/// Adjacent ranges never share a tag.
fn segments(source: &str, spans: &[NormalizedSpan]) -> Vec<(Option<&'static str>, Range<usize>)> {
    // (position, is_start, span index); ends sort before starts at a position
    let mut events: Vec<(u32, bool, usize)> = Vec::with_capacity(spans.len() * 2);
    for (i, span) in spans.iter().enumerate() {
        events.push((span.start, true, i));
        events.push((span.end, false, i));
    }
    events.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut out: Vec<(Option<&'static str>, Range<usize>)> = Vec::new();
    let mut push = |tag: Option<&'static str>, range: Range<usize>| match out.last_mut() {
        Some((last_tag, last)) if *last_tag == tag && last.end == range.start => {
            last.end = range.end;
        }
        _ => out.push((tag, range)),
    };

    let mut last_pos = 0usize;
    let mut stack: Vec<usize> = Vec::new();

    for (pos, is_start, span_idx) in events {
        let pos = (pos as usize).min(source.len());

        if pos > last_pos && source.is_char_boundary(pos) {
            push(stack.last().map(|&i| spans[i].tag), last_pos..pos);
            last_pos = pos;
        }

        if is_start {
            stack.push(span_idx);
        } else if let Some(idx) = stack.iter().rposition(|&x| x == span_idx) {
            stack.remove(idx);
        }
    }

    if last_pos < source.len() {
        push(stack.last().map(|&i| spans[i].tag), last_pos..source.len());
    }

    out
}

/// Convert spans over `source` into a flat list of nodes.
///
/// Unstyled text becomes text nodes; styled text becomes elements shaped by
/// `format`, each holding a single text node. Empty source yields no nodes.
pub fn spans_to_nodes(source: &str, spans: Vec<Span>, format: &HtmlFormat) -> Vec<Node> {
    if source.is_empty() {
        return Vec::new();
    }

    let spans = normalize_and_coalesce(dedupe(spans));
    if spans.is_empty() {
        return vec![Node::text(source)];
    }

    segments(source, &spans)
        .into_iter()
        .map(|(tag, range)| {
            let text = &source[range];
            match tag {
                Some(tag) => make_element(tag, format).with_text(text).into(),
                None => Node::text(text),
            }
        })
        .collect()
}
