//! Depth-first traversal over elements.

use crate::{Element, Node, Root};

/// What the walk should do after visiting an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the element's children.
    Continue,
    /// Do not visit the element's children.
    Skip,
}

/// Visit every element in pre-order.
///
/// The callback receives the element and the tag names of its ancestors,
/// outermost first. Returning [`Visit::Skip`] prunes the element's subtree;
/// the callback may freely replace the element's children before doing so.
pub fn visit_elements_mut<F>(root: &mut Root, mut visitor: F)
where
    F: FnMut(&mut Element, &[String]) -> Visit,
{
    let mut ancestors = Vec::new();
    walk(&mut root.children, &mut ancestors, &mut visitor);
}

fn walk<F>(children: &mut [Node], ancestors: &mut Vec<String>, visitor: &mut F)
where
    F: FnMut(&mut Element, &[String]) -> Visit,
{
    for child in children {
        let Node::Element(element) = child else {
            continue;
        };

        if visitor(element, ancestors) == Visit::Skip {
            continue;
        }

        ancestors.push(element.tag_name.clone());
        walk(&mut element.children, ancestors, visitor);
        ancestors.pop();
    }
}
