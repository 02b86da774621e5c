//! A small, mutable HTML syntax tree.
//!
//! The tree mirrors the shape of [hast](https://github.com/syntax-tree/hast):
//! a [`Root`] owns ordered [`Node`]s, and each [`Element`] carries a tag name,
//! a property map, its children, and an optional source [`Position`].
//!
//! Transforms walk the tree with [`visit_elements_mut`], which hands every
//! element to a callback together with the tag names of its ancestors. The
//! callback decides whether the walk descends into that element.
//!
//! ```
//! use arborium_hast::{Element, Node, Root, Visit, visit_elements_mut};
//!
//! let mut root = Root::new(vec![
//!     Element::new("pre")
//!         .with_child(Element::new("code").with_class("language-rust").with_text("fn main() {}"))
//!         .into(),
//! ]);
//!
//! let mut seen = Vec::new();
//! visit_elements_mut(&mut root, |element, ancestors| {
//!     seen.push((element.tag_name.clone(), ancestors.len()));
//!     Visit::Continue
//! });
//! assert_eq!(seen, [("pre".to_string(), 0), ("code".to_string(), 1)]);
//! assert_eq!(root.to_html(), r#"<pre><code class="language-rust">fn main() {}</code></pre>"#);
//! ```

mod html;
mod node;
mod position;
mod visit;

pub use html::{decode_entities, escape_attribute, escape_text};
pub use node::{CLASS, ClassList, Comment, Element, Node, Properties, PropertyValue, Root, Text};
pub use position::{LineIndex, Point, Position};
pub use visit::{Visit, visit_elements_mut};
