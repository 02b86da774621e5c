//! Theme slots for arborium syntax highlighting.
//!
//! Maps tree-sitter capture names onto a small, fixed set of categories so
//! that highlighted output only ever uses a handful of tags or class names.

pub mod highlights;

pub use highlights::{ThemeSlot, capture_to_slot, tag_for_capture, tag_to_name};
