use crate::Position;
use crate::html::{VOID_ELEMENTS, escape_attribute, escape_text};
use std::collections::BTreeMap;

/// Property name holding an element's classes.
pub const CLASS: &str = "class";

/// Element properties, keyed by attribute name.
///
/// A `BTreeMap` keeps serialization deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// The value of a single element property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A plain string attribute such as `id` or `href`.
    String(String),
    /// A space-separated token list such as `class`.
    List(Vec<String>),
    /// A boolean attribute such as `hidden`. `false` is omitted on output.
    Bool(bool),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// What an element's `class` property looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassList<'a> {
    /// The element has no `class` property.
    Absent,
    /// The property exists but is not a token list.
    Malformed,
    /// The element's classes, in document order.
    Present(&'a [String]),
}

/// The root of a document or fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            position: None,
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Serialize the tree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }
}

/// Any node that can appear below a [`Root`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    /// A text node without position information.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Element(element) => element.position,
            Node::Text(text) => text.position,
            Node::Comment(comment) => comment.position,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(&text.value),
            Node::Comment(_) => {}
        }
    }

    /// Append this node, serialized as HTML, to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&escape_text(&text.value)),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(&comment.value);
                out.push_str("-->");
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub properties: Properties,
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
            position: None,
        }
    }

    /// Append a class, creating the class list if needed.
    ///
    /// A non-list `class` property is replaced.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        match self.properties.get_mut(CLASS) {
            Some(PropertyValue::List(classes)) => classes.push(class),
            _ => {
                self.properties
                    .insert(CLASS.to_string(), PropertyValue::List(vec![class]));
            }
        }
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(self, value: impl Into<String>) -> Self {
        self.with_child(Node::text(value))
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Inspect the `class` property.
    pub fn class_list(&self) -> ClassList<'_> {
        match self.properties.get(CLASS) {
            None => ClassList::Absent,
            Some(PropertyValue::List(classes)) => ClassList::Present(classes),
            Some(_) => ClassList::Malformed,
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Serialize this element and its subtree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialize only the children, as `innerHTML` would.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag_name);
        for (name, value) in &self.properties {
            match value {
                PropertyValue::String(value) => {
                    write_attribute(out, name, value);
                }
                PropertyValue::List(tokens) => {
                    write_attribute(out, name, &tokens.join(" "));
                }
                PropertyValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                PropertyValue::Bool(false) => {}
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag_name.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

/// A run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub position: Option<Position>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            position: None,
        }
    }
}

/// An HTML comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
    pub position: Option<Position>,
}
