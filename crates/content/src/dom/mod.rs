// ABOUTME: Owned content tree and the ordered normalization passes.
// ABOUTME: Node/Element/Fragment types, splice helpers, and the normalize() entry point.

//! Content tree and normalization passes.
//!
//! The tree is a plain tagged union with owned child vectors. Passes mutate it
//! in place; removal and unwrapping are explicit splices on the parent's
//! children.

pub mod backend;
pub mod cleaners;
pub mod headings;
pub mod paragraphs;
pub mod serialize;
pub mod structure;
pub mod tags;
pub mod whitespace;

use tracing::trace;

pub use backend::{HtmlBackend, ScraperBackend, MAX_DEPTH};

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with its ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// The root of a parsed fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns true if this is an element with the given tag name.
    pub fn is_element(&self, name: &str) -> bool {
        matches!(self, Node::Element(el) if el.name == name)
    }

    /// Returns true if this is a text node containing only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }

    /// Concatenated text of this node and its descendants. Comments contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.push_text(out);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Builder-style attribute setter, mostly for tests and custom backends.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }

    /// Returns true if any descendant element satisfies `pred`.
    pub fn has_descendant(&self, pred: &impl Fn(&Element) -> bool) -> bool {
        self.children.iter().any(|child| match child {
            Node::Element(el) => pred(el) || el.has_descendant(pred),
            _ => false,
        })
    }

    pub fn has_image(&self) -> bool {
        self.has_descendant(&|el| el.name == "img")
    }

    /// Empty trimmed text and no image descendant.
    pub fn is_blank(&self) -> bool {
        self.text_content().trim().is_empty() && !self.has_image()
    }
}

impl Fragment {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }
}

/// Replaces the element at `index` with its children.
///
/// Returns the number of nodes spliced in. Non-element nodes are left in place.
pub fn unwrap_at(children: &mut Vec<Node>, index: usize) -> usize {
    match children.remove(index) {
        Node::Element(el) => {
            let count = el.children.len();
            children.splice(index..index, el.children);
            count
        }
        other => {
            children.insert(index, other);
            1
        }
    }
}

/// Trims leading whitespace from the first text leaf, dropping text that becomes empty.
///
/// Returns true once real content (non-blank text or a void element) is reached.
pub fn trim_start_leaf(children: &mut Vec<Node>) -> bool {
    let mut i = 0;
    while i < children.len() {
        let emptied = match &mut children[i] {
            Node::Text(t) => {
                let trimmed = t.trim_start();
                if !trimmed.is_empty() {
                    if trimmed.len() != t.len() {
                        *t = trimmed.to_string();
                    }
                    return true;
                }
                true
            }
            Node::Element(el) => {
                if tags::is_void_element(&el.name) || trim_start_leaf(&mut el.children) {
                    return true;
                }
                false
            }
            Node::Comment(_) => false,
        };
        if emptied {
            children.remove(i);
        } else {
            i += 1;
        }
    }
    false
}

/// Trims trailing whitespace from the last text leaf, dropping text that becomes empty.
pub fn trim_end_leaf(children: &mut Vec<Node>) -> bool {
    let mut i = children.len();
    while i > 0 {
        i -= 1;
        let emptied = match &mut children[i] {
            Node::Text(t) => {
                let trimmed = t.trim_end();
                if !trimmed.is_empty() {
                    if trimmed.len() != t.len() {
                        *t = trimmed.to_string();
                    }
                    return true;
                }
                true
            }
            Node::Element(el) => {
                if tags::is_void_element(&el.name) || trim_end_leaf(&mut el.children) {
                    return true;
                }
                false
            }
            Node::Comment(_) => false,
        };
        if emptied {
            children.remove(i);
        }
    }
    false
}

/// Runs every normalization pass over a parsed HTML fragment, in order.
pub fn normalize(fragment: &mut Fragment) {
    let removed = cleaners::remove_unwanted(&mut fragment.children);
    trace!(removed, "removed unwanted elements");

    cleaners::strip_attributes(&mut fragment.children);
    headings::normalize_headings(&mut fragment.children);
    paragraphs::normalize_paragraphs(&mut fragment.children);
    cleaners::flatten_disallowed(&mut fragment.children, cleaners::Context::Flow);
    whitespace::collapse(&mut fragment.children);
    structure::enforce_block_structure(fragment);

    trace!(blocks = fragment.children.len(), "normalized fragment");
}
