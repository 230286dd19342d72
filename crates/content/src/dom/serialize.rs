// ABOUTME: Serializes the content tree back to an HTML string.
// ABOUTME: Escapes text and attribute values, writes void elements as <tag />, joins root blocks with newlines.

use super::tags::is_void_element;
use super::{Element, Fragment, Node};

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a fragment. Top-level nodes are separated by a newline; comments are dropped.
pub fn to_html(fragment: &Fragment) -> String {
    let mut out = String::new();
    for (i, node) in fragment
        .children
        .iter()
        .filter(|n| !matches!(n, Node::Comment(_)))
        .enumerate()
    {
        if i > 0 {
            out.push('\n');
        }
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&escape_html(t)),
        Node::Element(el) => write_element(el, out),
        Node::Comment(_) => {}
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(&escape_html(v));
        out.push('"');
    }

    if is_void_element(&el.name) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
