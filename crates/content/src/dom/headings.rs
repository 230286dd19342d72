// ABOUTME: Heading normalization for story content.
// ABOUTME: Unwraps nested headings, reduces heading children to emphasis, trims text, rewrites h1 to h2.

use super::tags::{is_heading, HEADING_INLINE_TAGS};
use super::{trim_end_leaf, trim_start_leaf, unwrap_at, Element, Node};

/// Normalize every heading in the tree. Returns the number of headings touched.
pub fn normalize_headings(children: &mut [Node]) -> usize {
    let mut count = 0;
    for child in children.iter_mut() {
        let Node::Element(el) = child else {
            continue;
        };
        if is_heading(&el.name) {
            normalize_heading(el);
            count += 1;
        } else {
            count += normalize_headings(&mut el.children);
        }
    }
    count
}

fn normalize_heading(el: &mut Element) {
    unwrap_nested_headings(&mut el.children);
    simplify_children(&mut el.children);
    trim_start_leaf(&mut el.children);
    trim_end_leaf(&mut el.children);

    // h1 is reserved for the story title
    if el.name == "h1" {
        el.name = "h2".to_string();
    }
}

/// Splice the children of any heading found below a heading into its position.
pub fn unwrap_nested_headings(children: &mut Vec<Node>) {
    let mut i = 0;
    while i < children.len() {
        if matches!(&children[i], Node::Element(el) if is_heading(&el.name)) {
            unwrap_at(children, i);
            continue;
        }
        if let Node::Element(el) = &mut children[i] {
            unwrap_nested_headings(&mut el.children);
        }
        i += 1;
    }
}

/// Keep only emphasis elements; anything else becomes its text content.
fn simplify_children(children: &mut [Node]) {
    for child in children.iter_mut() {
        let Node::Element(el) = &mut *child else {
            continue;
        };
        if HEADING_INLINE_TAGS.contains(&el.name.as_str()) {
            simplify_children(&mut el.children);
        } else {
            *child = Node::Text(el.text_content());
        }
    }
}
