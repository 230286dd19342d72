// ABOUTME: Structural enforcement: the root holds only block-level nodes.
// ABOUTME: Wraps each orphaned text or inline node in its own paragraph, groups stray list items, trims block edges.

use std::collections::VecDeque;

use super::paragraphs::normalize_line_breaks;
use super::tags::{self, ROOT_BLOCK_TAGS, TRIMMED_BLOCK_TAGS};
use super::whitespace::normalize_text;
use super::{trim_end_leaf, trim_start_leaf, Element, Fragment, Node};

/// How a root-level node is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Block,
    Inline,
    ListItem,
    Unwrap,
    Drop,
}

fn placement(node: &Node) -> Placement {
    match node {
        Node::Text(_) => Placement::Inline,
        Node::Comment(_) => Placement::Drop,
        Node::Element(el) if ROOT_BLOCK_TAGS.contains(&el.name.as_str()) => Placement::Block,
        Node::Element(el) if el.name == "li" => Placement::ListItem,
        // Inline wrappers holding blocks cannot sit inside a paragraph
        Node::Element(el) if el.has_descendant(&|d| tags::is_block_level(&d.name)) => {
            Placement::Unwrap
        }
        Node::Element(_) => Placement::Inline,
    }
}

/// Enforce block-only root children and trim the edges of every block.
pub fn enforce_block_structure(fragment: &mut Fragment) {
    let mut queue: VecDeque<Node> = fragment.children.drain(..).collect();
    let mut out: Vec<Node> = Vec::with_capacity(queue.len());
    let mut item_run: Vec<Node> = Vec::new();

    while let Some(node) = queue.pop_front() {
        match placement(&node) {
            Placement::Block => {
                flush_items(&mut item_run, &mut out);
                out.push(node);
            }
            Placement::Inline if node.is_blank_text() => {}
            Placement::Inline => {
                flush_items(&mut item_run, &mut out);
                wrap_inline(node, &mut out);
            }
            Placement::ListItem => {
                item_run.push(node);
            }
            Placement::Unwrap => {
                if let Node::Element(el) = node {
                    for child in el.children.into_iter().rev() {
                        queue.push_front(child);
                    }
                }
            }
            Placement::Drop => {}
        }
    }
    flush_items(&mut item_run, &mut out);

    for node in out.iter_mut() {
        if let Node::Element(el) = node {
            tidy_block(el);
        }
    }
    fragment.children = out;
}

/// Wrap a root-level text or inline node in its own paragraph, discarding it if it ends up empty.
fn wrap_inline(node: Node, out: &mut Vec<Node>) {
    let mut p = Element::with_children("p", vec![node]);
    normalize_text(&mut p.children);
    normalize_line_breaks(&mut p.children);
    trim_start_leaf(&mut p.children);
    trim_end_leaf(&mut p.children);
    if !p.is_blank() {
        out.push(p.into());
    }
}

/// Wrap orphaned list items in a bulleted list.
fn flush_items(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    out.push(Element::with_children("ul", std::mem::take(run)).into());
}

/// Re-apply break normalization to paragraphs, drop whitespace between
/// blocks, and trim the first and last text leaf of block elements.
fn tidy_block(el: &mut Element) {
    if el.name == "p" {
        normalize_line_breaks(&mut el.children);
    }
    if tags::is_flow_container(&el.name) {
        vacuum_between_blocks(&mut el.children);
    }
    for child in el.children.iter_mut() {
        if let Node::Element(inner) = child {
            tidy_block(inner);
        }
    }
    if TRIMMED_BLOCK_TAGS.contains(&el.name.as_str()) {
        trim_start_leaf(&mut el.children);
        trim_end_leaf(&mut el.children);
    }
}

fn is_block_node(node: Option<&Node>) -> bool {
    match node {
        None => true,
        Some(Node::Element(el)) => tags::is_block_level(&el.name),
        Some(_) => false,
    }
}

/// Remove whitespace-only text whose neighbours are both blocks (or edges).
fn vacuum_between_blocks(children: &mut Vec<Node>) {
    let mut i = 0;
    while i < children.len() {
        let prev = if i == 0 { None } else { children.get(i - 1) };
        if children[i].is_blank_text() && is_block_node(prev) && is_block_node(children.get(i + 1))
        {
            children.remove(i);
        } else {
            i += 1;
        }
    }
}
