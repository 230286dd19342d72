// ABOUTME: Whitespace and empty-node collapsing for story content.
// ABOUTME: Removes empty elements bottom-up, merges adjacent text nodes, collapses whitespace runs.

use super::tags::KEEP_WHEN_EMPTY;
use super::Node;

/// Remove empties, then merge and collapse text.
pub fn collapse(children: &mut Vec<Node>) {
    remove_empty_elements(children);
    normalize_text(children);
}

/// Merge adjacent text nodes and collapse whitespace runs.
pub fn normalize_text(children: &mut Vec<Node>) {
    merge_adjacent_text(children);
    collapse_whitespace(children);
}

/// Remove elements with no text and no image, children before parents.
///
/// `br`, `img` and `hr` are kept regardless.
pub fn remove_empty_elements(children: &mut Vec<Node>) {
    children.retain_mut(|node| {
        let Node::Element(el) = node else {
            return true;
        };
        remove_empty_elements(&mut el.children);
        KEEP_WHEN_EMPTY.contains(&el.name.as_str()) || !el.is_blank()
    });
}

/// Join runs of sibling text nodes and drop empty ones.
pub fn merge_adjacent_text(children: &mut Vec<Node>) {
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    for mut node in children.drain(..) {
        match &mut node {
            Node::Text(t) if t.is_empty() => continue,
            Node::Text(t) => {
                if let Some(Node::Text(prev)) = out.last_mut() {
                    prev.push_str(t);
                    continue;
                }
            }
            Node::Element(el) => merge_adjacent_text(&mut el.children),
            Node::Comment(_) => {}
        }
        out.push(node);
    }
    *children = out;
}

/// Collapse whitespace runs in every text node to a single space.
pub fn collapse_whitespace(children: &mut [Node]) {
    for node in children.iter_mut() {
        match node {
            Node::Text(t) => {
                if has_collapsible_whitespace(t) {
                    *t = collapse_spaces(t);
                }
            }
            Node::Element(el) => collapse_whitespace(&mut el.children),
            Node::Comment(_) => {}
        }
    }
}

fn has_collapsible_whitespace(s: &str) -> bool {
    let mut last_was_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if last_was_space || c != ' ' {
                return true;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }
    }
    false
}

/// Collapses multiple whitespace characters into single spaces without trimming.
pub fn collapse_spaces(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result
}
