// ABOUTME: Paragraph normalization for story content.
// ABOUTME: Drops empty paragraphs, unwraps presentation wrappers, and normalizes runs of <br>.

use super::tags::{self, PRESENTATION_WRAPPERS};
use super::{unwrap_at, Node};

/// Normalize every paragraph in the tree.
pub fn normalize_paragraphs(children: &mut Vec<Node>) {
    children.retain_mut(|node| {
        let Node::Element(el) = node else {
            return true;
        };
        if el.name != "p" {
            normalize_paragraphs(&mut el.children);
            return true;
        }
        if el.is_blank() {
            return false;
        }
        unwrap_wrappers(&mut el.children);
        normalize_line_breaks(&mut el.children);
        true
    });
}

/// Unwrap div/span/font/center at any depth, promoting their children.
pub fn unwrap_wrappers(children: &mut Vec<Node>) {
    let mut i = 0;
    while i < children.len() {
        let is_wrapper = matches!(
            &children[i],
            Node::Element(el) if PRESENTATION_WRAPPERS.contains(&el.name.as_str())
        );
        if is_wrapper {
            unwrap_at(children, i);
            continue;
        }
        if let Node::Element(el) = &mut children[i] {
            unwrap_wrappers(&mut el.children);
        }
        i += 1;
    }
}

fn is_br(node: &Node) -> bool {
    node.is_element("br")
}

/// Drop leading and trailing breaks and collapse runs of breaks to one.
///
/// Breaks nested inside inline elements count as part of the paragraph's
/// sequence. Whitespace-only text between breaks, or between a break and the
/// edge of the paragraph, does not interrupt a run.
pub fn normalize_line_breaks(children: &mut Vec<Node>) {
    trim_leading_breaks(children);
    trim_trailing_breaks(children);
    let mut after_br = false;
    collapse_break_runs(children, &mut after_br);
}

/// Remove breaks and blank text before the first content, descending into
/// inline elements. Elements left with nothing are removed too.
///
/// Returns true once content (non-blank text or a non-break void element) is reached.
fn trim_leading_breaks(children: &mut Vec<Node>) -> bool {
    while let Some(first) = children.first_mut() {
        match first {
            Node::Element(el) if el.name == "br" => {}
            Node::Element(el) if !tags::is_void_element(&el.name) => {
                if trim_leading_breaks(&mut el.children) {
                    return true;
                }
            }
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Comment(_) => {}
            _ => return true,
        }
        children.remove(0);
    }
    false
}

fn trim_trailing_breaks(children: &mut Vec<Node>) -> bool {
    while let Some(last) = children.last_mut() {
        match last {
            Node::Element(el) if el.name == "br" => {}
            Node::Element(el) if !tags::is_void_element(&el.name) => {
                if trim_trailing_breaks(&mut el.children) {
                    return true;
                }
            }
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Comment(_) => {}
            _ => return true,
        }
        children.pop();
    }
    false
}

/// Drop every break that follows another break in document order.
///
/// `after_br` carries the run state across element boundaries.
fn collapse_break_runs(children: &mut Vec<Node>, after_br: &mut bool) {
    let mut out = Vec::with_capacity(children.len());
    let mut pending = Vec::new();
    for mut node in children.drain(..) {
        if is_br(&node) {
            if *after_br {
                pending.clear();
                continue;
            }
            *after_br = true;
            out.push(node);
            continue;
        }
        if *after_br && node.is_blank_text() {
            pending.push(node);
            continue;
        }

        out.append(&mut pending);
        match &mut node {
            Node::Element(el) if !tags::is_void_element(&el.name) => {
                collapse_break_runs(&mut el.children, after_br)
            }
            Node::Comment(_) => {}
            _ => *after_br = false,
        }
        out.push(node);
    }
    out.append(&mut pending);
    *children = out;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{serialize, Fragment, HtmlBackend, ScraperBackend};

    fn run(html: &str) -> String {
        let mut fragment = ScraperBackend.parse(html).unwrap();
        normalize_paragraphs(&mut fragment.children);
        serialize::to_html(&Fragment::new(fragment.children))
    }

    #[test]
    fn test_empty_paragraphs_removed() {
        assert_eq!(run("<p>&nbsp;</p><p>Real text</p>"), "<p>Real text</p>");
        assert_eq!(run("<p> <br> </p><p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_paragraph_with_only_image_kept() {
        assert_eq!(
            run(r#"<p><img src="/a.png"></p>"#),
            r#"<p><img src="/a.png" /></p>"#
        );
    }

    #[test]
    fn test_wrappers_unwrapped() {
        assert_eq!(
            run(r#"<p><span><font>Hello</font></span> <b><span>bold</span></b></p>"#),
            "<p>Hello <b>bold</b></p>"
        );
    }

    #[test]
    fn test_leading_and_trailing_breaks_removed() {
        assert_eq!(run("<p><br> <br>Text<br></p>"), "<p>Text</p>");
    }

    #[test]
    fn test_break_runs_collapsed() {
        assert_eq!(
            run("<p>One<br><br><br>Two<br> <br>Three</p>"),
            "<p>One<br />Two<br />Three</p>"
        );
    }

    #[test]
    fn test_breaks_inside_inline_elements() {
        assert_eq!(run("<p><b><br><br>x</b></p>"), "<p><b>x</b></p>");
        assert_eq!(run("<p><b>x<br></b><br></p>"), "<p><b>x</b></p>");
        assert_eq!(
            run("<p>a<br><b><br><br>b</b><i><br>c</i></p>"),
            "<p>a<br /><b>b</b><i><br />c</i></p>"
        );
    }

    #[test]
    fn test_single_breaks_preserved() {
        assert_eq!(run("<p>a<br>b</p>"), "<p>a<br />b</p>");
    }

    #[test]
    fn test_nested_paragraphs_in_quote() {
        assert_eq!(
            run("<blockquote><p></p><p>q</p></blockquote>"),
            "<blockquote><p>q</p></blockquote>"
        );
    }
}
