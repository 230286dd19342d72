// ABOUTME: Parser backend seam: builds the owned content tree from an HTML string.
// ABOUTME: Default ScraperBackend converts scraper's html5ever/ego-tree document into Fragment.

use std::fmt;

use scraper::Html;

use super::{serialize, Element, Fragment, Node};
use crate::error::SanitizeError;
use crate::result::Result;

/// Maximum element nesting accepted while building the tree.
pub const MAX_DEPTH: usize = 512;

/// Parses HTML into a [`Fragment`] and serializes it back.
///
/// The pipeline never talks to a parser directly; a backend is injected into
/// the [`Sanitizer`](crate::Sanitizer) so alternative parsers (or test doubles)
/// can be substituted.
pub trait HtmlBackend: fmt::Debug + Send + Sync {
    /// Build a tree from `html`. Malformed markup should be recovered, not rejected.
    fn parse(&self, html: &str) -> Result<Fragment>;

    /// Render a tree to an HTML string.
    fn serialize(&self, fragment: &Fragment) -> String {
        serialize::to_html(fragment)
    }
}

/// html5ever-based backend with browser-equivalent error recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperBackend;

impl HtmlBackend for ScraperBackend {
    fn parse(&self, html: &str) -> Result<Fragment> {
        let parsed = Html::parse_fragment(html);
        let children = convert_children(*parsed.root_element(), 0)?;
        Ok(Fragment::new(children))
    }
}

fn convert_children(
    node: ego_tree::NodeRef<'_, scraper::Node>,
    depth: usize,
) -> Result<Vec<Node>> {
    if depth > MAX_DEPTH {
        return Err(SanitizeError::TooDeep { limit: MAX_DEPTH });
    }

    let mut out = Vec::new();
    for child in node.children() {
        match child.value() {
            scraper::Node::Text(text) => out.push(Node::Text(String::from(&**text))),
            scraper::Node::Comment(comment) => {
                out.push(Node::Comment(String::from(&**comment)))
            }
            scraper::Node::Element(el) => {
                let attrs = el
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                out.push(Node::Element(Element {
                    name: el.name().to_string(),
                    attrs,
                    children: convert_children(child, depth + 1)?,
                }));
            }
            _ => {}
        }
    }
    Ok(out)
}
