// ABOUTME: Tag/attribute allowlist filter for story content.
// ABOUTME: Removes unsafe and non-content elements, strips attributes, flattens disallowed tags.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

use super::tags;
use super::{unwrap_at, Element, Node};

// Elements removed together with their content
const UNWANTED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "applet", "meta", "link", "noscript", "form",
    "input", "button", "select", "textarea", "option", "optgroup", "label", "fieldset", "legend",
    "datalist", "output", "svg", "canvas", "video", "audio",
];

// Class-name fragments marking ads, navigation and page chrome.
// Lossy on purpose: any class containing one of these drops the whole element.
const CLASS_BLACKLIST: &[&str] = &[
    "advert", "ad-", "ads-", "sidebar", "nav", "footer", "header", "menu",
];

const UNSAFE_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

static CLASS_BLACKLIST_AC: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(CLASS_BLACKLIST)
        .expect("CLASS_BLACKLIST_AC: hardcoded patterns are valid")
});

/// Whether children are flow content (blocks allowed) or phrasing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Flow,
    Phrasing,
}

impl Context {
    fn for_children_of(name: &str) -> Self {
        if tags::is_flow_container(name) {
            Context::Flow
        } else {
            Context::Phrasing
        }
    }
}

/// Check if a class attribute matches the page-chrome heuristic
pub fn is_chrome_class(class: &str) -> bool {
    CLASS_BLACKLIST_AC.is_match(class)
}

/// Check if a URL uses a scheme that must never reach the output.
///
/// ASCII whitespace and control characters are ignored, matching how browsers
/// read `java\tscript:` or ` javascript:`.
pub fn is_unsafe_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    UNSAFE_SCHEMES.iter().any(|s| normalized.starts_with(s))
}

/// Check if an element is removed outright, content included
pub fn is_unwanted(el: &Element) -> bool {
    if UNWANTED_TAGS.contains(&el.name.as_str()) {
        return true;
    }
    if el.name == "img" {
        if let Some(src) = el.attr("src") {
            if src.trim_start().to_ascii_lowercase().starts_with("data:") {
                return true;
            }
        }
    }
    el.attr("class").is_some_and(is_chrome_class)
}

/// Remove unwanted elements and every comment. Returns the number of nodes removed.
pub fn remove_unwanted(children: &mut Vec<Node>) -> usize {
    let before = children.len();
    children.retain(|node| match node {
        Node::Comment(_) => false,
        Node::Element(el) => !is_unwanted(el),
        Node::Text(_) => true,
    });
    let mut removed = before - children.len();

    for child in children.iter_mut() {
        if let Node::Element(el) = child {
            removed += remove_unwanted(&mut el.children);
        }
    }
    removed
}

/// Strip every attribute outside the allowlist and drop images with unsafe sources.
///
/// Anchors keep `href`/`title`, images keep `src`/`alt`; an unsafe `href` is
/// removed while the link text stays.
pub fn strip_attributes(children: &mut Vec<Node>) {
    children.retain_mut(|node| {
        let Node::Element(el) = node else {
            return true;
        };
        match el.name.as_str() {
            "a" => {
                el.attrs.retain(|(k, _)| k == "href" || k == "title");
                if el.attr("href").is_some_and(is_unsafe_url) {
                    el.remove_attr("href");
                }
            }
            "img" => {
                el.attrs.retain(|(k, _)| k == "src" || k == "alt");
                if el.attr("src").is_some_and(is_unsafe_url) {
                    return false;
                }
            }
            _ => el.attrs.clear(),
        }
        strip_attributes(&mut el.children);
        true
    });
}

/// Remove elements outside the output allowlist while keeping their content.
///
/// Block containers in flow context become paragraphs when they hold no
/// block-level descendants and are unwrapped otherwise. Everything else
/// outside the allowlist is unwrapped in place.
pub fn flatten_disallowed(children: &mut Vec<Node>, context: Context) {
    let mut i = 0;
    while i < children.len() {
        let Node::Element(el) = &mut children[i] else {
            i += 1;
            continue;
        };

        if tags::is_output_tag(&el.name) {
            let inner = Context::for_children_of(&el.name);
            flatten_disallowed(&mut el.children, inner);
            i += 1;
            continue;
        }

        let becomes_paragraph = context == Context::Flow
            && tags::is_block_container(&el.name)
            && !el.has_descendant(&|d| tags::is_block_level(&d.name));

        if becomes_paragraph {
            el.name = "p".to_string();
            flatten_disallowed(&mut el.children, Context::Phrasing);
            i += 1;
        } else {
            // Spliced children are revisited in this context
            unwrap_at(children, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScraperBackend;
    use crate::dom::{serialize, Fragment, HtmlBackend};

    fn run(html: &str, pass: impl Fn(&mut Vec<Node>)) -> String {
        let mut fragment = ScraperBackend.parse(html).unwrap();
        pass(&mut fragment.children);
        serialize::to_html(&Fragment::new(fragment.children))
    }

    #[test]
    fn test_is_chrome_class() {
        assert!(is_chrome_class("site-sidebar"));
        assert!(is_chrome_class("MainNav"));
        assert!(is_chrome_class("ad-slot top"));
        assert!(!is_chrome_class("story-body"));
        assert!(!is_chrome_class("shadow"));
    }

    #[test]
    fn test_is_unsafe_url() {
        assert!(is_unsafe_url("javascript:alert(1)"));
        assert!(is_unsafe_url("JavaScript:alert(1)"));
        assert!(is_unsafe_url("  java\tscript:alert(1)"));
        assert!(is_unsafe_url("data:text/html,hi"));
        assert!(is_unsafe_url("VBScript:msgbox"));
        assert!(!is_unsafe_url("https://example.com/javascript:"));
        assert!(!is_unsafe_url("/relative/path"));
    }

    #[test]
    fn test_remove_unwanted_elements_and_comments() {
        let out = run(
            r#"<p>Keep</p><script>x()</script><!-- c --><form><input></form><div class="navbar">Menu</div><p>Also <style>p{}</style>kept</p>"#,
            |c| {
                remove_unwanted(c);
            },
        );
        assert_eq!(out, "<p>Keep</p>\n<p>Also kept</p>");
    }

    #[test]
    fn test_remove_unwanted_counts() {
        let mut fragment = ScraperBackend
            .parse("<div><script></script><!-- a --></div><iframe></iframe>")
            .unwrap();
        assert_eq!(remove_unwanted(&mut fragment.children), 3);
    }

    #[test]
    fn test_remove_data_uri_images() {
        let out = run(
            r#"<p><img src="data:image/png;base64,AAAA"><img src="/ok.png"></p>"#,
            |c| {
                remove_unwanted(c);
            },
        );
        assert_eq!(out, r#"<p><img src="/ok.png" /></p>"#);
    }

    #[test]
    fn test_strip_attributes_allowlist() {
        let out = run(
            r#"<p id="x" style="color:red" onclick="evil()"><a href="/a" title="T" target="_blank" rel="x">link</a><img src="/i.png" alt="A" width="10" data-x="1"></p>"#,
            strip_attributes,
        );
        assert_eq!(
            out,
            r#"<p><a href="/a" title="T">link</a><img src="/i.png" alt="A" /></p>"#
        );
    }

    #[test]
    fn test_strip_unsafe_href_keeps_text() {
        let out = run(r#"<a href="javascript:alert(1)">click</a>"#, strip_attributes);
        assert_eq!(out, "<a>click</a>");
    }

    #[test]
    fn test_unsafe_image_removed() {
        let out = run(
            r#"<p>before<img src="javascript:x" alt="x">after</p>"#,
            strip_attributes,
        );
        assert_eq!(out, "<p>beforeafter</p>");
    }

    #[test]
    fn test_flatten_div_to_paragraph() {
        let out = run("<div>Only text <b>here</b></div>", |c| {
            flatten_disallowed(c, Context::Flow)
        });
        assert_eq!(out, "<p>Only text <b>here</b></p>");
    }

    #[test]
    fn test_flatten_unwraps_container_with_blocks() {
        let out = run("<section><p>One</p><div>Two</div></section>", |c| {
            flatten_disallowed(c, Context::Flow)
        });
        assert_eq!(out, "<p>One</p>\n<p>Two</p>");
    }

    #[test]
    fn test_flatten_table_cells() {
        let out = run(
            "<table><tr><td>Cell A</td><td>Cell B</td></tr></table>",
            |c| flatten_disallowed(c, Context::Flow),
        );
        assert_eq!(out, "<p>Cell A</p>\n<p>Cell B</p>");
    }

    #[test]
    fn test_flatten_inline_unknowns() {
        let out = run("<p>H<sub>2</sub>O is <small>wet</small></p>", |c| {
            flatten_disallowed(c, Context::Flow)
        });
        assert_eq!(out, "<p>H2O is wet</p>");
    }

    #[test]
    fn test_flatten_container_inside_quote_becomes_paragraph() {
        let out = run("<blockquote><div>Quoted</div></blockquote>", |c| {
            flatten_disallowed(c, Context::Flow)
        });
        assert_eq!(out, "<blockquote><p>Quoted</p></blockquote>");
    }
}
