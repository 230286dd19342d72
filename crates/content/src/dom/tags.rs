// ABOUTME: Tag classification tables shared by the normalization passes.
// ABOUTME: Output allowlist, block/inline sets, void elements, and heading helpers.

/// Tags allowed in normalized output.
pub const OUTPUT_TAGS: &[&str] = &[
    "p",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "strong",
    "b",
    "em",
    "i",
    "u",
    "a",
    "img",
    "blockquote",
    "ul",
    "ol",
    "li",
    "pre",
    "code",
    "hr",
    "br",
];

/// Heading tags, including h1 which never survives normalization.
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Inline tags a heading may keep as elements.
pub const HEADING_INLINE_TAGS: &[&str] = &["em", "strong", "i", "b"];

/// Presentation-only wrappers unwrapped inside paragraphs.
pub const PRESENTATION_WRAPPERS: &[&str] = &["div", "span", "font", "center"];

/// Block-level tags that may sit directly under the root.
pub const ROOT_BLOCK_TAGS: &[&str] = &[
    "p",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "ul",
    "ol",
    "pre",
    "hr",
    "img",
];

/// Allowed block-level tags, used to decide whether a container holds blocks.
const BLOCK_LEVEL_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "ul",
    "ol",
    "li",
    "pre",
    "hr",
];

/// Non-allowlisted tags that delimit blocks of content.
pub const BLOCK_CONTAINER_TAGS: &[&str] = &[
    "div",
    "section",
    "article",
    "main",
    "aside",
    "header",
    "footer",
    "nav",
    "figure",
    "figcaption",
    "center",
    "address",
    "details",
    "summary",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "td",
    "th",
    "caption",
    "dl",
    "dt",
    "dd",
    "hgroup",
];

/// Containers whose children are flow content (blocks allowed).
const FLOW_CONTAINER_TAGS: &[&str] = &["blockquote", "li", "ul", "ol"];

/// Block elements whose leading/trailing whitespace gets trimmed.
pub const TRIMMED_BLOCK_TAGS: &[&str] = &[
    "p",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "ul",
    "ol",
    "li",
    "pre",
];

/// Elements retained even when empty.
pub const KEEP_WHEN_EMPTY: &[&str] = &["br", "img", "hr"];

pub fn is_output_tag(name: &str) -> bool {
    OUTPUT_TAGS.contains(&name)
}

pub fn is_heading(name: &str) -> bool {
    HEADING_TAGS.contains(&name)
}

pub fn is_block_level(name: &str) -> bool {
    BLOCK_LEVEL_TAGS.contains(&name) || BLOCK_CONTAINER_TAGS.contains(&name)
}

pub fn is_block_container(name: &str) -> bool {
    BLOCK_CONTAINER_TAGS.contains(&name)
}

pub fn is_flow_container(name: &str) -> bool {
    FLOW_CONTAINER_TAGS.contains(&name)
}

/// Check if tag is an HTML void element (serialized without a closing tag).
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
