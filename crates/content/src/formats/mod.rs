// ABOUTME: Text-side conversions: plain text to HTML, and HTML trees to plain text and metrics.
// ABOUTME: Handles paragraph splitting and escaping, text extraction, word counts, reading time, excerpts.

//! Format conversion module.
//!
//! Converts unmarked plain text into paragraph HTML and derives plain text,
//! word counts, reading time and excerpts from a content tree.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::serialize::escape_html;
use crate::dom::whitespace::collapse_spaces;
use crate::dom::{Fragment, Node};
use crate::options::DEFAULT_WORDS_PER_MINUTE;

static PARAGRAPH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Convert plain text to paragraph HTML.
///
/// Blank lines separate paragraphs; single newlines become `<br />`. Each
/// paragraph is escaped and wrapped in `<p>`, and paragraphs are joined with a
/// newline.
pub fn convert_plain_text_to_html(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    PARAGRAPH_SPLIT_RE
        .split(trimmed)
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{}</p>", escape_html(para).replace('\n', "<br />")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract plain text from a content tree.
///
/// `script` and `style` are skipped, the remaining text content is
/// concatenated, whitespace runs collapse to one space and the result is trimmed.
pub fn fragment_text(fragment: &Fragment) -> String {
    let mut raw = String::new();
    for node in &fragment.children {
        push_text(node, &mut raw);
    }
    collapse_spaces(&raw).trim().to_string()
}

fn push_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(el) if el.name == "script" || el.name == "style" => {}
        Node::Element(el) => {
            for child in &el.children {
                push_text(child, out);
            }
        }
        Node::Comment(_) => {}
    }
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up and never below one.
///
/// A rate of zero falls back to the default.
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> u32 {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    } as usize;
    let minutes = words.div_ceil(wpm);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

/// Build a preview of at most `max_chars` characters, cut at a word boundary.
///
/// Returns None when the text is empty. Truncated excerpts end with `…`.
pub fn excerpt(text: &str, max_chars: usize) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() <= max_chars {
        return Some(trimmed.to_string());
    }

    let cut: String = trimmed.chars().take(max_chars).collect();
    let next_is_space = trimmed
        .chars()
        .nth(max_chars)
        .is_some_and(char::is_whitespace);
    let body = if next_is_space {
        cut.as_str()
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => &cut[..idx],
            _ => cut.as_str(),
        }
    };

    let mut out = body.trim_end().to_string();
    out.push('…');
    Some(out)
}
