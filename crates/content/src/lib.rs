// ABOUTME: Main library entry point for the storyline story-content normalizer.
// ABOUTME: Re-exports the public API and provides free functions backed by a default Sanitizer.

//! Storyline - normalizes user-authored story content into a small, safe HTML subset.
//!
//! Content pasted from word processors, web pages or typed as plain text is
//! parsed, stripped of unsafe and non-content markup, and re-serialized so
//! that it renders consistently. Reading time, word count and excerpts are
//! derived from the normalized result.
//!
//! # Example
//!
//! ```
//! use storyline_content::{sanitize_story_content, SanitizeError};
//!
//! fn main() -> Result<(), SanitizeError> {
//!     let html = sanitize_story_content("<h1>Title</h1><p onclick=\"x()\">Body</p>")?;
//!     assert_eq!(html, "<h2>Title</h2>\n<p>Body</p>");
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod formats;
pub mod options;
pub mod result;
pub mod sanitizer;

use once_cell::sync::Lazy;

pub use crate::dom::{HtmlBackend, ScraperBackend};
pub use crate::error::SanitizeError;
pub use crate::formats::convert_plain_text_to_html;
pub use crate::options::{
    Options, OutputFormat, SanitizerBuilder, DEFAULT_EXCERPT_LENGTH, DEFAULT_WORDS_PER_MINUTE,
};
pub use crate::result::{Result, SanitizedStory};
pub use crate::sanitizer::{looks_like_html, Sanitizer};

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(Sanitizer::default);

/// Normalize story content with the default settings.
pub fn sanitize_story_content(content: &str) -> Result<String> {
    DEFAULT_SANITIZER.sanitize(content)
}

/// Plain text of an HTML string, `script` and `style` excluded.
pub fn extract_plain_text(html: &str) -> Result<String> {
    DEFAULT_SANITIZER.plain_text(html)
}

/// Reading time in whole minutes, never below one. A rate of zero uses the default.
pub fn calculate_reading_time(html: &str, words_per_minute: u32) -> Result<u32> {
    let words = DEFAULT_SANITIZER.word_count(html)?;
    Ok(formats::reading_time_minutes(words, words_per_minute))
}

/// Word count of the text in an HTML string.
pub fn count_words(html: &str) -> Result<usize> {
    DEFAULT_SANITIZER.word_count(html)
}

/// Preview of at most `max_chars` characters, cut at a word boundary.
pub fn extract_excerpt(html: &str, max_chars: usize) -> Result<Option<String>> {
    let text = DEFAULT_SANITIZER.plain_text(html)?;
    Ok(formats::excerpt(&text, max_chars))
}
