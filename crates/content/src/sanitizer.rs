// ABOUTME: The Sanitizer service: dispatches raw story content to the HTML or plain-text path.
// ABOUTME: Owns the options and the injected parser backend, and derives story metrics.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dom::{self, Fragment, HtmlBackend, ScraperBackend};
use crate::error::SanitizeError;
use crate::formats;
use crate::options::{Options, SanitizerBuilder};
use crate::result::{Result, SanitizedStory};

static LOOKS_LIKE_HTML_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<[a-z].*>").unwrap());

/// Returns true if `content` should go through the HTML pipeline.
///
/// Matches `<` followed by a letter with a `>` somewhere after it, so
/// `"5 < 3 and 10 > 2"` is plain text while `"a<b and c>d"` is treated as HTML.
pub fn looks_like_html(content: &str) -> bool {
    LOOKS_LIKE_HTML_RE.is_match(content)
}

/// Normalizes user-authored story content into the canonical HTML subset.
///
/// A `Sanitizer` holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    opts: Options,
    backend: Arc<dyn HtmlBackend>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Sanitizer {
    /// Create a new SanitizerBuilder for configuring the sanitizer.
    pub fn builder() -> SanitizerBuilder {
        SanitizerBuilder::new()
    }

    /// Create a Sanitizer backed by html5ever.
    pub fn new(opts: Options) -> Self {
        Self::with_backend(opts, Arc::new(ScraperBackend))
    }

    /// Create a Sanitizer with a custom parser backend.
    pub fn with_backend(opts: Options, backend: Arc<dyn HtmlBackend>) -> Self {
        Self { opts, backend }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Normalize raw story content.
    ///
    /// Input that looks like HTML is parsed, cleaned and re-serialized; anything
    /// else is converted from plain text into paragraphs. Empty input yields an
    /// empty string.
    pub fn sanitize(&self, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Ok(String::new());
        }
        self.check_size(content)?;

        if !looks_like_html(content) {
            debug!(len = content.len(), "converting plain text");
            return Ok(formats::convert_plain_text_to_html(content));
        }

        let fragment = self.normalized(content)?;
        Ok(self.backend.serialize(&fragment))
    }

    /// Plain text of an HTML string, with whitespace collapsed.
    pub fn plain_text(&self, html: &str) -> Result<String> {
        let fragment = self.parse(html)?;
        Ok(formats::fragment_text(&fragment))
    }

    /// Number of whitespace-separated words in the text of an HTML string.
    pub fn word_count(&self, html: &str) -> Result<usize> {
        Ok(formats::count_words(&self.plain_text(html)?))
    }

    /// Estimated reading time in minutes at the configured reading speed.
    pub fn reading_time(&self, html: &str) -> Result<u32> {
        let words = self.word_count(html)?;
        Ok(formats::reading_time_minutes(
            words,
            self.opts.words_per_minute,
        ))
    }

    /// Preview text no longer than the configured excerpt length.
    pub fn excerpt(&self, html: &str) -> Result<Option<String>> {
        let text = self.plain_text(html)?;
        Ok(formats::excerpt(&text, self.opts.excerpt_length))
    }

    /// Sanitize `content` and derive every metric from the result in one call.
    pub fn prepare(&self, content: &str) -> Result<SanitizedStory> {
        let sanitized = self.sanitize(content)?;
        if sanitized.is_empty() {
            return Ok(SanitizedStory {
                reading_time_minutes: formats::reading_time_minutes(0, self.opts.words_per_minute),
                ..SanitizedStory::default()
            });
        }

        let fragment = self.backend.parse(&sanitized)?;
        let plain_text = formats::fragment_text(&fragment);
        let word_count = formats::count_words(&plain_text);

        let story = SanitizedStory {
            excerpt: formats::excerpt(&plain_text, self.opts.excerpt_length),
            reading_time_minutes: formats::reading_time_minutes(
                word_count,
                self.opts.words_per_minute,
            ),
            word_count,
            plain_text,
            content: sanitized,
        };
        debug!(
            words = story.word_count,
            minutes = story.reading_time_minutes,
            "prepared story"
        );
        Ok(story)
    }

    fn check_size(&self, content: &str) -> Result<()> {
        match self.opts.max_input_bytes {
            Some(limit) if content.len() > limit => Err(SanitizeError::TooLarge {
                len: content.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn parse(&self, html: &str) -> Result<Fragment> {
        self.check_size(html)?;
        self.backend.parse(html)
    }

    fn normalized(&self, html: &str) -> Result<Fragment> {
        let mut fragment = self.backend.parse(html)?;
        debug!(nodes = fragment.children.len(), "parsed fragment");
        dom::normalize(&mut fragment);
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct FailingBackend;

    impl HtmlBackend for FailingBackend {
        fn parse(&self, _html: &str) -> Result<Fragment> {
            Err(SanitizeError::parse("backend unavailable"))
        }
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<p>hi</p>"));
        assert!(looks_like_html("<P\n>hi"));
        assert!(!looks_like_html("plain words"));
        assert!(!looks_like_html("5 < 3 and 10 > 2"));
        // Known misroute: a letter right after `<` is enough.
        assert!(looks_like_html("a<b and c>d"));
    }

    #[test]
    fn test_sanitize_empty() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.sanitize("").unwrap(), "");
        assert_eq!(sanitizer.sanitize("  \n ").unwrap(), "");
    }

    #[test]
    fn test_sanitize_dispatches_plain_text() {
        let sanitizer = Sanitizer::default();
        assert_eq!(
            sanitizer.sanitize("One\n\nTwo & three").unwrap(),
            "<p>One</p>\n<p>Two &amp; three</p>"
        );
    }

    #[test]
    fn test_sanitize_html() {
        let sanitizer = Sanitizer::default();
        assert_eq!(
            sanitizer
                .sanitize(r#"<h1 class="title">Hi</h1><p style="x">Body</p>"#)
                .unwrap(),
            "<h2>Hi</h2>\n<p>Body</p>"
        );
    }

    #[test]
    fn test_backend_error_propagates() {
        let sanitizer = Sanitizer::with_backend(Options::default(), Arc::new(FailingBackend));
        let err = sanitizer.sanitize("<p>x</p>").unwrap_err();
        assert!(err.is_parse());
        assert!(sanitizer.plain_text("<p>x</p>").is_err());
    }

    #[test]
    fn test_plain_path_skips_backend() {
        let sanitizer = Sanitizer::with_backend(Options::default(), Arc::new(FailingBackend));
        assert_eq!(sanitizer.sanitize("no markup").unwrap(), "<p>no markup</p>");
    }

    #[test]
    fn test_size_limit() {
        let sanitizer = Sanitizer::builder().max_input_bytes(8).build();
        let err = sanitizer.sanitize("<p>too long</p>").unwrap_err();
        assert!(matches!(err, SanitizeError::TooLarge { len: 15, limit: 8 }));
        assert_eq!(sanitizer.sanitize("short").unwrap(), "<p>short</p>");
    }

    #[test]
    fn test_metrics() {
        let sanitizer = Sanitizer::builder().words_per_minute(2).build();
        let html = "<p>one two</p>\n<p>three</p><script>four five</script>";

        assert_eq!(sanitizer.plain_text(html).unwrap(), "one two three");
        assert_eq!(sanitizer.plain_text("<p>one</p><p>two</p>").unwrap(), "onetwo");
        assert_eq!(sanitizer.word_count(html).unwrap(), 3);
        assert_eq!(sanitizer.reading_time(html).unwrap(), 2);
    }

    #[test]
    fn test_prepare() {
        let sanitizer = Sanitizer::builder().excerpt_length(9).build();
        let story = sanitizer
            .prepare("<div><p>Hello brave world</p><span class=\"ad-slot\">buy</span></div>")
            .unwrap();

        assert_eq!(story.content, "<p>Hello brave world</p>");
        assert_eq!(story.plain_text, "Hello brave world");
        assert_eq!(story.excerpt.as_deref(), Some("Hello…"));
        assert_eq!(story.word_count, 3);
        assert_eq!(story.reading_time_minutes, 1);
    }

    #[test]
    fn test_prepare_empty() {
        let story = Sanitizer::default().prepare("").unwrap();
        assert!(story.is_empty());
        assert_eq!(story.excerpt, None);
        assert_eq!(story.reading_time_minutes, 1);
    }
}
