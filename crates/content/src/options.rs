// ABOUTME: Configuration options for the storyline pipeline including OutputFormat, Options, and SanitizerBuilder.
// ABOUTME: SanitizerBuilder provides a fluent API for constructing Sanitizer instances with custom settings.

use std::fmt;
use std::sync::Arc;

use crate::dom::HtmlBackend;
use crate::sanitizer::Sanitizer;

/// Default reading speed used for reading-time estimates.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// The output format for processed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "txt" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Html,
        }
    }
}

/// Configuration options for the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub words_per_minute: u32,
    pub excerpt_length: usize,
    pub max_input_bytes: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            max_input_bytes: None,
        }
    }
}

/// Builder for constructing Sanitizer instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct SanitizerBuilder {
    opts: Options,
    backend: Option<Arc<dyn HtmlBackend>>,
}

impl SanitizerBuilder {
    /// Create a new SanitizerBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading speed for reading-time estimates. Zero means the default.
    pub fn words_per_minute(mut self, wpm: u32) -> Self {
        self.opts.words_per_minute = wpm;
        self
    }

    /// Set the maximum excerpt length in characters.
    pub fn excerpt_length(mut self, chars: usize) -> Self {
        self.opts.excerpt_length = chars;
        self
    }

    /// Reject inputs larger than `bytes`.
    pub fn max_input_bytes(mut self, bytes: usize) -> Self {
        self.opts.max_input_bytes = Some(bytes);
        self
    }

    /// Use a custom parser backend.
    pub fn backend(mut self, backend: Arc<dyn HtmlBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build the Sanitizer with the configured options.
    pub fn build(self) -> Sanitizer {
        match self.backend {
            Some(backend) => Sanitizer::with_backend(self.opts, backend),
            None => Sanitizer::new(self.opts),
        }
    }
}
