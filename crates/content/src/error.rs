// ABOUTME: Error types for the storyline content pipeline.
// ABOUTME: Provides the SanitizeError enum with Parse, TooLarge, and TooDeep variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while normalizing story content.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The parser backend failed to build a tree from the input.
    #[error("failed to parse content: {0}")]
    Parse(String),

    /// The input exceeded the configured size limit.
    #[error("content too large: {len} bytes exceeds limit of {limit}")]
    TooLarge { len: usize, limit: usize },

    /// The input nests elements deeper than the backend accepts.
    #[error("content nested deeper than {limit} elements")]
    TooDeep { limit: usize },
}

impl SanitizeError {
    /// Creates a Parse error from an underlying backend error.
    pub fn parse(err: impl fmt::Display) -> Self {
        SanitizeError::Parse(err.to_string())
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SanitizeError::Parse(_))
    }

    /// Returns true if the input was rejected by a resource limit.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            SanitizeError::TooLarge { .. } | SanitizeError::TooDeep { .. }
        )
    }
}
