// ABOUTME: SanitizedStory struct holding normalized content and its derived metrics.
// ABOUTME: Also defines the crate-wide Result alias.

use serde::{Deserialize, Serialize};

use crate::error::SanitizeError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Normalized story content plus the metrics a story write route stores alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SanitizedStory {
    pub content: String,
    pub plain_text: String,
    pub excerpt: Option<String>,
    pub word_count: usize,
    pub reading_time_minutes: u32,
}

impl SanitizedStory {
    /// Returns true if nothing survived normalization.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_to_json() {
        let story = SanitizedStory {
            content: "<p>Hi</p>".into(),
            plain_text: "Hi".into(),
            excerpt: Some("Hi".into()),
            word_count: 1,
            reading_time_minutes: 1,
        };
        let json = serde_json::to_value(&story).unwrap();

        assert_eq!(json["content"], "<p>Hi</p>");
        assert_eq!(json["word_count"], 1);
        assert_eq!(json["reading_time_minutes"], 1);
        assert!(!story.is_empty());
        assert!(SanitizedStory::default().is_empty());
    }
}
