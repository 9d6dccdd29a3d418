//! Request DTOs for the content service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::models::{JournalPatch, Mood};

/// Longest journal title accepted
pub const MAX_TITLE_LENGTH: usize = 200;

/// Request body for `PUT /api/journal/:id`
///
/// Every field is optional; at least one must be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJournalRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Raw mood; checked against [`Mood`] in `validate`
    #[serde(default)]
    pub mood: Option<String>,
}

impl UpdateJournalRequest {
    /// Validates the request and converts it into a patch.
    ///
    /// Returns a human-readable message on failure.
    pub fn validate(self) -> Result<JournalPatch, String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("Title cannot be empty".to_string());
            }
            if title.chars().count() > MAX_TITLE_LENGTH {
                return Err(format!(
                    "Title exceeds maximum length of {} characters",
                    MAX_TITLE_LENGTH
                ));
            }
        }

        let mood = self.mood.as_deref().map(str::parse::<Mood>).transpose()?;

        let patch = JournalPatch {
            title: self.title,
            content: self.content,
            mood,
        };
        if patch.is_empty() {
            return Err("Nothing to update".to_string());
        }
        Ok(patch)
    }
}

/// Query string for `GET /api/media/sign`
#[derive(Debug, Clone, Deserialize)]
pub struct SignQuery {
    /// Storage path of the object
    pub path: String,
    /// Requested validity in seconds; the configured default when absent
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SignQuery {
    pub fn validate(&self) -> Option<String> {
        let path = self.path.trim();
        if path.is_empty() {
            return Some("Path cannot be empty".to_string());
        }
        if path.split('/').any(|segment| segment == "..") {
            return Some("Path cannot contain '..' segments".to_string());
        }
        if self.ttl == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"title": "Day one", "mood": "calm"}"#;
        let req: UpdateJournalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title.as_deref(), Some("Day one"));
        assert!(req.content.is_none());

        let patch = req.validate().unwrap();
        assert_eq!(patch.mood, Some(Mood::Calm));
    }

    #[test]
    fn test_validate_invalid_mood() {
        let req = UpdateJournalRequest {
            mood: Some("ecstatic".to_string()),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert!(err.contains("ecstatic"));
    }

    #[test]
    fn test_validate_empty_update() {
        assert!(UpdateJournalRequest::default().validate().is_err());
    }

    #[test]
    fn test_validate_blank_title() {
        let req = UpdateJournalRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_sign_query_validate() {
        let ok = SignQuery {
            path: "audio/intro.mp3".into(),
            ttl: None,
        };
        assert!(ok.validate().is_none());

        let traversal = SignQuery {
            path: "audio/../secrets".into(),
            ttl: None,
        };
        assert!(traversal.validate().is_some());

        let zero = SignQuery {
            path: "a".into(),
            ttl: Some(0),
        };
        assert!(zero.validate().is_some());
    }
}
