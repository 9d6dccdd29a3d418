//! Domain models served by the content store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A guidebook section with optional media attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_file_path: Option<String>,
}

/// Listing row for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub order: i32,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            slug: section.slug.clone(),
            order: section.order,
        }
    }
}

// == Mood ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hopeful,
    Calm,
    Grateful,
    Anxious,
    Sad,
    Reflective,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Hopeful,
        Mood::Calm,
        Mood::Grateful,
        Mood::Anxious,
        Mood::Sad,
        Mood::Reflective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Hopeful => "hopeful",
            Mood::Calm => "calm",
            Mood::Grateful => "grateful",
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
            Mood::Reflective => "reflective",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == wanted)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Mood::ALL.iter().map(Mood::as_str).collect();
                format!("mood '{}' must be one of {}", s, allowed.join(", "))
            })
    }
}

// == Journal ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated set of changes to apply to a journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
}

impl JournalPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.mood.is_none()
    }

    /// Applies the patch and bumps `updated_at`.
    pub fn apply(self, entry: &mut JournalEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(mood) = self.mood {
            entry.mood = Some(mood);
        }
        entry.updated_at = Utc::now();
    }
}

// == Session ==
/// The authenticated user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub principal: Option<Principal>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            principal: None,
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            principal: Some(Principal {
                user_id: user_id.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_parse() {
        assert_eq!("calm".parse::<Mood>(), Ok(Mood::Calm));
        assert_eq!(" Grateful ".parse::<Mood>(), Ok(Mood::Grateful));

        let err = "furious".parse::<Mood>().unwrap_err();
        assert!(err.contains("furious"));
        assert!(err.contains("hopeful, calm"));
    }

    #[test]
    fn test_section_serializes_camel_case() {
        let section = Section {
            id: "s1".into(),
            title: "Beginnings".into(),
            slug: "beginnings".into(),
            order: 1,
            audio_file_path: Some("audio/beginnings.mp3".into()),
            text_file_path: None,
        };

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["audioFilePath"], "audio/beginnings.mp3");
        assert!(json.get("textFilePath").is_none());
    }

    #[test]
    fn test_patch_apply() {
        let now = Utc::now();
        let mut entry = JournalEntry {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            section_id: None,
            title: "Old".into(),
            content: "Body".into(),
            mood: None,
            created_at: now,
            updated_at: now,
        };

        JournalPatch {
            title: Some("New".into()),
            content: None,
            mood: Some(Mood::Hopeful),
        }
        .apply(&mut entry);

        assert_eq!(entry.title, "New");
        assert_eq!(entry.content, "Body");
        assert_eq!(entry.mood, Some(Mood::Hopeful));
        assert!(entry.updated_at >= now);
    }

    #[test]
    fn test_session_status() {
        assert!(!SessionStatus::anonymous().authenticated);
        let status = SessionStatus::signed_in("u1");
        assert!(status.authenticated);
        assert_eq!(status.principal.unwrap().user_id, "u1");
    }
}
