//! Content store contract and the in-memory implementation used for local
//! runs and tests.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{JournalEntry, JournalPatch, Principal, Section, SectionSummary};

// == Content Store ==
/// Read/write access to sections and journal entries.
///
/// Journal operations are scoped to `principal`: an entry owned by another
/// user is reported as [`AppError::NotFound`], never as unauthorized.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All sections ordered by `order` ascending.
    async fn list_sections(&self) -> Result<Vec<SectionSummary>>;

    async fn get_section_by_slug(&self, slug: &str) -> Result<Option<Section>>;

    async fn get_journal_entry(&self, principal: &Principal, id: Uuid) -> Result<JournalEntry>;

    async fn update_journal_entry(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: JournalPatch,
    ) -> Result<JournalEntry>;

    async fn delete_journal_entry(&self, principal: &Principal, id: Uuid) -> Result<()>;
}

/// On-disk seed format for [`InMemoryContentStore`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSeed {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
}

// == In-Memory Content Store ==
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    sections: RwLock<Vec<Section>>,
    journal: RwLock<HashMap<Uuid, JournalEntry>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: ContentSeed) -> Self {
        let journal = seed
            .journal_entries
            .into_iter()
            .map(|entry| (entry.id, entry))
            .collect();

        Self {
            sections: RwLock::new(seed.sections),
            journal: RwLock::new(journal),
        }
    }

    /// Loads a JSON seed file.
    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading content seed {}", path.display()))?;
        let seed: ContentSeed = serde_json::from_str(&raw)
            .with_context(|| format!("parsing content seed {}", path.display()))?;

        info!(
            sections = seed.sections.len(),
            journal_entries = seed.journal_entries.len(),
            "Content seed loaded"
        );
        Ok(Self::from_seed(seed))
    }

    pub async fn insert_section(&self, section: Section) {
        let mut sections = self.sections.write().await;
        sections.retain(|s| s.slug != section.slug);
        sections.push(section);
    }

    pub async fn insert_journal_entry(&self, entry: JournalEntry) {
        self.journal.write().await.insert(entry.id, entry);
    }
}

fn journal_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Journal entry '{}'", id))
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list_sections(&self) -> Result<Vec<SectionSummary>> {
        let sections = self.sections.read().await;
        let mut summaries: Vec<SectionSummary> = sections.iter().map(SectionSummary::from).collect();
        summaries.sort_by_key(|s| s.order);
        Ok(summaries)
    }

    async fn get_section_by_slug(&self, slug: &str) -> Result<Option<Section>> {
        let sections = self.sections.read().await;
        Ok(sections.iter().find(|s| s.slug == slug).cloned())
    }

    async fn get_journal_entry(&self, principal: &Principal, id: Uuid) -> Result<JournalEntry> {
        let journal = self.journal.read().await;
        journal
            .get(&id)
            .filter(|entry| entry.user_id == principal.user_id)
            .cloned()
            .ok_or_else(|| journal_not_found(id))
    }

    async fn update_journal_entry(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: JournalPatch,
    ) -> Result<JournalEntry> {
        let mut journal = self.journal.write().await;
        let entry = journal
            .get_mut(&id)
            .filter(|entry| entry.user_id == principal.user_id)
            .ok_or_else(|| journal_not_found(id))?;

        patch.apply(entry);
        debug!(%id, user = %principal.user_id, "journal entry updated");
        Ok(entry.clone())
    }

    async fn delete_journal_entry(&self, principal: &Principal, id: Uuid) -> Result<()> {
        let mut journal = self.journal.write().await;
        match journal.get(&id) {
            Some(entry) if entry.user_id == principal.user_id => {
                journal.remove(&id);
                debug!(%id, user = %principal.user_id, "journal entry deleted");
                Ok(())
            }
            _ => Err(journal_not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::Utc;

    fn section(slug: &str, order: i32) -> Section {
        Section {
            id: format!("id-{slug}"),
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            order,
            audio_file_path: None,
            text_file_path: None,
        }
    }

    fn entry(user: &str) -> JournalEntry {
        let now = Utc::now();
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: user.to_string(),
            section_id: None,
            title: "Morning".into(),
            content: "Pages".into(),
            mood: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn principal(user: &str) -> Principal {
        Principal {
            user_id: user.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_sections_sorted_by_order() {
        let store = InMemoryContentStore::from_seed(ContentSeed {
            sections: vec![section("c", 3), section("a", 1), section("b", 2)],
            journal_entries: Vec::new(),
        });

        let slugs: Vec<String> = store
            .list_sections()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_get_section_by_slug() {
        let store = InMemoryContentStore::new();
        store.insert_section(section("intro", 1)).await;

        assert!(store.get_section_by_slug("intro").await.unwrap().is_some());
        assert!(store.get_section_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_journal_scoped_to_owner() {
        let store = InMemoryContentStore::new();
        let owned = entry("alice");
        let id = owned.id;
        store.insert_journal_entry(owned).await;

        assert!(store.get_journal_entry(&principal("alice"), id).await.is_ok());
        assert!(matches!(
            store.get_journal_entry(&principal("bob"), id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_journal_entry(&principal("bob"), id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_journal_entry() {
        let store = InMemoryContentStore::new();
        let owned = entry("alice");
        let id = owned.id;
        store.insert_journal_entry(owned).await;

        let patch = JournalPatch {
            mood: Some(Mood::Grateful),
            ..Default::default()
        };
        let updated = store
            .update_journal_entry(&principal("alice"), id, patch)
            .await
            .unwrap();
        assert_eq!(updated.mood, Some(Mood::Grateful));
        assert_eq!(updated.title, "Morning");

        store.delete_journal_entry(&principal("alice"), id).await.unwrap();
        assert!(store.get_journal_entry(&principal("alice"), id).await.is_err());
    }

    #[test]
    fn test_seed_parses_camel_case() {
        let raw = r#"{
            "sections": [
                {"id": "1", "title": "Intro", "slug": "intro", "order": 1, "audioFilePath": "a/intro.mp3"}
            ]
        }"#;
        let seed: ContentSeed = serde_json::from_str(raw).unwrap();
        assert_eq!(seed.sections[0].audio_file_path.as_deref(), Some("a/intro.mp3"));
        assert!(seed.journal_entries.is_empty());
    }

    #[test]
    fn test_missing_seed_file_is_error() {
        let err = InMemoryContentStore::from_seed_file(Path::new("/nonexistent/seed.json"))
            .unwrap_err();
        assert!(err.to_string().contains("reading content seed"));
    }

    #[tokio::test]
    async fn test_bundled_seed_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/content.seed.json");
        let store = InMemoryContentStore::from_seed_file(&path).unwrap();

        let sections = store.list_sections().await.unwrap();
        assert_eq!(sections.first().map(|s| s.slug.as_str()), Some("welcome"));

        let id = Uuid::parse_str("6f1c2a9e-3b4d-4c5e-8f70-112233445566").unwrap();
        let entry = store.get_journal_entry(&principal("demo-user"), id).await.unwrap();
        assert_eq!(entry.mood, Some(Mood::Hopeful));
    }
}
