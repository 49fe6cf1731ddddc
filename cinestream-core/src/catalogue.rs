//! The ordered collection of entries, persisted as a whole on every mutation.
use std::time::{SystemTime, UNIX_EPOCH};

use cinestream_state::{ALL_CATEGORY, Entry, EntryDraft, EntryId, ValidationError, seed_entries};

use crate::store::KeyValueStore;

/// The key the catalogue is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cinestream_movies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    /// The draft was missing a required field. Nothing was changed.
    Validation(ValidationError),
    /// No entry has the given ID. Nothing was changed.
    NotFound(EntryId),
}
impl std::fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogueError::Validation(e) => write!(f, "{e}"),
            CatalogueError::NotFound(id) => write!(f, "No entry with ID {id}"),
        }
    }
}
impl std::error::Error for CatalogueError {}
impl From<ValidationError> for CatalogueError {
    fn from(e: ValidationError) -> Self {
        CatalogueError::Validation(e)
    }
}

pub struct Catalogue {
    store: Box<dyn KeyValueStore>,
    key: String,
    entries: Vec<Entry>,
    persist_error: Option<String>,
}
impl Catalogue {
    /// Rehydrates the catalogue from `store`. Falls back to the seed catalogue
    /// (and persists it) if nothing is stored or the stored value can't be read.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored = match store.load(&key) {
            Some(blob) => match serde_json::from_str::<Vec<Entry>>(&blob) {
                Ok(entries) => {
                    tracing::info!("loaded {} entries from `{key}`", entries.len());
                    Some(entries)
                }
                Err(e) => {
                    tracing::warn!("stored catalogue `{key}` is unreadable, reseeding: {e}");
                    None
                }
            },
            None => {
                tracing::info!("no stored catalogue under `{key}`, seeding");
                None
            }
        };

        let mut catalogue = Self {
            store,
            key,
            entries: vec![],
            persist_error: None,
        };
        match stored {
            Some(entries) => catalogue.entries = entries,
            None => {
                catalogue.entries = seed_entries();
                catalogue.persist();
            }
        }
        catalogue
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// The entries in `category`, in catalogue order. [`ALL_CATEGORY`] matches everything.
    pub fn list(&self, category: &str) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| category == ALL_CATEGORY || e.category == category)
            .cloned()
            .collect()
    }

    /// Adds a new entry to the front of the catalogue.
    pub fn create(&mut self, draft: EntryDraft) -> Result<Entry, CatalogueError> {
        draft.validate()?;
        let entry = draft.into_entry(self.fresh_id());
        self.entries.insert(0, entry.clone());
        tracing::info!("added `{}` ({})", entry.title, entry.id);
        self.persist();
        Ok(entry)
    }

    /// Replaces the entry with the given ID, keeping its ID and position.
    pub fn update(&mut self, id: &EntryId, draft: EntryDraft) -> Result<Entry, CatalogueError> {
        draft.validate()?;
        let Some(slot) = self.entries.iter_mut().find(|e| &e.id == id) else {
            return Err(CatalogueError::NotFound(id.clone()));
        };
        *slot = draft.into_entry(id.clone());
        let entry = slot.clone();
        tracing::info!("updated `{}` ({})", entry.title, entry.id);
        self.persist();
        Ok(entry)
    }

    /// Removes the entry with the given ID, returning it.
    pub fn delete(&mut self, id: &EntryId) -> Result<Entry, CatalogueError> {
        let Some(index) = self.entries.iter().position(|e| &e.id == id) else {
            return Err(CatalogueError::NotFound(id.clone()));
        };
        let entry = self.entries.remove(index);
        tracing::info!("deleted `{}` ({})", entry.title, entry.id);
        self.persist();
        Ok(entry)
    }

    /// The most recent persistence failure, if it hasn't been collected yet.
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }

    fn fresh_id(&self) -> EntryId {
        let mut candidate = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        while self.entries.iter().any(|e| e.id.0 == candidate.to_string()) {
            candidate += 1;
        }
        EntryId(candidate.to_string())
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(std::io::Error::from)
            .and_then(|blob| self.store.save(&self.key, &blob));
        if let Err(e) = result {
            tracing::error!("failed to save catalogue to `{}`: {e}", self.key);
            self.persist_error = Some(format!("Failed to save catalogue: {e}"));
        }
    }
}
