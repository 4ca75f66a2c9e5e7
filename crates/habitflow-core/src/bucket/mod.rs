//! Bucket list: one-shot aspirations, independent of habit streak logic.
//!
//! A parallel feature store with the same CRUD-and-persist shape as the
//! habit store, keyed by its own JSON file.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, ValidationError};
use crate::storage::{self, LoadOutcome};

const BUCKET_FILE: &str = "bucket.json";

/// A bucket-list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketItem {
    /// Unique identifier (uuid v4).
    pub id: String,

    /// What the user wants to do once.
    pub name: String,

    /// Emoji glyph.
    pub emoji: String,

    /// Free-form grouping label ("travel", "skills", ...).
    pub category: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the item has been done.
    #[serde(default)]
    pub is_completed: bool,

    /// Day the item was done, present only while completed.
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,

    /// Day the item was added.
    pub created_at: NaiveDate,
}

/// Fields of a bucket item the user may edit after creation.
#[derive(Debug, Clone, Default)]
pub struct BucketItemUpdate {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub description: Option<Option<String>>,
}

/// Owns the bucket-list collection and its persistence.
pub struct BucketStore {
    path: PathBuf,
    items: Vec<BucketItem>,
    outcome: LoadOutcome,
}

impl BucketStore {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::open_at(storage::data_dir()?))
    }

    /// Open the store in a specific directory.
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(BUCKET_FILE);
        let (items, outcome) = storage::load_or_default(&path);
        Self {
            path,
            items,
            outcome,
        }
    }

    /// How the collection loaded at open.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    pub fn items(&self) -> &[BucketItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&BucketItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Add an item, initially incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name; propagates
    /// persistence failures.
    pub fn add_item(
        &mut self,
        name: &str,
        emoji: &str,
        category: &str,
        description: Option<String>,
        today: NaiveDate,
    ) -> Result<&BucketItem, crate::error::CoreError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("bucket item").into());
        }
        self.items.push(BucketItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            emoji: emoji.to_string(),
            category: category.to_string(),
            description,
            is_completed: false,
            completed_at: None,
            created_at: today,
        });
        self.persist()?;
        Ok(self.items.last().expect("just pushed"))
    }

    /// Remove an item. No-op (returns false) when the id is absent.
    pub fn delete_item(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Flip completion, stamping or clearing the completion day.
    /// Returns the new state, `None` when the id is absent.
    pub fn toggle_complete(
        &mut self,
        id: &str,
        today: NaiveDate,
    ) -> Result<Option<bool>, StoreError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        item.is_completed = !item.is_completed;
        item.completed_at = item.is_completed.then_some(today);
        let now_completed = item.is_completed;
        self.persist()?;
        Ok(Some(now_completed))
    }

    /// Apply a partial edit. Returns false when the id is absent.
    pub fn update_item(&mut self, id: &str, update: BucketItemUpdate) -> Result<bool, StoreError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(emoji) = update.emoji {
            item.emoji = emoji;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        self.persist()?;
        Ok(true)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.items.len() - self.completed_count()
    }

    fn persist(&self) -> Result<(), StoreError> {
        storage::save(&self.path, &self.items)
    }
}
