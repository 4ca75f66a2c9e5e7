//! Habit records and per-habit mutation rules.
//!
//! A habit is a recurring daily activity identified by a uuid. Completion
//! history is a set of calendar days, so "completed at most once per day"
//! holds structurally rather than by convention. Notes are a map from day
//! to text with upsert-or-delete semantics.

pub mod store;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Relative importance of a habit, used for ordering in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A tracked daily habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier (uuid v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Emoji glyph shown next to the name.
    pub emoji: String,

    /// Color token for the UI.
    pub color: String,

    /// Relative priority.
    #[serde(default)]
    pub priority: Priority,

    /// Day the habit was created. Bounds the left edge of any
    /// rolling-window computation.
    pub created_at: NaiveDate,

    /// Days on which the habit was completed.
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,

    /// Days preserved by a momentum freeze despite non-completion.
    #[serde(default)]
    pub frozen_dates: BTreeSet<NaiveDate>,

    /// At most one free-text note per day.
    #[serde(default)]
    pub notes: BTreeMap<NaiveDate, String>,
}

impl Habit {
    /// Create a habit with an empty history, created today.
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        color: impl Into<String>,
        priority: Priority,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            emoji: emoji.into(),
            color: color.into(),
            priority,
            created_at,
            completed_dates: BTreeSet::new(),
            frozen_dates: BTreeSet::new(),
            notes: BTreeMap::new(),
        }
    }

    /// Whether the habit was completed on the given day.
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip completion for a day. Returns true when the day is completed
    /// after the toggle.
    pub fn toggle_completion(&mut self, date: NaiveDate) -> bool {
        if !self.completed_dates.remove(&date) {
            self.completed_dates.insert(date);
            true
        } else {
            false
        }
    }

    /// Upsert-or-delete a note for a day: non-empty trimmed text replaces
    /// or creates the entry, empty text removes it.
    pub fn set_note(&mut self, date: NaiveDate, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, trimmed.to_string());
        }
    }

    /// Note text for a day, empty when absent.
    pub fn note_for(&self, date: NaiveDate) -> &str {
        self.notes.get(&date).map(String::as_str).unwrap_or("")
    }

    /// Record a freeze applied to this habit for a day.
    pub fn mark_frozen(&mut self, date: NaiveDate) {
        self.frozen_dates.insert(date);
    }

    /// Whether a freeze covers the given day.
    pub fn is_frozen_on(&self, date: NaiveDate) -> bool {
        self.frozen_dates.contains(&date)
    }

    /// Total number of completed days.
    pub fn total_completions(&self) -> usize {
        self.completed_dates.len()
    }
}
