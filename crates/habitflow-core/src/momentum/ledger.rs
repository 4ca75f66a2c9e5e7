//! Daily award ledger: the idempotency guards for points and streak.
//!
//! Each habit may earn points at most once per calendar day, and the
//! all-habits streak may grow at most once per day, however many times a
//! completion is toggled back and forth. The ledger owns those guards as
//! one explicit, persisted record instead of scattered storage markers,
//! and rolls itself over when the calendar date changes.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day award bookkeeping plus the celebration marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLedger {
    /// The day this ledger is valid for.
    pub date: NaiveDate,

    /// Habits that already earned points today.
    #[serde(default)]
    pub awarded: BTreeSet<String>,

    /// Whether the streak already grew today.
    #[serde(default)]
    pub streak_awarded: bool,

    /// Last day a full-completion celebration was shown.
    #[serde(default)]
    pub last_celebration: Option<NaiveDate>,
}

impl DailyLedger {
    /// Fresh ledger for a day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            awarded: BTreeSet::new(),
            streak_awarded: false,
            last_celebration: None,
        }
    }

    /// Reset the per-day guards when the calendar date has moved on.
    /// The celebration marker survives the rollover. Rolls only forward:
    /// a stale caller clock never re-arms an already-spent day.
    pub fn roll_to(&mut self, today: NaiveDate) {
        if today > self.date {
            self.date = today;
            self.awarded.clear();
            self.streak_awarded = false;
        }
    }

    /// Grant the once-per-day points award for a habit. Returns true the
    /// first time per day, false on every repeat.
    pub fn try_award(&mut self, habit_id: &str) -> bool {
        self.awarded.insert(habit_id.to_string())
    }

    /// Grant the once-per-day streak award. Returns true the first time.
    pub fn try_award_streak(&mut self) -> bool {
        !std::mem::replace(&mut self.streak_awarded, true)
    }

    /// Grant the once-per-day celebration. Returns true the first time.
    pub fn try_celebrate(&mut self, today: NaiveDate) -> bool {
        if self.last_celebration == Some(today) {
            return false;
        }
        self.last_celebration = Some(today);
        true
    }
}
