//! Long-horizon goals tracked as a fixed-length walk of checkable days.
//!
//! A goal spans every calendar day from its creation date to its target
//! date inclusive. There is no streak concept for goals, only the
//! cumulative count of walked days against that fixed total.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A dated objective with per-day check-ins and progress logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier (uuid v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Day the goal was created; first day of the walk.
    pub created_at: NaiveDate,

    /// Last day of the walk, on or after `created_at`.
    pub target_date: NaiveDate,

    /// Days along the timeline that were walked.
    #[serde(default)]
    pub completed_days: BTreeSet<NaiveDate>,

    /// At most one progress log per day, upsert semantics.
    #[serde(default)]
    pub logs: BTreeMap<NaiveDate, String>,
}

impl Goal {
    /// Create a goal with an empty walk.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::TargetBeforeCreation`] when the target precedes
    /// the creation date.
    pub fn new(
        name: impl Into<String>,
        created_at: NaiveDate,
        target_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("goal"));
        }
        if target_date < created_at {
            return Err(ValidationError::TargetBeforeCreation {
                target: target_date,
                created: created_at,
            });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at,
            target_date,
            completed_days: BTreeSet::new(),
            logs: BTreeMap::new(),
        })
    }

    /// Number of days in the walk, creation and target inclusive.
    pub fn total_days(&self) -> u32 {
        (self.target_date - self.created_at).num_days() as u32 + 1
    }

    /// Every day of the walk in chronological order.
    pub fn day_sequence(&self) -> impl Iterator<Item = NaiveDate> + Clone {
        let start = self.created_at;
        (0..self.total_days() as u64).map(move |i| start + Days::new(i))
    }

    /// Whether every day of the walk has been checked off.
    pub fn is_fully_completed(&self) -> bool {
        self.completed_days.len() as u32 >= self.total_days()
    }

    /// Walked-day count as a rounded percentage of the total.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_days();
        let done = self.completed_days.len() as f64;
        ((done / f64::from(total)) * 100.0).round().min(100.0) as u8
    }

    /// Flip a day's walked state. Returns true when the day is walked
    /// after the toggle.
    pub fn toggle_day(&mut self, date: NaiveDate) -> bool {
        if !self.completed_days.remove(&date) {
            self.completed_days.insert(date);
            true
        } else {
            false
        }
    }

    /// Replace-or-create the log entry for a day.
    pub fn upsert_log(&mut self, date: NaiveDate, note: impl Into<String>) {
        self.logs.insert(date, note.into());
    }

    /// Log text for a day, empty when absent.
    pub fn log_for(&self, date: NaiveDate) -> &str {
        self.logs.get(&date).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn ten_day_walk_counts_inclusively() {
        let goal = Goal::new("Walk 10k", day("2025-03-01"), day("2025-03-10")).unwrap();
        assert_eq!(goal.total_days(), 10);
        assert_eq!(goal.day_sequence().count(), 10);
        assert_eq!(goal.day_sequence().last(), Some(day("2025-03-10")));
    }

    #[test]
    fn full_completion_requires_every_day() {
        let mut goal = Goal::new("Walk 10k", day("2025-03-01"), day("2025-03-10")).unwrap();

        let days: Vec<NaiveDate> = goal.day_sequence().collect();
        for d in &days[..9] {
            goal.toggle_day(*d);
        }
        assert!(!goal.is_fully_completed());
        assert_eq!(goal.progress_percent(), 90);

        goal.toggle_day(days[9]);
        assert!(goal.is_fully_completed());
        assert_eq!(goal.progress_percent(), 100);
    }

    #[test]
    fn single_day_goal_is_valid() {
        let goal = Goal::new("Ship it", day("2025-03-01"), day("2025-03-01")).unwrap();
        assert_eq!(goal.total_days(), 1);
    }

    #[test]
    fn target_before_creation_rejected() {
        let err = Goal::new("Backwards", day("2025-03-10"), day("2025-03-01")).unwrap_err();
        assert!(matches!(err, ValidationError::TargetBeforeCreation { .. }));
    }

    #[test]
    fn empty_name_rejected() {
        let err = Goal::new("   ", day("2025-03-01"), day("2025-03-10")).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyName("goal")));
    }

    #[test]
    fn log_upsert_replaces_entry() {
        let mut goal = Goal::new("Walk 10k", day("2025-03-01"), day("2025-03-10")).unwrap();
        let d = day("2025-03-02");

        goal.upsert_log(d, "halfway there");
        goal.upsert_log(d, "made it");

        assert_eq!(goal.logs.len(), 1);
        assert_eq!(goal.log_for(d), "made it");
        assert_eq!(goal.log_for(day("2025-03-03")), "");
    }

    #[test]
    fn day_toggle_is_idempotent_pair() {
        let mut goal = Goal::new("Walk 10k", day("2025-03-01"), day("2025-03-10")).unwrap();
        let d = day("2025-03-05");

        assert!(goal.toggle_day(d));
        assert!(!goal.toggle_day(d));
        assert!(goal.completed_days.is_empty());
    }
}
