//! The habit store: CRUD over habits and goals, the single source of
//! truth other components read from.
//!
//! Every mutation synchronously rewrites the affected collection to its
//! JSON file (`habits.json` / `goals.json` in the data dir). Corrupt or
//! missing files load as empty collections, never as errors.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{StoreError, ValidationError};
use crate::goal::Goal;
use crate::habit::{Habit, Priority};
use crate::platform::{NullBridge, PreferenceBridge};
use crate::storage::{self, LoadOutcome};

const HABITS_FILE: &str = "habits.json";
const GOALS_FILE: &str = "goals.json";

/// Owns the habit and goal collections and their persistence.
pub struct HabitStore {
    dir: PathBuf,
    habits: Vec<Habit>,
    goals: Vec<Goal>,
    habits_outcome: LoadOutcome,
    goals_outcome: LoadOutcome,
    bridge: Box<dyn PreferenceBridge>,
}

impl HabitStore {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::open_at(storage::data_dir()?))
    }

    /// Open the store in a specific directory (tests use a temp dir).
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let (habits, habits_outcome) = storage::load_or_default(&dir.join(HABITS_FILE));
        let (goals, goals_outcome) = storage::load_or_default(&dir.join(GOALS_FILE));
        Self {
            dir,
            habits,
            goals,
            habits_outcome,
            goals_outcome,
            bridge: Box::new(NullBridge),
        }
    }

    /// Replace the preference bridge (platform builds pass a real one).
    pub fn with_bridge(mut self, bridge: Box<dyn PreferenceBridge>) -> Self {
        self.bridge = bridge;
        self
    }

    /// Swap the preference bridge in place.
    pub fn set_bridge(&mut self, bridge: Box<dyn PreferenceBridge>) {
        self.bridge = bridge;
    }

    /// How the habits collection loaded at open.
    pub fn habits_load_outcome(&self) -> LoadOutcome {
        self.habits_outcome
    }

    /// How the goals collection loaded at open.
    pub fn goals_load_outcome(&self) -> LoadOutcome {
        self.goals_outcome
    }

    // ----- habits -----

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Create a habit with an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] (and performs no mutation)
    /// for a blank name; propagates persistence failures.
    pub fn add_habit(
        &mut self,
        name: &str,
        emoji: &str,
        color: &str,
        priority: Priority,
        today: NaiveDate,
    ) -> Result<&Habit, crate::error::CoreError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("habit").into());
        }
        let habit = Habit::new(name.trim(), emoji, color, priority, today);
        self.habits.push(habit);
        self.persist_habits()?;
        Ok(self.habits.last().expect("just pushed"))
    }

    /// Remove a habit. No-op (returns false) when the id is absent.
    pub fn delete_habit(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return Ok(false);
        }
        self.persist_habits()?;
        Ok(true)
    }

    /// Flip completion of `date` for a habit. Returns the new completion
    /// state, or `None` (no-op) when the id is absent.
    pub fn toggle_completion(
        &mut self,
        id: &str,
        date: NaiveDate,
    ) -> Result<Option<bool>, StoreError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        let completed = habit.toggle_completion(date);
        self.persist_habits()?;
        Ok(Some(completed))
    }

    /// Upsert-or-delete a note. Returns false (no-op) when the id is absent.
    pub fn set_note(&mut self, id: &str, date: NaiveDate, text: &str) -> Result<bool, StoreError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        habit.set_note(date, text);
        self.persist_habits()?;
        Ok(true)
    }

    /// Record a freeze on a habit for a day. Returns false when absent.
    pub fn mark_frozen(&mut self, id: &str, date: NaiveDate) -> Result<bool, StoreError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        habit.mark_frozen(date);
        self.persist_habits()?;
        Ok(true)
    }

    /// Habits not yet completed on the given day.
    pub fn pending_count(&self, today: NaiveDate) -> usize {
        self.habits
            .iter()
            .filter(|h| !h.is_completed_on(today))
            .count()
    }

    /// Habits completed on the given day.
    pub fn completed_count(&self, today: NaiveDate) -> usize {
        self.habits.len() - self.pending_count(today)
    }

    /// Whether every tracked habit was completed on the day. False when
    /// no habits exist: an empty tracker earns no streak.
    pub fn all_completed_on(&self, date: NaiveDate) -> bool {
        !self.habits.is_empty() && self.habits.iter().all(|h| h.is_completed_on(date))
    }

    /// Push today's pending count through the platform bridge so the
    /// native side can schedule reminders. Bridge failures are logged
    /// and swallowed.
    pub fn publish_pending_count(&self, today: NaiveDate) {
        let count = self.pending_count(today);
        if let Err(err) = self.bridge.set_pending_count(count) {
            tracing::warn!(%err, "preference bridge write failed");
        }
    }

    fn persist_habits(&self) -> Result<(), StoreError> {
        storage::save(&self.dir.join(HABITS_FILE), &self.habits)
    }

    // ----- goals -----

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Create a goal whose walk runs from today to `target_date`.
    ///
    /// # Errors
    ///
    /// Propagates [`Goal::new`] validation and persistence failures.
    pub fn add_goal(
        &mut self,
        name: &str,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&Goal, crate::error::CoreError> {
        let goal = Goal::new(name, today, target_date)?;
        self.goals.push(goal);
        self.persist_goals()?;
        Ok(self.goals.last().expect("just pushed"))
    }

    /// Remove a goal. No-op (returns false) when the id is absent.
    pub fn delete_goal(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Ok(false);
        }
        self.persist_goals()?;
        Ok(true)
    }

    /// Flip a walked day on a goal. Returns the new state, `None` when
    /// the id is absent.
    pub fn toggle_goal_day(
        &mut self,
        id: &str,
        date: NaiveDate,
    ) -> Result<Option<bool>, StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        let walked = goal.toggle_day(date);
        self.persist_goals()?;
        Ok(Some(walked))
    }

    /// Replace-or-create a goal's log for a day. Returns false when absent.
    pub fn upsert_goal_log(
        &mut self,
        id: &str,
        date: NaiveDate,
        note: &str,
    ) -> Result<bool, StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        goal.upsert_log(date, note);
        self.persist_goals()?;
        Ok(true)
    }

    fn persist_goals(&self) -> Result<(), StoreError> {
        storage::save(&self.dir.join(GOALS_FILE), &self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FileBridge;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn open_temp() -> (tempfile::TempDir, HabitStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HabitStore::open_at(dir.path());
        (dir, store)
    }

    #[test]
    fn fresh_store_is_empty_and_missing() {
        let (_dir, store) = open_temp();
        assert!(store.habits().is_empty());
        assert!(store.goals().is_empty());
        assert_eq!(store.habits_load_outcome(), LoadOutcome::Missing);
    }

    #[test]
    fn add_habit_rejects_blank_name() {
        let (_dir, mut store) = open_temp();
        let err = store
            .add_habit("   ", "📚", "coral", Priority::Medium, day("2025-01-07"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Validation(ValidationError::EmptyName("habit"))
        ));
        assert!(store.habits().is_empty());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut store = HabitStore::open_at(dir.path());
            let id = store
                .add_habit("Read", "📚", "coral", Priority::High, day("2025-01-01"))
                .unwrap()
                .id
                .clone();
            store.toggle_completion(&id, day("2025-01-06")).unwrap();
            store.toggle_completion(&id, day("2025-01-07")).unwrap();
            store.set_note(&id, day("2025-01-07"), "late session").unwrap();
            id
        };

        let store = HabitStore::open_at(dir.path());
        assert_eq!(store.habits_load_outcome(), LoadOutcome::Loaded);
        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.total_completions(), 2);
        assert_eq!(habit.note_for(day("2025-01-07")), "late session");
        assert_eq!(habit.priority, Priority::High);
    }

    #[test]
    fn corrupt_habits_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HABITS_FILE), "]]junk[[").unwrap();

        let store = HabitStore::open_at(dir.path());
        assert!(store.habits().is_empty());
        assert_eq!(store.habits_load_outcome(), LoadOutcome::Recovered);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let (_dir, mut store) = open_temp();
        assert_eq!(store.toggle_completion("nope", day("2025-01-07")).unwrap(), None);
        assert!(!store.delete_habit("nope").unwrap());
    }

    #[test]
    fn pending_and_all_completed() {
        let (_dir, mut store) = open_temp();
        let today = day("2025-01-07");

        assert!(!store.all_completed_on(today)); // empty tracker

        let a = store
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap()
            .id
            .clone();
        let b = store
            .add_habit("Run", "🏃", "blue", Priority::Medium, today)
            .unwrap()
            .id
            .clone();

        assert_eq!(store.pending_count(today), 2);

        store.toggle_completion(&a, today).unwrap();
        assert_eq!(store.pending_count(today), 1);
        assert_eq!(store.completed_count(today), 1);
        assert!(!store.all_completed_on(today));

        store.toggle_completion(&b, today).unwrap();
        assert!(store.all_completed_on(today));
    }

    #[test]
    fn bridge_receives_pending_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HabitStore::open_at(dir.path())
            .with_bridge(Box::new(FileBridge::new(dir.path())));
        let today = day("2025-01-07");

        store
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap();
        store.publish_pending_count(today);

        assert_eq!(FileBridge::new(dir.path()).read(), Some(1));
    }

    #[test]
    fn goal_crud_and_log_upsert() {
        let (_dir, mut store) = open_temp();
        let today = day("2025-03-01");

        let id = store
            .add_goal("Walk 10k", day("2025-03-10"), today)
            .unwrap()
            .id
            .clone();

        store.toggle_goal_day(&id, today).unwrap();
        store.upsert_goal_log(&id, today, "first steps").unwrap();
        store.upsert_goal_log(&id, today, "first steps, revised").unwrap();

        let goal = store.goal(&id).unwrap();
        assert_eq!(goal.completed_days.len(), 1);
        assert_eq!(goal.logs.len(), 1);
        assert_eq!(goal.log_for(today), "first steps, revised");

        assert!(store.delete_goal(&id).unwrap());
        assert!(store.goals().is_empty());
    }

    #[test]
    fn goal_target_before_today_rejected() {
        let (_dir, mut store) = open_temp();
        let err = store
            .add_goal("Backwards", day("2025-02-01"), day("2025-03-01"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Validation(ValidationError::TargetBeforeCreation { .. })
        ));
    }
}
