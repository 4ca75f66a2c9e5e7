//! The tracker facade: what a front end talks to.
//!
//! Owns the habit store, bucket store, momentum bank, daily ledger, and
//! reminder scheduler, and wires completion events into the points
//! economy. Each collection persists independently after the mutations
//! that touch it, under its own key in the data dir.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::bucket::BucketStore;
use crate::error::{CoreError, ValidationError};
use crate::habit::store::HabitStore;
use crate::habit::Priority;
use crate::momentum::{DailyLedger, MomentumBank, Reconciliation, POINTS_PER_HABIT};
use crate::platform::Notifier;
use crate::reminder::ReminderScheduler;
use crate::storage::{self, NotificationsConfig};

const MOMENTUM_FILE: &str = "momentum.json";
const LEDGER_FILE: &str = "ledger.json";

/// What happened when a habit completion was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    /// Completion state for the day after the toggle.
    pub completed: bool,
    /// Points credited by this toggle (zero on repeats and un-toggles).
    pub points_awarded: u32,
    /// Whether this toggle extended the all-habits streak.
    pub streak_extended: bool,
}

/// Top-level application state.
pub struct Tracker {
    dir: PathBuf,
    store: HabitStore,
    bucket: BucketStore,
    bank: MomentumBank,
    ledger: DailyLedger,
    reminders: ReminderScheduler,
}

impl Tracker {
    /// Open everything in the default data directory, with the
    /// file-backed preference bridge the native side reads.
    pub fn open(today: NaiveDate) -> Result<Self, CoreError> {
        let dir = storage::data_dir()?;
        let mut tracker = Self::open_at(&dir, today);
        tracker
            .store
            .set_bridge(Box::new(crate::platform::FileBridge::new(&dir)));
        Ok(tracker)
    }

    /// Open everything in a specific directory (tests use a temp dir).
    pub fn open_at(dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let dir = dir.into();
        let store = HabitStore::open_at(&dir);
        let bucket = BucketStore::open_at(&dir);
        let (bank, _) = storage::load_or_default::<MomentumBank>(&dir.join(MOMENTUM_FILE));
        let (ledger, _) =
            storage::load_or_default::<Option<DailyLedger>>(&dir.join(LEDGER_FILE));
        let mut ledger = ledger.unwrap_or_else(|| DailyLedger::new(today));
        ledger.roll_to(today);
        let reminders = ReminderScheduler::open_at(&dir);
        Self {
            dir,
            store,
            bucket,
            bank,
            ledger,
            reminders,
        }
    }

    // ----- collaborator access -----

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HabitStore {
        &mut self.store
    }

    pub fn bucket(&self) -> &BucketStore {
        &self.bucket
    }

    pub fn bucket_mut(&mut self) -> &mut BucketStore {
        &mut self.bucket
    }

    pub fn bank(&self) -> &MomentumBank {
        &self.bank
    }

    pub fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    // ----- completion pipeline -----

    /// Toggle today's completion for a habit and settle the economy:
    /// first completion of the day earns points, and completing the last
    /// pending habit extends the all-habits streak. Repeat toggles flip
    /// the completion state but never re-award.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownId`] when the habit does not exist;
    /// persistence failures propagate.
    pub fn complete_habit(
        &mut self,
        id: &str,
        today: NaiveDate,
    ) -> Result<CompletionUpdate, CoreError> {
        let completed = self
            .store
            .toggle_completion(id, today)?
            .ok_or(ValidationError::UnknownId {
                kind: "habit",
                id: id.to_string(),
            })?;

        self.ledger.roll_to(today);

        let mut points_awarded = 0;
        if completed && self.ledger.try_award(id) {
            self.bank.award_points(POINTS_PER_HABIT);
            points_awarded = POINTS_PER_HABIT;
        }

        let mut streak_extended = false;
        if self.store.all_completed_on(today) && self.ledger.try_award_streak() {
            self.bank.update_streak(true);
            streak_extended = true;
        }

        self.persist_bank()?;
        self.persist_ledger()?;
        self.store.publish_pending_count(today);

        Ok(CompletionUpdate {
            completed,
            points_awarded,
            streak_extended,
        })
    }

    /// Run the once-per-day reconciliation against elapsed time. Returns
    /// `None` when no habits are tracked yet (nothing to settle, and the
    /// check date is deliberately left unstamped). Safe to call on every
    /// activation.
    pub fn daily_check(&mut self, today: NaiveDate) -> Result<Option<Reconciliation>, CoreError> {
        self.ledger.roll_to(today);
        self.persist_ledger()?;

        if self.store.habits().is_empty() {
            return Ok(None);
        }

        let yesterday = today.pred_opt().unwrap_or(today);
        let all_completed_yesterday = self.store.all_completed_on(yesterday);
        let outcome = self.bank.reconcile(today, all_completed_yesterday);
        self.persist_bank()?;
        Ok(Some(outcome))
    }

    /// Manual freeze path: spend one freeze and mark the habit frozen for
    /// the day.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownId`] for a missing habit and
    /// [`ValidationError::InsufficientPoints`] when the bank cannot cover
    /// the cost; nothing changes in either case.
    pub fn freeze_habit(&mut self, id: &str, today: NaiveDate) -> Result<(), CoreError> {
        if self.store.habit(id).is_none() {
            return Err(ValidationError::UnknownId {
                kind: "habit",
                id: id.to_string(),
            }
            .into());
        }
        self.bank.use_freeze().map_err(CoreError::from)?;
        self.store.mark_frozen(id, today)?;
        self.persist_bank()?;
        Ok(())
    }

    /// Whether the full-completion celebration should be shown now.
    /// Grants at most once per day, and only when every habit is done.
    pub fn celebrate(&mut self, today: NaiveDate) -> Result<bool, CoreError> {
        if !self.store.all_completed_on(today) {
            return Ok(false);
        }
        self.ledger.roll_to(today);
        if !self.ledger.try_celebrate(today) {
            return Ok(false);
        }
        self.persist_ledger()?;
        Ok(true)
    }

    /// Evaluate the daily reminder and deliver it when due.
    pub fn check_reminder(
        &mut self,
        config: &NotificationsConfig,
        now: NaiveDateTime,
        notifier: &dyn Notifier,
    ) -> Result<bool, CoreError> {
        let pending = self.store.pending_count(now.date());
        self.reminders.check_and_send(config, now, pending, notifier)
    }

    /// Wipe the momentum economy (points, streak, counters).
    pub fn reset_momentum(&mut self) -> Result<(), CoreError> {
        self.bank.reset();
        self.persist_bank()?;
        Ok(())
    }

    // ----- convenience delegates -----

    /// Add a habit created today.
    pub fn add_habit(
        &mut self,
        name: &str,
        emoji: &str,
        color: &str,
        priority: Priority,
        today: NaiveDate,
    ) -> Result<String, CoreError> {
        let id = self
            .store
            .add_habit(name, emoji, color, priority, today)?
            .id
            .clone();
        self.store.publish_pending_count(today);
        Ok(id)
    }

    fn persist_bank(&self) -> Result<(), CoreError> {
        storage::save(&self.dir.join(MOMENTUM_FILE), &self.bank)?;
        Ok(())
    }

    fn persist_ledger(&self) -> Result<(), CoreError> {
        storage::save(&self.dir.join(LEDGER_FILE), &self.ledger)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::FREEZE_COST;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn open_temp(today: &str) -> (tempfile::TempDir, Tracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = Tracker::open_at(dir.path(), day(today));
        (dir, tracker)
    }

    #[test]
    fn first_completion_awards_points_once() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        let today = day("2025-01-07");
        let id = tracker
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap();

        let first = tracker.complete_habit(&id, today).unwrap();
        assert!(first.completed);
        assert_eq!(first.points_awarded, POINTS_PER_HABIT);

        // Un-toggle and re-toggle: state flips, no second award.
        let second = tracker.complete_habit(&id, today).unwrap();
        assert!(!second.completed);
        assert_eq!(second.points_awarded, 0);

        let third = tracker.complete_habit(&id, today).unwrap();
        assert!(third.completed);
        assert_eq!(third.points_awarded, 0);

        assert_eq!(tracker.bank().momentum_points, POINTS_PER_HABIT);
    }

    #[test]
    fn streak_extends_when_last_habit_completes() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        let today = day("2025-01-07");
        let a = tracker
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap();
        let b = tracker
            .add_habit("Run", "🏃", "blue", Priority::Medium, today)
            .unwrap();

        let update = tracker.complete_habit(&a, today).unwrap();
        assert!(!update.streak_extended);
        assert_eq!(tracker.bank().current_streak, 0);

        let update = tracker.complete_habit(&b, today).unwrap();
        assert!(update.streak_extended);
        assert_eq!(tracker.bank().current_streak, 1);

        // Toggling one off and on again must not double-count the day.
        tracker.complete_habit(&a, today).unwrap();
        let update = tracker.complete_habit(&a, today).unwrap();
        assert!(!update.streak_extended);
        assert_eq!(tracker.bank().current_streak, 1);
    }

    #[test]
    fn daily_check_skips_empty_tracker() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        assert_eq!(tracker.daily_check(day("2025-01-07")).unwrap(), None);
        assert_eq!(tracker.bank().last_check_date, None);
    }

    #[test]
    fn daily_check_first_run_then_freeze() {
        let (_dir, mut tracker) = open_temp("2025-01-06");
        let id = tracker
            .add_habit("Read", "📚", "coral", Priority::Medium, day("2025-01-06"))
            .unwrap();

        assert_eq!(
            tracker.daily_check(day("2025-01-06")).unwrap(),
            Some(Reconciliation::FirstRun)
        );
        tracker.complete_habit(&id, day("2025-01-06")).unwrap();
        tracker.bank.momentum_points = 120;

        // Two days later: one gap day to settle, covered by a freeze.
        let outcome = tracker.daily_check(day("2025-01-08")).unwrap();
        assert_eq!(outcome, Some(Reconciliation::Frozen { days: 1 }));
        assert_eq!(tracker.bank().momentum_points, 70);
        assert_eq!(tracker.bank().freezes_used, 1);
    }

    #[test]
    fn freeze_habit_spends_and_marks() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        let today = day("2025-01-07");
        let id = tracker
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap();

        let err = tracker.freeze_habit(&id, today).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InsufficientPoints { .. })
        ));

        tracker.bank.momentum_points = FREEZE_COST;
        tracker.freeze_habit(&id, today).unwrap();

        assert_eq!(tracker.bank().momentum_points, 0);
        assert_eq!(tracker.bank().freezes_used, 1);
        assert!(tracker.store().habit(&id).unwrap().is_frozen_on(today));
    }

    #[test]
    fn freeze_unknown_habit_changes_nothing() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        tracker.bank.momentum_points = FREEZE_COST;

        let err = tracker.freeze_habit("nope", day("2025-01-07")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownId { .. })
        ));
        assert_eq!(tracker.bank().momentum_points, FREEZE_COST);
    }

    #[test]
    fn celebration_once_per_day_when_all_done() {
        let (_dir, mut tracker) = open_temp("2025-01-07");
        let today = day("2025-01-07");
        let id = tracker
            .add_habit("Read", "📚", "coral", Priority::Medium, today)
            .unwrap();

        assert!(!tracker.celebrate(today).unwrap()); // nothing completed yet

        tracker.complete_habit(&id, today).unwrap();
        assert!(tracker.celebrate(today).unwrap());
        assert!(!tracker.celebrate(today).unwrap());
    }

    #[test]
    fn bank_and_ledger_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let today = day("2025-01-07");
        let id = {
            let mut tracker = Tracker::open_at(dir.path(), today);
            let id = tracker
                .add_habit("Read", "📚", "coral", Priority::Medium, today)
                .unwrap();
            tracker.complete_habit(&id, today).unwrap();
            id
        };

        let mut tracker = Tracker::open_at(dir.path(), today);
        assert_eq!(tracker.bank().momentum_points, POINTS_PER_HABIT);

        // Same-day reopen must not re-award.
        tracker.complete_habit(&id, today).unwrap();
        let update = tracker.complete_habit(&id, today).unwrap();
        assert_eq!(update.points_awarded, 0);
        assert_eq!(tracker.bank().momentum_points, POINTS_PER_HABIT);
    }
}
