//! Daily reminder scheduling.
//!
//! Replaces a coarse polling loop with an explicit decide-and-mark
//! abstraction: `due` evaluates whether the daily reminder should fire
//! right now, `mark_sent` records that it did. Re-evaluating is always
//! safe; the persisted last-sent date guarantees at most one reminder
//! per calendar day no matter how often the check runs.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, ValidationError};
use crate::platform::Notifier;
use crate::storage::{self, NotificationsConfig};

const REMINDER_FILE: &str = "reminder.json";

/// A reminder ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
}

/// Persisted reminder bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderState {
    /// Last day a reminder was delivered.
    pub last_reminder_date: Option<NaiveDate>,
}

/// Owns the reminder state and the once-per-day decision.
pub struct ReminderScheduler {
    path: PathBuf,
    state: ReminderState,
}

impl ReminderScheduler {
    /// Open in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::open_at(storage::data_dir()?))
    }

    /// Open in a specific directory.
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(REMINDER_FILE);
        let (state, _) = storage::load_or_default(&path);
        Self { path, state }
    }

    pub fn state(&self) -> &ReminderState {
        &self.state
    }

    /// Whether the daily reminder should fire at `now`.
    ///
    /// Fires only when reminders are enabled, the configured time of day
    /// has passed, nothing was sent today, and at least one habit is
    /// still pending. Preference changes need no rescheduling call; the
    /// next evaluation simply sees the new values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidReminderTime`] for a malformed
    /// `reminder_time` preference.
    pub fn due(
        &self,
        config: &NotificationsConfig,
        now: NaiveDateTime,
        pending_count: usize,
    ) -> Result<Option<Reminder>, ValidationError> {
        let reminder_time = parse_reminder_time(&config.reminder_time)?;

        if !config.enabled
            || now.time() < reminder_time
            || self.state.last_reminder_date == Some(now.date())
            || pending_count == 0
        {
            return Ok(None);
        }

        let plural = if pending_count == 1 { "habit" } else { "habits" };
        Ok(Some(Reminder {
            title: "Habit Reminder".to_string(),
            body: format!("You still have {pending_count} {plural} to complete today!"),
        }))
    }

    /// Record that today's reminder went out.
    ///
    /// # Errors
    /// Propagates persistence failures.
    pub fn mark_sent(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        self.state.last_reminder_date = Some(today);
        storage::save(&self.path, &self.state)
    }

    /// Evaluate and, when due, deliver through the notifier and mark
    /// sent. Delivery failures are logged and swallowed; the day is
    /// still marked so a flaky notifier cannot spam.
    ///
    /// Returns whether a reminder was due.
    pub fn check_and_send(
        &mut self,
        config: &NotificationsConfig,
        now: NaiveDateTime,
        pending_count: usize,
        notifier: &dyn Notifier,
    ) -> Result<bool, crate::error::CoreError> {
        let Some(reminder) = self.due(config, now, pending_count)? else {
            return Ok(false);
        };
        if let Err(err) = notifier.notify(&reminder.title, &reminder.body) {
            tracing::warn!(%err, "reminder delivery failed");
        }
        self.mark_sent(now.date())?;
        Ok(true)
    }
}

/// Parse an "HH:MM" preference string.
pub fn parse_reminder_time(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| ValidationError::InvalidReminderTime(s.to_string()))
}
