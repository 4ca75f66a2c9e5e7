//! # HabitFlow Core Library
//!
//! This library provides the core domain logic for the HabitFlow habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Habit Store**: CRUD over habits and goals, persisted as JSON
//!   collections on every mutation
//! - **Streak & Stats Engine**: pure computation over completion history
//!   (streaks, rolling completion rate, week/month calendar views)
//! - **Momentum Bank**: points economy that converts completions into
//!   streak freezes, reconciled once per day against elapsed time
//! - **Goal Progress Engine**: fixed-length day walks toward a target date
//! - **Reminder Scheduler**: at-most-once-per-day reminder decision
//!
//! ## Key Components
//!
//! - [`Tracker`]: top-level facade a front end talks to
//! - [`HabitStore`]: habit and goal collections and their persistence
//! - [`MomentumBank`]: points/freeze economy
//! - [`Config`]: application configuration management

pub mod bucket;
pub mod error;
pub mod goal;
pub mod habit;
pub mod momentum;
pub mod platform;
pub mod reminder;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use bucket::{BucketItem, BucketStore};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use goal::Goal;
pub use habit::store::HabitStore;
pub use habit::{Habit, Priority};
pub use momentum::{DailyLedger, MomentumBank, Reconciliation, FREEZE_COST, POINTS_PER_HABIT};
pub use platform::{ConsoleNotifier, Haptics, Notifier, PreferenceBridge};
pub use reminder::{Reminder, ReminderScheduler};
pub use stats::{monthly_data, stats_for, weekly_data, HabitStats};
pub use storage::{Config, LoadOutcome};
pub use tracker::{CompletionUpdate, Tracker};
