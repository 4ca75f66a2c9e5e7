//! Statistics over a habit's completion history.
//!
//! Pure computation only: streak detection, rolling completion rate, and
//! calendar-bucketed week/month views. Every function takes the reference
//! day explicitly so results are reproducible in tests.

mod calendar;
mod streaks;

pub use calendar::{month_of, monthly_data, week_of, weekly_data, DayCell, DayRange};
pub use streaks::{completion_rate, current_streak, longest_streak, COMPLETION_WINDOW_DAYS};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Aggregate stats for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    /// Consecutive days ending at today (or yesterday as a grace day).
    pub current_streak: u32,
    /// Longest consecutive run anywhere in history.
    pub longest_streak: u32,
    /// Rounded percentage of completed days over the trailing window.
    pub completion_rate: u8,
    /// Completed days over the whole history.
    pub total_completions: u32,
}

/// Compute all stats for a habit as of `today`.
pub fn stats_for(habit: &Habit, today: NaiveDate) -> HabitStats {
    HabitStats {
        current_streak: current_streak(&habit.completed_dates, today),
        longest_streak: longest_streak(&habit.completed_dates),
        completion_rate: completion_rate(&habit.completed_dates, habit.created_at, today),
        total_completions: habit.completed_dates.len() as u32,
    }
}
