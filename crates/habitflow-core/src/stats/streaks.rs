//! Streak detection and rolling completion rate.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

/// Length of the trailing window for [`completion_rate`], in days.
pub const COMPLETION_WINDOW_DAYS: u32 = 30;

/// Consecutive completed days ending at `today`.
///
/// When today is not yet marked, yesterday still anchors an active streak
/// (one grace day); the walk stops at the first gap. A history touching
/// neither today nor yesterday scores zero.
pub fn current_streak(completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today - Days::new(1);
    let anchor = if completed.contains(&today) {
        today
    } else if completed.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut cursor = anchor;
    while completed.contains(&cursor) {
        streak += 1;
        cursor = cursor - Days::new(1);
    }
    streak
}

/// Longest consecutive run over the whole history.
pub fn longest_streak(completed: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    // BTreeSet iterates in ascending calendar order.
    for &date in completed {
        run = match prev {
            Some(p) if (date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// Completed-day ratio over a trailing window, as a rounded percentage.
///
/// The window is `min(30, age)` days where age counts inclusively from the
/// habit's creation date, so a habit created today is measured over a
/// single day rather than dividing by zero.
pub fn completion_rate(
    completed: &BTreeSet<NaiveDate>,
    created_at: NaiveDate,
    today: NaiveDate,
) -> u8 {
    let age_days = (today - created_at).num_days() + 1;
    let window = age_days.clamp(1, i64::from(COMPLETION_WINDOW_DAYS)) as u64;

    let start = today - Days::new(window - 1);
    let in_window = completed.range(start..=today).count() as f64;

    let rate = (in_window / window as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}
