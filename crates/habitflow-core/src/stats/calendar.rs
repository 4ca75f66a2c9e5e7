//! Calendar bucketing for week and month views.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// One day of a calendar view, tagged with completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Short label for the UI: weekday name in week view ("Mon"),
    /// day number in month view ("17").
    pub label: String,
    pub completed: bool,
}

/// A finite, cloneable (and therefore restartable) run of calendar days.
#[derive(Debug, Clone)]
pub struct DayRange {
    next: NaiveDate,
    last: NaiveDate,
    done: bool,
}

impl DayRange {
    /// Inclusive range from `first` to `last`.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            next: first,
            last,
            done: first > last,
        }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        let current = self.next;
        if current == self.last {
            self.done = true;
        } else {
            self.next = current + Days::new(1);
        }
        Some(current)
    }
}

/// The 7 days of the Monday-start week containing `reference`.
pub fn week_of(reference: NaiveDate) -> DayRange {
    let monday = reference - Days::new(u64::from(reference.weekday().num_days_from_monday()));
    DayRange::new(monday, monday + Days::new(6))
}

/// Every day of the calendar month containing `reference`.
pub fn month_of(reference: NaiveDate) -> DayRange {
    let first = reference.with_day(1).expect("day 1 exists in every month");
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("first of next month exists");
    DayRange::new(first, next_month - Days::new(1))
}

/// Week view for a habit: 7 cells labeled with weekday names.
///
/// Days before the habit's creation (or in the future) simply come back
/// uncompleted; dimming or disabling them is the caller's concern.
pub fn weekly_data(habit: &Habit, reference: NaiveDate) -> Vec<DayCell> {
    week_of(reference)
        .map(|date| DayCell {
            date,
            label: date.format("%a").to_string(),
            completed: habit.is_completed_on(date),
        })
        .collect()
}

/// Month view for a habit: one cell per calendar day, labeled by number.
pub fn monthly_data(habit: &Habit, reference: NaiveDate) -> Vec<DayCell> {
    month_of(reference)
        .map(|date| DayCell {
            date,
            label: date.day().to_string(),
            completed: habit.is_completed_on(date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Priority;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn week_starts_monday() {
        // 2025-01-08 is a Wednesday.
        let week: Vec<NaiveDate> = week_of(day("2025-01-08")).collect();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], day("2025-01-06"));
        assert_eq!(week[6], day("2025-01-12"));
    }

    #[test]
    fn week_of_monday_is_same_week() {
        let week: Vec<NaiveDate> = week_of(day("2025-01-06")).collect();
        assert_eq!(week[0], day("2025-01-06"));
    }

    #[test]
    fn month_covers_every_day() {
        assert_eq!(month_of(day("2025-01-15")).count(), 31);
        assert_eq!(month_of(day("2025-02-15")).count(), 28);
        assert_eq!(month_of(day("2024-02-15")).count(), 29);
        assert_eq!(month_of(day("2025-12-15")).count(), 31);
    }

    #[test]
    fn range_is_restartable_via_clone() {
        let range = week_of(day("2025-01-08"));
        let first_pass: Vec<NaiveDate> = range.clone().collect();
        let second_pass: Vec<NaiveDate> = range.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn weekly_cells_tag_completions() {
        let mut habit = Habit::new("Read", "📚", "coral", Priority::Medium, day("2025-01-01"));
        habit.toggle_completion(day("2025-01-07"));

        let cells = weekly_data(&habit, day("2025-01-08"));
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0].label, "Mon");
        assert!(cells[1].completed); // Tue 2025-01-07
        assert!(!cells[2].completed);
    }

    #[test]
    fn days_before_creation_report_uncompleted() {
        let habit = Habit::new("Read", "📚", "coral", Priority::Medium, day("2025-01-15"));
        let cells = monthly_data(&habit, day("2025-01-20"));
        assert_eq!(cells.len(), 31);
        assert!(cells.iter().all(|c| !c.completed));
        assert_eq!(cells[0].label, "1");
        assert_eq!(cells[30].label, "31");
    }
}
