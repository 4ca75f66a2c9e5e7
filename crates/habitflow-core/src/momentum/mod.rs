//! Momentum bank: the points economy layered over habit completions.
//!
//! Completions earn points; banked points convert into streak freezes
//! that preserve the all-habits streak across missed days. A daily
//! reconciliation pass settles elapsed real-world time against the last
//! checked date, spending freezes chronologically until funds run out.

pub mod ledger;

pub use ledger::DailyLedger;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Points credited per habit completion per day.
pub const POINTS_PER_HABIT: u32 = 10;

/// Points one streak freeze costs.
pub const FREEZE_COST: u32 = 50;

/// Outcome of a daily reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// First run ever: no retroactive penalty, the date is just stamped.
    FirstRun,
    /// Already reconciled today; nothing changed.
    AlreadyChecked,
    /// No missed day to settle.
    Intact,
    /// Every missed day was covered by a freeze.
    Frozen { days: u32 },
    /// Funds ran out; the streak broke after `frozen` covered days.
    Broken { frozen: u32 },
}

/// Process-wide momentum state, persisted on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumBank {
    /// Banked points, only ever spent in [`FREEZE_COST`] steps.
    pub momentum_points: u32,

    /// Consecutive days on which every tracked habit was completed.
    pub current_streak: u32,

    /// Last day the reconciliation pass ran, if ever.
    pub last_check_date: Option<NaiveDate>,

    /// Cumulative freezes consumed, automatic and manual.
    pub freezes_used: u32,
}

impl MomentumBank {
    /// How many freezes the current balance affords. Derived, never stored.
    pub fn freeze_potential(&self) -> u32 {
        self.momentum_points / FREEZE_COST
    }

    /// Points toward the next freeze, for progress display.
    pub fn points_to_next_freeze(&self) -> u32 {
        self.momentum_points % FREEZE_COST
    }

    /// Credit points for a completed habit. Idempotency per habit per day
    /// is the caller's job, via [`DailyLedger::try_award`].
    pub fn award_points(&mut self, points: u32) {
        self.momentum_points += points;
    }

    /// Extend the all-habits streak by one day. The caller guarantees at
    /// most one call per calendar day, via [`DailyLedger::try_award_streak`].
    pub fn update_streak(&mut self, all_completed: bool) {
        if all_completed {
            self.current_streak += 1;
        }
    }

    /// Spend one freeze explicitly (user-triggered, outside reconciliation).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InsufficientPoints`] without touching any
    /// state when the balance cannot cover [`FREEZE_COST`].
    pub fn use_freeze(&mut self) -> Result<(), ValidationError> {
        if self.momentum_points < FREEZE_COST {
            return Err(ValidationError::InsufficientPoints {
                have: self.momentum_points,
                need: FREEZE_COST,
            });
        }
        self.momentum_points -= FREEZE_COST;
        self.freezes_used += 1;
        Ok(())
    }

    /// Settle elapsed days since the last check. Runs at most once per
    /// calendar day; every path stamps `last_check_date = today`.
    ///
    /// Gap days are settled oldest first, and settling stops at the first
    /// day a freeze cannot be afforded: once the streak is broken, later
    /// gap days must not keep draining the bank.
    pub fn reconcile(&mut self, today: NaiveDate, all_completed_yesterday: bool) -> Reconciliation {
        if self.last_check_date == Some(today) {
            return Reconciliation::AlreadyChecked;
        }

        let Some(last_check) = self.last_check_date else {
            self.last_check_date = Some(today);
            return Reconciliation::FirstRun;
        };

        let days_since = (today - last_check).num_days();
        self.last_check_date = Some(today);

        if days_since > 1 {
            // Every day in the gap except today is a potential miss.
            let mut frozen = 0u32;
            for _ in 1..days_since {
                if self.momentum_points >= FREEZE_COST {
                    self.momentum_points -= FREEZE_COST;
                    self.freezes_used += 1;
                    frozen += 1;
                } else {
                    self.current_streak = 0;
                    return Reconciliation::Broken { frozen };
                }
            }
            return Reconciliation::Frozen { days: frozen };
        }

        if days_since == 1 && !all_completed_yesterday {
            if self.momentum_points >= FREEZE_COST {
                self.momentum_points -= FREEZE_COST;
                self.freezes_used += 1;
                return Reconciliation::Frozen { days: 1 };
            }
            self.current_streak = 0;
            return Reconciliation::Broken { frozen: 0 };
        }

        Reconciliation::Intact
    }

    /// Zero all fields (data wipe).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn bank(points: u32, streak: u32, last_check: &str) -> MomentumBank {
        MomentumBank {
            momentum_points: points,
            current_streak: streak,
            last_check_date: Some(day(last_check)),
            freezes_used: 0,
        }
    }

    #[test]
    fn first_run_only_stamps_date() {
        let mut bank = MomentumBank::default();
        let outcome = bank.reconcile(day("2025-01-07"), false);

        assert_eq!(outcome, Reconciliation::FirstRun);
        assert_eq!(bank.last_check_date, Some(day("2025-01-07")));
        assert_eq!(bank.momentum_points, 0);
        assert_eq!(bank.current_streak, 0);
    }

    #[test]
    fn second_run_same_day_is_noop() {
        let mut b = bank(120, 4, "2025-01-06");
        b.reconcile(day("2025-01-07"), false);
        let points_after_first = b.momentum_points;

        let outcome = b.reconcile(day("2025-01-07"), false);
        assert_eq!(outcome, Reconciliation::AlreadyChecked);
        assert_eq!(b.momentum_points, points_after_first);
    }

    #[test]
    fn completed_yesterday_leaves_bank_untouched() {
        let mut b = bank(120, 4, "2025-01-06");
        let outcome = b.reconcile(day("2025-01-07"), true);

        assert_eq!(outcome, Reconciliation::Intact);
        assert_eq!(b.momentum_points, 120);
        assert_eq!(b.current_streak, 4);
        assert_eq!(b.freezes_used, 0);
    }

    #[test]
    fn missed_day_with_funds_freezes() {
        let mut b = bank(120, 4, "2025-01-06");
        let outcome = b.reconcile(day("2025-01-07"), false);

        assert_eq!(outcome, Reconciliation::Frozen { days: 1 });
        assert_eq!(b.momentum_points, 70);
        assert_eq!(b.freezes_used, 1);
        assert_eq!(b.current_streak, 4); // preserved, not reset
    }

    #[test]
    fn missed_day_without_funds_breaks() {
        let mut b = bank(30, 4, "2025-01-06");
        let outcome = b.reconcile(day("2025-01-07"), false);

        assert_eq!(outcome, Reconciliation::Broken { frozen: 0 });
        assert_eq!(b.momentum_points, 30); // untouched
        assert_eq!(b.current_streak, 0);
        assert_eq!(b.freezes_used, 0);
    }

    #[test]
    fn multi_day_gap_freezes_until_funds_run_out() {
        // 3-day gap, 60 points: one freeze (day 1), then broken on day 2,
        // day 3 not processed further.
        let mut b = bank(60, 7, "2025-01-04");
        let outcome = b.reconcile(day("2025-01-07"), false);

        assert_eq!(outcome, Reconciliation::Broken { frozen: 1 });
        assert_eq!(b.momentum_points, 10);
        assert_eq!(b.freezes_used, 1);
        assert_eq!(b.current_streak, 0);
        assert_eq!(b.last_check_date, Some(day("2025-01-07")));
    }

    #[test]
    fn multi_day_gap_fully_covered() {
        let mut b = bank(150, 7, "2025-01-04");
        let outcome = b.reconcile(day("2025-01-07"), false);

        assert_eq!(outcome, Reconciliation::Frozen { days: 2 });
        assert_eq!(b.momentum_points, 50);
        assert_eq!(b.freezes_used, 2);
        assert_eq!(b.current_streak, 7);
    }

    #[test]
    fn freeze_potential_tracks_balance() {
        let mut b = MomentumBank::default();
        assert_eq!(b.freeze_potential(), 0);

        b.award_points(POINTS_PER_HABIT);
        b.award_points(POINTS_PER_HABIT * 11);
        assert_eq!(b.momentum_points, 120);
        assert_eq!(b.freeze_potential(), 2);
        assert_eq!(b.points_to_next_freeze(), 20);
    }

    #[test]
    fn manual_freeze_checks_balance() {
        let mut b = MomentumBank {
            momentum_points: FREEZE_COST,
            ..Default::default()
        };
        b.use_freeze().unwrap();
        assert_eq!(b.momentum_points, 0);
        assert_eq!(b.freezes_used, 1);

        let err = b.use_freeze().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InsufficientPoints { have: 0, need: FREEZE_COST }
        ));
        assert_eq!(b.momentum_points, 0);
        assert_eq!(b.freezes_used, 1);
    }

    #[test]
    fn update_streak_gated_on_flag() {
        let mut b = MomentumBank::default();
        b.update_streak(false);
        assert_eq!(b.current_streak, 0);
        b.update_streak(true);
        assert_eq!(b.current_streak, 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut b = bank(120, 4, "2025-01-06");
        b.freezes_used = 3;
        b.reset();
        assert_eq!(b, MomentumBank::default());
        assert_eq!(b.last_check_date, None);
    }
}
