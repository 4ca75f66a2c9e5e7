pub mod bucket;
pub mod config;
pub mod goal;
pub mod habit;
pub mod momentum;
pub mod remind;
pub mod stats;

use chrono::{Local, NaiveDate};
use habitflow_core::Tracker;

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Open the tracker and settle the daily reconciliation before any
/// command runs, mirroring the app-activation check.
pub fn open_tracker() -> Result<Tracker, Box<dyn std::error::Error>> {
    let today = today();
    let mut tracker = Tracker::open(today)?;
    tracker.daily_check(today)?;
    Ok(tracker)
}
