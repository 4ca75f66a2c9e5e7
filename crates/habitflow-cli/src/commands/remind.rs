use chrono::Local;
use clap::Subcommand;
use habitflow_core::{Config, ConsoleNotifier};

use super::open_tracker;

#[derive(Subcommand)]
pub enum RemindAction {
    /// Evaluate the daily reminder and deliver it if due
    Check,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RemindAction::Check => {
            let mut tracker = open_tracker()?;
            let config = Config::load_or_default();
            let now = Local::now().naive_local();

            let fired = tracker.check_reminder(&config.notifications, now, &ConsoleNotifier)?;
            if !fired {
                println!("No reminder due");
            }
        }
    }
    Ok(())
}
