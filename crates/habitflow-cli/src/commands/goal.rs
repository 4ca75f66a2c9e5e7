use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_tracker, today};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal with a target date
    Add { name: String, target: NaiveDate },
    /// List goals with progress
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle a walked day (today unless --date)
    Walk {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Write the progress log for a day
    Log {
        id: String,
        text: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a goal
    Delete { id: String },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let today = today();

    match action {
        GoalAction::Add { name, target } => {
            let goal = tracker.store_mut().add_goal(&name, target, today)?;
            println!("Goal created: {} ({} day journey)", goal.id, goal.total_days());
        }
        GoalAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.store().goals())?);
            } else {
                for goal in tracker.store().goals() {
                    let badge = if goal.is_fully_completed() { " 🏆" } else { "" };
                    println!(
                        "{} ({}) {}/{} days, {}%{badge}",
                        goal.name,
                        goal.id,
                        goal.completed_days.len(),
                        goal.total_days(),
                        goal.progress_percent()
                    );
                }
            }
        }
        GoalAction::Walk { id, date } => {
            match tracker
                .store_mut()
                .toggle_goal_day(&id, date.unwrap_or(today))?
            {
                Some(true) => println!("Day walked"),
                Some(false) => println!("Day unwalked"),
                None => println!("No goal with id {id}"),
            }
        }
        GoalAction::Log { id, text, date } => {
            if tracker
                .store_mut()
                .upsert_goal_log(&id, date.unwrap_or(today), &text)?
            {
                println!("Log saved");
            } else {
                println!("No goal with id {id}");
            }
        }
        GoalAction::Delete { id } => {
            if tracker.store_mut().delete_goal(&id)? {
                println!("Goal deleted");
            } else {
                println!("No goal with id {id}");
            }
        }
    }
    Ok(())
}
