use clap::Subcommand;
use habitflow_core::{monthly_data, stats_for, weekly_data};

use super::{open_tracker, today};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Stats for one habit
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Current week, day by day
    Week { id: String },
    /// Current month, day by day
    Month { id: String },
    /// One-line summary for every habit
    Overview,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    let today = today();

    match action {
        StatsAction::Show { id, json } => {
            let Some(habit) = tracker.store().habit(&id) else {
                println!("No habit with id {id}");
                return Ok(());
            };
            let stats = stats_for(habit, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{} {}", habit.emoji, habit.name);
                println!("Current streak:  {} days", stats.current_streak);
                println!("Longest streak:  {} days", stats.longest_streak);
                println!("Completion rate: {}%", stats.completion_rate);
                println!("Completions:     {}", stats.total_completions);
            }
        }
        StatsAction::Week { id } => {
            let Some(habit) = tracker.store().habit(&id) else {
                println!("No habit with id {id}");
                return Ok(());
            };
            for cell in weekly_data(habit, today) {
                let mark = if cell.completed { "x" } else { " " };
                println!("[{mark}] {} {}", cell.label, cell.date);
            }
        }
        StatsAction::Month { id } => {
            let Some(habit) = tracker.store().habit(&id) else {
                println!("No habit with id {id}");
                return Ok(());
            };
            for cell in monthly_data(habit, today) {
                let mark = if cell.completed { "x" } else { " " };
                println!("[{mark}] {:>2} {}", cell.label, cell.date);
            }
        }
        StatsAction::Overview => {
            for habit in tracker.store().habits() {
                let stats = stats_for(habit, today);
                println!(
                    "{} {}: streak {}, best {}, {}% over 30 days",
                    habit.emoji,
                    habit.name,
                    stats.current_streak,
                    stats.longest_streak,
                    stats.completion_rate
                );
            }
        }
    }
    Ok(())
}
