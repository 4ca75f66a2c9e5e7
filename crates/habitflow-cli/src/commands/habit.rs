use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use habitflow_core::{stats_for, Priority};

use super::{open_tracker, today};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PriorityArg {
    Low,
    #[default]
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        name: String,
        #[arg(long, default_value = "🎯")]
        emoji: String,
        #[arg(long, default_value = "coral")]
        color: String,
        #[arg(long, value_enum, default_value_t)]
        priority: PriorityArg,
    },
    /// List habits with today's completion state
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion for today (or a specific day with --date)
    Done {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Attach a note to a day; empty text removes it
    Note {
        id: String,
        text: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Spend a momentum freeze on a habit for today
    Freeze { id: String },
    /// Delete a habit
    Delete { id: String },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let today = today();

    match action {
        HabitAction::Add {
            name,
            emoji,
            color,
            priority,
        } => {
            let id = tracker.add_habit(&name, &emoji, &color, priority.into(), today)?;
            println!("Habit created: {id}");
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.store().habits())?);
            } else {
                for habit in tracker.store().habits() {
                    let mark = if habit.is_completed_on(today) { "x" } else { " " };
                    let streak = stats_for(habit, today).current_streak;
                    println!(
                        "[{mark}] {} {} ({}) streak {streak}  {}",
                        habit.emoji, habit.name, habit.id, habit.color
                    );
                }
            }
        }
        HabitAction::Done { id, date } => match date {
            // Backfills edit history without touching the points economy.
            Some(date) if date != today => {
                match tracker.store_mut().toggle_completion(&id, date)? {
                    Some(true) => println!("Marked {date} completed"),
                    Some(false) => println!("Marked {date} not completed"),
                    None => println!("No habit with id {id}"),
                }
                tracker.store().publish_pending_count(today);
            }
            _ => {
                let update = tracker.complete_habit(&id, today)?;
                if update.completed {
                    print!("Completed for today");
                    if update.points_awarded > 0 {
                        print!(" (+{} pts)", update.points_awarded);
                    }
                    if update.streak_extended {
                        print!(" ... all habits done, streak extended!");
                    }
                    println!();
                } else {
                    println!("Completion removed for today");
                }
            }
        },
        HabitAction::Note { id, text, date } => {
            if tracker.store_mut().set_note(&id, date.unwrap_or(today), &text)? {
                println!("Note saved");
            } else {
                println!("No habit with id {id}");
            }
        }
        HabitAction::Freeze { id } => {
            tracker.freeze_habit(&id, today)?;
            println!(
                "Freeze applied ({} pts left, {} freezes available)",
                tracker.bank().momentum_points,
                tracker.bank().freeze_potential()
            );
        }
        HabitAction::Delete { id } => {
            if tracker.store_mut().delete_habit(&id)? {
                println!("Habit deleted");
            } else {
                println!("No habit with id {id}");
            }
        }
    }
    Ok(())
}
