use clap::Subcommand;

use super::{open_tracker, today};

#[derive(Subcommand)]
pub enum BucketAction {
    /// Add a bucket-list item
    Add {
        name: String,
        #[arg(long, default_value = "⭐")]
        emoji: String,
        #[arg(long, default_value = "someday")]
        category: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List items
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle an item done
    Done { id: String },
    /// Delete an item
    Delete { id: String },
}

pub fn run(action: BucketAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let today = today();

    match action {
        BucketAction::Add {
            name,
            emoji,
            category,
            description,
        } => {
            let item = tracker
                .bucket_mut()
                .add_item(&name, &emoji, &category, description, today)?;
            println!("Item added: {}", item.id);
        }
        BucketAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.bucket().items())?);
            } else {
                for item in tracker.bucket().items() {
                    let mark = if item.is_completed { "x" } else { " " };
                    println!("[{mark}] {} {} ({}) [{}]", item.emoji, item.name, item.id, item.category);
                }
                println!(
                    "{} done, {} to go",
                    tracker.bucket().completed_count(),
                    tracker.bucket().pending_count()
                );
            }
        }
        BucketAction::Done { id } => match tracker.bucket_mut().toggle_complete(&id, today)? {
            Some(true) => println!("Checked off!"),
            Some(false) => println!("Back on the list"),
            None => println!("No item with id {id}"),
        },
        BucketAction::Delete { id } => {
            if tracker.bucket_mut().delete_item(&id)? {
                println!("Item deleted");
            } else {
                println!("No item with id {id}");
            }
        }
    }
    Ok(())
}
