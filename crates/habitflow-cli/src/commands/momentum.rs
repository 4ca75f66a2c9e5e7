use clap::Subcommand;
use habitflow_core::FREEZE_COST;

use super::open_tracker;

#[derive(Subcommand)]
pub enum MomentumAction {
    /// Current bank state
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Wipe the momentum economy
    Reset,
}

pub fn run(action: MomentumAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;

    match action {
        MomentumAction::Status { json } => {
            let bank = tracker.bank();
            if json {
                println!("{}", serde_json::to_string_pretty(bank)?);
            } else {
                println!("Momentum points: {}", bank.momentum_points);
                println!("Current streak:  {} days", bank.current_streak);
                println!(
                    "Freezes:         {} available ({} used)",
                    bank.freeze_potential(),
                    bank.freezes_used
                );
                println!(
                    "Next freeze:     {}/{FREEZE_COST} pts",
                    bank.points_to_next_freeze()
                );
            }
        }
        MomentumAction::Reset => {
            tracker.reset_momentum()?;
            println!("Momentum bank reset");
        }
    }
    Ok(())
}
