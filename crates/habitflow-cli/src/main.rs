use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitflow-cli", version, about = "HabitFlow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Goal journeys
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Bucket list
    Bucket {
        #[command(subcommand)]
        action: commands::bucket::BucketAction,
    },
    /// Momentum bank
    Momentum {
        #[command(subcommand)]
        action: commands::momentum::MomentumAction,
    },
    /// Habit statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily reminder
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Bucket { action } => commands::bucket::run(action),
        Commands::Momentum { action } => commands::momentum::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "habitflow-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
