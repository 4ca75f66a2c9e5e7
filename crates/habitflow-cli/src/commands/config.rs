use clap::Subcommand;
use habitflow_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value by dot-separated key
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// Show the whole configuration
    Show,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("unknown key: {key}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
