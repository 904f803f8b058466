//! Configuration command implementation

use crate::cli::{CliContext, ConfigAction};
use crate::config::ConfigKey;
use anyhow::{anyhow, Result};
use colored::Colorize;

/// Execute the config command
pub fn execute(ctx: &CliContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                ctx.config_path.display().to_string().cyan()
            );
            for key in ConfigKey::ALL {
                println!("  {} = {}", key.to_str(), ctx.config.get(key));
            }
        }
        ConfigAction::Get { key } => {
            println!("{}", ctx.config.get(parse_key(&key)?));
        }
        ConfigAction::Set { key, value } => {
            let key = parse_key(&key)?;
            let mut config = ctx.config.clone();
            config.set(key, &value)?;
            config.save_to(&ctx.config_path)?;
            ctx.say(format!("{} {} = {}", "✓ Set".green().bold(), key.to_str(), value));
        }
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    ConfigKey::from_str(key).ok_or_else(|| {
        let known: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.to_str()).collect();
        anyhow!("Unknown configuration key '{}' (known: {})", key, known.join(", "))
    })
}
