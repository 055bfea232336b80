use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::config::StudioConfig;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show current settings
    Show,
    /// Print the location of the settings file
    Path,
    /// Set the value of a specific setting
    Set {
        /// Setting name, e.g. editor.theme
        key: String,
        /// Setting value
        value: String,
    },
}

pub fn config_command(args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => {
            let config = StudioConfig::load()?;
            for (key, value) in config.entries() {
                println!("{:<34} {}", key.cyan(), value);
            }
        }
        ConfigSubcommands::Path => println!("{}", StudioConfig::get_config_path()?.display()),
        ConfigSubcommands::Set { key, value } => {
            let mut config = StudioConfig::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Set {} to {}", key.cyan(), config.get(&key)?);
        }
    }
    Ok(())
}
