pub mod app;
pub mod commands;

pub use app::{Cli, Commands};

use anyhow::Result;

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Edit(args) => commands::edit::edit_command(args),
        Commands::Init(args) => commands::init::init_command(args),
        Commands::Preview(args) => commands::preview::preview_command(args),
        Commands::Check(args) => commands::check::check_command(args),
        Commands::Config(args) => commands::config::config_command(args),
    }
}
