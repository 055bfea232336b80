use super::commands::check::CheckCommands;
use super::commands::config::ConfigCommands;
use super::commands::edit::EditCommands;
use super::commands::init::InitCommands;
use super::commands::preview::PreviewCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "portal-studio")]
#[command(about = "Design the layout, styling and navigation of a video portal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a portal document in the terminal editor
    Edit(EditCommands),
    /// Write the starter portal document
    Init(InitCommands),
    /// Render a portal document to a standalone HTML page
    Preview(PreviewCommands),
    /// Validate a portal document
    Check(CheckCommands),
    /// Show or change studio settings
    Config(ConfigCommands),
}
