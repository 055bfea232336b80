use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::write_output;
use crate::portal::starter_config;

#[derive(Args)]
pub struct InitCommands {
    /// Where to write the document; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init_command(args: InitCommands) -> Result<()> {
    if let Some(path) = &args.output
        && path.exists()
        && !args.force
    {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let json = serde_json::to_string_pretty(&starter_config()).context("Failed to serialize starter portal")?;
    write_output(args.output.as_deref(), &json)
}
