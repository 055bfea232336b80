use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use super::load_document;
use crate::portal::{self, BlockSection, PortalConfig};

#[derive(Args)]
pub struct CheckCommands {
    /// Portal document (JSON)
    pub file: PathBuf,
}

pub fn check_command(args: CheckCommands) -> Result<()> {
    let config = load_document(&args.file)?;

    if let Err(err) = portal::validate(&config) {
        println!("{} {}", "✗".red(), args.file.display());
        println!("  {}", err.to_string().red());
        anyhow::bail!("{} is not a valid portal document", args.file.display());
    }

    println!("{} {}", "✓".green(), args.file.display());
    for line in summary(&config) {
        println!("  {}", line);
    }
    Ok(())
}

fn summary(config: &PortalConfig) -> Vec<String> {
    let portal = &config.portal_settings;
    let mut lines = vec![format!("{} (/{})", portal.title.bold(), portal.alias)];

    for section in BlockSection::ALL {
        let blocks = config.blocks(section);
        let unconfigured = blocks
            .iter()
            .filter(|block| block.is_video() && block.video_config.is_none())
            .count();
        let mut line = format!("{:<12} {} element(s)", section.label(), blocks.len());
        if unconfigured > 0 {
            line.push_str(&format!(", {} video(s) without a source", unconfigured).yellow().to_string());
        }
        lines.push(line);
    }

    let visible = config.visible_menu().count();
    lines.push(format!("{:<12} {} link(s), {} visible", "Menu", config.menu.len(), visible));
    lines
}
