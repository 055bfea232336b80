use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use super::load_document;
use crate::config::StudioConfig;
use crate::portal::starter_config;
use crate::tui::apps::{PortalEditorApp, PortalEditorParams};
use crate::tui::{Theme, runtime};

#[derive(Args)]
pub struct EditCommands {
    /// Portal document (JSON) to open; the starter portal when omitted
    pub file: Option<PathBuf>,
}

pub fn edit_command(args: EditCommands) -> Result<()> {
    let studio = StudioConfig::load()?;
    let config = match &args.file {
        Some(path) => load_document(path)?,
        None => starter_config(),
    };
    info!("Opening editor on {:?}", args.file);

    let theme = Theme::new(studio.editor.theme);
    let params = PortalEditorParams {
        config,
        source: args.file,
        studio,
    };
    runtime::run::<PortalEditorApp>(params, theme)
}
