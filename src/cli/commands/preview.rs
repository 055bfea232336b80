use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use super::{load_document, write_output};
use crate::preview::{self, Device, PreviewPage};

#[derive(Args)]
pub struct PreviewCommands {
    /// Portal document (JSON)
    pub file: PathBuf,

    /// Viewport to simulate
    #[arg(short, long, value_enum, default_value_t = Device::Desktop)]
    pub device: Device,

    /// Page to render
    #[arg(short, long, value_enum, default_value_t = PreviewPage::Home)]
    pub page: PreviewPage,

    /// Where to write the HTML; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the rendered page in the default browser
    #[arg(long, conflicts_with = "output")]
    pub open: bool,
}

pub fn preview_command(args: PreviewCommands) -> Result<()> {
    let config = load_document(&args.file)?;
    let rendered = preview::render(&config, args.device, args.page);
    let html = rendered.document(&config.portal_settings.title, &config.page_settings.background_color);
    info!(
        "Rendered {} page for {} ({} regions)",
        args.page,
        args.device,
        rendered.outline.len()
    );

    if args.open {
        let path = crate::sinks::open_html(&html)?;
        eprintln!("Opened {}", path.display());
        return Ok(());
    }
    write_output(args.output.as_deref(), &html)
}
