use anyhow::Result;
use clap::Parser;
use log::info;

use portal_studio::cli::{self, Cli};

fn main() -> Result<()> {
    // Log to a file: the terminal belongs to the editor
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("portal-studio.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting portal-studio");

    cli::run(cli)
}
