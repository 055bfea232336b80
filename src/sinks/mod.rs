//! Side-effecting outlets: publishing, clipboard and external URLs.
//!
//! None of these touch the document; they only receive a snapshot of it.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::portal::PortalConfig;

/// Receives the document when the user publishes
pub trait PublishSink {
    /// Hand over the document. Returns a human-readable location.
    fn publish(&self, config: &PortalConfig) -> Result<String>;
}

/// Writes `<alias>.json` into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File the document for `alias` is written to
    pub fn target(&self, alias: &str) -> PathBuf {
        let stem: String = alias
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        let stem = if stem.is_empty() { "portal".to_string() } else { stem };
        self.directory.join(format!("{}.json", stem))
    }
}

impl PublishSink for FileSink {
    fn publish(&self, config: &PortalConfig) -> Result<String> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("Failed to create publish directory: {:?}", self.directory))?;

        let path = self.target(&config.portal_settings.alias);
        let json = serde_json::to_string_pretty(config).context("Failed to serialize portal configuration")?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        log::info!("Published portal '{}' to {:?}", config.portal_settings.alias, path);
        Ok(path.display().to_string())
    }
}

/// Copy text to the system clipboard through the terminal (OSC 52)
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    crossterm::execute!(
        std::io::stdout(),
        crossterm::clipboard::CopyToClipboard::to_clipboard_from(text)
    )
    .context("Failed to copy to clipboard")?;
    log::info!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Open a URL or file with the desktop's default handler, fire-and-forget
pub fn open_external(target: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/c", "start", "", target]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(target);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(target);
        command
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {}", target))?;
    log::info!("Opened {}", target);
    Ok(())
}

/// Write an HTML document to a kept temporary file and open it
pub fn open_html(html: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("portal-preview-")
        .suffix(".html")
        .tempfile()
        .context("Failed to create preview file")?;
    file.write_all(html.as_bytes()).context("Failed to write preview file")?;

    let (_, path) = file.keep().context("Failed to keep preview file")?;
    open_external(&path.display().to_string())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_sanitizes_alias() {
        let sink = FileSink::new("/tmp/out");
        assert_eq!(sink.target("main-portal"), PathBuf::from("/tmp/out/main-portal.json"));
        assert_eq!(sink.target("a/b c"), PathBuf::from("/tmp/out/a-b-c.json"));
        assert_eq!(sink.target("  "), PathBuf::from("/tmp/out/portal.json"));
    }

    #[test]
    fn test_file_sink_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("published"));
        let config = crate::portal::starter_config();

        let location = sink.publish(&config).unwrap();
        assert!(location.ends_with("main-portal.json"));

        let text = std::fs::read_to_string(sink.target("main-portal")).unwrap();
        let parsed: PortalConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
