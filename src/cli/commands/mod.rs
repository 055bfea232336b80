pub mod check;
pub mod config;
pub mod edit;
pub mod init;
pub mod preview;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::portal::PortalConfig;

/// Read and deserialize a portal document. Legacy field names are accepted.
pub fn load_document(path: &Path) -> Result<PortalConfig> {
    if !path.exists() {
        anyhow::bail!("Portal document does not exist: {}", path.display());
    }
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse portal document {}", path.display()))
}

/// Write `content` to `output`, or to stdout when no file was given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} bytes to {:?}", content.len(), path);
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::starter_config;

    #[test]
    fn test_load_document_roundtrips_starter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");
        let starter = starter_config();
        write_output(Some(&path), &serde_json::to_string_pretty(&starter).unwrap()).unwrap();

        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded, starter);
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_document_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse portal document"));
    }
}
