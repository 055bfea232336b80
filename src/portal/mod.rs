//! Portal configuration document schema.

pub mod defaults;
pub mod ids;
pub mod model;
pub mod settings;

pub use defaults::starter_config;
pub use ids::{Identified, new_id, new_id_in};
pub use model::*;
pub use settings::*;

use thiserror::Error;

/// A document shape that parses but breaks a schema invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate id '{id}' in {sequence}")]
    DuplicateId { sequence: &'static str, id: String },

    #[error("block '{id}' in {section} carries a videoConfig but is not an EMBEDDED_VIDEO block")]
    VideoConfigOnNonVideo { section: BlockSection, id: String },

    #[error("videoConfig size {size} on '{id}' is outside 1-100")]
    SizeOutOfRange { id: String, size: u32 },
}

/// Check the invariants of one block sequence
pub fn validate_blocks(section: BlockSection, blocks: &[ContentBlock]) -> Result<(), SchemaError> {
    if let Some(id) = ids::first_duplicate(blocks) {
        return Err(SchemaError::DuplicateId {
            sequence: section.key(),
            id: id.to_string(),
        });
    }

    for block in blocks {
        match &block.video_config {
            Some(_) if !block.is_video() => {
                return Err(SchemaError::VideoConfigOnNonVideo {
                    section,
                    id: block.id.clone(),
                });
            }
            Some(video) if !video.size_in_range() => {
                return Err(SchemaError::SizeOutOfRange {
                    id: block.id.clone(),
                    size: video.size,
                });
            }
            _ => {}
        }
    }

    Ok(())
}

pub fn validate_menu(entries: &[MenuEntry]) -> Result<(), SchemaError> {
    if let Some(id) = ids::first_duplicate(entries) {
        return Err(SchemaError::DuplicateId {
            sequence: "menu",
            id: id.to_string(),
        });
    }

    for entry in entries {
        if let Some(video) = &entry.video_config
            && !video.size_in_range()
        {
            return Err(SchemaError::SizeOutOfRange {
                id: entry.id.clone(),
                size: video.size,
            });
        }
    }

    Ok(())
}

/// Check every invariant the type system does not already enforce
pub fn validate(config: &PortalConfig) -> Result<(), SchemaError> {
    for section in BlockSection::ALL {
        validate_blocks(section, config.blocks(section))?;
    }
    validate_menu(&config.menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_validate_rejects_duplicate_block_ids() {
        let mut config = starter_config();
        config.main = Arc::new(vec![
            ContentBlock::new("a", BlockKind::Html, "One", ""),
            ContentBlock::new("a", BlockKind::Html, "Two", ""),
        ]);
        assert_eq!(
            validate(&config),
            Err(SchemaError::DuplicateId {
                sequence: "main",
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_video_config_on_markdown() {
        let mut block = ContentBlock::new("x", BlockKind::Markdown, "Text", "");
        block.video_config = Some(EmbeddedVideoConfig::default());
        let result = validate_blocks(BlockSection::Main, &[block]);
        assert!(matches!(result, Err(SchemaError::VideoConfigOnNonVideo { .. })));
    }

    #[test]
    fn test_validate_accepts_video_on_player_page() {
        let block = ContentBlock::new("v", BlockKind::EmbeddedVideo, "Clip", "");
        assert!(validate_blocks(BlockSection::PlayerPage, &[block.clone()]).is_ok());

        let mut config = starter_config();
        config.player_page = Arc::new(vec![block]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_same_id_in_different_sections_is_allowed() {
        let mut config = starter_config();
        config.footer = Arc::new(vec![ContentBlock::new("1", BlockKind::Html, "Again", "")]);
        assert!(validate(&config).is_ok());
    }
}
