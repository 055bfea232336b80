//! In-memory owner of the single portal draft.
//!
//! Every patch validates first and then swaps exactly one `Arc` subtree, so a
//! rejected patch leaves the document untouched and untouched subtrees stay
//! pointer-identical across patches (`Arc::ptr_eq`).

pub mod path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::portal::{
    self, BlockSection, ContentBlock, FooterSettings, HeaderSettings, MenuEntry, MenuSettings, PageSettings,
    PortalConfig, PortalSettings, SchemaError,
};
pub use path::SettingPath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unknown setting path '{0}'")]
    UnknownPath(String),

    #[error("'{path}' expects a {expected} value, got {found}")]
    WrongShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value for '{path}': {message}")]
    InvalidValue { path: String, message: String },

    #[error("{settings} has no field '{field}'")]
    UnknownField { settings: SettingsKey, field: String },
}

/// The five settings records of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    Header,
    Footer,
    Menu,
    Portal,
    Page,
}

impl SettingsKey {
    pub fn key(&self) -> &'static str {
        match self {
            SettingsKey::Header => "headerSettings",
            SettingsKey::Footer => "footerSettings",
            SettingsKey::Menu => "menuSettings",
            SettingsKey::Portal => "portalSettings",
            SettingsKey::Page => "pageSettings",
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Replacement of one whole sequence, tagged by the section it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPatch {
    Header(Vec<ContentBlock>),
    Main(Vec<ContentBlock>),
    PlayerPage(Vec<ContentBlock>),
    Footer(Vec<ContentBlock>),
    Menu(Vec<MenuEntry>),
}

impl SectionPatch {
    pub fn blocks(section: BlockSection, blocks: Vec<ContentBlock>) -> Self {
        match section {
            BlockSection::Header => SectionPatch::Header(blocks),
            BlockSection::Main => SectionPatch::Main(blocks),
            BlockSection::PlayerPage => SectionPatch::PlayerPage(blocks),
            BlockSection::Footer => SectionPatch::Footer(blocks),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SectionPatch::Header(_) => "header",
            SectionPatch::Main(_) => "main",
            SectionPatch::PlayerPage(_) => "playerPage",
            SectionPatch::Footer(_) => "footer",
            SectionPatch::Menu(_) => "menu",
        }
    }
}

/// Replacement of one whole settings record
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsPatch {
    Header(HeaderSettings),
    Footer(FooterSettings),
    Menu(MenuSettings),
    Portal(PortalSettings),
    Page(PageSettings),
}

impl SettingsPatch {
    pub fn key(&self) -> SettingsKey {
        match self {
            SettingsPatch::Header(_) => SettingsKey::Header,
            SettingsPatch::Footer(_) => SettingsKey::Footer,
            SettingsPatch::Menu(_) => SettingsKey::Menu,
            SettingsPatch::Portal(_) => SettingsKey::Portal,
            SettingsPatch::Page(_) => SettingsKey::Page,
        }
    }
}

pub struct ConfigStore {
    config: PortalConfig,
    revision: u64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            config: portal::starter_config(),
            revision: 0,
        }
    }
}

impl ConfigStore {
    /// Take ownership of a document after checking its invariants
    pub fn new(config: PortalConfig) -> Result<Self, PatchError> {
        portal::validate(&config)?;
        Ok(Self { config, revision: 0 })
    }

    /// Snapshot of the current document. Cheap: only `Arc`s are cloned.
    pub fn get(&self) -> PortalConfig {
        self.config.clone()
    }

    pub fn current(&self) -> &PortalConfig {
        &self.config
    }

    /// Number of patches applied since the store was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole document, e.g. after loading a file
    pub fn replace(&mut self, config: PortalConfig) -> Result<(), PatchError> {
        if let Err(err) = portal::validate(&config) {
            log::warn!("Rejected document replacement: {}", err);
            return Err(err.into());
        }
        self.config = config;
        self.applied("document");
        Ok(())
    }

    /// Replace one section's sequence
    pub fn patch_section(&mut self, patch: SectionPatch) -> Result<(), PatchError> {
        let key = patch.key();
        let checked = match &patch {
            SectionPatch::Header(blocks) => portal::validate_blocks(BlockSection::Header, blocks),
            SectionPatch::Main(blocks) => portal::validate_blocks(BlockSection::Main, blocks),
            SectionPatch::PlayerPage(blocks) => portal::validate_blocks(BlockSection::PlayerPage, blocks),
            SectionPatch::Footer(blocks) => portal::validate_blocks(BlockSection::Footer, blocks),
            SectionPatch::Menu(entries) => portal::validate_menu(entries),
        };
        if let Err(err) = checked {
            log::warn!("Rejected patch of '{}': {}", key, err);
            return Err(err.into());
        }

        match patch {
            SectionPatch::Header(blocks) => self.config.header = Arc::new(blocks),
            SectionPatch::Main(blocks) => self.config.main = Arc::new(blocks),
            SectionPatch::PlayerPage(blocks) => self.config.player_page = Arc::new(blocks),
            SectionPatch::Footer(blocks) => self.config.footer = Arc::new(blocks),
            SectionPatch::Menu(entries) => self.config.menu = Arc::new(entries),
        }
        self.applied(key);
        Ok(())
    }

    /// Replace one settings record
    pub fn patch_settings(&mut self, patch: SettingsPatch) {
        let key = patch.key();
        match patch {
            SettingsPatch::Header(settings) => self.config.header_settings = Arc::new(settings),
            SettingsPatch::Footer(settings) => self.config.footer_settings = Arc::new(settings),
            SettingsPatch::Menu(settings) => self.config.menu_settings = Arc::new(settings),
            SettingsPatch::Portal(settings) => self.config.portal_settings = Arc::new(settings),
            SettingsPatch::Page(settings) => self.config.page_settings = Arc::new(settings),
        }
        self.applied(key.key());
    }

    /// Shallow-merge a single top-level field into a settings record
    pub fn patch_settings_field(&mut self, settings: SettingsKey, field: &str, value: Value) -> Result<(), PatchError> {
        let result = if field.contains('.') {
            Err(PatchError::UnknownField {
                settings,
                field: field.to_string(),
            })
        } else {
            self.merged(settings, field, value)
        };

        match result {
            Ok(patch) => {
                self.patch_settings(patch);
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected {}.{}: {}", settings, field, err);
                Err(err)
            }
        }
    }

    /// Write one value at a dotted path inside `pageSettings`
    pub fn patch_nested_page_setting(&mut self, path: &str, value: Value) -> Result<(), PatchError> {
        let result = SettingPath::parse(path)
            .and_then(|path| merge_at(self.config.page_settings.as_ref(), &path, value));

        match result {
            Ok(settings) => {
                self.config.page_settings = Arc::new(settings);
                self.applied("pageSettings");
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected pageSettings.{}: {}", path, err);
                Err(err)
            }
        }
    }

    fn merged(&self, settings: SettingsKey, field: &str, value: Value) -> Result<SettingsPatch, PatchError> {
        let path = SettingPath::parse(field).map_err(|_| PatchError::UnknownField {
            settings,
            field: field.to_string(),
        })?;
        let unknown = |err: PatchError| match err {
            PatchError::UnknownPath(_) => PatchError::UnknownField {
                settings,
                field: field.to_string(),
            },
            other => other,
        };

        let patch = match settings {
            SettingsKey::Header => {
                SettingsPatch::Header(merge_at(self.config.header_settings.as_ref(), &path, value).map_err(unknown)?)
            }
            SettingsKey::Footer => {
                SettingsPatch::Footer(merge_at(self.config.footer_settings.as_ref(), &path, value).map_err(unknown)?)
            }
            SettingsKey::Menu => {
                SettingsPatch::Menu(merge_at(self.config.menu_settings.as_ref(), &path, value).map_err(unknown)?)
            }
            SettingsKey::Portal => {
                SettingsPatch::Portal(merge_at(self.config.portal_settings.as_ref(), &path, value).map_err(unknown)?)
            }
            SettingsKey::Page => {
                SettingsPatch::Page(merge_at(self.config.page_settings.as_ref(), &path, value).map_err(unknown)?)
            }
        };
        Ok(patch)
    }

    fn applied(&mut self, key: &str) {
        self.revision += 1;
        log::debug!("Applied patch to '{}' (revision {})", key, self.revision);
    }
}

/// Produce a copy of `record` with the value at `path` replaced.
///
/// The record round-trips through `serde_json::Value`; the result must
/// deserialize back into `T`, which rejects unknown enum keys and the like.
fn merge_at<T>(record: &T, path: &SettingPath, value: Value) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let invalid = |message: String| PatchError::InvalidValue {
        path: path.to_string(),
        message,
    };

    let mut tree = serde_json::to_value(record).map_err(|e| invalid(e.to_string()))?;
    path::assign(&mut tree, path, value)?;
    serde_json::from_value(tree).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{BlockKind, Breakpoint, EmbeddedVideoConfig};
    use serde_json::json;

    #[test]
    fn test_patch_section_shares_untouched_subtrees() {
        let mut store = ConfigStore::default();
        let before = store.get();

        store
            .patch_section(SectionPatch::Main(vec![ContentBlock::new("x", BlockKind::Html, "X", "")]))
            .unwrap();
        let after = store.get();

        assert!(!Arc::ptr_eq(&before.main, &after.main));
        assert!(Arc::ptr_eq(&before.header, &after.header));
        assert!(Arc::ptr_eq(&before.menu, &after.menu));
        assert!(Arc::ptr_eq(&before.page_settings, &after.page_settings));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_rejected_patch_leaves_document_untouched() {
        let mut store = ConfigStore::default();
        let before = store.get();

        let mut block = ContentBlock::new("x", BlockKind::Html, "X", "");
        block.video_config = Some(EmbeddedVideoConfig::default());
        let result = store.patch_section(SectionPatch::Main(vec![block]));

        assert!(matches!(result, Err(PatchError::Schema(SchemaError::VideoConfigOnNonVideo { .. }))));
        assert_eq!(store.get(), before);
        assert!(Arc::ptr_eq(&before.main, &store.current().main));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_patch_nested_page_setting() {
        let mut store = ConfigStore::default();
        store
            .patch_nested_page_setting("button.backgroundColor", json!("#000000"))
            .unwrap();
        store.patch_nested_page_setting("elementGap", json!(64)).unwrap();
        store.patch_nested_page_setting("contentMaxWidth", json!("2xl")).unwrap();

        let page = &store.current().page_settings;
        assert_eq!(page.button.background_color, "#000000");
        assert_eq!(page.element_gap, 64.0);
        assert_eq!(page.content_max_width, Breakpoint::Xxl);
    }

    #[test]
    fn test_patch_nested_page_setting_reaches_flattened_link_fields() {
        let mut store = ConfigStore::default();
        store.patch_nested_page_setting("link.color", json!("#ff0000")).unwrap();
        store.patch_nested_page_setting("link.underline", json!(false)).unwrap();

        let link = &store.current().page_settings.link;
        assert_eq!(link.base.color, "#ff0000");
        assert!(!link.underline);
    }

    #[test]
    fn test_patch_nested_page_setting_rejects_bad_input() {
        let mut store = ConfigStore::default();
        let before = store.get();

        assert!(matches!(
            store.patch_nested_page_setting("button.shadow", json!("x")),
            Err(PatchError::UnknownPath(_))
        ));
        assert!(matches!(
            store.patch_nested_page_setting("elementGap", json!("wide")),
            Err(PatchError::WrongShape { .. })
        ));
        assert!(matches!(
            store.patch_nested_page_setting("contentMaxWidth", json!("3xl")),
            Err(PatchError::InvalidValue { .. })
        ));
        assert!(matches!(
            store.patch_nested_page_setting("elementGap", json!(-4)),
            Err(PatchError::InvalidValue { .. })
        ));

        assert!(Arc::ptr_eq(&before.page_settings, &store.current().page_settings));
    }

    #[test]
    fn test_patch_settings_field_merges_one_field() {
        let mut store = ConfigStore::default();
        let before = store.get();

        store
            .patch_settings_field(SettingsKey::Header, "visible", json!(false))
            .unwrap();

        let header = &store.current().header_settings;
        assert!(!header.visible);
        assert_eq!(header.background_color, before.header_settings.background_color);
        assert!(Arc::ptr_eq(&before.footer_settings, &store.current().footer_settings));
    }

    #[test]
    fn test_patch_settings_field_unknown_field() {
        let mut store = ConfigStore::default();
        let err = store
            .patch_settings_field(SettingsKey::Menu, "shadow", json!(true))
            .unwrap_err();
        assert_eq!(
            err,
            PatchError::UnknownField {
                settings: SettingsKey::Menu,
                field: "shadow".to_string()
            }
        );
    }

    #[test]
    fn test_replace_validates() {
        let mut store = ConfigStore::default();
        let mut bad = store.get();
        bad.menu = Arc::new(vec![bad.menu[0].clone(), bad.menu[0].clone()]);
        assert!(store.replace(bad).is_err());
        assert_eq!(store.current().menu.len(), 2);
    }
}
