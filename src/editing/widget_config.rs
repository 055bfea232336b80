//! Full-screen editing of one [`EmbeddedVideoConfig`].
//!
//! The session is opened with an explicit [`WidgetSource`] naming the owning
//! block or menu entry. Saving writes the draft back onto exactly that item;
//! an unresolvable source is an error, never a silent drop.

use std::fmt;
use thiserror::Error;

use super::json_mirror::JsonMirror;
use super::sequence::{self, MenuSlot};
use crate::portal::{
    BlockSection, DisplayType, EmbeddedVideoConfig, MAX_VIDEO_SIZE, MIN_VIDEO_SIZE, MenuKind, PortalConfig,
    SourceType,
};
use crate::store::{ConfigStore, PatchError};

/// File name shown above the JSON pane
pub const WIDGET_CONFIG_FILE: &str = "portal_widget_config.json";

/// The item whose `videoConfig` is being edited
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetSource {
    Block { section: BlockSection, id: String },
    MenuEntry { id: String },
}

impl fmt::Display for WidgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetSource::Block { section, id } => write!(f, "{} block '{}'", section, id),
            WidgetSource::MenuEntry { id } => write!(f, "menu entry '{}'", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetSaveError {
    #[error("{0} no longer exists")]
    SourceNotFound(WidgetSource),

    #[error("{0} does not carry a video configuration")]
    NotAVideoTarget(WidgetSource),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// What the widget is for, which decides the view's heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPurpose {
    SmartSearch,
    Favorites,
    Player,
}

impl WidgetPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            WidgetPurpose::SmartSearch => "Smart Search Configuration",
            WidgetPurpose::Favorites => "Favorites Page Layout",
            WidgetPurpose::Player => "Video Player Experience",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WidgetPurpose::SmartSearch => "Define how users discover content through intelligent search results.",
            WidgetPurpose::Favorites => "Configure the display of personalized video collections.",
            WidgetPurpose::Player => "Customize the playback interface and interaction defaults.",
        }
    }
}

/// Current config, purpose and validity of a source, or why it can't be edited
fn resolve(config: &PortalConfig, source: &WidgetSource) -> Result<(Option<EmbeddedVideoConfig>, WidgetPurpose), WidgetSaveError> {
    match source {
        WidgetSource::Block { section, id } => {
            let block = config
                .blocks(*section)
                .iter()
                .find(|block| &block.id == id)
                .ok_or_else(|| WidgetSaveError::SourceNotFound(source.clone()))?;
            if !block.is_video() {
                return Err(WidgetSaveError::NotAVideoTarget(source.clone()));
            }
            Ok((block.video_config.clone(), WidgetPurpose::Player))
        }
        WidgetSource::MenuEntry { id } => {
            let entry = config
                .find_menu_entry(id)
                .ok_or_else(|| WidgetSaveError::SourceNotFound(source.clone()))?;
            let purpose = match entry.kind {
                MenuKind::SmartSearch => WidgetPurpose::SmartSearch,
                MenuKind::Favorites => WidgetPurpose::Favorites,
                _ => return Err(WidgetSaveError::NotAVideoTarget(source.clone())),
            };
            Ok((entry.video_config.clone(), purpose))
        }
    }
}

#[derive(Debug, Clone)]
pub struct WidgetConfigSession {
    source: WidgetSource,
    purpose: WidgetPurpose,
    draft: EmbeddedVideoConfig,
    mirror: JsonMirror<EmbeddedVideoConfig>,
    code_visible: bool,
}

impl WidgetConfigSession {
    /// Open on `source`, seeding from its current config or the defaults
    pub fn open(config: &PortalConfig, source: WidgetSource) -> Result<Self, WidgetSaveError> {
        let (existing, purpose) = resolve(config, &source)?;
        let draft = match (existing, &source) {
            (Some(existing), _) => existing,
            (None, WidgetSource::MenuEntry { id }) if purpose == WidgetPurpose::SmartSearch => config
                .find_menu_entry(id)
                .and_then(|entry| entry.search_query.clone())
                .map(EmbeddedVideoConfig::for_search)
                .unwrap_or_default(),
            (None, _) => EmbeddedVideoConfig::default(),
        };

        Ok(Self {
            mirror: JsonMirror::from_value(&draft),
            source,
            purpose,
            draft,
            code_visible: false,
        })
    }

    pub fn source(&self) -> &WidgetSource {
        &self.source
    }

    pub fn purpose(&self) -> WidgetPurpose {
        self.purpose
    }

    pub fn draft(&self) -> &EmbeddedVideoConfig {
        &self.draft
    }

    pub fn mirror(&self) -> &JsonMirror<EmbeddedVideoConfig> {
        &self.mirror
    }

    pub fn code_visible(&self) -> bool {
        self.code_visible
    }

    pub fn toggle_code(&mut self) {
        self.code_visible = !self.code_visible;
    }

    /// Switch source mode. Fields of the other modes are kept.
    pub fn set_source_type(&mut self, source_type: SourceType) {
        self.draft.source_type = source_type;
        self.changed();
    }

    pub fn set_single_guid(&mut self, guid: impl Into<String>) {
        self.draft.single_guid = Some(guid.into());
        self.changed();
    }

    pub fn set_single_alias(&mut self, alias: impl Into<String>) {
        self.draft.single_alias = Some(alias.into());
        self.changed();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.draft.search_query = Some(query.into());
        self.changed();
    }

    pub fn set_guid_list(&mut self, list: impl Into<String>) {
        self.draft.guid_list = Some(list.into());
        self.changed();
    }

    pub fn set_display_type(&mut self, display_type: DisplayType) {
        self.draft.display_type = display_type;
        self.changed();
    }

    /// Set the item count, clamped to 1-100
    pub fn set_size(&mut self, size: u32) {
        self.draft.size = size.clamp(MIN_VIDEO_SIZE, MAX_VIDEO_SIZE);
        self.changed();
    }

    pub fn step_size(&mut self, delta: i64) {
        let next = (i64::from(self.draft.size) + delta).clamp(i64::from(MIN_VIDEO_SIZE), i64::from(MAX_VIDEO_SIZE));
        self.set_size(u32::try_from(next).unwrap_or(MIN_VIDEO_SIZE));
    }

    /// Apply raw JSON text. Returns `true` if the draft was replaced.
    pub fn edit_json(&mut self, text: impl Into<String>) -> bool {
        let parsed = self.mirror.edit_checked(text, |config: &EmbeddedVideoConfig| {
            if config.size_in_range() {
                Ok(())
            } else {
                Err(format!("size must be between {} and {}", MIN_VIDEO_SIZE, MAX_VIDEO_SIZE))
            }
        });

        match parsed {
            Some(config) => {
                self.draft = config;
                self.changed();
                true
            }
            None => false,
        }
    }

    /// Write the draft onto the source item. Unparseable JSON text never
    /// reached the draft, so the last valid configuration is what gets saved.
    pub fn save(&self, store: &mut ConfigStore) -> Result<(), WidgetSaveError> {
        resolve(store.current(), &self.source)?;

        let config = self.draft.clone();
        let found = match &self.source {
            WidgetSource::Block { section, id } => {
                sequence::update(store, *section, id, |block| block.video_config = Some(config))?
            }
            WidgetSource::MenuEntry { id } => {
                sequence::update(store, MenuSlot, id, |entry| entry.video_config = Some(config))?
            }
        };

        if !found {
            return Err(WidgetSaveError::SourceNotFound(self.source.clone()));
        }
        log::info!("Saved video configuration for {}", self.source);
        Ok(())
    }

    fn changed(&mut self) {
        self.mirror.sync_from(&self.draft);
    }
}
