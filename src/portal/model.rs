use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::ids::Identified;
use super::settings::{FooterSettings, HeaderSettings, MenuSettings, PageSettings, PortalSettings};

/// The root document: one portal draft.
///
/// Every subtree sits behind an `Arc` so a patch can swap one subtree and
/// leave the others pointer-identical (see `ConfigStore`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfig {
    pub header: Arc<Vec<ContentBlock>>,
    pub header_settings: Arc<HeaderSettings>,
    pub footer_settings: Arc<FooterSettings>,
    pub menu_settings: Arc<MenuSettings>,
    pub portal_settings: Arc<PortalSettings>,
    pub page_settings: Arc<PageSettings>,
    pub menu: Arc<Vec<MenuEntry>>,
    pub main: Arc<Vec<ContentBlock>>,
    pub player_page: Arc<Vec<ContentBlock>>,
    pub footer: Arc<Vec<ContentBlock>>,
}

impl PortalConfig {
    /// Borrow the block sequence owned by a section
    pub fn blocks(&self, section: BlockSection) -> &[ContentBlock] {
        match section {
            BlockSection::Header => &self.header,
            BlockSection::Main => &self.main,
            BlockSection::PlayerPage => &self.player_page,
            BlockSection::Footer => &self.footer,
        }
    }

    /// Shared handle to a section's block sequence
    pub fn blocks_arc(&self, section: BlockSection) -> &Arc<Vec<ContentBlock>> {
        match section {
            BlockSection::Header => &self.header,
            BlockSection::Main => &self.main,
            BlockSection::PlayerPage => &self.player_page,
            BlockSection::Footer => &self.footer,
        }
    }

    /// Find a block by id anywhere in the document
    pub fn find_block(&self, id: &str) -> Option<(BlockSection, &ContentBlock)> {
        BlockSection::ALL.iter().find_map(|section| {
            self.blocks(*section)
                .iter()
                .find(|block| block.id == id)
                .map(|block| (*section, block))
        })
    }

    pub fn find_menu_entry(&self, id: &str) -> Option<&MenuEntry> {
        self.menu.iter().find(|entry| entry.id == id)
    }

    /// Menu entries shown in navigation, in order
    pub fn visible_menu(&self) -> impl Iterator<Item = &MenuEntry> {
        self.menu.iter().filter(|entry| entry.visible)
    }
}

/// The four sections that own content blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockSection {
    Header,
    Main,
    PlayerPage,
    Footer,
}

impl BlockSection {
    pub const ALL: [BlockSection; 4] = [
        BlockSection::Header,
        BlockSection::Main,
        BlockSection::PlayerPage,
        BlockSection::Footer,
    ];

    /// Document key of the section (`playerPage`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            BlockSection::Header => "header",
            BlockSection::Main => "main",
            BlockSection::PlayerPage => "playerPage",
            BlockSection::Footer => "footer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlockSection::Header => "Header",
            BlockSection::Main => "Main Body",
            BlockSection::PlayerPage => "Player Page",
            BlockSection::Footer => "Footer",
        }
    }

    /// Block kinds the element editor offers when adding to this section.
    /// Embedded video is not offered on the player page, which already has a
    /// player. Documents holding one there are still valid.
    pub fn allowed_kinds(&self) -> &'static [BlockKind] {
        match self {
            BlockSection::PlayerPage => &[BlockKind::Html, BlockKind::Markdown],
            _ => &[BlockKind::Html, BlockKind::Markdown, BlockKind::EmbeddedVideo],
        }
    }

    pub fn allows(&self, kind: BlockKind) -> bool {
        self.allowed_kinds().contains(&kind)
    }
}

impl fmt::Display for BlockSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    Html,
    Markdown,
    #[serde(alias = "WIDGET")]
    EmbeddedVideo,
}

impl BlockKind {
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Html => "HTML",
            BlockKind::Markdown => "Markdown",
            BlockKind::EmbeddedVideo => "Video",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BlockKind::Html => "Rich text and custom HTML",
            BlockKind::Markdown => "Simple text formatting",
            BlockKind::EmbeddedVideo => "Embed video content",
        }
    }
}

/// One unit of page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: BlockKind,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "qumuConfig",
        alias = "widgetConfig"
    )]
    pub video_config: Option<EmbeddedVideoConfig>,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            body: body.into(),
            video_config: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == BlockKind::EmbeddedVideo
    }
}

impl Identified for ContentBlock {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuKind {
    Home,
    Custom,
    SmartSearch,
    Favorites,
}

impl MenuKind {
    pub const ALL: [MenuKind; 4] = [MenuKind::Home, MenuKind::Custom, MenuKind::SmartSearch, MenuKind::Favorites];

    pub fn label(&self) -> &'static str {
        match self {
            MenuKind::Home => "Home",
            MenuKind::Custom => "Custom",
            MenuKind::SmartSearch => "Smart Search",
            MenuKind::Favorites => "Favorites",
        }
    }

    /// Kinds that carry an embedded video configuration
    pub fn has_widget(&self) -> bool {
        matches!(self, MenuKind::SmartSearch | MenuKind::Favorites)
    }
}

/// One navigation item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(alias = "type")]
    pub kind: MenuKind,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "widgetConfig")]
    pub video_config: Option<EmbeddedVideoConfig>,
}

impl MenuEntry {
    /// The link target used for navigation. Only `CUSTOM` entries use the
    /// stored url; the other kinds route to fixed portal pages.
    pub fn resolved_url(&self) -> String {
        match self.kind {
            MenuKind::Custom => self.url.clone(),
            MenuKind::Home => "/".to_string(),
            MenuKind::Favorites => "/favorites".to_string(),
            MenuKind::SmartSearch => match self.search_query.as_deref() {
                Some(query) if !query.is_empty() => {
                    format!("/search?q={}", urlencoding::encode(query))
                }
                _ => "/search".to_string(),
            },
        }
    }
}

impl Identified for MenuEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Single,
    #[default]
    Search,
    List,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [SourceType::Single, SourceType::Search, SourceType::List];

    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Single => "Single Video",
            SourceType::Search => "Search Query",
            SourceType::List => "Video List",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayType {
    #[serde(alias = "player")]
    Player,
    #[serde(alias = "grid")]
    Grid,
    #[serde(alias = "carousel")]
    Carousel,
    #[default]
    #[serde(alias = "vertical")]
    Vertical,
    #[serde(alias = "thumbnail")]
    Thumbnail,
}

impl DisplayType {
    /// Layouts offered as tiles in the widget configuration view
    pub const TILES: [DisplayType; 4] = [
        DisplayType::Vertical,
        DisplayType::Grid,
        DisplayType::Carousel,
        DisplayType::Thumbnail,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisplayType::Player => "Player",
            DisplayType::Grid => "Grid",
            DisplayType::Carousel => "Carousel",
            DisplayType::Vertical => "Vertical List",
            DisplayType::Thumbnail => "Thumbnails Only",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DisplayType::Player => "Inline video player",
            DisplayType::Grid => "Responsive multi-column",
            DisplayType::Carousel => "Horizontal slider",
            DisplayType::Vertical => "Single column feed",
            DisplayType::Thumbnail => "Compact gallery view",
        }
    }
}

pub const MIN_VIDEO_SIZE: u32 = 1;
pub const MAX_VIDEO_SIZE: u32 = 100;
pub const DEFAULT_VIDEO_SIZE: u32 = 10;

fn default_video_size() -> u32 {
    DEFAULT_VIDEO_SIZE
}

/// Data source and display format of an embedded video block.
///
/// Only the field matching `source_type` is read; the others keep whatever
/// they held so switching source modes never loses input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedVideoConfig {
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid_list: Option<String>,
    #[serde(default, alias = "type")]
    pub display_type: DisplayType,
    #[serde(default = "default_video_size")]
    pub size: u32,
}

impl Default for EmbeddedVideoConfig {
    fn default() -> Self {
        Self {
            source_type: SourceType::Search,
            single_guid: None,
            single_alias: None,
            search_query: None,
            guid_list: None,
            display_type: DisplayType::Vertical,
            size: DEFAULT_VIDEO_SIZE,
        }
    }
}

impl EmbeddedVideoConfig {
    /// Seed for a search-driven widget
    pub fn for_search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn size_in_range(&self) -> bool {
        (MIN_VIDEO_SIZE..=MAX_VIDEO_SIZE).contains(&self.size)
    }

    /// Short description of the active source, ignoring inactive fields
    pub fn source_summary(&self) -> String {
        fn or_unset(value: &Option<String>) -> &str {
            match value.as_deref() {
                Some(v) if !v.trim().is_empty() => v,
                _ => "(not set)",
            }
        }

        match self.source_type {
            SourceType::Single => match self.single_alias.as_deref() {
                Some(alias) if !alias.trim().is_empty() => format!("video alias {}", alias),
                _ => format!("video {}", or_unset(&self.single_guid)),
            },
            SourceType::Search => format!("search \"{}\"", or_unset(&self.search_query)),
            SourceType::List => {
                let count = self
                    .guid_list
                    .as_deref()
                    .map(|list| list.split(',').filter(|guid| !guid.trim().is_empty()).count())
                    .unwrap_or(0);
                format!("list of {} videos", count)
            }
        }
    }
}
