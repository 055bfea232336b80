//! Two-step add/edit flow for content blocks.
//!
//! New blocks start at [`Step::TypeSelection`]; existing blocks open directly
//! at [`Step::FieldEntry`] because their kind is fixed.

use super::EditorError;
use super::richtext;
use super::sequence;
use crate::portal::{self, BlockKind, BlockSection, ContentBlock, EmbeddedVideoConfig};
use crate::store::ConfigStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    TypeSelection,
    FieldEntry,
}

/// How an HTML body is being edited. Both modes write the same `body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlMode {
    #[default]
    Visual,
    Code,
}

impl HtmlMode {
    pub fn toggled(self) -> Self {
        match self {
            HtmlMode::Visual => HtmlMode::Code,
            HtmlMode::Code => HtmlMode::Visual,
        }
    }
}

pub const VIDEO_PLACEHOLDER_TITLE: &str = "Configure Qumu Video Data";
pub const VIDEO_PLACEHOLDER_HINT: &str =
    "Save this element first, then use the configure action in the element list to define the presentation source.";

#[derive(Debug, Clone)]
pub struct ElementEditor {
    section: BlockSection,
    step: Step,
    id: Option<String>,
    kind: Option<BlockKind>,
    title: String,
    body: String,
    html_mode: HtmlMode,
    video_config: Option<EmbeddedVideoConfig>,
}

impl ElementEditor {
    /// Start adding a new block to `section`
    pub fn create(section: BlockSection) -> Self {
        Self {
            section,
            step: Step::TypeSelection,
            id: None,
            kind: None,
            title: String::new(),
            body: String::new(),
            html_mode: HtmlMode::Visual,
            video_config: None,
        }
    }

    /// Start editing an existing block, pre-filled
    pub fn edit(section: BlockSection, block: &ContentBlock) -> Self {
        Self {
            section,
            step: Step::FieldEntry,
            id: Some(block.id.clone()),
            kind: Some(block.kind),
            title: block.title.clone(),
            body: block.body.clone(),
            html_mode: HtmlMode::Visual,
            video_config: block.video_config.clone(),
        }
    }

    pub fn section(&self) -> BlockSection {
        self.section
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.kind
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn html_mode(&self) -> HtmlMode {
        self.html_mode
    }

    /// Kinds offered at type selection for the owning section
    pub fn available_kinds(&self) -> &'static [BlockKind] {
        self.section.allowed_kinds()
    }

    /// Heading such as "New HTML" or "Edit Video"
    pub fn heading(&self) -> String {
        match self.kind {
            None => "Add New Element".to_string(),
            Some(kind) => {
                let verb = if self.is_new() { "New" } else { "Edit" };
                format!("{} {}", verb, kind.label())
            }
        }
    }

    pub fn select_kind(&mut self, kind: BlockKind) -> Result<(), EditorError> {
        if !self.is_new() {
            return Err(EditorError::KindFixed);
        }
        if !self.section.allows(kind) {
            return Err(EditorError::KindNotAllowed {
                section: self.section,
                kind,
            });
        }
        self.kind = Some(kind);
        self.step = Step::FieldEntry;
        Ok(())
    }

    /// Return to type selection. Only new blocks can go back.
    pub fn back(&mut self) -> bool {
        if self.is_new() && self.step == Step::FieldEntry {
            self.step = Step::TypeSelection;
            true
        } else {
            false
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the raw body: markdown text, or markup in code mode
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn toggle_html_mode(&mut self) {
        self.html_mode = self.html_mode.toggled();
    }

    /// Text shown by the visual mode for the current HTML body
    pub fn visual_text(&self) -> String {
        richtext::html_to_text(&self.body)
    }

    /// Rewrite the HTML body from visually edited text
    pub fn set_visual_text(&mut self, text: &str) {
        self.body = richtext::apply_visual_edit(&self.body, text);
    }

    /// True when the field-entry form shows the video placeholder
    pub fn shows_video_placeholder(&self) -> bool {
        self.step == Step::FieldEntry && self.kind == Some(BlockKind::EmbeddedVideo)
    }

    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    /// The block this session would write, without touching the store
    pub fn draft(&self, existing: &[ContentBlock]) -> Result<ContentBlock, EditorError> {
        let kind = self.validate()?;
        let id = match &self.id {
            Some(id) => id.clone(),
            None => portal::new_id_in(existing),
        };

        Ok(ContentBlock {
            id,
            kind,
            title: self.title.clone(),
            body: if kind == BlockKind::EmbeddedVideo {
                String::new()
            } else {
                self.body.clone()
            },
            video_config: if kind == BlockKind::EmbeddedVideo {
                self.video_config.clone()
            } else {
                None
            },
        })
    }

    /// Insert (new id) or replace (existing id) the block in its section.
    /// Returns the id of the saved block.
    pub fn save(&self, store: &mut ConfigStore) -> Result<String, EditorError> {
        let block = self.draft(store.current().blocks(self.section))?;
        let id = block.id.clone();
        sequence::upsert(store, self.section, block)?;
        log::debug!("Saved {:?} block '{}' into {}", self.kind, id, self.section);
        Ok(id)
    }

    fn validate(&self) -> Result<BlockKind, EditorError> {
        let kind = self.kind.ok_or(EditorError::NoKindSelected)?;
        if self.is_new() && !self.section.allows(kind) {
            return Err(EditorError::KindNotAllowed {
                section: self.section,
                kind,
            });
        }
        if self.title.trim().is_empty() {
            return Err(EditorError::EmptyTitle);
        }
        Ok(kind)
    }
}
