//! Editing sessions layered over the config store.
//!
//! Each submodule turns one kind of user intent into store patches. Nothing
//! here holds a mutable alias into the document: sessions keep their own
//! drafts and hand whole sequences or records to the store on commit.

pub mod element_editor;
pub mod fields;
pub mod json_mirror;
pub mod menu;
pub mod player_defaults;
pub mod richtext;
pub mod section;
pub mod sequence;
pub mod widget_config;

pub use element_editor::{ElementEditor, HtmlMode, Step};
pub use fields::{FieldDef, FieldKind, FieldGroup, SettingsPanel};
pub use json_mirror::{JsonMirror, MirrorError};
pub use menu::{MenuEdit, MenuTemplate};
pub use player_defaults::PlayerDefaults;
pub use sequence::{Direction, MenuSlot, Slot};
pub use widget_config::{WidgetConfigSession, WidgetSaveError, WidgetSource};

use thiserror::Error;

use crate::portal::{BlockKind, BlockSection, MenuKind};
use crate::store::PatchError;

/// Refused editor transitions and saves
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("a title is required")]
    EmptyTitle,

    #[error("choose an element type first")]
    NoKindSelected,

    #[error("{kind:?} elements cannot be added to {section}")]
    KindNotAllowed { section: BlockSection, kind: BlockKind },

    #[error("the element type is fixed once the element exists")]
    KindFixed,

    #[error("{field} cannot be edited on {kind:?} menu entries")]
    FieldNotEditable { field: &'static str, kind: MenuKind },

    #[error("no item with id '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Patch(#[from] PatchError),
}
