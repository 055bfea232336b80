pub mod portal_editor;

pub use portal_editor::{PortalEditorApp, PortalEditorParams};
