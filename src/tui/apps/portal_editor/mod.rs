mod app;
mod models;
mod update;
mod view;

pub use app::{PortalEditorApp, PortalEditorParams, State as PortalEditorState};
pub use models::{Row, Section};

use crossterm::event::KeyCode;

use crate::tui::widgets::{TextAreaEvent, TextInputEvent};

#[derive(Clone)]
pub enum Msg {
    // Navigation
    SidebarNavigate(KeyCode),
    SelectSection(usize),
    RowsNavigate(KeyCode),
    ActivateRow(usize),
    Cancel,
    Quit,

    // Selected-row actions
    CycleBack,
    CycleForward,
    AddItem,
    DeleteRow,
    MoveRowUp,
    MoveRowDown,
    ConfigureWidget,
    ToggleVisibility,

    // Field input modal
    FieldInputEvent(TextInputEvent),

    // Menu templates and inline entry editing
    TemplatesNavigate(KeyCode),
    TemplateChosen(usize),
    EntryLabelEvent(TextInputEvent),
    EntryUrlEvent(TextInputEvent),
    EntryQueryEvent(TextInputEvent),

    // Player defaults
    TogglePlayerCode,
    PlayerJsonEvent(TextAreaEvent),
    CopyPlayerDefaults,
    OpenAdvancedConfiguration,

    // Element editor
    KindsNavigate(KeyCode),
    KindChosen(usize),
    ElementTitleEvent(TextInputEvent),
    ElementBodyEvent(TextAreaEvent),
    ToggleHtmlMode,
    ElementBack,
    SaveElement,

    // Widget configuration
    WidgetOptionsNavigate(KeyCode),
    WidgetOptionActivate(usize),
    WidgetGuidEvent(TextInputEvent),
    WidgetAliasEvent(TextInputEvent),
    WidgetQueryEvent(TextInputEvent),
    WidgetListEvent(TextInputEvent),
    WidgetJsonEvent(TextAreaEvent),
    ToggleWidgetCode,
    SaveWidget,

    // Preview
    TogglePreview,
    CycleDevice,
    TogglePreviewPage,
    PreviewScroll(i16),
    OpenPreviewInBrowser,

    // Sinks
    Publish,
    Published(Result<String, String>),
    Copied(Result<(), String>),
    Opened(Result<String, String>),
}
