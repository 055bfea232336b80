//! The declarative element tree an app's `view` returns.

use crossterm::event::KeyCode;
use ratatui::layout::Direction;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::tui::widgets::{ListItem, ListState, TextAreaEvent, TextAreaState, TextInputEvent, TextInputState};
use crate::tui::Theme;

mod builders;
pub use builders::*;

/// Names a focusable widget across frames
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(pub &'static str);

impl FocusId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }
}

impl From<&'static str> for FocusId {
    fn from(id: &'static str) -> Self {
        Self(id)
    }
}

/// Placement of a modal layer inside the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    TopLeft,
    /// Covers the whole area
    Fill,
}

#[derive(Clone)]
pub struct Layer<Msg> {
    pub element: Element<Msg>,
    pub alignment: Alignment,
    pub dim_below: bool,
}

impl<Msg> Layer<Msg> {
    pub fn new(element: Element<Msg>) -> Self {
        Self {
            element,
            alignment: Alignment::TopLeft,
            dim_below: false,
        }
    }

    pub fn align(self, alignment: Alignment) -> Self {
        Self { alignment, ..self }
    }

    pub fn dim(self, dim_below: bool) -> Self {
        Self { dim_below, ..self }
    }
}

/// Size of one child along its parent's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConstraint {
    Length(u16),
    Min(u16),
    /// Share of the space left over, by weight
    Fill(u16),
}

#[derive(Clone)]
pub enum Element<Msg> {
    None,

    Text { content: String, style: Option<Style> },

    StyledText {
        line: Line<'static>,
        background: Option<Style>,
    },

    /// Wrapped multi-line text
    Paragraph { lines: Vec<Line<'static>>, scroll: u16 },

    /// Children laid out top to bottom or left to right
    Linear {
        direction: Direction,
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    Container {
        child: Box<Element<Msg>>,
        padding: u16,
    },

    Panel {
        child: Box<Element<Msg>>,
        title: Option<String>,
        width: Option<u16>,
        height: Option<u16>,
        border_style: Option<Style>,
    },

    /// Base view plus modal layers
    Stack { layers: Vec<Layer<Msg>> },

    List {
        id: FocusId,
        items: Vec<Element<Msg>>,
        selected: Option<usize>,
        scroll_offset: usize,
        on_activate: Option<fn(usize) -> Msg>,
        on_navigate: Option<fn(KeyCode) -> Msg>,
    },

    TextInput {
        id: FocusId,
        value: String,
        cursor_pos: usize,
        scroll_offset: usize,
        placeholder: Option<String>,
        on_event: Option<fn(TextInputEvent) -> Msg>,
    },

    /// Multi-line editor for bodies and raw JSON
    TextArea {
        id: FocusId,
        lines: Vec<String>,
        cursor: (usize, usize),
        scroll_offset: usize,
        invalid: bool,
        on_event: Option<fn(TextAreaEvent) -> Msg>,
    },
}

impl<Msg> Element<Msg> {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
            style: None,
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Element::Text {
            content: content.into(),
            style: Some(style),
        }
    }

    pub fn styled_text(line: Line<'static>) -> StyledTextBuilder<Msg> {
        StyledTextBuilder::new(line)
    }

    pub fn paragraph(lines: Vec<Line<'static>>) -> Self {
        Element::Paragraph { lines, scroll: 0 }
    }

    pub fn container(child: Element<Msg>) -> ContainerBuilder<Msg> {
        ContainerBuilder::new(child)
    }

    pub fn panel(child: Element<Msg>) -> PanelBuilder<Msg> {
        PanelBuilder::new(child)
    }

    pub fn stack(layers: Vec<Layer<Msg>>) -> Self {
        Element::Stack { layers }
    }

    /// One row per item; the selected row is highlighted while focused
    pub fn list<T>(id: impl Into<FocusId>, items: &[T], state: &ListState, theme: &Theme) -> ListBuilder<Msg>
    where
        T: ListItem<Msg = Msg>,
    {
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| item.to_element(theme, state.selected() == Some(index)))
            .collect();
        ListBuilder::new(id.into(), rows, state)
    }

    pub fn text_input(id: impl Into<FocusId>, value: &str, state: &TextInputState) -> TextInputBuilder<Msg> {
        TextInputBuilder::new(id.into(), value, state)
    }

    pub fn text_area(id: impl Into<FocusId>, state: &TextAreaState) -> TextAreaBuilder<Msg> {
        TextAreaBuilder::new(id.into(), state)
    }
}

impl<Msg> Default for Element<Msg> {
    fn default() -> Self {
        Element::None
    }
}
