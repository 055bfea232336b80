//! Fluent builders for the elements that take options.

use crossterm::event::KeyCode;
use ratatui::layout::Direction;
use ratatui::style::Style;
use ratatui::text::Line;
use std::marker::PhantomData;

use crate::tui::element::FocusId;
use crate::tui::widgets::{ListState, TextAreaEvent, TextAreaState, TextInputEvent, TextInputState};
use crate::tui::{Element, LayoutConstraint};

pub struct StyledTextBuilder<Msg> {
    line: Line<'static>,
    background: Option<Style>,
    _msg: PhantomData<Msg>,
}

impl<Msg> StyledTextBuilder<Msg> {
    pub(super) fn new(line: Line<'static>) -> Self {
        Self {
            line,
            background: None,
            _msg: PhantomData,
        }
    }

    /// Fill the whole row, not just the spans
    pub fn background(mut self, style: Style) -> Self {
        self.background = Some(style);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::StyledText {
            line: self.line,
            background: self.background,
        }
    }
}

/// Column or row under construction. Used by the `col!` and `row!` macros.
pub struct LinearBuilder<Msg> {
    direction: Direction,
    items: Vec<(LayoutConstraint, Element<Msg>)>,
    spacing: u16,
}

impl<Msg> LinearBuilder<Msg> {
    pub fn column() -> Self {
        Self {
            direction: Direction::Vertical,
            items: Vec::new(),
            spacing: 0,
        }
    }

    /// Rows keep one cell between children unless told otherwise
    pub fn row() -> Self {
        Self {
            direction: Direction::Horizontal,
            items: Vec::new(),
            spacing: 1,
        }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Linear {
            direction: self.direction,
            items: self.items,
            spacing: self.spacing,
        }
    }
}

pub struct ContainerBuilder<Msg> {
    child: Element<Msg>,
    padding: u16,
}

impl<Msg> ContainerBuilder<Msg> {
    pub(super) fn new(child: Element<Msg>) -> Self {
        Self { child, padding: 1 }
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Container {
            child: Box::new(self.child),
            padding: self.padding,
        }
    }
}

pub struct PanelBuilder<Msg> {
    child: Element<Msg>,
    title: Option<String>,
    width: Option<u16>,
    height: Option<u16>,
    border_style: Option<Style>,
}

impl<Msg> PanelBuilder<Msg> {
    pub(super) fn new(child: Element<Msg>) -> Self {
        Self {
            child,
            title: None,
            width: None,
            height: None,
            border_style: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Outer width when shown as a modal
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = Some(style);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Panel {
            child: Box::new(self.child),
            title: self.title,
            width: self.width,
            height: self.height,
            border_style: self.border_style,
        }
    }
}

pub struct ListBuilder<Msg> {
    id: FocusId,
    items: Vec<Element<Msg>>,
    selected: Option<usize>,
    scroll_offset: usize,
    on_activate: Option<fn(usize) -> Msg>,
    on_navigate: Option<fn(KeyCode) -> Msg>,
}

impl<Msg> ListBuilder<Msg> {
    pub(super) fn new(id: FocusId, items: Vec<Element<Msg>>, state: &ListState) -> Self {
        Self {
            id,
            items,
            selected: state.selected(),
            scroll_offset: state.scroll_offset(),
            on_activate: None,
            on_navigate: None,
        }
    }

    /// Enter on the selected row
    pub fn on_activate(mut self, msg: fn(usize) -> Msg) -> Self {
        self.on_activate = Some(msg);
        self
    }

    /// Arrow, page and home/end keys
    pub fn on_navigate(mut self, msg: fn(KeyCode) -> Msg) -> Self {
        self.on_navigate = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::List {
            id: self.id,
            items: self.items,
            selected: self.selected,
            scroll_offset: self.scroll_offset,
            on_activate: self.on_activate,
            on_navigate: self.on_navigate,
        }
    }
}

pub struct TextInputBuilder<Msg> {
    id: FocusId,
    value: String,
    cursor_pos: usize,
    scroll_offset: usize,
    placeholder: Option<String>,
    on_event: Option<fn(TextInputEvent) -> Msg>,
}

impl<Msg> TextInputBuilder<Msg> {
    pub(super) fn new(id: FocusId, value: &str, state: &TextInputState) -> Self {
        Self {
            id,
            value: value.to_string(),
            cursor_pos: state.cursor_pos(),
            scroll_offset: state.scroll_offset(),
            placeholder: None,
            on_event: None,
        }
    }

    /// Shown dimmed while the value is empty
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn on_event(mut self, msg: fn(TextInputEvent) -> Msg) -> Self {
        self.on_event = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::TextInput {
            id: self.id,
            value: self.value,
            cursor_pos: self.cursor_pos,
            scroll_offset: self.scroll_offset,
            placeholder: self.placeholder,
            on_event: self.on_event,
        }
    }
}

pub struct TextAreaBuilder<Msg> {
    id: FocusId,
    lines: Vec<String>,
    cursor: (usize, usize),
    scroll_offset: usize,
    invalid: bool,
    on_event: Option<fn(TextAreaEvent) -> Msg>,
}

impl<Msg> TextAreaBuilder<Msg> {
    pub(super) fn new(id: FocusId, state: &TextAreaState) -> Self {
        Self {
            id,
            lines: state.lines().to_vec(),
            cursor: state.cursor(),
            scroll_offset: state.scroll_offset(),
            invalid: false,
            on_event: None,
        }
    }

    /// Draw the text in the error color
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn on_event(mut self, msg: fn(TextAreaEvent) -> Msg) -> Self {
        self.on_event = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::TextArea {
            id: self.id,
            lines: self.lines,
            cursor: self.cursor,
            scroll_offset: self.scroll_offset,
            invalid: self.invalid,
            on_event: self.on_event,
        }
    }
}
