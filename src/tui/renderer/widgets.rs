//! Interactive widgets: each registers a key handler with the focus registry
//! and then draws itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{FocusableInfo, RenderCtx, Renderer};
use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::widgets::{TextAreaEvent, TextInputEvent};
use crate::tui::Element;

pub(super) struct ListParts<'e, Msg> {
    pub id: &'e FocusId,
    pub items: &'e [Element<Msg>],
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub on_activate: Option<fn(usize) -> Msg>,
    pub on_navigate: Option<fn(KeyCode) -> Msg>,
}

pub(super) struct TextInputParts<'e, Msg> {
    pub id: &'e FocusId,
    pub value: &'e str,
    pub cursor_pos: usize,
    pub scroll_offset: usize,
    pub placeholder: Option<&'e str>,
    pub on_event: Option<fn(TextInputEvent) -> Msg>,
}

pub(super) struct TextAreaParts<'e, Msg> {
    pub id: &'e FocusId,
    pub lines: &'e [String],
    pub cursor: (usize, usize),
    pub scroll_offset: usize,
    pub invalid: bool,
    pub on_event: Option<fn(TextAreaEvent) -> Msg>,
}

/// Control chords always reach the app's global bindings
fn is_chord(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Navigation keys go to `on_navigate`, Enter activates the selected row
pub fn list_on_key<Msg: 'static>(
    selected: Option<usize>,
    on_navigate: Option<fn(KeyCode) -> Msg>,
    on_activate: Option<fn(usize) -> Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg>> {
    Box::new(move |key| {
        if is_chord(&key) {
            return DispatchTarget::PassThrough;
        }
        match (key.code, on_navigate, on_activate, selected) {
            (
                KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home | KeyCode::End,
                Some(navigate),
                _,
                _,
            ) => DispatchTarget::AppMsg(navigate(key.code)),
            (KeyCode::Enter, _, Some(activate), Some(index)) => DispatchTarget::AppMsg(activate(index)),
            _ => DispatchTarget::PassThrough,
        }
    })
}

pub fn text_input_on_key<Msg: 'static>(on_event: fn(TextInputEvent) -> Msg) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg>> {
    Box::new(move |key| {
        if is_chord(&key) {
            return DispatchTarget::PassThrough;
        }
        match key.code {
            KeyCode::Enter => DispatchTarget::AppMsg(on_event(TextInputEvent::Submit)),
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => DispatchTarget::AppMsg(on_event(TextInputEvent::Changed(key.code))),
            _ => DispatchTarget::PassThrough,
        }
    })
}

/// Everything except focus movement and Esc edits the buffer
pub fn text_area_on_key<Msg: 'static>(on_event: fn(TextAreaEvent) -> Msg) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg>> {
    Box::new(move |key| {
        if is_chord(&key) {
            return DispatchTarget::PassThrough;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => DispatchTarget::PassThrough,
            code => DispatchTarget::AppMsg(on_event(TextAreaEvent::Changed(code))),
        }
    })
}

/// Smallest offset change that keeps `cursor` inside a window of `visible`
fn follow(offset: usize, cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        offset
    } else if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

pub(super) fn render_list<Msg: Clone + 'static>(
    frame: &mut Frame,
    ctx: &mut RenderCtx<'_, Msg>,
    parts: ListParts<'_, Msg>,
    area: Rect,
    inside_panel: bool,
) {
    ctx.focus.register_focusable(FocusableInfo {
        id: parts.id.clone(),
        on_key: list_on_key(parts.selected, parts.on_navigate, parts.on_activate),
    });

    let visible = area.height as usize;
    let offset = match parts.selected {
        Some(selected) => follow(parts.scroll_offset, selected, visible),
        None => parts.scroll_offset,
    }
    .min(parts.items.len().saturating_sub(visible));

    let is_focused = ctx.focused_id == Some(parts.id);
    for (row, item) in parts.items.iter().skip(offset).take(visible).enumerate() {
        let row_area = Rect {
            y: area.y + row as u16,
            height: 1,
            ..area
        };
        if is_focused && parts.selected == Some(offset + row) {
            frame.buffer_mut().set_style(row_area, ctx.theme.selected());
        }
        Renderer::render_element(frame, ctx, item, row_area, inside_panel);
    }

    if parts.items.len() > visible && visible > 1 {
        let track = area.height - 1;
        let position = (offset * track as usize / (parts.items.len() - visible).max(1)) as u16;
        let thumb = Position::new(area.x + area.width - 1, area.y + position.min(track));
        if let Some(cell) = frame.buffer_mut().cell_mut(thumb) {
            cell.set_symbol("┃").set_fg(ctx.theme.border_secondary);
        }
    }
}

pub(super) fn render_text_input<Msg: Clone + 'static>(
    frame: &mut Frame,
    ctx: &mut RenderCtx<'_, Msg>,
    parts: TextInputParts<'_, Msg>,
    area: Rect,
) {
    if let Some(on_event) = parts.on_event {
        ctx.focus.register_focusable(FocusableInfo {
            id: parts.id.clone(),
                on_key: text_input_on_key(on_event),
        });
    }

    let is_focused = ctx.focused_id == Some(parts.id);
    let width = area.width as usize;
    let cursor = parts.cursor_pos.min(parts.value.chars().count());
    let offset = follow(parts.scroll_offset, cursor, width);

    let background = if is_focused { ctx.theme.bg_elevated } else { ctx.theme.bg_surface };
    let line = if parts.value.is_empty() {
        Line::from(Span::styled(
            parts.placeholder.unwrap_or_default().to_string(),
            Style::default().fg(ctx.theme.text_tertiary).add_modifier(Modifier::ITALIC),
        ))
    } else {
        let visible: String = parts.value.chars().skip(offset).take(width).collect();
        Line::from(Span::styled(visible, Style::default().fg(ctx.theme.text_primary)))
    };
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(background)), area);

    if is_focused {
        frame.set_cursor_position(Position::new(area.x + (cursor - offset) as u16, area.y));
    }
}

pub(super) fn render_text_area<Msg: Clone + 'static>(
    frame: &mut Frame,
    ctx: &mut RenderCtx<'_, Msg>,
    parts: TextAreaParts<'_, Msg>,
    area: Rect,
) {
    if let Some(on_event) = parts.on_event {
        ctx.focus.register_focusable(FocusableInfo {
            id: parts.id.clone(),
                on_key: text_area_on_key(on_event),
        });
    }

    let is_focused = ctx.focused_id == Some(parts.id);
    let (row, col) = parts.cursor;
    let top = follow(parts.scroll_offset, row, area.height as usize);
    let left = follow(0, col, area.width as usize);

    let fg = if parts.invalid { ctx.theme.accent_error } else { ctx.theme.text_primary };
    let lines: Vec<Line> = parts
        .lines
        .iter()
        .skip(top)
        .take(area.height as usize)
        .map(|line| Line::from(line.chars().skip(left).collect::<String>()))
        .collect();
    let background = if is_focused { ctx.theme.bg_surface } else { ctx.theme.bg_base };
    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(fg).bg(background)), area);

    if is_focused {
        frame.set_cursor_position(Position::new(
            area.x + (col - left) as u16,
            area.y + (row - top) as u16,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Nav(KeyCode),
        Open(usize),
        Input(KeyCode),
        Submit,
    }

    fn input_msg(event: TextInputEvent) -> Msg {
        match event {
            TextInputEvent::Changed(code) => Msg::Input(code),
            TextInputEvent::Submit => Msg::Submit,
        }
    }

    fn dispatch<Msg>(handler: &dyn Fn(KeyEvent) -> DispatchTarget<Msg>, key: KeyEvent) -> Option<Msg> {
        match handler(key) {
            DispatchTarget::AppMsg(msg) => Some(msg),
            DispatchTarget::PassThrough => None,
        }
    }

    #[test]
    fn test_list_keys() {
        let handler = list_on_key(Some(2), Some(Msg::Nav), Some(Msg::Open));
        assert_eq!(dispatch(&handler, KeyCode::Down.into()), Some(Msg::Nav(KeyCode::Down)));
        assert_eq!(dispatch(&handler, KeyCode::Enter.into()), Some(Msg::Open(2)));
        assert_eq!(dispatch(&handler, KeyCode::Char('d').into()), None);
    }

    #[test]
    fn test_text_input_leaves_chords_and_esc_alone() {
        let handler = text_input_on_key(input_msg);
        assert_eq!(dispatch(&handler, KeyCode::Char('a').into()), Some(Msg::Input(KeyCode::Char('a'))));
        assert_eq!(dispatch(&handler, KeyCode::Enter.into()), Some(Msg::Submit));
        assert_eq!(dispatch(&handler, KeyCode::Esc.into()), None);
        let publish = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(dispatch(&handler, publish), None);
    }

    #[test]
    fn test_follow_window() {
        assert_eq!(follow(0, 3, 5), 0);
        assert_eq!(follow(0, 7, 5), 3);
        assert_eq!(follow(6, 2, 5), 2);
    }
}
