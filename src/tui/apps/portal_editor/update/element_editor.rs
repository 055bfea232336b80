use crossterm::event::KeyCode;

use super::navigation::select_row_where;
use crate::editing::{HtmlMode, Step};
use crate::portal::BlockKind;
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{ElementForm, Modal, Row, StatusMessage};
use crate::tui::widgets::{TextAreaEvent, TextInputEvent};
use crate::tui::{Command, FocusId};

fn form(state: &mut State) -> Option<&mut ElementForm> {
    match &mut state.modal {
        Some(Modal::Element(form)) => Some(form.as_mut()),
        _ => None,
    }
}

pub fn handle_kinds_navigate(state: &mut State, key: KeyCode) -> Command<Msg> {
    if let Some(form) = form(state) {
        let count = form.editor.available_kinds().len();
        form.kinds.handle_key(key, count, 10);
    }
    Command::None
}

pub fn handle_kind_chosen(state: &mut State, index: usize) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    let Some(kind) = form.editor.available_kinds().get(index).copied() else {
        return Command::None;
    };
    match form.editor.select_kind(kind) {
        Ok(()) => {
            form.error = None;
            form.reload_body();
            Command::set_focus(FocusId::new("element-title"))
        }
        Err(err) => {
            form.error = Some(err.to_string());
            Command::None
        }
    }
}

pub fn handle_title_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    match event {
        TextInputEvent::Changed(key) => {
            if let Some(title) = form.title_input.handle_key(key, form.editor.title()) {
                form.editor.set_title(title);
                form.error = None;
            }
            Command::None
        }
        TextInputEvent::Submit if form.editor.shows_video_placeholder() => handle_save(state),
        TextInputEvent::Submit => Command::set_focus(FocusId::new("element-body")),
    }
}

pub fn handle_body_event(state: &mut State, event: TextAreaEvent) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    let TextAreaEvent::Changed(key) = event;
    if !form.body.handle_key(key) {
        return Command::None;
    }

    let text = form.body.text();
    match (form.editor.kind(), form.editor.html_mode()) {
        (Some(BlockKind::Html), HtmlMode::Visual) => form.editor.set_visual_text(&text),
        _ => form.editor.set_body(text),
    }
    Command::None
}

pub fn handle_toggle_html_mode(state: &mut State) -> Command<Msg> {
    if let Some(form) = form(state)
        && form.editor.kind() == Some(BlockKind::Html)
    {
        form.editor.toggle_html_mode();
        form.reload_body();
    }
    Command::None
}

pub fn handle_back(state: &mut State) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    if form.editor.back() {
        form.error = None;
        Command::set_focus(FocusId::new("element-kinds"))
    } else {
        Command::None
    }
}

pub fn handle_save(state: &mut State) -> Command<Msg> {
    let Some(Modal::Element(form)) = &mut state.modal else {
        return Command::None;
    };
    if form.editor.step() == Step::TypeSelection {
        form.error = Some("Choose an element type first".to_string());
        return Command::None;
    }

    match form.editor.save(&mut state.store) {
        Ok(id) => {
            let is_video = form.editor.kind() == Some(BlockKind::EmbeddedVideo);
            let heading = form.editor.heading();
            state.modal = None;
            select_row_where(state, |row| matches!(row, Row::Block { id: saved, .. } if *saved == id));
            let message = if is_video {
                format!("Saved {}. Press c to configure its video source.", heading)
            } else {
                format!("Saved {}", heading)
            };
            state.set_status(StatusMessage::info(message));
        }
        Err(err) => form.error = Some(err.to_string()),
    }
    Command::None
}
