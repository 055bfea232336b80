use crossterm::event::KeyCode;

use super::navigation::select_row_where;
use super::widget;
use crate::editing::menu::{self, MenuEdit, MenuTemplate};
use crate::editing::{Direction, EditorError};
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{MenuEntryForm, Modal, Row, StatusMessage};
use crate::tui::widgets::TextInputEvent;
use crate::tui::{Command, FocusId, ListState};

pub fn open_templates(state: &mut State) -> Command<Msg> {
    state.modal = Some(Modal::Templates(ListState::with_selection()));
    Command::set_focus(FocusId::new("templates"))
}

pub fn handle_templates_navigate(state: &mut State, key: KeyCode) -> Command<Msg> {
    if let Some(Modal::Templates(list)) = &mut state.modal {
        list.handle_key(key, MenuTemplate::ALL.len(), 10);
    }
    Command::None
}

pub fn handle_template_chosen(state: &mut State, index: usize) -> Command<Msg> {
    let Some(template) = MenuTemplate::ALL.get(index).copied() else {
        return Command::None;
    };
    state.modal = None;
    match menu::add_entry(&mut state.store, template) {
        Ok(id) => {
            select_row_where(state, |row| matches!(row, Row::MenuEntry { id: added, .. } if *added == id));
            state.set_status(StatusMessage::info(format!("Added {} link", template.label())));
        }
        Err(err) => state.set_status(StatusMessage::error(err.to_string())),
    }
    Command::set_focus(FocusId::new("rows"))
}

pub fn open_entry(state: &mut State, id: &str) -> Command<Msg> {
    let Some(entry) = state.store.current().find_menu_entry(id) else {
        return Command::None;
    };
    state.modal = Some(Modal::MenuEntry(MenuEntryForm::new(entry)));
    Command::set_focus(FocusId::new("entry-label"))
}

/// Which inline field of the entry form an event belongs to
#[derive(Clone, Copy)]
enum EntryField {
    Label,
    Url,
    SearchQuery,
}

fn handle_entry_event(state: &mut State, field: EntryField, event: TextInputEvent) -> Command<Msg> {
    let Some(Modal::MenuEntry(form)) = &mut state.modal else {
        return Command::None;
    };
    let key = match event {
        TextInputEvent::Changed(key) => key,
        TextInputEvent::Submit => {
            state.modal = None;
            return Command::None;
        }
    };

    let (input, value) = match field {
        EntryField::Label => (&mut form.label_input, &mut form.label),
        EntryField::Url => (&mut form.url_input, &mut form.url),
        EntryField::SearchQuery => (&mut form.query_input, &mut form.search_query),
    };
    let Some(next) = input.handle_key(key, value.as_str()) else {
        return Command::None;
    };
    *value = next.clone();

    let edit = match field {
        EntryField::Label => MenuEdit::Label(next),
        EntryField::Url => MenuEdit::Url(next),
        EntryField::SearchQuery => MenuEdit::SearchQuery(next),
    };
    let id = form.id.clone();
    if let Err(err) = menu::edit_entry(&mut state.store, &id, edit) {
        state.set_status(StatusMessage::error(err.to_string()));
    }
    Command::None
}

pub fn handle_label_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    handle_entry_event(state, EntryField::Label, event)
}

pub fn handle_url_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    handle_entry_event(state, EntryField::Url, event)
}

pub fn handle_query_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    handle_entry_event(state, EntryField::SearchQuery, event)
}

fn selected_entry(state: &State) -> Option<(usize, String)> {
    match state.selected_row() {
        Some(Row::MenuEntry { index, id }) => Some((index, id)),
        _ => None,
    }
}

fn report(state: &mut State, result: Result<String, EditorError>) {
    match result {
        Ok(message) => state.set_status(StatusMessage::info(message)),
        Err(err) => state.set_status(StatusMessage::error(err.to_string())),
    }
}

pub fn handle_toggle_visibility(state: &mut State) -> Command<Msg> {
    if let Some((_, id)) = selected_entry(state) {
        let result = menu::toggle_visibility(&mut state.store, &id)
            .map(|visible| (if visible { "Menu item shown" } else { "Menu item hidden" }).to_string());
        report(state, result);
    }
    Command::None
}

pub fn handle_delete(state: &mut State) -> Command<Msg> {
    if let Some((_, id)) = selected_entry(state) {
        let result = menu::delete_entry(&mut state.store, &id).map(|_| "Menu item removed".to_string());
        report(state, result);
    }
    Command::None
}

pub fn handle_move(state: &mut State, up: bool) -> Command<Msg> {
    let Some((index, id)) = selected_entry(state) else {
        return Command::None;
    };
    let direction = if up { Direction::Up } else { Direction::Down };
    match menu::move_entry(&mut state.store, index, direction) {
        Ok(true) => select_row_where(state, |row| matches!(row, Row::MenuEntry { id: moved, .. } if *moved == id)),
        Ok(false) => {}
        Err(err) => state.set_status(StatusMessage::error(err.to_string())),
    }
    Command::None
}

pub fn handle_configure(state: &mut State) -> Command<Msg> {
    let Some((_, id)) = selected_entry(state) else {
        return Command::None;
    };
    let source = state.store.current().find_menu_entry(&id).and_then(menu::configure_widget);
    match source {
        Some(source) => widget::open(state, source),
        None => {
            state.set_status(StatusMessage::error(
                "Only Smart Search and Favorites links have a widget configuration",
            ));
            Command::None
        }
    }
}
