use crossterm::event::KeyCode;

use super::{blocks, fields, menu, sinks};
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{Modal, Row, Section};
use crate::tui::{Command, FocusId, ListState};

pub fn handle_sidebar_navigate(state: &mut State, key: KeyCode) -> Command<Msg> {
    state.sidebar.handle_key(key, Section::ALL.len(), 20);
    if let Some(section) = state.sidebar.selected().and_then(|i| Section::ALL.get(i).copied())
        && section != state.section
    {
        switch_section(state, section);
    }
    Command::None
}

pub fn handle_select_section(state: &mut State, index: usize) -> Command<Msg> {
    let Some(section) = Section::ALL.get(index).copied() else {
        return Command::None;
    };
    state.sidebar.select(Some(index));
    if section != state.section {
        switch_section(state, section);
    }
    Command::set_focus(FocusId::new("rows"))
}

/// Make `section` active with its first editable row selected
pub fn switch_section(state: &mut State, section: Section) {
    log::debug!("Switching to section '{}'", section.key());
    state.section = section;
    state.rows = ListState::new();
    let first = state.rows().iter().position(|row| !row.is_heading());
    state.rows.select(first.or(Some(0)));
    state.status = None;
}

pub fn handle_rows_navigate(state: &mut State, key: KeyCode) -> Command<Msg> {
    let rows = state.rows();
    state.rows.handle_key(key, rows.len(), 20);

    // Headings are skipped in the direction of travel
    if let Some(index) = state.rows.selected()
        && rows.get(index).is_some_and(Row::is_heading)
    {
        let upward = matches!(key, KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp | KeyCode::Home);
        let next = if upward && index > 0 {
            index - 1
        } else if index + 1 < rows.len() {
            index + 1
        } else {
            index
        };
        state.rows.select(Some(next));
    }
    Command::None
}

pub fn handle_activate_row(state: &mut State, index: usize) -> Command<Msg> {
    let Some(row) = state.rows().into_iter().nth(index) else {
        return Command::None;
    };
    state.rows.select(Some(index));

    match row {
        Row::Heading(_) => Command::None,
        Row::Group { index, .. } => {
            state.accordion.toggle(index);
            Command::None
        }
        Row::Field(field) => fields::activate(state, field),
        Row::Block { id, .. } => blocks::open_editor(state, &id),
        Row::AddBlock => blocks::handle_add(state),
        Row::MenuEntry { id, .. } => menu::open_entry(state, &id),
        Row::AddMenuEntry => menu::open_templates(state),
        Row::PlayerDefaultsCode => sinks::handle_toggle_player_code(state),
        Row::CopyPlayerDefaults => sinks::handle_copy_player_defaults(state),
        Row::AdvancedConfiguration => sinks::handle_open_advanced(state),
    }
}

/// Esc with nothing focused: close the open modal, discarding its draft
pub fn handle_cancel(state: &mut State) -> Command<Msg> {
    match state.modal.take() {
        Some(Modal::Element(_)) | Some(Modal::Widget(_)) => {
            log::debug!("Discarded editor draft");
            Command::None
        }
        Some(_) => Command::None,
        None => {
            state.status = None;
            Command::None
        }
    }
}

/// Select the row matching `wanted`, if it is present
pub fn select_row_where(state: &mut State, wanted: impl Fn(&Row) -> bool) {
    if let Some(index) = state.rows().iter().position(wanted) {
        state.rows.select(Some(index));
    }
}
