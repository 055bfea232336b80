use super::navigation::select_row_where;
use super::widget;
use crate::editing::section::BlockList;
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{ElementForm, Modal, Row, StatusMessage};
use crate::tui::{Command, FocusId};

fn block_list(state: &State) -> Option<BlockList> {
    state.section.block_section().map(BlockList::new)
}

pub fn handle_add(state: &mut State) -> Command<Msg> {
    let Some(list) = block_list(state) else {
        return Command::None;
    };
    state.modal = Some(Modal::Element(Box::new(ElementForm::new(list.add()))));
    Command::set_focus(FocusId::new("element-kinds"))
}

pub fn open_editor(state: &mut State, id: &str) -> Command<Msg> {
    let Some(list) = block_list(state) else {
        return Command::None;
    };
    match list.edit(&state.store, id) {
        Ok(editor) => {
            state.modal = Some(Modal::Element(Box::new(ElementForm::new(editor))));
            Command::set_focus(FocusId::new("element-title"))
        }
        Err(err) => {
            state.set_status(StatusMessage::error(err.to_string()));
            Command::None
        }
    }
}

pub fn handle_delete(state: &mut State) -> Command<Msg> {
    let (Some(list), Some(Row::Block { id, .. })) = (block_list(state), state.selected_row()) else {
        return Command::None;
    };
    match list.delete(&mut state.store, &id) {
        Ok(()) => state.set_status(StatusMessage::info(format!("Removed element from {}", list.section()))),
        Err(err) => state.set_status(StatusMessage::error(err.to_string())),
    }
    Command::None
}

pub fn handle_move(state: &mut State, up: bool) -> Command<Msg> {
    let (Some(list), Some(Row::Block { index, id })) = (block_list(state), state.selected_row()) else {
        return Command::None;
    };
    let result = if up {
        list.move_up(&mut state.store, index)
    } else {
        list.move_down(&mut state.store, index)
    };
    match result {
        Ok(true) => select_row_where(state, |row| matches!(row, Row::Block { id: moved, .. } if *moved == id)),
        Ok(false) => {}
        Err(err) => state.set_status(StatusMessage::error(err.to_string())),
    }
    Command::None
}

pub fn handle_configure(state: &mut State) -> Command<Msg> {
    let (Some(list), Some(Row::Block { id, .. })) = (block_list(state), state.selected_row()) else {
        return Command::None;
    };
    match list.configure_video(&state.store, &id) {
        Some(source) => widget::open(state, source),
        None => {
            state.set_status(StatusMessage::error("Only embedded video elements have a video configuration"));
            Command::None
        }
    }
}
