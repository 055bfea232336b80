use crate::editing::{FieldDef, FieldKind};
use crate::store::{PatchError, SettingsKey};
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{FieldInput, Modal, Row, StatusMessage};
use crate::tui::widgets::TextInputEvent;
use crate::tui::{Command, FocusId};

/// Enter on a field row: flip, advance, or open the text input
pub fn activate(state: &mut State, field: FieldDef) -> Command<Msg> {
    match &field.kind {
        FieldKind::Bool => {
            let result = field.toggle(&mut state.store);
            applied(state, &field, result);
            Command::None
        }
        FieldKind::Choice { .. } => {
            let result = field.cycle(&mut state.store, true);
            applied(state, &field, result);
            Command::None
        }
        FieldKind::Color | FieldKind::Text { .. } | FieldKind::Number { .. } => {
            let value = field.display(state.store.current());
            state.modal = Some(Modal::FieldInput(FieldInput::new(field, value)));
            Command::set_focus(FocusId::new("field-input"))
        }
    }
}

/// Left/Right and -/+ on the selected row
pub fn handle_cycle(state: &mut State, forward: bool) -> Command<Msg> {
    match state.selected_row() {
        Some(Row::Field(field)) => {
            let result = match field.kind {
                FieldKind::Bool => field.toggle(&mut state.store),
                FieldKind::Choice { .. } => field.cycle(&mut state.store, forward),
                FieldKind::Number { .. } => field.step(&mut state.store, if forward { 1 } else { -1 }),
                FieldKind::Color | FieldKind::Text { .. } => Ok(()),
            };
            applied(state, &field, result);
        }
        Some(Row::Group { index, .. }) => {
            if state.accordion.is_expanded(index) != forward {
                state.accordion.toggle(index);
            }
        }
        _ => {}
    }
    Command::None
}

pub fn handle_input_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    let Some(Modal::FieldInput(input)) = &mut state.modal else {
        return Command::None;
    };
    let live = !matches!(input.field.kind, FieldKind::Number { .. });

    match event {
        TextInputEvent::Changed(key) => {
            if let Some(value) = input.input.handle_key(key, &input.value) {
                input.value = value;
                if live {
                    input.error = input
                        .field
                        .set_text(&mut state.store, &input.value)
                        .err()
                        .map(|err| err.to_string());
                }
            }
            if live && input.field.settings == SettingsKey::Portal {
                state.sync_player_defaults();
            }
            Command::None
        }
        TextInputEvent::Submit => {
            if !live {
                if let Err(err) = input.field.set_text(&mut state.store, &input.value) {
                    input.error = Some(err.to_string());
                    return Command::None;
                }
            }
            let field = input.field.clone();
            state.modal = None;
            applied(state, &field, Ok(()));
            Command::None
        }
    }
}

/// Report a field write and keep derived views current
fn applied(state: &mut State, field: &FieldDef, result: Result<(), PatchError>) {
    match result {
        Ok(()) => {
            if field.settings == SettingsKey::Portal {
                state.sync_player_defaults();
            }
            state.status = Some(StatusMessage::info(format!(
                "{}: {}",
                field.label,
                field.display(state.store.current())
            )));
        }
        Err(err) => state.set_status(StatusMessage::error(format!("{}: {}", field.label, err))),
    }
}
