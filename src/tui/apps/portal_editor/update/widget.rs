use crossterm::event::KeyCode;

use crate::editing::{WidgetConfigSession, WidgetSource};
use crate::portal::{DisplayType, SourceType};
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::{Modal, StatusMessage, WidgetForm, WidgetOption};
use crate::tui::widgets::{TextAreaEvent, TextInputEvent, TextInputState};
use crate::tui::{Command, FocusId};

/// Open the full-screen view on `source`
pub fn open(state: &mut State, source: WidgetSource) -> Command<Msg> {
    match WidgetConfigSession::open(state.store.current(), source) {
        Ok(session) => {
            log::debug!("Configuring widget of {}", session.source());
            state.modal = Some(Modal::Widget(Box::new(WidgetForm::new(session))));
            Command::set_focus(FocusId::new("widget-options"))
        }
        Err(err) => {
            state.set_status(StatusMessage::error(err.to_string()));
            Command::None
        }
    }
}

fn form(state: &mut State) -> Option<&mut WidgetForm> {
    match &mut state.modal {
        Some(Modal::Widget(form)) => Some(form.as_mut()),
        _ => None,
    }
}

fn cycled<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let Some(position) = options.iter().position(|o| *o == current) else {
        return options.first().copied().unwrap_or(current);
    };
    let next = if forward {
        (position + 1) % options.len()
    } else {
        (position + options.len() - 1) % options.len()
    };
    options[next]
}

fn apply_option(form: &mut WidgetForm, option: WidgetOption, forward: bool) {
    let draft = form.session.draft();
    match option {
        WidgetOption::SourceType => {
            let next = cycled(&SourceType::ALL, draft.source_type, forward);
            form.session.set_source_type(next);
        }
        WidgetOption::DisplayType => {
            let next = cycled(&DisplayType::TILES, draft.display_type, forward);
            form.session.set_display_type(next);
        }
        WidgetOption::Size => form.session.step_size(if forward { 1 } else { -1 }),
        WidgetOption::Code => form.session.toggle_code(),
    }
    form.error = None;
    form.sync_json();
}

pub fn handle_options_navigate(state: &mut State, key: KeyCode) -> Command<Msg> {
    if let Some(form) = form(state) {
        form.options.handle_key(key, WidgetOption::ALL.len(), 10);
    }
    Command::None
}

pub fn handle_option_activate(state: &mut State, index: usize) -> Command<Msg> {
    if let Some(form) = form(state)
        && let Some(option) = WidgetOption::ALL.get(index).copied()
    {
        form.options.select(Some(index));
        apply_option(form, option, true);
    }
    Command::None
}

pub fn handle_cycle(state: &mut State, forward: bool) -> Command<Msg> {
    if let Some(form) = form(state)
        && let Some(option) = form.selected_option()
    {
        apply_option(form, option, forward);
    }
    Command::None
}

/// Route a key to one of the text inputs and hand the new value to `apply`
fn edit_text(
    state: &mut State,
    event: TextInputEvent,
    input: fn(&mut WidgetForm) -> &mut TextInputState,
    current: fn(&WidgetForm) -> String,
    apply: fn(&mut WidgetConfigSession, String),
) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    let TextInputEvent::Changed(key) = event else {
        return Command::None;
    };
    let value = current(form);
    if let Some(next) = input(form).handle_key(key, &value) {
        apply(&mut form.session, next);
        form.sync_json();
    }
    Command::None
}

fn draft_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn handle_guid_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    edit_text(
        state,
        event,
        |form| &mut form.single_guid,
        |form| draft_text(&form.session.draft().single_guid),
        |session, value| session.set_single_guid(value),
    )
}

pub fn handle_alias_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    edit_text(
        state,
        event,
        |form| &mut form.single_alias,
        |form| draft_text(&form.session.draft().single_alias),
        |session, value| session.set_single_alias(value),
    )
}

pub fn handle_query_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    edit_text(
        state,
        event,
        |form| &mut form.search_query,
        |form| draft_text(&form.session.draft().search_query),
        |session, value| session.set_search_query(value),
    )
}

pub fn handle_list_event(state: &mut State, event: TextInputEvent) -> Command<Msg> {
    edit_text(
        state,
        event,
        |form| &mut form.guid_list,
        |form| draft_text(&form.session.draft().guid_list),
        |session, value| session.set_guid_list(value),
    )
}

/// Typing into the JSON pane. The pane keeps the user's text; the draft only
/// changes when the text parses.
pub fn handle_json_event(state: &mut State, event: TextAreaEvent) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    let TextAreaEvent::Changed(key) = event;
    if form.json.handle_key(key) {
        form.session.edit_json(form.json.text());
    }
    Command::None
}

pub fn handle_toggle_code(state: &mut State) -> Command<Msg> {
    let Some(form) = form(state) else {
        return Command::None;
    };
    form.session.toggle_code();
    form.sync_json();
    if form.session.code_visible() {
        Command::set_focus(FocusId::new("widget-json"))
    } else {
        Command::set_focus(FocusId::new("widget-options"))
    }
}

pub fn handle_save(state: &mut State) -> Command<Msg> {
    let Some(Modal::Widget(form)) = &mut state.modal else {
        return Command::None;
    };
    match form.session.save(&mut state.store) {
        Ok(()) => {
            let message = format!("Saved video configuration for {}", form.session.source());
            state.modal = None;
            state.set_status(StatusMessage::info(message));
        }
        Err(err) => form.error = Some(err.to_string()),
    }
    Command::None
}
