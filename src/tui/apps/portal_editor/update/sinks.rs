use crate::sinks::{self, PublishSink};
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::StatusMessage;
use crate::tui::widgets::TextAreaEvent;
use crate::tui::{Command, FocusId};

pub fn handle_publish(state: &mut State) -> Command<Msg> {
    let config = state.store.get();
    let sink = state.sink.clone();
    state.status = Some(StatusMessage::info("Publishing..."));

    Command::perform(
        move || sink.publish(&config).map_err(|err| format!("{:#}", err)),
        Msg::Published,
    )
}

pub fn handle_published(state: &mut State, result: Result<String, String>) -> Command<Msg> {
    match result {
        Ok(location) => state.set_status(StatusMessage::info(format!("Published to {}", location))),
        Err(err) => state.set_status(StatusMessage::error(format!("Publish failed: {}", err))),
    }
    Command::None
}

pub fn handle_toggle_player_code(state: &mut State) -> Command<Msg> {
    state.player_defaults.toggle_code();
    if state.player_defaults.code_visible() {
        state.sync_player_defaults();
        Command::set_focus(FocusId::new("player-json"))
    } else {
        Command::set_focus(FocusId::new("rows"))
    }
}

/// Keys typed into the player-defaults JSON. Valid text patches
/// `portalSettings`; invalid text is kept and flagged.
pub fn handle_player_json_event(state: &mut State, event: TextAreaEvent) -> Command<Msg> {
    let TextAreaEvent::Changed(key) = event;
    if state.player_json.handle_key(key) {
        let text = state.player_json.text();
        if state.player_defaults.edit_json(&mut state.store, text) {
            log::debug!("Player defaults applied from JSON");
        }
    }
    Command::None
}

pub fn handle_copy_player_defaults(state: &mut State) -> Command<Msg> {
    let text = state.player_defaults.mirror().text().to_string();
    Command::perform(
        move || sinks::copy_to_clipboard(&text).map_err(|err| format!("{:#}", err)),
        Msg::Copied,
    )
}

pub fn handle_copied(state: &mut State, result: Result<(), String>) -> Command<Msg> {
    match result {
        Ok(()) => state.set_status(StatusMessage::info("Player defaults copied to clipboard")),
        Err(err) => state.set_status(StatusMessage::error(err)),
    }
    Command::None
}

pub fn handle_open_advanced(state: &mut State) -> Command<Msg> {
    let url = state.studio.links.advanced_configuration_url.clone();
    Command::perform(
        move || sinks::open_external(&url).map(|_| url).map_err(|err| format!("{:#}", err)),
        Msg::Opened,
    )
}

pub fn handle_opened(state: &mut State, result: Result<String, String>) -> Command<Msg> {
    match result {
        Ok(target) => state.set_status(StatusMessage::info(format!("Opened {}", target))),
        Err(err) => state.set_status(StatusMessage::error(err)),
    }
    Command::None
}
