use crate::preview;
use crate::sinks;
use crate::tui::apps::portal_editor::Msg;
use crate::tui::apps::portal_editor::app::State;
use crate::tui::apps::portal_editor::models::Modal;
use crate::tui::Command;

pub fn handle_toggle(state: &mut State) -> Command<Msg> {
    if matches!(state.modal, Some(Modal::Preview)) {
        state.modal = None;
    } else if state.modal.is_none() {
        state.preview.scroll = 0;
        state.modal = Some(Modal::Preview);
    }
    Command::None
}

pub fn handle_cycle_device(state: &mut State) -> Command<Msg> {
    state.preview.device = state.preview.device.next();
    Command::None
}

pub fn handle_toggle_page(state: &mut State) -> Command<Msg> {
    state.preview.page = state.preview.page.toggled();
    state.preview.scroll = 0;
    Command::None
}

pub fn handle_scroll(state: &mut State, delta: i16) -> Command<Msg> {
    state.preview.scroll = state.preview.scroll.saturating_add_signed(delta);
    Command::None
}

/// Render the page as a standalone document and hand it to the browser
pub fn handle_open_in_browser(state: &mut State) -> Command<Msg> {
    let config = state.store.current();
    let rendered = preview::render(config, state.preview.device, state.preview.page);
    let html = rendered.document(&config.portal_settings.title, &config.page_settings.background_color);

    Command::perform(
        move || {
            sinks::open_html(&html)
                .map(|path| path.display().to_string())
                .map_err(|err| format!("{:#}", err))
        },
        Msg::Opened,
    )
}
