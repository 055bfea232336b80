pub mod blocks;
pub mod element_editor;
pub mod fields;
pub mod menu;
pub mod navigation;
pub mod preview;
pub mod sinks;
pub mod widget;

use super::Msg;
use super::app::State;
use super::models::{Modal, Section};
use crate::tui::command::Command;

pub fn update(state: &mut State, msg: Msg) -> Command<Msg> {
    let command = match msg {
        // Navigation
        Msg::SidebarNavigate(key) => navigation::handle_sidebar_navigate(state, key),
        Msg::SelectSection(index) => navigation::handle_select_section(state, index),
        Msg::RowsNavigate(key) => navigation::handle_rows_navigate(state, key),
        Msg::ActivateRow(index) => navigation::handle_activate_row(state, index),
        Msg::Cancel => navigation::handle_cancel(state),
        Msg::Quit => Command::Quit,

        // Selected-row actions
        Msg::CycleBack | Msg::CycleForward => {
            let forward = matches!(msg, Msg::CycleForward);
            if matches!(state.modal, Some(Modal::Widget(_))) {
                widget::handle_cycle(state, forward)
            } else {
                fields::handle_cycle(state, forward)
            }
        }
        Msg::AddItem => match state.section {
            Section::Menu => menu::open_templates(state),
            _ => blocks::handle_add(state),
        },
        Msg::DeleteRow => match state.section {
            Section::Menu => menu::handle_delete(state),
            _ => blocks::handle_delete(state),
        },
        Msg::MoveRowUp | Msg::MoveRowDown => {
            let up = matches!(msg, Msg::MoveRowUp);
            match state.section {
                Section::Menu => menu::handle_move(state, up),
                _ => blocks::handle_move(state, up),
            }
        }
        Msg::ConfigureWidget => match state.section {
            Section::Menu => menu::handle_configure(state),
            _ => blocks::handle_configure(state),
        },
        Msg::ToggleVisibility => menu::handle_toggle_visibility(state),

        // Field input
        Msg::FieldInputEvent(event) => fields::handle_input_event(state, event),

        // Menu
        Msg::TemplatesNavigate(key) => menu::handle_templates_navigate(state, key),
        Msg::TemplateChosen(index) => menu::handle_template_chosen(state, index),
        Msg::EntryLabelEvent(event) => menu::handle_label_event(state, event),
        Msg::EntryUrlEvent(event) => menu::handle_url_event(state, event),
        Msg::EntryQueryEvent(event) => menu::handle_query_event(state, event),

        // Player defaults
        Msg::TogglePlayerCode => sinks::handle_toggle_player_code(state),
        Msg::PlayerJsonEvent(event) => sinks::handle_player_json_event(state, event),
        Msg::CopyPlayerDefaults => sinks::handle_copy_player_defaults(state),
        Msg::OpenAdvancedConfiguration => sinks::handle_open_advanced(state),

        // Element editor
        Msg::KindsNavigate(key) => element_editor::handle_kinds_navigate(state, key),
        Msg::KindChosen(index) => element_editor::handle_kind_chosen(state, index),
        Msg::ElementTitleEvent(event) => element_editor::handle_title_event(state, event),
        Msg::ElementBodyEvent(event) => element_editor::handle_body_event(state, event),
        Msg::ToggleHtmlMode => element_editor::handle_toggle_html_mode(state),
        Msg::ElementBack => element_editor::handle_back(state),
        Msg::SaveElement => element_editor::handle_save(state),

        // Widget configuration
        Msg::WidgetOptionsNavigate(key) => widget::handle_options_navigate(state, key),
        Msg::WidgetOptionActivate(index) => widget::handle_option_activate(state, index),
        Msg::WidgetGuidEvent(event) => widget::handle_guid_event(state, event),
        Msg::WidgetAliasEvent(event) => widget::handle_alias_event(state, event),
        Msg::WidgetQueryEvent(event) => widget::handle_query_event(state, event),
        Msg::WidgetListEvent(event) => widget::handle_list_event(state, event),
        Msg::WidgetJsonEvent(event) => widget::handle_json_event(state, event),
        Msg::ToggleWidgetCode => widget::handle_toggle_code(state),
        Msg::SaveWidget => widget::handle_save(state),

        // Preview
        Msg::TogglePreview => preview::handle_toggle(state),
        Msg::CycleDevice => preview::handle_cycle_device(state),
        Msg::TogglePreviewPage => preview::handle_toggle_page(state),
        Msg::PreviewScroll(delta) => preview::handle_scroll(state, delta),
        Msg::OpenPreviewInBrowser => preview::handle_open_in_browser(state),

        // Sinks
        Msg::Publish => sinks::handle_publish(state),
        Msg::Published(result) => sinks::handle_published(state, result),
        Msg::Copied(result) => sinks::handle_copied(state, result),
        Msg::Opened(result) => sinks::handle_opened(state, result),
    };

    // Rows come and go with every structural edit
    let row_count = state.rows().len();
    state.rows.clamp(row_count);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::MenuTemplate;
    use crate::portal::{BlockKind, BlockSection, MenuKind, SourceType};
    use crate::tui::apps::portal_editor::app::PortalEditorParams;
    use crate::tui::apps::portal_editor::models::Row;
    use crate::tui::widgets::{TextAreaEvent, TextInputEvent};
    use crossterm::event::KeyCode;

    fn state() -> State {
        State::new(PortalEditorParams::default())
    }

    fn type_into(state: &mut State, text: &str, msg: fn(TextInputEvent) -> Msg) {
        for c in text.chars() {
            update(state, msg(TextInputEvent::Changed(KeyCode::Char(c))));
        }
    }

    fn open_section(state: &mut State, section: Section) {
        let index = Section::ALL.iter().position(|s| *s == section).unwrap();
        update(state, Msg::SelectSection(index));
        assert_eq!(state.section, section);
    }

    fn select_row(state: &mut State, wanted: impl Fn(&Row) -> bool) -> usize {
        let index = state.rows().iter().position(wanted).expect("row present");
        state.rows.select(Some(index));
        index
    }

    #[test]
    fn test_section_switch_selects_first_field() {
        let mut state = state();
        open_section(&mut state, Section::Header);
        assert!(matches!(state.selected_row(), Some(Row::Field(_))));
    }

    #[test]
    fn test_toggle_header_visibility_from_row() {
        let mut state = state();
        open_section(&mut state, Section::Header);
        let index = select_row(&mut state, |row| matches!(row, Row::Field(f) if f.path == "visible"));
        assert!(state.store.current().header_settings.visible);

        update(&mut state, Msg::ActivateRow(index));
        assert!(!state.store.current().header_settings.visible);
    }

    #[test]
    fn test_element_gap_steps_and_clamps() {
        let mut state = state();
        open_section(&mut state, Section::Settings);
        select_row(&mut state, |row| matches!(row, Row::Field(f) if f.path == "elementGap"));
        let before = state.store.current().page_settings.element_gap;

        update(&mut state, Msg::CycleForward);
        assert_eq!(state.store.current().page_settings.element_gap, before + 4.0);

        for _ in 0..100 {
            update(&mut state, Msg::CycleForward);
        }
        assert_eq!(state.store.current().page_settings.element_gap, 120.0);
    }

    #[test]
    fn test_color_field_writes_while_typing() {
        let mut state = state();
        open_section(&mut state, Section::Header);
        let index = select_row(&mut state, |row| matches!(row, Row::Field(f) if f.path == "backgroundColor"));
        update(&mut state, Msg::ActivateRow(index));
        assert!(matches!(state.modal, Some(Modal::FieldInput(_))));

        for _ in 0..10 {
            update(&mut state, Msg::FieldInputEvent(TextInputEvent::Changed(KeyCode::Backspace)));
        }
        type_into(&mut state, "#112233", Msg::FieldInputEvent);
        assert_eq!(state.store.current().header_settings.background_color, "#112233");

        update(&mut state, Msg::FieldInputEvent(TextInputEvent::Submit));
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_add_html_block_through_editor() {
        let mut state = state();
        open_section(&mut state, Section::Main);
        let before = state.store.current().main.len();

        update(&mut state, Msg::AddItem);
        let kind_index = BlockSection::Main
            .allowed_kinds()
            .iter()
            .position(|k| *k == BlockKind::Html)
            .unwrap();
        update(&mut state, Msg::KindChosen(kind_index));
        type_into(&mut state, "Intro", Msg::ElementTitleEvent);
        update(&mut state, Msg::ToggleHtmlMode);
        for c in "<p>hi</p>".chars() {
            update(&mut state, Msg::ElementBodyEvent(TextAreaEvent::Changed(KeyCode::Char(c))));
        }
        update(&mut state, Msg::SaveElement);

        assert!(state.modal.is_none());
        let main = &state.store.current().main;
        assert_eq!(main.len(), before + 1);
        let added = main.last().unwrap();
        assert_eq!(added.title, "Intro");
        assert_eq!(added.body, "<p>hi</p>");
    }

    #[test]
    fn test_empty_title_keeps_editor_open() {
        let mut state = state();
        open_section(&mut state, Section::Footer);
        update(&mut state, Msg::AddItem);
        update(&mut state, Msg::KindChosen(0));
        update(&mut state, Msg::SaveElement);

        match &state.modal {
            Some(Modal::Element(form)) => assert!(form.error.is_some()),
            _ => panic!("editor should stay open"),
        }
    }

    #[test]
    fn test_delete_and_move_blocks() {
        let mut state = state();
        open_section(&mut state, Section::Main);
        let ids: Vec<String> = state.store.current().main.iter().map(|b| b.id.clone()).collect();
        assert!(ids.len() >= 2);

        select_row(&mut state, |row| matches!(row, Row::Block { index: 0, .. }));
        update(&mut state, Msg::MoveRowDown);
        assert_eq!(state.store.current().main[1].id, ids[0]);
        assert!(matches!(state.selected_row(), Some(Row::Block { index: 1, .. })));

        update(&mut state, Msg::DeleteRow);
        assert!(state.store.current().main.iter().all(|b| b.id != ids[0]));
    }

    #[test]
    fn test_menu_add_edit_and_hide() {
        let mut state = state();
        open_section(&mut state, Section::Menu);
        let before = state.store.current().menu.len();

        update(&mut state, Msg::AddItem);
        let custom = MenuTemplate::ALL.iter().position(|t| *t == MenuTemplate::Custom).unwrap();
        update(&mut state, Msg::TemplateChosen(custom));
        assert_eq!(state.store.current().menu.len(), before + 1);

        let index = select_row(&mut state, |row| matches!(row, Row::MenuEntry { index, .. } if *index == before));
        update(&mut state, Msg::ActivateRow(index));
        type_into(&mut state, "docs", Msg::EntryUrlEvent);
        let added = state.store.current().menu[before].clone();
        assert_eq!(added.kind, MenuKind::Custom);
        assert_eq!(added.url, "https://docs");

        update(&mut state, Msg::Cancel);
        update(&mut state, Msg::ToggleVisibility);
        assert!(!state.store.current().menu[before].visible);
    }

    #[test]
    fn test_widget_save_keeps_unrelated_fields() {
        let mut state = state();
        open_section(&mut state, Section::Main);
        let video = state
            .store
            .current()
            .main
            .iter()
            .position(|b| b.kind == BlockKind::EmbeddedVideo)
            .expect("starter has a video block");
        select_row(&mut state, |row| matches!(row, Row::Block { index, .. } if *index == video));
        let prior = state.store.current().main[video].video_config.clone().unwrap_or_default();

        update(&mut state, Msg::ConfigureWidget);
        let Some(Modal::Widget(form)) = &mut state.modal else {
            panic!("widget view should open");
        };
        form.session.set_source_type(SourceType::Search);
        form.session.set_search_query("trending:all");
        form.session.set_display_type(crate::portal::DisplayType::Carousel);
        form.session.set_size(5);
        update(&mut state, Msg::SaveWidget);

        assert!(state.modal.is_none());
        let saved = state.store.current().main[video].video_config.clone().unwrap();
        assert_eq!(saved.search_query.as_deref(), Some("trending:all"));
        assert_eq!(saved.size, 5);
        assert_eq!(saved.single_guid, prior.single_guid);
        assert_eq!(saved.guid_list, prior.guid_list);
    }

    #[test]
    fn test_invalid_player_json_leaves_settings() {
        let mut state = state();
        let before = state.store.current().portal_settings.clone();
        update(&mut state, Msg::TogglePlayerCode);
        update(&mut state, Msg::PlayerJsonEvent(TextAreaEvent::Changed(KeyCode::Char('x'))));

        assert!(!state.player_defaults.mirror().is_valid());
        assert_eq!(*state.store.current().portal_settings, *before);
    }

    #[test]
    fn test_preview_toggles_and_publish_is_deferred() {
        let mut state = state();
        update(&mut state, Msg::TogglePreview);
        assert!(matches!(state.modal, Some(Modal::Preview)));
        update(&mut state, Msg::CycleDevice);
        assert_eq!(state.preview.device, crate::preview::Device::Tablet);
        update(&mut state, Msg::TogglePreview);
        assert!(state.modal.is_none());

        assert!(matches!(update(&mut state, Msg::Publish), Command::Perform(_)));
        update(&mut state, Msg::Published(Ok("out/portal.json".to_string())));
        assert!(!state.status.as_ref().unwrap().is_error);
    }
}
