use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::models::{Modal, PreviewState, Row, Section, StatusMessage, section_rows};
use super::{Msg, update, view};
use crate::config::StudioConfig;
use crate::editing::fields::Accordion;
use crate::editing::player_defaults::PlayerDefaultsPanel;
use crate::editing::Step;
use crate::portal::{BlockKind, PortalConfig, starter_config};
use crate::sinks::FileSink;
use crate::store::ConfigStore;
use crate::tui::{App, Command, FocusId, LayeredView, ListState, Subscription, TextAreaState, Theme};

pub struct PortalEditorApp;

pub struct PortalEditorParams {
    pub config: PortalConfig,
    /// File the document was loaded from, shown in the status line
    pub source: Option<PathBuf>,
    pub studio: StudioConfig,
}

impl Default for PortalEditorParams {
    fn default() -> Self {
        Self {
            config: starter_config(),
            source: None,
            studio: StudioConfig::default(),
        }
    }
}

pub struct State {
    pub store: ConfigStore,
    pub source: Option<PathBuf>,
    pub studio: StudioConfig,
    pub sink: FileSink,

    // Navigation
    pub section: Section,
    pub sidebar: ListState,
    pub rows: ListState,
    pub accordion: Accordion,

    // Player defaults JSON view
    pub player_defaults: PlayerDefaultsPanel,
    pub player_json: TextAreaState,

    pub modal: Option<Modal>,
    pub preview: PreviewState,
    pub status: Option<StatusMessage>,
}

impl State {
    pub fn new(params: PortalEditorParams) -> Self {
        let mut status = None;
        let store = match ConfigStore::new(params.config) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Rejected initial document: {}", err);
                status = Some(StatusMessage::error(format!(
                    "Document rejected ({}), editing the starter portal instead",
                    err
                )));
                ConfigStore::default()
            }
        };

        let player_defaults = PlayerDefaultsPanel::new(&store.current().portal_settings);
        let player_json = TextAreaState::from_text(player_defaults.mirror().text());

        Self {
            sink: FileSink::new(params.studio.publish.directory.clone()),
            preview: PreviewState {
                device: params.studio.editor.default_device,
                page: params.studio.editor.default_page,
                scroll: 0,
            },
            store,
            source: params.source,
            studio: params.studio,
            section: Section::Portal,
            sidebar: ListState::with_selection(),
            rows: ListState::with_selection(),
            accordion: Accordion::open(0),
            player_defaults,
            player_json,
            modal: None,
            status,
        }
    }

    /// Rows of the active section
    pub fn rows(&self) -> Vec<Row> {
        section_rows(self.section, self.store.current(), &self.accordion)
    }

    pub fn selected_row(&self) -> Option<Row> {
        let index = self.rows.selected()?;
        self.rows().into_iter().nth(index)
    }

    /// Regenerate the player-defaults JSON from `portalSettings`
    pub fn sync_player_defaults(&mut self) {
        self.player_defaults.sync(&self.store.current().portal_settings);
        self.player_json.set_text(self.player_defaults.mirror().text());
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        if status.is_error {
            log::warn!("{}", status.text);
        }
        self.status = Some(status);
    }
}

impl App for PortalEditorApp {
    type State = State;
    type Msg = Msg;
    type InitParams = PortalEditorParams;

    fn init(params: PortalEditorParams) -> (State, Command<Msg>) {
        log::info!(
            "Opening portal editor on {}",
            params
                .source
                .as_ref()
                .map_or_else(|| "the starter portal".to_string(), |p| p.display().to_string())
        );
        (State::new(params), Command::set_focus(FocusId::new("sidebar")))
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        update::update(state, msg)
    }

    fn view(state: &mut State, theme: &Theme) -> LayeredView<Msg> {
        view::render_view(state, theme)
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            Subscription::ctrl_key(KeyCode::Char('q'), "Quit", Msg::Quit),
            Subscription::ctrl_key(KeyCode::Char('p'), "Publish", Msg::Publish),
        ];

        match &state.modal {
            None => {
                subs.push(Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit));
                subs.push(Subscription::keyboard(KeyCode::Char('p'), "Preview", Msg::TogglePreview));
                subs.push(Subscription::keyboard(KeyCode::Left, "Prev", Msg::CycleBack));
                subs.push(Subscription::keyboard(KeyCode::Right, "Next", Msg::CycleForward));
                subs.push(Subscription::keyboard(KeyCode::Char('-'), "Less", Msg::CycleBack));
                subs.push(Subscription::keyboard(KeyCode::Char('+'), "More", Msg::CycleForward));

                if state.section.block_section().is_some() || state.section == Section::Menu {
                    subs.push(Subscription::keyboard(KeyCode::Char('a'), "Add", Msg::AddItem));
                    subs.push(Subscription::keyboard(KeyCode::Char('d'), "Delete", Msg::DeleteRow));
                    subs.push(Subscription::keyboard(KeyCode::Char('K'), "Up", Msg::MoveRowUp));
                    subs.push(Subscription::keyboard(KeyCode::Char('J'), "Down", Msg::MoveRowDown));
                    subs.push(Subscription::keyboard(KeyCode::Char('c'), "Configure", Msg::ConfigureWidget));
                }
                if state.section == Section::Menu {
                    subs.push(Subscription::keyboard(KeyCode::Char('v'), "Visibility", Msg::ToggleVisibility));
                }
                if state.section == Section::Portal {
                    subs.push(Subscription::keyboard(KeyCode::Char('y'), "Copy JSON", Msg::CopyPlayerDefaults));
                }
                subs.push(Subscription::keyboard(KeyCode::Esc, "Clear", Msg::Cancel));
            }
            Some(Modal::FieldInput(_)) | Some(Modal::MenuEntry(_)) | Some(Modal::Templates(_)) => {
                subs.push(Subscription::keyboard(KeyCode::Esc, "Close", Msg::Cancel));
            }
            Some(Modal::Element(form)) => {
                subs.push(Subscription::ctrl_key(KeyCode::Char('s'), "Save", Msg::SaveElement));
                if form.editor.kind() == Some(BlockKind::Html) {
                    subs.push(Subscription::ctrl_key(KeyCode::Char('t'), "Visual/Code", Msg::ToggleHtmlMode));
                }
                if form.editor.is_new() && form.editor.step() == Step::FieldEntry {
                    subs.push(Subscription::ctrl_key(KeyCode::Char('b'), "Back", Msg::ElementBack));
                }
                subs.push(Subscription::keyboard(KeyCode::Esc, "Cancel", Msg::Cancel));
            }
            Some(Modal::Widget(_)) => {
                subs.push(Subscription::ctrl_key(KeyCode::Char('s'), "Save", Msg::SaveWidget));
                subs.push(Subscription::ctrl_key(KeyCode::Char('e'), "JSON", Msg::ToggleWidgetCode));
                subs.push(Subscription::keyboard(KeyCode::Left, "Prev", Msg::CycleBack));
                subs.push(Subscription::keyboard(KeyCode::Right, "Next", Msg::CycleForward));
                subs.push(Subscription::keyboard(KeyCode::Char('-'), "Less", Msg::CycleBack));
                subs.push(Subscription::keyboard(KeyCode::Char('+'), "More", Msg::CycleForward));
                subs.push(Subscription::keyboard(KeyCode::Esc, "Cancel", Msg::Cancel));
            }
            Some(Modal::Preview) => {
                subs.push(Subscription::keyboard(KeyCode::Char('d'), "Device", Msg::CycleDevice));
                subs.push(Subscription::keyboard(KeyCode::Char('g'), "Page", Msg::TogglePreviewPage));
                subs.push(Subscription::keyboard(KeyCode::Char('o'), "Open in browser", Msg::OpenPreviewInBrowser));
                subs.push(Subscription::keyboard(KeyCode::Up, "Scroll", Msg::PreviewScroll(-1)));
                subs.push(Subscription::keyboard(KeyCode::Down, "Scroll", Msg::PreviewScroll(1)));
                subs.push(Subscription::keyboard(KeyCode::Char('p'), "Close", Msg::TogglePreview));
                subs.push(Subscription::keyboard(KeyCode::Esc, "Close", Msg::TogglePreview));
            }
        }

        subs
    }

    fn title() -> &'static str {
        "Viewer Portal Builder"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        if let Some(status) = &state.status {
            let style = if status.is_error {
                theme.error()
            } else {
                Style::default().fg(theme.accent_success)
            };
            return Some(Line::from(Span::styled(format!(" {}", status.text), style)));
        }

        let portal = &state.store.current().portal_settings;
        let mut spans = vec![
            Span::styled(format!(" {}", portal.title), Style::default().fg(theme.text_primary)),
            Span::styled(format!("  /{}", portal.alias), theme.hint()),
        ];
        if let Some(source) = &state.source {
            spans.push(Span::styled(format!("  {}", source.display()), theme.hint()));
        }
        spans.push(Span::styled(format!("  rev {}", state.store.revision()), theme.hint()));
        Some(Line::from(spans))
    }
}
