use std::collections::HashMap;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::command::DispatchTarget;
use crate::tui::renderer::FocusRegistry;
use crate::tui::{App, Command, FocusId, KeyBinding, Renderer, Subscription, Theme};

/// Drives one app: routes keys, runs commands, renders frames.
pub struct Runtime<A: App> {
    state: A::State,
    focus_registry: FocusRegistry<A::Msg>,
    focused_id: Option<FocusId>,
    key_subscriptions: HashMap<KeyBinding, A::Msg>,
    key_hints: Vec<(KeyBinding, String)>,
    /// Esc cleared focus; don't auto-focus until the layer stack changes
    explicitly_unfocused: bool,
    /// Focus of each covered layer, restored when the modal above it closes
    layer_focus: Vec<Option<FocusId>>,
    /// Focus as it stood after the last render
    settled_focus: Option<FocusId>,
    previous_layer_count: usize,
    focus_adjusted: bool,
}

impl<A: App> Runtime<A> {
    pub fn with_params(params: A::InitParams) -> Result<Self> {
        let (state, command) = A::init(params);
        let mut runtime = Self {
            state,
            focus_registry: FocusRegistry::new(),
            focused_id: None,
            key_subscriptions: HashMap::new(),
            key_hints: Vec::new(),
            explicitly_unfocused: false,
            layer_focus: Vec::new(),
            settled_focus: None,
            previous_layer_count: 1,
            focus_adjusted: false,
        };
        runtime.update_subscriptions();
        runtime.execute_command(command)?;
        Ok(runtime)
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn focused_id(&self) -> Option<&FocusId> {
        self.focused_id.as_ref()
    }

    /// Bindings and their descriptions, for the help line
    pub fn key_hints(&self) -> &[(KeyBinding, String)] {
        &self.key_hints
    }

    /// True once after a render had to move focus, so the caller can redraw
    pub fn take_focus_adjusted(&mut self) -> bool {
        std::mem::take(&mut self.focus_adjusted)
    }

    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        self.key_hints.clear();
        for subscription in A::subscriptions(&self.state) {
            let Subscription { key, msg, description } = subscription;
            log::trace!("binding {:?} -> {}", key, description);
            self.key_hints.push((key, description));
            self.key_subscriptions.insert(key, msg);
        }
    }

    /// Handle a keyboard event. Returns false when the app asked to quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        if let Some(focused_id) = self.focused_id.clone()
            && let Some(focusable) = self.focus_registry.find_in_active_layer(&focused_id)
        {
            match (focusable.on_key)(key_event) {
                DispatchTarget::AppMsg(msg) => return self.dispatch(msg),
                DispatchTarget::PassThrough if key_event.code == KeyCode::Esc => {
                    self.focused_id = None;
                    self.explicitly_unfocused = true;
                    return Ok(true);
                }
                DispatchTarget::PassThrough => {}
            }
        }

        let binding = KeyBinding::from_event(&key_event);
        if let Some(msg) = self.key_subscriptions.get(&binding).cloned() {
            log::debug!("global binding {} matched", binding.label());
            return self.dispatch(msg);
        }

        match key_event.code {
            KeyCode::Tab => self.focus_next()?,
            KeyCode::BackTab => self.focus_previous()?,
            _ => log::trace!("no handler for {:?}", binding),
        }
        Ok(true)
    }

    /// Feed a message straight into update(), as a key handler would
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<bool> {
        let command = A::update(&mut self.state, msg);
        let keep_running = self.execute_command(command)?;
        self.update_subscriptions();
        Ok(keep_running)
    }

    pub fn focus_next(&mut self) -> Result<()> {
        if let Some(next) = self.focus_registry.next_focus(self.focused_id.as_ref()) {
            self.execute_command(Command::set_focus(next))?;
        }
        Ok(())
    }

    pub fn focus_previous(&mut self) -> Result<()> {
        if let Some(prev) = self.focus_registry.prev_focus(self.focused_id.as_ref()) {
            self.execute_command(Command::set_focus(prev))?;
        }
        Ok(())
    }

    fn execute_command(&mut self, command: Command<A::Msg>) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::Perform(effect) => {
                let msg = effect();
                let command = A::update(&mut self.state, msg);
                self.execute_command(command)
            }

            Command::SetFocus(id) => {
                log::trace!("focus -> {:?}", id);
                self.focused_id = Some(id);
                self.explicitly_unfocused = false;
                Ok(true)
            }

            Command::Quit => Ok(false),
        }
    }

    /// Draw the title bar, the app's view, the status line and key hints
    pub fn render(&mut self, frame: &mut Frame, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_title(frame, theme, chunks[0]);

        let view = A::view(&mut self.state, theme).into_element();
        Renderer::render(
            frame,
            theme,
            &mut self.focus_registry,
            self.focused_id.as_ref(),
            &view,
            chunks[1],
        );
        self.settle_focus();

        let status = A::status(&self.state, theme).unwrap_or_default();
        frame.render_widget(Paragraph::new(status).style(Style::default().bg(theme.bg_surface)), chunks[2]);
        self.render_hints(frame, theme, chunks[3]);
    }

    fn render_title(&self, frame: &mut Frame, theme: &Theme, area: Rect) {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", A::title()), theme.heading()),
            Span::styled(" Draft ", Style::default().fg(theme.bg_base).bg(theme.accent_warning)),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg_base)), area);
    }

    fn render_hints(&self, frame: &mut Frame, theme: &Theme, area: Rect) {
        let mut spans = Vec::new();
        for (binding, description) in &self.key_hints {
            spans.push(Span::styled(format!(" {}", binding.label()), theme.key()));
            spans.push(Span::styled(format!(" {} ", description), theme.hint()));
        }
        spans.push(Span::styled(" Tab", theme.key()));
        spans.push(Span::styled(" focus ", theme.hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Reconcile focus with what the last frame actually registered
    fn settle_focus(&mut self) {
        let before = self.focused_id.clone();
        let layers = self.focus_registry.layer_count();

        if layers > self.previous_layer_count {
            for _ in self.previous_layer_count..layers {
                self.layer_focus.push(self.settled_focus.clone());
            }
            self.explicitly_unfocused = false;
        } else if layers < self.previous_layer_count {
            let mut restored = None;
            for _ in layers..self.previous_layer_count {
                restored = self.layer_focus.pop().flatten();
            }
            if self
                .focused_id
                .as_ref()
                .is_none_or(|id| self.focus_registry.find_in_active_layer(id).is_none())
            {
                self.focused_id = restored;
            }
            self.explicitly_unfocused = false;
        }
        self.previous_layer_count = layers;

        if let Some(id) = &self.focused_id
            && self.focus_registry.find_in_active_layer(id).is_none()
        {
            log::debug!("focus {:?} no longer rendered", id);
            self.focused_id = None;
        }
        if self.focused_id.is_none() && !self.explicitly_unfocused {
            self.focused_id = self.focus_registry.next_focus(None);
        }

        self.focus_adjusted = before != self.focused_id;
        self.settled_focus = self.focused_id.clone();
    }
}

/// Run an app full-screen until it quits
pub fn run<A: App>(params: A::InitParams, theme: Theme) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = Runtime::<A>::with_params(params).and_then(|mut runtime| event_loop(&mut terminal, &mut runtime, &theme));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<A: App, B: Backend>(terminal: &mut Terminal<B>, runtime: &mut Runtime<A>, theme: &Theme) -> Result<()> {
    loop {
        terminal.draw(|frame| runtime.render(frame, theme))?;
        if runtime.take_focus_adjusted() {
            terminal.draw(|frame| runtime.render(frame, theme))?;
        }

        if let Event::Key(key) = event::read()?
            && !runtime.handle_key(key)?
        {
            log::info!("{} exiting", A::title());
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::TextInputEvent;
    use crate::tui::{Alignment, Element, LayeredView, LayoutConstraint, TextInputState};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    struct Probe;

    #[derive(Default)]
    struct ProbeState {
        name: String,
        input: TextInputState,
        dialog_open: bool,
        dialog_text: String,
        saves: usize,
    }

    #[derive(Clone, Debug)]
    enum Msg {
        Name(TextInputEvent),
        Dialog(TextInputEvent),
        OpenDialog,
        CloseDialog,
        Save,
        Saved(usize),
        Quit,
    }

    impl App for Probe {
        type State = ProbeState;
        type Msg = Msg;
        type InitParams = ();

        fn init(_: ()) -> (ProbeState, Command<Msg>) {
            (ProbeState::default(), Command::None)
        }

        fn update(state: &mut ProbeState, msg: Msg) -> Command<Msg> {
            match msg {
                Msg::Name(TextInputEvent::Changed(key)) => {
                    if let Some(value) = state.input.handle_key(key, &state.name) {
                        state.name = value;
                    }
                }
                Msg::Name(TextInputEvent::Submit) => {}
                Msg::Dialog(TextInputEvent::Changed(KeyCode::Char(c))) => state.dialog_text.push(c),
                Msg::Dialog(_) => {}
                Msg::OpenDialog => {
                    state.dialog_open = true;
                    return Command::set_focus(FocusId::new("dialog"));
                }
                Msg::CloseDialog => state.dialog_open = false,
                Msg::Save => return Command::perform(|| 1, Msg::Saved),
                Msg::Saved(n) => state.saves += n,
                Msg::Quit => return Command::Quit,
            }
            Command::None
        }

        fn view(state: &mut ProbeState, _theme: &Theme) -> LayeredView<Msg> {
            let base = crate::col![
                Element::text_input("name", &state.name, &state.input).on_event(Msg::Name).build() => LayoutConstraint::Length(1),
                Element::text_input("other", "", &TextInputState::new()).on_event(Msg::Name).build() => LayoutConstraint::Length(1),
            ];
            let mut view = LayeredView::new(base);
            if state.dialog_open {
                let dialog = Element::panel(
                    Element::text_input("dialog", &state.dialog_text, &TextInputState::new())
                        .on_event(Msg::Dialog)
                        .build(),
                )
                .width(20)
                .height(3)
                .build();
                view = view.with_app_modal(dialog, Alignment::Center);
            }
            view
        }

        fn subscriptions(state: &ProbeState) -> Vec<Subscription<Msg>> {
            let mut subs = vec![
                Subscription::ctrl_key(KeyCode::Char('s'), "save", Msg::Save),
                Subscription::ctrl_key(KeyCode::Char('q'), "quit", Msg::Quit),
            ];
            if state.dialog_open {
                subs.push(Subscription::keyboard(KeyCode::Esc, "close", Msg::CloseDialog));
            } else {
                subs.push(Subscription::keyboard(KeyCode::Char('o'), "open", Msg::OpenDialog));
            }
            subs
        }

        fn title() -> &'static str {
            "Probe"
        }
    }

    fn draw(terminal: &mut Terminal<TestBackend>, runtime: &mut Runtime<Probe>) {
        let theme = Theme::default();
        terminal.draw(|frame| runtime.render(frame, &theme)).expect("draw");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (Terminal<TestBackend>, Runtime<Probe>) {
        let terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        let runtime = Runtime::<Probe>::with_params(()).expect("runtime");
        (terminal, runtime)
    }

    #[test]
    fn test_first_render_focuses_first_widget_and_typing_reaches_it() {
        let (mut terminal, mut runtime) = setup();
        draw(&mut terminal, &mut runtime);
        assert_eq!(runtime.focused_id(), Some(&FocusId::new("name")));

        runtime.handle_key(key(KeyCode::Char('o'))).expect("key");
        assert_eq!(runtime.state().name, "o");
        assert!(!runtime.state().dialog_open);
    }

    #[test]
    fn test_tab_cycles_and_esc_unfocuses() {
        let (mut terminal, mut runtime) = setup();
        draw(&mut terminal, &mut runtime);
        runtime.handle_key(key(KeyCode::Tab)).expect("tab");
        assert_eq!(runtime.focused_id(), Some(&FocusId::new("other")));

        runtime.handle_key(key(KeyCode::Esc)).expect("esc");
        draw(&mut terminal, &mut runtime);
        assert_eq!(runtime.focused_id(), None);

        runtime.handle_key(key(KeyCode::Char('o'))).expect("open");
        assert!(runtime.state().dialog_open);
    }

    #[test]
    fn test_modal_takes_focus_and_returns_it() {
        let (mut terminal, mut runtime) = setup();
        draw(&mut terminal, &mut runtime);
        runtime.handle_key(key(KeyCode::Esc)).expect("esc");
        runtime.handle_key(key(KeyCode::Char('o'))).expect("open");
        draw(&mut terminal, &mut runtime);
        assert_eq!(runtime.focused_id(), Some(&FocusId::new("dialog")));

        runtime.handle_key(key(KeyCode::Char('x'))).expect("type");
        assert_eq!(runtime.state().dialog_text, "x");

        runtime.handle_key(key(KeyCode::Esc)).expect("unfocus");
        runtime.handle_key(key(KeyCode::Esc)).expect("close");
        assert!(!runtime.state().dialog_open);
        draw(&mut terminal, &mut runtime);
        assert_eq!(runtime.focused_id(), Some(&FocusId::new("name")));
    }

    #[test]
    fn test_ctrl_bindings_and_perform() {
        let (mut terminal, mut runtime) = setup();
        draw(&mut terminal, &mut runtime);
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(runtime.handle_key(save).expect("save"));
        assert_eq!(runtime.state().saves, 1);
        assert!(runtime.state().name.is_empty());

        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!runtime.handle_key(quit).expect("quit"));
    }
}
