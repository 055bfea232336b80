use crate::tui::{Alignment, Command, Element, Layer, Subscription, Theme};
use ratatui::text::Line;

/// Base view plus the modals stacked over it, topmost last
pub struct LayeredView<Msg> {
    pub base: Element<Msg>,
    pub modals: Vec<(Element<Msg>, Alignment)>,
}

impl<Msg> LayeredView<Msg> {
    pub fn new(base: Element<Msg>) -> Self {
        Self {
            base,
            modals: Vec::new(),
        }
    }

    pub fn with_app_modal(mut self, modal: Element<Msg>, alignment: Alignment) -> Self {
        self.modals.push((modal, alignment));
        self
    }

    /// Flatten into one stack element, dimming below each modal
    pub fn into_element(self) -> Element<Msg> {
        if self.modals.is_empty() {
            return self.base;
        }
        let mut layers = vec![Layer::new(self.base)];
        for (modal, alignment) in self.modals {
            layers.push(Layer::new(modal).align(alignment).dim(true));
        }
        Element::stack(layers)
    }
}

/// A full-screen app driven by [`Runtime`](crate::tui::Runtime).
///
/// All state lives in `State` and only changes inside `update`. `view` and
/// `subscriptions` are recomputed from it after every message.
pub trait App: Sized + 'static {
    type State;

    type Msg: Clone + 'static;

    /// Parameters the app is started with
    type InitParams;

    fn init(params: Self::InitParams) -> (Self::State, Command<Self::Msg>);

    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// `&mut` so list states can clamp to the current item counts
    fn view(state: &mut Self::State, theme: &Theme) -> LayeredView<Self::Msg>;

    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    fn title() -> &'static str;

    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
