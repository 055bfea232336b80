use crate::tui::element::FocusId;

/// What a focused widget's key handler decided
pub enum DispatchTarget<Msg> {
    /// Deliver to update()
    AppMsg(Msg),

    /// Not handled here; try the app's key subscriptions
    PassThrough,
}

/// Effect requested by `update`, carried out by the runtime after it returns
pub enum Command<Msg> {
    None,

    /// Call the closure and feed the message it builds back into update()
    Perform(Box<dyn FnOnce() -> Msg>),

    SetFocus(FocusId),

    Quit,
}

impl<Msg: 'static> Command<Msg> {
    pub fn perform<T: 'static>(effect: impl FnOnce() -> T + 'static, to_msg: impl FnOnce(T) -> Msg + 'static) -> Self {
        Command::Perform(Box::new(move || to_msg(effect())))
    }

    pub fn set_focus(id: FocusId) -> Self {
        Command::SetFocus(id)
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}
