use crossterm::event::KeyCode;

/// Key delivered to a focused single-line input
#[derive(Clone, Debug)]
pub enum TextInputEvent {
    /// Editing or cursor key; apply it with `TextInputState::handle_key`
    Changed(KeyCode),
    /// Enter
    Submit,
}

/// Key delivered to a focused text area. Enter inserts a line break.
#[derive(Clone, Debug)]
pub enum TextAreaEvent {
    Changed(KeyCode),
}
