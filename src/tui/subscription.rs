use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key code plus the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Binding for a key event. Shift is dropped for characters, which
    /// already carry their case.
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        Self { code: event.code, modifiers }
    }

    /// Short label for the help line, e.g. `^P` or `Enter`
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("^{}", key.to_uppercase())
        } else {
            key
        }
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// A key binding the app listens for while its state asks for it
pub struct Subscription<Msg> {
    pub key: KeyBinding,
    pub msg: Msg,
    /// Shown in the hint line
    pub description: String,
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(key: impl Into<KeyBinding>, description: impl Into<String>, msg: Msg) -> Self {
        Self {
            key: key.into(),
            msg,
            description: description.into(),
        }
    }

    pub fn ctrl_key(code: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Self::keyboard(KeyBinding::ctrl(code), description, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_char_matches_plain_binding() {
        let event = KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT);
        assert_eq!(KeyBinding::from_event(&event), KeyBinding::new(KeyCode::Char('K')));

        let ctrl = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(KeyBinding::from_event(&ctrl), KeyBinding::ctrl(KeyCode::Char('p')));
    }

    #[test]
    fn test_labels() {
        assert_eq!(KeyBinding::ctrl(KeyCode::Char('p')).label(), "^P");
        assert_eq!(KeyBinding::new(KeyCode::Enter).label(), "Enter");
    }
}
