use crossterm::event::KeyCode;

/// Cursor of a single-line input. The text itself lives in app state.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// In chars, not bytes
    cursor_pos: usize,
    scroll_offset: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the cursor after the last character of `text`
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor_pos: text.chars().count(),
            scroll_offset: 0,
        }
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Apply `key` to `current_value`. `None` when only the cursor moved.
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str) -> Option<String> {
        let mut chars: Vec<char> = current_value.chars().collect();
        self.cursor_pos = self.cursor_pos.min(chars.len());

        match key {
            KeyCode::Char(c) => {
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace if self.cursor_pos > 0 => {
                chars.remove(self.cursor_pos - 1);
                self.cursor_pos -= 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Delete if self.cursor_pos < chars.len() => {
                chars.remove(self.cursor_pos);
                Some(chars.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(chars.len());
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = chars.len();
                None
            }
            _ => None,
        }
    }

    /// Keep the cursor inside a window of `visible_width` characters
    pub fn update_scroll(&mut self, visible_width: usize, text: &str) {
        if visible_width == 0 {
            return;
        }
        if self.cursor_pos < self.scroll_offset {
            self.scroll_offset = self.cursor_pos;
        } else if self.cursor_pos >= self.scroll_offset + visible_width {
            self.scroll_offset = self.cursor_pos + 1 - visible_width;
        }
        let max_offset = (text.chars().count() + 1).saturating_sub(visible_width);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut state = TextInputState::at_end("Hom");
        assert_eq!(state.handle_key(KeyCode::Char('e'), "Hom").as_deref(), Some("Home"));
        state.handle_key(KeyCode::Home, "Home");
        assert_eq!(state.handle_key(KeyCode::Backspace, "Home"), None);
        assert_eq!(state.handle_key(KeyCode::Delete, "Home").as_deref(), Some("ome"));
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut state = TextInputState::at_end("café");
        assert_eq!(state.cursor_pos(), 4);
        assert_eq!(state.handle_key(KeyCode::Backspace, "café").as_deref(), Some("caf"));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let text = "0123456789";
        let mut state = TextInputState::at_end(text);
        state.update_scroll(4, text);
        assert_eq!(state.scroll_offset(), 7);
        state.handle_key(KeyCode::Home, text);
        state.update_scroll(4, text);
        assert_eq!(state.scroll_offset(), 0);
    }
}
