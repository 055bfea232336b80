use crossterm::event::KeyCode;

/// Line buffer with a (row, column) cursor, columns counted in chars
#[derive(Debug, Clone)]
pub struct TextAreaState {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll_offset: usize,
}

impl Default for TextAreaState {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl TextAreaState {
    pub fn from_text(text: &str) -> Self {
        let mut state = Self {
            lines: Vec::new(),
            row: 0,
            col: 0,
            scroll_offset: 0,
        };
        state.set_text(text);
        state
    }

    /// Replace the buffer, keeping the cursor as close as possible to where it was
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = self.row.min(self.lines.len() - 1);
        self.col = self.col.min(self.line_len(self.row));
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
    }

    /// Apply a key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                let line = &mut self.lines[self.row];
                let at = Self::byte_index(line, self.col);
                line.insert(at, c);
                self.col += 1;
                true
            }
            KeyCode::Enter => {
                let line = &mut self.lines[self.row];
                let at = Self::byte_index(line, self.col);
                let rest = line.split_off(at);
                self.row += 1;
                self.col = 0;
                self.lines.insert(self.row, rest);
                true
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    let line = &mut self.lines[self.row];
                    let at = Self::byte_index(line, self.col - 1);
                    line.remove(at);
                    self.col -= 1;
                    true
                } else if self.row > 0 {
                    let current = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                    self.lines[self.row].push_str(&current);
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.col < self.line_len(self.row) {
                    let line = &mut self.lines[self.row];
                    let at = Self::byte_index(line, self.col);
                    line.remove(at);
                    true
                } else if self.row + 1 < self.lines.len() {
                    let next = self.lines.remove(self.row + 1);
                    self.lines[self.row].push_str(&next);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                }
                false
            }
            KeyCode::Right => {
                if self.col < self.line_len(self.row) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                false
            }
            KeyCode::Up => {
                self.row = self.row.saturating_sub(1);
                self.col = self.col.min(self.line_len(self.row));
                false
            }
            KeyCode::Down => {
                self.row = (self.row + 1).min(self.lines.len() - 1);
                self.col = self.col.min(self.line_len(self.row));
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = self.line_len(self.row);
                false
            }
            _ => false,
        }
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.row < self.scroll_offset {
            self.scroll_offset = self.row;
        } else if self.row >= self.scroll_offset + visible_height {
            self.scroll_offset = self.row + 1 - visible_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(state: &mut TextAreaState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_splits_and_backspace_joins() {
        let mut state = TextAreaState::from_text("Hello");
        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Right);
        assert!(state.handle_key(KeyCode::Enter));
        assert_eq!(state.text(), "He\nllo");
        assert_eq!(state.cursor(), (1, 0));
        assert!(state.handle_key(KeyCode::Backspace));
        assert_eq!(state.text(), "Hello");
        assert_eq!(state.cursor(), (0, 2));
    }

    #[test]
    fn test_typing_and_delete_at_line_end() {
        let mut state = TextAreaState::from_text("a\nb");
        state.handle_key(KeyCode::End);
        type_str(&mut state, "é!");
        assert_eq!(state.text(), "aé!\nb");
        assert!(state.handle_key(KeyCode::Delete));
        assert_eq!(state.text(), "aé!b");
        assert!(!state.handle_key(KeyCode::Delete));
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut state = TextAreaState::from_text("long line\nab");
        state.handle_key(KeyCode::End);
        state.handle_key(KeyCode::Down);
        assert_eq!(state.cursor(), (1, 2));
        assert!(!state.handle_key(KeyCode::Up));
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut state = TextAreaState::from_text("one\ntwo\nthree");
        for _ in 0..2 {
            state.handle_key(KeyCode::Down);
        }
        state.handle_key(KeyCode::End);
        state.set_text("x");
        assert_eq!(state.cursor(), (0, 1));
    }

    #[test]
    fn test_scroll_follows_cursor_row() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut state = TextAreaState::from_text(&text);
        for _ in 0..8 {
            state.handle_key(KeyCode::Down);
        }
        state.update_scroll(3);
        assert_eq!(state.scroll_offset(), 6);
    }
}
