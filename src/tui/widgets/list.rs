use crossterm::event::KeyCode;

use crate::tui::{Element, Theme};

/// Row type for `Element::list`
pub trait ListItem {
    type Msg: Clone;

    fn to_element(&self, theme: &Theme, is_selected: bool) -> Element<Self::Msg>;
}

/// Selection and scroll position of one list, kept in app state
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
    scroll_offset: usize,
    /// Rows kept visible past the selection when scrolling
    margin: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            margin: 2,
        }
    }

    pub fn with_selection() -> Self {
        Self {
            selected: Some(0),
            ..Self::new()
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Keep the selection inside a list that may have shrunk or emptied
    pub fn clamp(&mut self, item_count: usize) {
        self.selected = match (self.selected, item_count) {
            (_, 0) => None,
            (Some(sel), n) => Some(sel.min(n - 1)),
            (None, _) => Some(0),
        };
        self.scroll_offset = self.scroll_offset.min(item_count.saturating_sub(1));
    }

    /// Move the selection. False for keys that are not navigation.
    pub fn handle_key(&mut self, key: KeyCode, item_count: usize, visible_height: usize) -> bool {
        if item_count == 0 {
            return false;
        }
        let last = item_count - 1;
        let current = self.selected.unwrap_or(0);

        let next = match key {
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(last),
            KeyCode::PageUp => current.saturating_sub(visible_height.max(1)),
            KeyCode::PageDown => (current + visible_height.max(1)).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return false,
        };
        self.selected = Some(next);
        self.update_scroll(visible_height, item_count);
        true
    }

    /// Scroll just enough that the selection and its margin are on screen
    pub fn update_scroll(&mut self, visible_height: usize, item_count: usize) {
        let Some(sel) = self.selected else {
            return;
        };
        if visible_height == 0 {
            return;
        }
        let margin = self.margin.min(visible_height.saturating_sub(1) / 2);
        let min_scroll = (sel + margin + 1).saturating_sub(visible_height);
        let max_scroll = sel.saturating_sub(margin);

        self.scroll_offset = self.scroll_offset.clamp(min_scroll, max_scroll.max(min_scroll));
        self.scroll_offset = self.scroll_offset.min(item_count.saturating_sub(visible_height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut state = ListState::with_selection();
        assert!(state.handle_key(KeyCode::Up, 3, 10));
        assert_eq!(state.selected(), Some(0));
        state.handle_key(KeyCode::End, 3, 10);
        state.handle_key(KeyCode::Down, 3, 10);
        assert_eq!(state.selected(), Some(2));
        assert!(!state.handle_key(KeyCode::Char('x'), 3, 10));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut state = ListState::with_selection();
        for _ in 0..15 {
            state.handle_key(KeyCode::Down, 20, 5);
        }
        assert_eq!(state.selected(), Some(15));
        let offset = state.scroll_offset();
        assert!(offset <= 15 && 15 < offset + 5);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = ListState::new();
        state.select(Some(4));
        state.clamp(2);
        assert_eq!(state.selected(), Some(1));
        state.clamp(0);
        assert_eq!(state.selected(), None);
    }
}
