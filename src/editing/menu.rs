//! Navigation menu editing.

use super::EditorError;
use super::sequence::{self, Direction, MenuSlot};
use super::widget_config::WidgetSource;
use crate::portal::{self, MenuEntry, MenuKind};
use crate::store::ConfigStore;

/// The four add-entry templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTemplate {
    Home,
    Custom,
    SmartSearch,
    Favorites,
}

impl MenuTemplate {
    pub const ALL: [MenuTemplate; 4] = [
        MenuTemplate::Home,
        MenuTemplate::Custom,
        MenuTemplate::SmartSearch,
        MenuTemplate::Favorites,
    ];

    pub fn kind(&self) -> MenuKind {
        match self {
            MenuTemplate::Home => MenuKind::Home,
            MenuTemplate::Custom => MenuKind::Custom,
            MenuTemplate::SmartSearch => MenuKind::SmartSearch,
            MenuTemplate::Favorites => MenuKind::Favorites,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// A visible entry seeded with the kind's defaults
    pub fn entry(&self, id: String) -> MenuEntry {
        let (label, url, search_query) = match self {
            MenuTemplate::Home => ("Home", "/", None),
            MenuTemplate::Custom => ("New Custom Link", "https://", None),
            MenuTemplate::SmartSearch => ("Search Results", "/search", Some("recent:all".to_string())),
            MenuTemplate::Favorites => ("My Favorites", "/favorites", None),
        };

        MenuEntry {
            id,
            label: label.to_string(),
            url: url.to_string(),
            kind: self.kind(),
            visible: true,
            search_query,
            video_config: None,
        }
    }
}

/// Inline edits a menu row supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEdit {
    Label(String),
    /// `CUSTOM` entries only
    Url(String),
    /// `SMART_SEARCH` entries only
    SearchQuery(String),
}

impl MenuEdit {
    fn field(&self) -> &'static str {
        match self {
            MenuEdit::Label(_) => "label",
            MenuEdit::Url(_) => "url",
            MenuEdit::SearchQuery(_) => "searchQuery",
        }
    }

    fn applies_to(&self, kind: MenuKind) -> bool {
        match self {
            MenuEdit::Label(_) => true,
            MenuEdit::Url(_) => kind == MenuKind::Custom,
            MenuEdit::SearchQuery(_) => kind == MenuKind::SmartSearch,
        }
    }
}

/// Append a templated entry, returning its id
pub fn add_entry(store: &mut ConfigStore, template: MenuTemplate) -> Result<String, EditorError> {
    let id = portal::new_id_in(&store.current().menu);
    sequence::upsert(store, MenuSlot, template.entry(id.clone()))?;
    log::debug!("Added {:?} menu entry '{}'", template, id);
    Ok(id)
}

pub fn edit_entry(store: &mut ConfigStore, id: &str, edit: MenuEdit) -> Result<(), EditorError> {
    let entry = store
        .current()
        .find_menu_entry(id)
        .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
    if !edit.applies_to(entry.kind) {
        return Err(EditorError::FieldNotEditable {
            field: edit.field(),
            kind: entry.kind,
        });
    }

    sequence::update(store, MenuSlot, id, |entry| match edit {
        MenuEdit::Label(label) => entry.label = label,
        MenuEdit::Url(url) => entry.url = url,
        MenuEdit::SearchQuery(query) => entry.search_query = Some(query),
    })?;
    Ok(())
}

/// Flip visibility without removing the entry. Returns the new state.
pub fn toggle_visibility(store: &mut ConfigStore, id: &str) -> Result<bool, EditorError> {
    let mut visible = false;
    let found = sequence::update(store, MenuSlot, id, |entry| {
        entry.visible = !entry.visible;
        visible = entry.visible;
    })?;

    if found {
        Ok(visible)
    } else {
        Err(EditorError::NotFound(id.to_string()))
    }
}

pub fn delete_entry(store: &mut ConfigStore, id: &str) -> Result<(), EditorError> {
    if sequence::delete(store, MenuSlot, id)? {
        Ok(())
    } else {
        Err(EditorError::NotFound(id.to_string()))
    }
}

pub fn move_entry(store: &mut ConfigStore, index: usize, direction: Direction) -> Result<bool, EditorError> {
    Ok(sequence::move_item(store, MenuSlot, index, direction)?)
}

/// Widget configuration target for `SMART_SEARCH` and `FAVORITES` entries
pub fn configure_widget(entry: &MenuEntry) -> Option<WidgetSource> {
    entry.kind.has_widget().then(|| WidgetSource::MenuEntry { id: entry.id.clone() })
}
