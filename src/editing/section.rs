//! Element list editing for the four block sections.

use super::element_editor::ElementEditor;
use super::sequence::{self, Direction};
use super::widget_config::WidgetSource;
use super::EditorError;
use crate::portal::{BlockSection, ContentBlock};
use crate::store::ConfigStore;

/// Ordered block list of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockList {
    section: BlockSection,
}

impl BlockList {
    pub fn new(section: BlockSection) -> Self {
        Self { section }
    }

    pub fn section(&self) -> BlockSection {
        self.section
    }

    pub fn blocks<'a>(&self, store: &'a ConfigStore) -> &'a [ContentBlock] {
        store.current().blocks(self.section)
    }

    /// Open the element editor for a new block
    pub fn add(&self) -> ElementEditor {
        ElementEditor::create(self.section)
    }

    /// Open the element editor pre-filled with the block carrying `id`
    pub fn edit(&self, store: &ConfigStore, id: &str) -> Result<ElementEditor, EditorError> {
        self.blocks(store)
            .iter()
            .find(|block| block.id == id)
            .map(|block| ElementEditor::edit(self.section, block))
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }

    /// Remove immediately, no confirmation
    pub fn delete(&self, store: &mut ConfigStore, id: &str) -> Result<(), EditorError> {
        if sequence::delete(store, self.section, id)? {
            Ok(())
        } else {
            Err(EditorError::NotFound(id.to_string()))
        }
    }

    /// Returns `false` when the move is a boundary no-op
    pub fn move_up(&self, store: &mut ConfigStore, index: usize) -> Result<bool, EditorError> {
        Ok(sequence::move_item(store, self.section, index, Direction::Up)?)
    }

    pub fn move_down(&self, store: &mut ConfigStore, index: usize) -> Result<bool, EditorError> {
        Ok(sequence::move_item(store, self.section, index, Direction::Down)?)
    }

    /// Widget configuration target for an embedded-video block
    pub fn configure_video(&self, store: &ConfigStore, id: &str) -> Option<WidgetSource> {
        self.blocks(store)
            .iter()
            .find(|block| block.id == id && block.is_video())
            .map(|block| WidgetSource::Block {
                section: self.section,
                id: block.id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_main() {
        let mut store = ConfigStore::default();
        let list = BlockList::new(BlockSection::Main);

        assert!(list.move_down(&mut store, 0).unwrap());
        let ids: Vec<_> = list.blocks(&store).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);

        assert!(!list.move_down(&mut store, 1).unwrap());
        assert!(!list.move_up(&mut store, 0).unwrap());
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = ConfigStore::default();
        let list = BlockList::new(BlockSection::Footer);
        assert_eq!(list.delete(&mut store, "nope"), Err(EditorError::NotFound("nope".to_string())));
        list.delete(&mut store, "4").unwrap();
        assert!(list.blocks(&store).is_empty());
    }

    #[test]
    fn test_configure_video_only_for_video_blocks() {
        let store = ConfigStore::default();
        let list = BlockList::new(BlockSection::Main);
        assert_eq!(
            list.configure_video(&store, "2"),
            Some(WidgetSource::Block {
                section: BlockSection::Main,
                id: "2".to_string()
            })
        );
        assert_eq!(list.configure_video(&store, "3"), None);
    }
}
