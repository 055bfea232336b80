//! Ordered-list operations shared by every section.
//!
//! The functions here are pure over slices; [`Slot`] ties a sequence to the
//! store patch that replaces it, so section-generic editing is one generic
//! function per operation instead of one per section.

use crate::portal::{BlockSection, ContentBlock, Identified, MenuEntry, PortalConfig};
use crate::store::{ConfigStore, PatchError, SectionPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Swap the item at `index` with its neighbour in `direction`.
///
/// Returns `None` at the sequence boundaries and for out-of-range indexes.
pub fn moved<T: Clone>(items: &[T], index: usize, direction: Direction) -> Option<Vec<T>> {
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index + 1,
    };
    if index >= items.len() || target >= items.len() {
        return None;
    }

    let mut next = items.to_vec();
    next.swap(index, target);
    Some(next)
}

/// Copy of `items` without the item carrying `id`, `None` if absent
pub fn without<T: Identified + Clone>(items: &[T], id: &str) -> Option<Vec<T>> {
    let position = items.iter().position(|item| item.id() == id)?;
    let mut next = items.to_vec();
    next.remove(position);
    Some(next)
}

/// Replace the item with the same id in place, or append it
pub fn upserted<T: Identified + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|existing| existing.id() == item.id()) {
        Some(position) => next[position] = item,
        None => next.push(item),
    }
    next
}

pub fn index_of<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// A sequence inside the document that can be replaced as a whole
pub trait Slot: Copy {
    type Item: Identified + Clone;

    fn items(self, config: &PortalConfig) -> &[Self::Item];

    fn patch(self, items: Vec<Self::Item>) -> SectionPatch;
}

impl Slot for BlockSection {
    type Item = ContentBlock;

    fn items(self, config: &PortalConfig) -> &[ContentBlock] {
        config.blocks(self)
    }

    fn patch(self, items: Vec<ContentBlock>) -> SectionPatch {
        SectionPatch::blocks(self, items)
    }
}

/// The navigation menu sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSlot;

impl Slot for MenuSlot {
    type Item = MenuEntry;

    fn items(self, config: &PortalConfig) -> &[MenuEntry] {
        &config.menu
    }

    fn patch(self, items: Vec<MenuEntry>) -> SectionPatch {
        SectionPatch::Menu(items)
    }
}

/// Delete by id. Returns `false` when nothing carried the id.
pub fn delete<S: Slot>(store: &mut ConfigStore, slot: S, id: &str) -> Result<bool, PatchError> {
    match without(slot.items(store.current()), id) {
        Some(next) => store.patch_section(slot.patch(next)).map(|_| true),
        None => Ok(false),
    }
}

/// Move by index. Returns `false` for a boundary no-op.
pub fn move_item<S: Slot>(store: &mut ConfigStore, slot: S, index: usize, direction: Direction) -> Result<bool, PatchError> {
    match moved(slot.items(store.current()), index, direction) {
        Some(next) => store.patch_section(slot.patch(next)).map(|_| true),
        None => Ok(false),
    }
}

/// Insert if the id is new, else replace by id
pub fn upsert<S: Slot>(store: &mut ConfigStore, slot: S, item: S::Item) -> Result<(), PatchError> {
    let next = upserted(slot.items(store.current()), item);
    store.patch_section(slot.patch(next))
}

/// Apply `edit` to the item carrying `id`. Returns `false` when absent.
pub fn update<S, F>(store: &mut ConfigStore, slot: S, id: &str, edit: F) -> Result<bool, PatchError>
where
    S: Slot,
    F: FnOnce(&mut S::Item),
{
    let items = slot.items(store.current());
    let Some(position) = index_of(items, id) else {
        return Ok(false);
    };

    let mut next = items.to_vec();
    edit(&mut next[position]);
    store.patch_section(slot.patch(next)).map(|_| true)
}
