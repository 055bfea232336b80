use crossterm::event::KeyEvent;

use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;

/// A widget that can take keyboard focus during the current frame
pub struct FocusableInfo<Msg> {
    pub id: FocusId,
    pub on_key: Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg>>,
}

/// Focusables registered by one layer of a stack, in render order
pub struct LayerFocusContext<Msg> {
    pub layer_index: usize,
    pub focusables: Vec<FocusableInfo<Msg>>,
}

/// Rebuilt on every frame. Only the topmost layer receives keys.
pub struct FocusRegistry<Msg> {
    layers: Vec<LayerFocusContext<Msg>>,
}

impl<Msg> Default for FocusRegistry<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> FocusRegistry<Msg> {
    pub fn new() -> Self {
        Self {
            layers: vec![LayerFocusContext {
                layer_index: 0,
                focusables: Vec::new(),
            }],
        }
    }

    pub fn clear(&mut self) {
        self.layers.truncate(1);
        if let Some(base) = self.layers.first_mut() {
            base.focusables.clear();
        }
    }

    pub fn push_layer(&mut self, layer_index: usize) {
        self.layers.push(LayerFocusContext {
            layer_index,
            focusables: Vec::new(),
        });
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn register_focusable(&mut self, info: FocusableInfo<Msg>) {
        let Some(layer) = self.layers.last_mut() else {
            return;
        };
        if let Some(existing) = layer.focusables.iter_mut().find(|f| f.id == info.id) {
            log::warn!("Duplicate FocusId {:?} in layer {}, last registration wins", info.id, layer.layer_index);
            *existing = info;
            return;
        }
        layer.focusables.push(info);
    }

    pub fn active_layer(&self) -> Option<&LayerFocusContext<Msg>> {
        self.layers.last()
    }

    pub fn find_in_active_layer(&self, id: &FocusId) -> Option<&FocusableInfo<Msg>> {
        self.active_layer()?.focusables.iter().find(|f| &f.id == id)
    }

    pub fn focusable_ids_in_active_layer(&self) -> Vec<FocusId> {
        self.active_layer()
            .map(|layer| layer.focusables.iter().map(|f| f.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Next focusable after `current`, wrapping. With no current focus, the first one.
    pub fn next_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        let ids = self.focusable_ids_in_active_layer();
        if ids.is_empty() {
            return None;
        }
        let next = match current.and_then(|id| ids.iter().position(|f| f == id)) {
            Some(index) => (index + 1) % ids.len(),
            None => 0,
        };
        ids.get(next).cloned()
    }

    pub fn prev_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        let ids = self.focusable_ids_in_active_layer();
        if ids.is_empty() {
            return None;
        }
        let prev = match current.and_then(|id| ids.iter().position(|f| f == id)) {
            Some(0) | None => ids.len() - 1,
            Some(index) => index - 1,
        };
        ids.get(prev).cloned()
    }
}
