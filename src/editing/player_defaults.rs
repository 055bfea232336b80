//! Player Interaction Settings: four player flags of `portalSettings` and
//! their raw-JSON view.

use serde::{Deserialize, Serialize};

use super::json_mirror::JsonMirror;
use crate::portal::PortalSettings;
use crate::store::{ConfigStore, SettingsPatch};

/// File name shown above the JSON view
pub const PLAYER_DEFAULTS_FILE: &str = "portal_player_defaults.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerDefaults {
    pub auto_play: bool,
    #[serde(rename = "loop")]
    pub loop_playback: bool,
    pub muted: bool,
    pub show_captions: bool,
}

impl PlayerDefaults {
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self {
            auto_play: settings.player_auto_play,
            loop_playback: settings.player_loop,
            muted: settings.player_muted,
            show_captions: settings.player_show_captions,
        }
    }

    /// `settings` with these four flags merged in
    pub fn merged_into(&self, settings: &PortalSettings) -> PortalSettings {
        PortalSettings {
            player_auto_play: self.auto_play,
            player_loop: self.loop_playback,
            player_muted: self.muted,
            player_show_captions: self.show_captions,
            ..settings.clone()
        }
    }
}

/// The flag toggles plus the JSON view, kept in sync both ways
#[derive(Debug, Clone)]
pub struct PlayerDefaultsPanel {
    mirror: JsonMirror<PlayerDefaults>,
    code_visible: bool,
}

impl PlayerDefaultsPanel {
    pub fn new(settings: &PortalSettings) -> Self {
        Self {
            mirror: JsonMirror::from_value(&PlayerDefaults::from_settings(settings)),
            code_visible: false,
        }
    }

    pub fn mirror(&self) -> &JsonMirror<PlayerDefaults> {
        &self.mirror
    }

    pub fn code_visible(&self) -> bool {
        self.code_visible
    }

    pub fn toggle_code(&mut self) {
        self.code_visible = !self.code_visible;
    }

    /// Regenerate the JSON after `portalSettings` changed elsewhere
    pub fn sync(&mut self, settings: &PortalSettings) {
        self.mirror.sync_from(&PlayerDefaults::from_settings(settings));
    }

    /// Apply JSON text. Invalid text is retained and nothing is patched.
    pub fn edit_json(&mut self, store: &mut ConfigStore, text: impl Into<String>) -> bool {
        let Some(defaults) = self.mirror.edit(text) else {
            return false;
        };

        let merged = defaults.merged_into(&store.current().portal_settings);
        store.patch_settings(SettingsPatch::Portal(merged));
        self.sync(&store.current().portal_settings);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_json_keys() {
        let defaults = PlayerDefaults::from_settings(&PortalSettings::default());
        let value = serde_json::to_value(defaults).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "autoPlay": false, "loop": false, "muted": false, "showCaptions": true })
        );
    }

    #[test]
    fn test_valid_json_patches_portal_settings() {
        let mut store = ConfigStore::default();
        let mut panel = PlayerDefaultsPanel::new(&store.current().portal_settings);

        let applied = panel.edit_json(
            &mut store,
            r#"{"autoPlay": true, "loop": true, "muted": true, "showCaptions": false}"#,
        );
        assert!(applied);

        let portal = &store.current().portal_settings;
        assert!(portal.player_auto_play && portal.player_loop && portal.player_muted);
        assert!(!portal.player_show_captions);
        assert_eq!(portal.title, "New Viewer Portal");
        assert!(panel.mirror().text().contains("\"autoPlay\": true"));
    }

    #[test]
    fn test_invalid_json_leaves_settings_unchanged() {
        let mut store = ConfigStore::default();
        let before = store.get();
        let mut panel = PlayerDefaultsPanel::new(&store.current().portal_settings);

        assert!(!panel.edit_json(&mut store, r#"{"autoPlay": true"#));
        assert!(!panel.mirror().is_valid());
        assert_eq!(panel.mirror().text(), r#"{"autoPlay": true"#);
        assert!(Arc::ptr_eq(&before.portal_settings, &store.current().portal_settings));

        assert!(!panel.edit_json(&mut store, r#"{"autoPlay": true}"#));
        assert!(!panel.mirror().is_valid());
    }
}
