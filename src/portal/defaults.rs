//! The starter document a new draft begins from.

use std::sync::Arc;

use super::model::{BlockKind, ContentBlock, MenuEntry, MenuKind, PortalConfig};
use super::settings::*;

fn typography(size: &str, weight: &str) -> TypographySettings {
    TypographySettings {
        font_family: "Inter".to_string(),
        font_size: size.to_string(),
        font_weight: weight.to_string(),
        color: "#1e293b".to_string(),
        line_height: "1.5".to_string(),
    }
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            visible: true,
            background_color: "#ffffff".to_string(),
            text_color: "#1e293b".to_string(),
            justification: Justification::Center,
            show_logo: true,
            logo_url: String::new(),
            show_search: true,
            limit_search_to_portal: true,
            padding: Padding::Normal,
            is_sticky: false,
        }
    }
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            visible: true,
            background_color: "#f8fafc".to_string(),
            text_color: "#64748b".to_string(),
            justification: Justification::Center,
            padding: Padding::Normal,
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            visible: true,
            background_color: "#0f172a".to_string(),
            text_color: "#f8fafc".to_string(),
            hover_color: "#6366f1".to_string(),
            justification: Justification::Center,
            padding: Padding::Normal,
        }
    }
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            title: "New Viewer Portal".to_string(),
            alias: "main-portal".to_string(),
            is_public: true,
            restrict_internal: false,
            allow_creation: false,
            enable_comments: true,
            enable_likes: true,
            enable_favorites: true,
            show_view_counts: true,
            player_auto_play: false,
            player_loop: false,
            player_muted: false,
            player_show_captions: true,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            background_color: "#f1f5f9".to_string(),
            content_background_color: "#ffffff".to_string(),
            content_max_width: Breakpoint::Xl,
            element_gap: 32.0,
            h1: typography("2.5rem", "700"),
            h2: typography("2rem", "700"),
            h3: typography("1.75rem", "600"),
            h4: typography("1.5rem", "600"),
            h5: typography("1.25rem", "600"),
            h6: typography("1rem", "600"),
            paragraph: typography("1rem", "400"),
            link: LinkTypography {
                base: TypographySettings {
                    color: "#4f46e5".to_string(),
                    ..typography("1rem", "500")
                },
                hover_color: "#4338ca".to_string(),
                underline: true,
            },
            divider: DividerStyle {
                weight: 1.0,
                color: "#e2e8f0".to_string(),
            },
            button: ButtonStyle {
                font_family: "Inter".to_string(),
                font_size: "1rem".to_string(),
                color: "#ffffff".to_string(),
                background_color: "#4f46e5".to_string(),
                border_radius: 8.0,
                hover_background_color: "#4338ca".to_string(),
            },
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        starter_config()
    }
}

/// Starter draft: a welcome header, two menu entries, a featured video
/// slot with intro text, a player-page description and a copyright footer.
pub fn starter_config() -> PortalConfig {
    PortalConfig {
        header: Arc::new(vec![ContentBlock::new(
            "1",
            BlockKind::Html,
            "Welcome Header",
            "<h1>Portal Welcome</h1>",
        )]),
        header_settings: Arc::new(HeaderSettings::default()),
        footer_settings: Arc::new(FooterSettings::default()),
        menu_settings: Arc::new(MenuSettings::default()),
        portal_settings: Arc::new(PortalSettings::default()),
        page_settings: Arc::new(PageSettings::default()),
        menu: Arc::new(vec![
            MenuEntry {
                id: "m1".to_string(),
                label: "Home".to_string(),
                url: "/".to_string(),
                kind: MenuKind::Home,
                visible: true,
                search_query: None,
                video_config: None,
            },
            MenuEntry {
                id: "m2".to_string(),
                label: "Videos".to_string(),
                url: "/videos".to_string(),
                kind: MenuKind::Custom,
                visible: true,
                search_query: None,
                video_config: None,
            },
        ]),
        main: Arc::new(vec![
            ContentBlock::new("2", BlockKind::EmbeddedVideo, "Featured Content", ""),
            ContentBlock::new(
                "3",
                BlockKind::Markdown,
                "Intro Text",
                "### Welcome to the Qumu Video Portal\nSelect a video from the carousel above to start watching.",
            ),
        ]),
        player_page: Arc::new(vec![ContentBlock::new(
            "p1",
            BlockKind::Markdown,
            "Video Description Placeholder",
            "## About this Presentation\nAdd detailed information about the video here. This content appears below the player.",
        )]),
        footer: Arc::new(vec![ContentBlock::new(
            "4",
            BlockKind::Html,
            "Copyright",
            "<p>&copy; 2024 Qumu Inc.</p>",
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_passes_validation() {
        let config = starter_config();
        assert!(crate::portal::validate(&config).is_ok());
        assert_eq!(config.main.len(), 2);
        assert_eq!(config.menu[0].kind, MenuKind::Home);
    }

    #[test]
    fn test_starter_config_json_round_trip() {
        let config = starter_config();
        let text = serde_json::to_string_pretty(&config).unwrap();
        let parsed: PortalConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
