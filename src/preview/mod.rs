//! Preview rendering.
//!
//! [`render`] is a pure function of the document, the device and the page:
//! the same inputs always produce byte-identical output.

pub mod markup;
pub mod stylesheet;

pub use stylesheet::{CssRule, StyleSheet};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::portal::{BlockSection, PortalConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    pub const ALL: [Device; 3] = [Device::Desktop, Device::Tablet, Device::Mobile];

    /// Device viewport cap, `None` for desktop
    pub fn max_width_px(&self) -> Option<u32> {
        match self {
            Device::Desktop => None,
            Device::Tablet => Some(768),
            Device::Mobile => Some(375),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Tablet => "tablet",
            Device::Mobile => "mobile",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Device::Desktop => Device::Tablet,
            Device::Tablet => Device::Mobile,
            Device::Mobile => Device::Desktop,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            "mobile" => Ok(Device::Mobile),
            other => Err(format!("unknown device '{}' (desktop, tablet, mobile)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PreviewPage {
    #[default]
    Home,
    Player,
}

impl PreviewPage {
    pub fn key(&self) -> &'static str {
        match self {
            PreviewPage::Home => "home",
            PreviewPage::Player => "player",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreviewPage::Home => "Portal Home",
            PreviewPage::Player => "Player Page",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            PreviewPage::Home => PreviewPage::Player,
            PreviewPage::Player => PreviewPage::Home,
        }
    }
}

impl fmt::Display for PreviewPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PreviewPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(PreviewPage::Home),
            "player" => Ok(PreviewPage::Player),
            other => Err(format!("unknown page '{}' (home, player)", other)),
        }
    }
}

/// Structural regions of a rendered page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Nav,
    Main,
    PlayerSurface,
    PlayerMetadata,
    PlayerContent,
    Comments,
    Footer,
}

/// One line of the region outline: what is on the page and in what order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOutline {
    pub region: Region,
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub device: Device,
    pub page: PreviewPage,
    /// Effective content width in pixels, `None` when unconstrained
    pub content_width: Option<u32>,
    pub stylesheet: StyleSheet,
    /// Markup of `#preview-root`
    pub body: String,
    pub outline: Vec<RegionOutline>,
}

impl RenderedPage {
    pub fn has_region(&self, region: Region) -> bool {
        self.outline.iter().any(|outline| outline.region == region)
    }

    /// Standalone HTML document for opening in a browser
    pub fn document(&self, title: &str, page_background: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n<style>\nbody {{ margin: 0; padding: 2rem; background-color: {}; font-family: system-ui, sans-serif; }}\n\
             .video-widget, .player {{ display: flex; flex-direction: column; align-items: center; justify-content: center; color: #fff; background: #0f172a; aspect-ratio: 16 / 9; border-radius: 1rem; }}\n\
             {}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            markup::escape_html(title),
            stylesheet::css_value(page_background),
            self.stylesheet.to_css(),
            self.body
        )
    }
}

/// Content width after applying the breakpoint and the device cap
pub fn content_width(config: &PortalConfig, device: Device) -> Option<u32> {
    match (config.page_settings.content_max_width.max_width_px(), device.max_width_px()) {
        (Some(breakpoint), Some(cap)) => Some(breakpoint.min(cap)),
        (breakpoint, cap) => breakpoint.or(cap),
    }
}

fn block_titles(config: &PortalConfig, section: BlockSection) -> Vec<String> {
    config
        .blocks(section)
        .iter()
        .map(|block| format!("[{}] {}", block.kind.label(), block.title))
        .collect()
}

pub fn render(config: &PortalConfig, device: Device, page: PreviewPage) -> RenderedPage {
    let stylesheet = StyleSheet::derive(&config.page_settings, &config.menu_settings);
    let width = content_width(config, device);
    let mut outline = Vec::new();
    let mut body = String::new();

    let max_width = match width {
        Some(px) => format!("{}px", px),
        None => "100%".to_string(),
    };
    body.push_str(&format!(
        "<div id=\"preview-root\" data-device=\"{}\" data-page=\"{}\" style=\"max-width: {}; margin: 0 auto; width: 100%; background-color: {};\">",
        device,
        page,
        max_width,
        markup::escape_html(&config.page_settings.content_background_color)
    ));

    if config.header_settings.visible {
        body.push_str(&markup::header(&config.header_settings, &config.header));
        outline.push(RegionOutline {
            region: Region::Header,
            label: (if config.header_settings.is_sticky { "Header (sticky)" } else { "Header" }).to_string(),
            items: block_titles(config, BlockSection::Header),
        });
    }

    if config.menu_settings.visible {
        body.push_str(&markup::nav(&config.menu_settings, &config.menu));
        outline.push(RegionOutline {
            region: Region::Nav,
            label: "Navigation".to_string(),
            items: config
                .visible_menu()
                .map(|entry| format!("{} -> {}", entry.label, entry.resolved_url()))
                .collect(),
        });
    }

    body.push_str("<main class=\"content-section\" style=\"padding: 2rem;\">");
    match page {
        PreviewPage::Home => {
            body.push_str(&markup::blocks(&config.main));
            body.push_str(markup::portal_button());
            let mut items = block_titles(config, BlockSection::Main);
            items.push("Standard Portal Button".to_string());
            outline.push(RegionOutline {
                region: Region::Main,
                label: "Main Body".to_string(),
                items,
            });
        }
        PreviewPage::Player => {
            let portal = &config.portal_settings;
            body.push_str(markup::player_surface());
            outline.push(RegionOutline {
                region: Region::PlayerSurface,
                label: "Video Player".to_string(),
                items: Vec::new(),
            });

            body.push_str(&markup::player_metadata(portal));
            let mut meta = vec!["Sample Presentation Title".to_string(), "Uploaded: Dec 12, 2024".to_string()];
            if portal.show_view_counts {
                meta.push("1,245 Views".to_string());
            }
            if portal.enable_likes {
                meta.push("128 Likes".to_string());
            }
            outline.push(RegionOutline {
                region: Region::PlayerMetadata,
                label: "Presentation Details".to_string(),
                items: meta,
            });

            body.push_str(&markup::blocks(&config.player_page));
            outline.push(RegionOutline {
                region: Region::PlayerContent,
                label: "Player Page Content".to_string(),
                items: block_titles(config, BlockSection::PlayerPage),
            });

            if portal.enable_comments {
                body.push_str(&markup::comments());
                outline.push(RegionOutline {
                    region: Region::Comments,
                    label: format!("Comments ({})", markup::SAMPLE_COMMENTS.len()),
                    items: markup::SAMPLE_COMMENTS
                        .iter()
                        .map(|(author, _, _)| author.to_string())
                        .collect(),
                });
            }
        }
    }
    body.push_str("</main>");

    if config.footer_settings.visible {
        body.push_str(&markup::footer(&config.footer_settings, &config.footer));
        outline.push(RegionOutline {
            region: Region::Footer,
            label: "Footer".to_string(),
            items: block_titles(config, BlockSection::Footer),
        });
    }
    body.push_str("</div>");

    RenderedPage {
        device,
        page,
        content_width: width,
        stylesheet,
        body,
        outline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{Breakpoint, starter_config};
    use std::sync::Arc;

    #[test]
    fn test_content_width() {
        let mut config = starter_config();
        assert_eq!(content_width(&config, Device::Desktop), Some(1280));
        assert_eq!(content_width(&config, Device::Mobile), Some(375));

        let mut page = config.page_settings.as_ref().clone();
        page.content_max_width = Breakpoint::Full;
        config.page_settings = Arc::new(page);
        assert_eq!(content_width(&config, Device::Desktop), None);
        assert_eq!(content_width(&config, Device::Tablet), Some(768));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = starter_config();
        let a = render(&config, Device::Tablet, PreviewPage::Player);
        let b = render(&config, Device::Tablet, PreviewPage::Player);
        assert_eq!(a, b);
    }

    #[test]
    fn test_home_and_player_regions() {
        let config = starter_config();
        let home = render(&config, Device::Desktop, PreviewPage::Home);
        assert!(home.has_region(Region::Main));
        assert!(!home.has_region(Region::PlayerSurface));
        assert!(home.body.contains("Standard Portal Button"));

        let player = render(&config, Device::Desktop, PreviewPage::Player);
        assert!(player.has_region(Region::Comments));
        assert!(player.body.contains("About this Presentation"));
        assert!(!player.body.contains("Standard Portal Button"));
    }

    #[test]
    fn test_comments_gated_by_flag() {
        let mut config = starter_config();
        let mut portal = config.portal_settings.as_ref().clone();
        portal.enable_comments = false;
        config.portal_settings = Arc::new(portal);
        let page = render(&config, Device::Desktop, PreviewPage::Player);
        assert!(!page.has_region(Region::Comments));
        assert!(!page.body.contains("John Doe"));
    }

    #[test]
    fn test_device_parse() {
        assert_eq!("Mobile".parse::<Device>(), Ok(Device::Mobile));
        assert!("watch".parse::<Device>().is_err());
        assert_eq!("player".parse::<PreviewPage>(), Ok(PreviewPage::Player));
    }
}
