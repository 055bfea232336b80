//! Chrome and style settings records.
//!
//! These are flat-to-shallow records of booleans, enumerated choices and
//! style strings. Colours are free text: a swatch is only a view of the string.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    Left,
    #[default]
    Center,
    Right,
}

impl Justification {
    pub const ALL: [Justification; 3] = [Justification::Left, Justification::Center, Justification::Right];

    pub fn key(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }

    /// CSS flexbox value for the alignment
    pub fn flex_value(&self) -> &'static str {
        match self {
            Justification::Left => "flex-start",
            Justification::Center => "center",
            Justification::Right => "flex-end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Padding {
    pub const ALL: [Padding; 3] = [Padding::Compact, Padding::Normal, Padding::Spacious];

    pub fn key(&self) -> &'static str {
        match self {
            Padding::Compact => "compact",
            Padding::Normal => "normal",
            Padding::Spacious => "spacious",
        }
    }
}

/// Named maximum content widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[default]
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
    #[serde(rename = "full")]
    Full,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
        Breakpoint::Full,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
            Breakpoint::Full => "full",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "Small",
            Breakpoint::Md => "Medium",
            Breakpoint::Lg => "Large",
            Breakpoint::Xl => "X-Large",
            Breakpoint::Xxl => "2K",
            Breakpoint::Full => "Full",
        }
    }

    pub fn tip(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "640px - Best for compact portfolios.",
            Breakpoint::Md => "768px - Standard tablet-friendly width.",
            Breakpoint::Lg => "1024px - Traditional desktop layout.",
            Breakpoint::Xl => "1280px - Modern widescreen standard.",
            Breakpoint::Xxl => "1536px - Ultra-widescreen layout.",
            Breakpoint::Full => "100% - Stretches to fill the viewport.",
        }
    }

    /// Pixel maximum, `None` for the full-width option
    pub fn max_width_px(&self) -> Option<u32> {
        match self {
            Breakpoint::Sm => Some(640),
            Breakpoint::Md => Some(768),
            Breakpoint::Lg => Some(1024),
            Breakpoint::Xl => Some(1280),
            Breakpoint::Xxl => Some(1536),
            Breakpoint::Full => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSettings {
    pub visible: bool,
    pub background_color: String,
    pub text_color: String,
    pub justification: Justification,
    pub show_logo: bool,
    #[serde(default)]
    pub logo_url: String,
    pub show_search: bool,
    pub limit_search_to_portal: bool,
    pub padding: Padding,
    pub is_sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSettings {
    pub visible: bool,
    pub background_color: String,
    pub text_color: String,
    pub justification: Justification,
    pub padding: Padding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSettings {
    pub visible: bool,
    pub background_color: String,
    pub text_color: String,
    pub hover_color: String,
    pub justification: Justification,
    pub padding: Padding,
}

/// Portal identity, access and feature flags, and player defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSettings {
    pub title: String,
    pub alias: String,
    pub is_public: bool,
    pub restrict_internal: bool,
    pub allow_creation: bool,
    pub enable_comments: bool,
    pub enable_likes: bool,
    pub enable_favorites: bool,
    pub show_view_counts: bool,
    pub player_auto_play: bool,
    pub player_loop: bool,
    pub player_muted: bool,
    pub player_show_captions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySettings {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub color: String,
    pub line_height: String,
}

/// Link typography: the base record plus hover colour and underline flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypography {
    #[serde(flatten)]
    pub base: TypographySettings,
    pub hover_color: String,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerStyle {
    pub weight: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub font_family: String,
    pub font_size: String,
    pub color: String,
    pub background_color: String,
    pub border_radius: f64,
    pub hover_background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    pub background_color: String,
    pub content_background_color: String,
    pub content_max_width: Breakpoint,
    pub element_gap: f64,
    pub h1: TypographySettings,
    pub h2: TypographySettings,
    pub h3: TypographySettings,
    pub h4: TypographySettings,
    pub h5: TypographySettings,
    pub h6: TypographySettings,
    pub paragraph: TypographySettings,
    pub link: LinkTypography,
    pub divider: DividerStyle,
    pub button: ButtonStyle,
}

impl PageSettings {
    /// Heading typography for levels 1 through 6
    pub fn heading(&self, level: u8) -> Option<&TypographySettings> {
        match level {
            1 => Some(&self.h1),
            2 => Some(&self.h2),
            3 => Some(&self.h3),
            4 => Some(&self.h4),
            5 => Some(&self.h5),
            6 => Some(&self.h6),
            _ => None,
        }
    }
}

/// Font family choices offered by the typography editors
pub const FONT_FAMILIES: &[&str] = &["Inter", "Roboto", "Open Sans", "Georgia", "system-ui", "monospace"];

/// Font weight choices as (label, CSS value)
pub const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("Light", "300"),
    ("Regular", "400"),
    ("Medium", "500"),
    ("Semi-Bold", "600"),
    ("Bold", "700"),
    ("Extra-Bold", "800"),
    ("Black", "900"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakpoint_keys_are_stable() {
        let keys: Vec<_> = Breakpoint::ALL
            .iter()
            .map(|bp| serde_json::to_value(bp).unwrap())
            .collect();
        assert_eq!(keys, vec![json!("sm"), json!("md"), json!("lg"), json!("xl"), json!("2xl"), json!("full")]);
        assert_eq!(Breakpoint::Full.max_width_px(), None);
        assert_eq!(Breakpoint::Xxl.max_width_px(), Some(1536));
    }

    #[test]
    fn test_link_typography_is_flat_on_the_wire() {
        let link = LinkTypography {
            base: TypographySettings {
                font_family: "Inter".into(),
                font_size: "1rem".into(),
                font_weight: "500".into(),
                color: "#4f46e5".into(),
                line_height: "1.5".into(),
            },
            hover_color: "#4338ca".into(),
            underline: true,
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["color"], json!("#4f46e5"));
        assert_eq!(value["hoverColor"], json!("#4338ca"));
        assert_eq!(value["underline"], json!(true));
    }

    #[test]
    fn test_fractional_pixel_settings_parse() {
        let mut value = serde_json::to_value(PageSettings::default()).unwrap();
        value["elementGap"] = json!(1.5);
        value["divider"]["weight"] = json!(0.5);
        value["button"]["borderRadius"] = json!(12);

        let page: PageSettings = serde_json::from_value(value).unwrap();
        assert_eq!(page.element_gap, 1.5);
        assert_eq!(page.divider.weight, 0.5);
        assert_eq!(page.button.border_radius, 12.0);
    }
}
