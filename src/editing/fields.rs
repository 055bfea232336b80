//! Self-describing settings fields.
//!
//! Every settings panel is a list of [`FieldDef`]s. A definition names the
//! field's path inside its settings record, how it is edited and what it is
//! called; reading and writing go through the store's shallow-merge and
//! nested-path patches, so panels never hold their own copy of a record.

use serde_json::{Value, json};

use crate::portal::{Breakpoint, FONT_FAMILIES, FONT_WEIGHTS, Justification, Padding, PortalConfig};
use crate::store::{ConfigStore, PatchError, SettingPath, SettingsKey, path};

/// How a field is edited
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Bool,
    /// One of a fixed set of (label, stored value) pairs
    Choice { options: Vec<(String, String)> },
    /// Free text with a swatch preview
    Color,
    Text { placeholder: Option<String> },
    Number { min: u32, max: u32, step: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub settings: SettingsKey,
    /// Dotted path inside the settings record
    pub path: String,
    pub label: String,
    pub description: String,
    pub kind: FieldKind,
}

impl FieldDef {
    /// Current value of the field in `config`
    pub fn read(&self, config: &PortalConfig) -> Option<Value> {
        let record = match self.settings {
            SettingsKey::Header => serde_json::to_value(config.header_settings.as_ref()),
            SettingsKey::Footer => serde_json::to_value(config.footer_settings.as_ref()),
            SettingsKey::Menu => serde_json::to_value(config.menu_settings.as_ref()),
            SettingsKey::Portal => serde_json::to_value(config.portal_settings.as_ref()),
            SettingsKey::Page => serde_json::to_value(config.page_settings.as_ref()),
        }
        .ok()?;
        let path = SettingPath::parse(&self.path).ok()?;
        path::lookup(&record, &path).cloned()
    }

    /// Display text of the current value
    pub fn display(&self, config: &PortalConfig) -> String {
        let Some(value) = self.read(config) else {
            return String::new();
        };
        match (&self.kind, &value) {
            (FieldKind::Bool, Value::Bool(on)) => (if *on { "On" } else { "Off" }).to_string(),
            (FieldKind::Choice { options }, Value::String(current)) => options
                .iter()
                .find(|(_, stored)| stored == current)
                .map(|(label, _)| label.clone())
                .unwrap_or_else(|| current.clone()),
            (FieldKind::Number { .. }, Value::Number(number)) => {
                number.as_f64().map(|n| n.to_string()).unwrap_or_else(|| number.to_string())
            }
            (_, Value::String(text)) => text.clone(),
            (_, other) => other.to_string(),
        }
    }

    /// Write `value` through the store
    pub fn write(&self, store: &mut ConfigStore, value: Value) -> Result<(), PatchError> {
        match self.settings {
            SettingsKey::Page => store.patch_nested_page_setting(&self.path, value),
            other => store.patch_settings_field(other, &self.path, value),
        }
    }

    /// Flip a boolean field
    pub fn toggle(&self, store: &mut ConfigStore) -> Result<(), PatchError> {
        let current = self.read(store.current()).and_then(|v| v.as_bool()).unwrap_or(false);
        self.write(store, Value::Bool(!current))
    }

    /// Move a choice field to the next (`forward`) or previous option
    pub fn cycle(&self, store: &mut ConfigStore, forward: bool) -> Result<(), PatchError> {
        let FieldKind::Choice { options } = &self.kind else {
            return Ok(());
        };
        if options.is_empty() {
            return Ok(());
        }

        let current = self.read(store.current());
        let index = options
            .iter()
            .position(|(_, stored)| current.as_ref().and_then(Value::as_str) == Some(stored.as_str()))
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % options.len()
        } else {
            (index + options.len() - 1) % options.len()
        };
        self.write(store, Value::String(options[next].1.clone()))
    }

    /// Step a numeric field by whole steps, clamped to its range
    pub fn step(&self, store: &mut ConfigStore, steps: i64) -> Result<(), PatchError> {
        let FieldKind::Number { min, max, step } = self.kind else {
            return Ok(());
        };
        let current = self.read(store.current()).and_then(|v| v.as_f64()).unwrap_or(f64::from(min));
        let next = (current + steps as f64 * f64::from(step)).clamp(f64::from(min), f64::from(max));
        self.write(store, json!(next))
    }

    /// Write text typed into a color, text or number field
    pub fn set_text(&self, store: &mut ConfigStore, text: &str) -> Result<(), PatchError> {
        match &self.kind {
            FieldKind::Number { min, max, .. } => {
                let parsed = text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite() && *value >= 0.0)
                    .ok_or_else(|| PatchError::InvalidValue {
                        path: self.path.clone(),
                        message: format!("'{}' is not a number", text),
                    })?;
                self.write(store, json!(parsed.clamp(f64::from(*min), f64::from(*max))))
            }
            _ => self.write(store, Value::String(text.to_string())),
        }
    }
}

/// Fluent construction of field definitions
pub struct FieldDefBuilder {
    settings: SettingsKey,
    path: String,
    label: String,
    description: String,
}

impl FieldDefBuilder {
    pub fn new(settings: SettingsKey, path: &str, label: &str) -> Self {
        Self {
            settings,
            path: path.to_string(),
            label: label.to_string(),
            description: String::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn build(self, kind: FieldKind) -> FieldDef {
        FieldDef {
            settings: self.settings,
            path: self.path,
            label: self.label,
            description: self.description,
            kind,
        }
    }

    pub fn bool(self) -> FieldDef {
        self.build(FieldKind::Bool)
    }

    pub fn color(self) -> FieldDef {
        self.build(FieldKind::Color)
    }

    pub fn text(self) -> FieldDef {
        self.build(FieldKind::Text { placeholder: None })
    }

    pub fn text_with_placeholder(self, placeholder: &str) -> FieldDef {
        self.build(FieldKind::Text {
            placeholder: Some(placeholder.to_string()),
        })
    }

    pub fn number(self, min: u32, max: u32, step: u32) -> FieldDef {
        self.build(FieldKind::Number { min, max, step })
    }

    pub fn choice<L: AsRef<str>, V: AsRef<str>>(self, options: impl IntoIterator<Item = (L, V)>) -> FieldDef {
        self.build(FieldKind::Choice {
            options: options
                .into_iter()
                .map(|(label, value)| (label.as_ref().to_string(), value.as_ref().to_string()))
                .collect(),
        })
    }
}

/// A titled run of fields; page styles use three of them
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub title: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub settings: SettingsKey,
    pub title: String,
    pub groups: Vec<FieldGroup>,
}

impl SettingsPanel {
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.groups.iter().flat_map(|group| group.fields.iter())
    }

    pub fn field(&self, path: &str) -> Option<&FieldDef> {
        self.fields().find(|field| field.path == path)
    }
}

fn group(title: &str, fields: Vec<FieldDef>) -> FieldGroup {
    FieldGroup {
        title: title.to_string(),
        fields,
    }
}

fn justification_choice(settings: SettingsKey) -> FieldDef {
    FieldDefBuilder::new(settings, "justification", "Text Alignment")
        .choice(Justification::ALL.iter().map(|j| (capitalize(j.key()), j.key())))
}

fn padding_choice(settings: SettingsKey) -> FieldDef {
    FieldDefBuilder::new(settings, "padding", "Vertical Padding")
        .choice(Padding::ALL.iter().map(|p| (capitalize(p.key()), p.key())))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn chrome_fields(settings: SettingsKey, name: &str) -> Vec<FieldDef> {
    vec![
        FieldDefBuilder::new(settings, "visible", &format!("Show {}", name)).bool(),
        FieldDefBuilder::new(settings, "backgroundColor", "Background").color(),
        FieldDefBuilder::new(settings, "textColor", "Text Color").color(),
    ]
}

pub fn header_panel() -> SettingsPanel {
    let key = SettingsKey::Header;
    let mut chrome = chrome_fields(key, "Header");
    chrome.push(padding_choice(key));
    chrome.push(justification_choice(key));

    SettingsPanel {
        settings: key,
        title: "Global Header Settings".to_string(),
        groups: vec![
            group("Appearance", chrome),
            group(
                "Elements & Features",
                vec![
                    FieldDefBuilder::new(key, "showLogo", "Show Logo")
                        .description("Display organization branding")
                        .bool(),
                    FieldDefBuilder::new(key, "logoUrl", "Logo Image URL")
                        .text_with_placeholder("https://example.com/logo.png"),
                    FieldDefBuilder::new(key, "showSearch", "Header Search Bar")
                        .description("Enable user discovery")
                        .bool(),
                    FieldDefBuilder::new(key, "limitSearchToPortal", "Limit to Portal content only").bool(),
                    FieldDefBuilder::new(key, "isSticky", "Fixed Header (Sticky)")
                        .description("Keep visible while scrolling")
                        .bool(),
                ],
            ),
        ],
    }
}

pub fn footer_panel() -> SettingsPanel {
    let key = SettingsKey::Footer;
    let mut chrome = chrome_fields(key, "Footer");
    chrome.push(padding_choice(key));
    chrome.push(justification_choice(key));

    SettingsPanel {
        settings: key,
        title: "Global Footer Settings".to_string(),
        groups: vec![group("Appearance", chrome)],
    }
}

pub fn menu_panel() -> SettingsPanel {
    let key = SettingsKey::Menu;
    let mut chrome = chrome_fields(key, "Menu");
    chrome.push(FieldDefBuilder::new(key, "hoverColor", "Hover Text").color());
    chrome.push(padding_choice(key));
    chrome.push(justification_choice(key));

    SettingsPanel {
        settings: key,
        title: "Global Menu Settings".to_string(),
        groups: vec![group("Appearance", chrome)],
    }
}

pub fn portal_panel() -> SettingsPanel {
    let key = SettingsKey::Portal;
    SettingsPanel {
        settings: key,
        title: "General Settings".to_string(),
        groups: vec![
            group(
                "Identity",
                vec![
                    FieldDefBuilder::new(key, "title", "Portal Title").text(),
                    FieldDefBuilder::new(key, "alias", "Alias (Friendly URL)").text(),
                ],
            ),
            group(
                "Access Control",
                vec![
                    FieldDefBuilder::new(key, "isPublic", "Public Access")
                        .description("Anyone with the link can view. Making the portal public allows access without logging in.")
                        .bool(),
                    FieldDefBuilder::new(key, "restrictInternal", "Restrict to Internal Users")
                        .description("Only users with an IP address approved by the Qumu Admin will be able to view presentations.")
                        .bool(),
                ],
            ),
            group(
                "Features",
                vec![
                    FieldDefBuilder::new(key, "allowCreation", "Allow Content Creation")
                        .description("Creators will be able to upload new videos and add them directly to this portal.")
                        .bool(),
                    FieldDefBuilder::new(key, "enableComments", "Enable Comments")
                        .description("Enable registered users to add comments. Guest viewers will be able to read comments.")
                        .bool(),
                    FieldDefBuilder::new(key, "enableLikes", "Enable Likes")
                        .description("Allow registered users to Like videos.")
                        .bool(),
                    FieldDefBuilder::new(key, "enableFavorites", "Enable Favorites")
                        .description("Allow registered users to mark their favorite videos to find them easily later.")
                        .bool(),
                    FieldDefBuilder::new(key, "showViewCounts", "Show View Counts")
                        .description("Show the number of views within the portal to all viewers.")
                        .bool(),
                ],
            ),
            group(
                "Player Interaction Settings",
                vec![
                    FieldDefBuilder::new(key, "playerAutoPlay", "Auto-play Videos")
                        .description("Start playing video automatically when a page loads.")
                        .bool(),
                    FieldDefBuilder::new(key, "playerLoop", "Loop Playback")
                        .description("Restart video content immediately after it reaches the end.")
                        .bool(),
                    FieldDefBuilder::new(key, "playerMuted", "Mute by Default")
                        .description("Start all videos with the audio muted. Recommended for auto-play.")
                        .bool(),
                    FieldDefBuilder::new(key, "playerShowCaptions", "Enable Captions")
                        .description("Automatically show closed captions if available for the video content.")
                        .bool(),
                ],
            ),
        ],
    }
}

fn typography_fields(prefix: &str, label: &str) -> Vec<FieldDef> {
    let key = SettingsKey::Page;
    vec![
        FieldDefBuilder::new(key, &format!("{}.fontFamily", prefix), &format!("{} Font Family", label))
            .choice(FONT_FAMILIES.iter().map(|family| (*family, *family))),
        FieldDefBuilder::new(key, &format!("{}.fontWeight", prefix), &format!("{} Weight", label))
            .choice(FONT_WEIGHTS.iter().copied()),
        FieldDefBuilder::new(key, &format!("{}.fontSize", prefix), &format!("{} Size (px/rem)", label)).text(),
        FieldDefBuilder::new(key, &format!("{}.color", prefix), &format!("{} Color", label)).color(),
    ]
}

/// Global Layout, Typography and Dividers & Buttons
pub fn page_panel() -> SettingsPanel {
    let key = SettingsKey::Page;

    let layout = vec![
        FieldDefBuilder::new(key, "contentMaxWidth", "Content Max Width")
            .choice(Breakpoint::ALL.iter().map(|bp| (bp.label(), bp.key()))),
        FieldDefBuilder::new(key, "backgroundColor", "Page Background").color(),
        FieldDefBuilder::new(key, "contentBackgroundColor", "Content Background").color(),
        FieldDefBuilder::new(key, "elementGap", "Element Vertical Gap").number(0, 120, 4),
    ];

    let mut typography = Vec::new();
    for (prefix, label) in [
        ("h1", "Heading 1"),
        ("h2", "Heading 2"),
        ("h3", "Heading 3"),
        ("h4", "Heading 4"),
        ("h5", "Heading 5"),
        ("h6", "Heading 6"),
        ("paragraph", "Paragraphs"),
        ("link", "Links"),
    ] {
        typography.extend(typography_fields(prefix, label));
    }
    typography.push(FieldDefBuilder::new(key, "link.hoverColor", "Links Hover Color").color());
    typography.push(FieldDefBuilder::new(key, "link.underline", "Underline Links").bool());

    let elements = vec![
        FieldDefBuilder::new(key, "divider.weight", "Divider Weight (px)").number(0, 20, 1),
        FieldDefBuilder::new(key, "divider.color", "Divider Color").color(),
        FieldDefBuilder::new(key, "button.fontFamily", "Button Font Family")
            .choice(FONT_FAMILIES.iter().map(|family| (*family, *family))),
        FieldDefBuilder::new(key, "button.fontSize", "Button Font Size").text(),
        FieldDefBuilder::new(key, "button.color", "Button Text").color(),
        FieldDefBuilder::new(key, "button.backgroundColor", "Button Background").color(),
        FieldDefBuilder::new(key, "button.hoverBackgroundColor", "Button Hover Color").color(),
        FieldDefBuilder::new(key, "button.borderRadius", "Button Radius (px)").number(0, 48, 1),
    ];

    SettingsPanel {
        settings: key,
        title: "Page Styles".to_string(),
        groups: vec![
            group("Global Layout", layout),
            group("Typography", typography),
            group("Dividers & Buttons", elements),
        ],
    }
}

/// Which group of a collapsible panel is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn open(index: usize) -> Self {
        Self { open: Some(index) }
    }

    pub fn expanded(&self) -> Option<usize> {
        self.open
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Expand `index`, collapsing any other group; collapse it if already open
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) { None } else { Some(index) };
    }
}

/// Parse a `#rgb` or `#rrggbb` colour into its components
pub fn parse_hex_color(text: &str) -> Option<(u8, u8, u8)> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_path_resolves() {
        let config = crate::portal::starter_config();
        for panel in [header_panel(), footer_panel(), menu_panel(), portal_panel(), page_panel()] {
            for field in panel.fields() {
                assert!(field.read(&config).is_some(), "{} has no value", field.path);
            }
        }
    }

    #[test]
    fn test_element_gap_steps_and_clamps() {
        let mut store = ConfigStore::default();
        let panel = page_panel();
        let gap = panel.field("elementGap").unwrap();

        gap.step(&mut store, 8).unwrap();
        assert_eq!(store.current().page_settings.element_gap, 64.0);
        assert_eq!(gap.display(store.current()), "64");

        gap.step(&mut store, 100).unwrap();
        assert_eq!(store.current().page_settings.element_gap, 120.0);

        gap.set_text(&mut store, "-3").unwrap_err();
        gap.set_text(&mut store, "inf").unwrap_err();
        gap.set_text(&mut store, "8").unwrap();
        assert_eq!(store.current().page_settings.element_gap, 8.0);

        gap.set_text(&mut store, "1.5").unwrap();
        assert_eq!(store.current().page_settings.element_gap, 1.5);
        assert_eq!(gap.display(store.current()), "1.5");
    }

    #[test]
    fn test_choice_cycles_and_displays_label() {
        let mut store = ConfigStore::default();
        let panel = page_panel();
        let width = panel.field("contentMaxWidth").unwrap();
        assert_eq!(width.display(store.current()), "X-Large");

        width.cycle(&mut store, true).unwrap();
        assert_eq!(store.current().page_settings.content_max_width, Breakpoint::Xxl);
        width.cycle(&mut store, true).unwrap();
        width.cycle(&mut store, true).unwrap();
        assert_eq!(store.current().page_settings.content_max_width, Breakpoint::Sm);
    }

    #[test]
    fn test_color_is_free_text() {
        let mut store = ConfigStore::default();
        let panel = header_panel();
        let bg = panel.field("backgroundColor").unwrap();
        bg.set_text(&mut store, "rebeccapurple").unwrap();
        assert_eq!(store.current().header_settings.background_color, "rebeccapurple");
        assert_eq!(parse_hex_color("rebeccapurple"), None);
    }

    #[test]
    fn test_toggle_header_visibility() {
        let mut store = ConfigStore::default();
        header_panel().field("visible").unwrap().toggle(&mut store).unwrap();
        assert!(!store.current().header_settings.visible);
    }

    #[test]
    fn test_accordion_keeps_one_open() {
        let mut accordion = Accordion::open(0);
        accordion.toggle(2);
        assert_eq!(accordion.expanded(), Some(2));
        assert!(!accordion.is_expanded(0));
        accordion.toggle(2);
        assert_eq!(accordion.expanded(), None);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4f46e5"), Some((0x4f, 0x46, 0xe5)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#ggg"), None);
    }
}
