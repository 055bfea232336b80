//! Style sheet derived from `pageSettings` and `menuSettings`.

use std::fmt::Write;

use crate::portal::{MenuSettings, PageSettings, TypographySettings};

/// Scope prepended to every selector so the sheet only styles the preview
pub const ROOT_SELECTOR: &str = "#preview-root";

/// Free-text setting reduced to something that stays inside one declaration.
/// `<` could close the surrounding `<style>` element; `;`, `{` and `}` would
/// end the declaration or rule.
pub fn css_value(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '<' | ';' | '{' | '}')).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            declarations: Vec::new(),
        }
    }

    fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.declarations.push((property.to_string(), css_value(&value)));
        self
    }

    fn typography(self, typo: &TypographySettings) -> Self {
        self.with("font-family", &typo.font_family)
            .with("font-size", &typo.font_size)
            .with("font-weight", &typo.font_weight)
            .with("color", &typo.color)
            .with("line-height", &typo.line_height)
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Inter-element gap of the content section, in pixels
    pub element_gap: f64,
    pub rules: Vec<CssRule>,
}

impl StyleSheet {
    pub fn derive(page: &PageSettings, menu: &MenuSettings) -> Self {
        let scoped = |selector: &str| format!("{} {}", ROOT_SELECTOR, selector);
        let mut rules = Vec::new();

        for level in 1..=6u8 {
            if let Some(typo) = page.heading(level) {
                rules.push(CssRule::new(&scoped(&format!("h{}", level))).typography(typo));
            }
        }
        rules.push(
            CssRule::new(&format!("{}, {}", scoped("p"), scoped(".prose p"))).typography(&page.paragraph),
        );
        rules.push(
            CssRule::new(&scoped("a"))
                .typography(&page.link.base)
                .with("text-decoration", if page.link.underline { "underline" } else { "none" }),
        );
        rules.push(CssRule::new(&scoped("a:hover")).with("color", &page.link.hover_color));
        rules.push(
            CssRule::new(&scoped("nav a"))
                .with("color", &menu.text_color)
                .with("transition", "color 0.2s"),
        );
        rules.push(CssRule::new(&scoped("nav a:hover")).with("color", &menu.hover_color));
        rules.push(
            CssRule::new(&scoped("hr"))
                .with("height", format!("{}px", page.divider.weight))
                .with("background-color", &page.divider.color)
                .with("border", "none"),
        );
        rules.push(
            CssRule::new(&scoped("button.portal-btn"))
                .with("font-family", &page.button.font_family)
                .with("font-size", &page.button.font_size)
                .with("color", &page.button.color)
                .with("background-color", &page.button.background_color)
                .with("border-radius", format!("{}px", page.button.border_radius))
                .with("padding", "0.75rem 1.5rem")
                .with("font-weight", "600")
                .with("transition", "all 0.2s"),
        );
        rules.push(
            CssRule::new(&scoped("button.portal-btn:hover"))
                .with("background-color", &page.button.hover_background_color),
        );
        rules.push(
            CssRule::new(&scoped(".content-section"))
                .with("display", "flex")
                .with("flex-direction", "column")
                .with("gap", format!("{}px", page.element_gap)),
        );

        Self {
            element_gap: page.element_gap,
            rules,
        }
    }

    /// Rule whose selector is exactly `selector` (without the root scope)
    pub fn rule(&self, selector: &str) -> Option<&CssRule> {
        let scoped = format!("{} {}", ROOT_SELECTOR, selector);
        self.rules.iter().find(|rule| rule.selector == scoped)
    }

    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            let _ = writeln!(css, "{} {{", rule.selector);
            for (property, value) in &rule.declarations {
                let _ = writeln!(css, "  {}: {};", property, value);
            }
            css.push_str("}\n");
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_gap_flows_into_sheet() {
        let mut page = PageSettings::default();
        page.element_gap = 64.0;
        let sheet = StyleSheet::derive(&page, &MenuSettings::default());
        assert_eq!(sheet.element_gap, 64.0);
        assert_eq!(sheet.rule(".content-section").unwrap().get("gap"), Some("64px"));

        page.element_gap = 1.5;
        page.divider.weight = 0.5;
        let sheet = StyleSheet::derive(&page, &MenuSettings::default());
        assert_eq!(sheet.rule(".content-section").unwrap().get("gap"), Some("1.5px"));
        assert_eq!(sheet.rule("hr").unwrap().get("height"), Some("0.5px"));
    }

    #[test]
    fn test_markup_in_values_cannot_leave_the_style_element() {
        let mut page = PageSettings::default();
        page.h1.font_family = "Inter</style><script>alert(1)</script>".to_string();
        page.divider.color = "red; } body { display: none".to_string();
        let css = StyleSheet::derive(&page, &MenuSettings::default()).to_css();

        assert!(!css.contains('<'));
        assert!(css.contains("font-family: Inter/style>script>alert(1)/script>;"));
        assert!(css.contains("background-color: red  body  display: none;"));
    }

    #[test]
    fn test_link_underline_and_hover() {
        let mut page = PageSettings::default();
        page.link.underline = false;
        let sheet = StyleSheet::derive(&page, &MenuSettings::default());
        assert_eq!(sheet.rule("a").unwrap().get("text-decoration"), Some("none"));
        assert_eq!(sheet.rule("a:hover").unwrap().get("color"), Some("#4338ca"));
        assert_eq!(sheet.rule("nav a:hover").unwrap().get("color"), Some("#6366f1"));
    }

    #[test]
    fn test_divider_and_button() {
        let sheet = StyleSheet::derive(&PageSettings::default(), &MenuSettings::default());
        let hr = sheet.rule("hr").unwrap();
        assert_eq!(hr.get("height"), Some("1px"));
        assert_eq!(hr.get("border"), Some("none"));
        assert_eq!(sheet.rule("button.portal-btn").unwrap().get("border-radius"), Some("8px"));
        assert!(sheet.to_css().contains("#preview-root h1 {\n  font-family: Inter;"));
    }
}
