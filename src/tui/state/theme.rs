use ratatui::style::{Color, Modifier, Style};

pub use crate::config::ThemeVariant;

/// Catppuccin palette, by role
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent_primary: Color,   // lavender: focus, selection
    pub accent_secondary: Color, // blue: links, actions
    pub accent_tertiary: Color,  // mauve: modal headers
    pub accent_error: Color,
    pub accent_warning: Color,
    pub accent_success: Color,
    pub accent_muted: Color, // peach: key hints

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,

    pub border_primary: Color,
    pub border_secondary: Color,
    pub bg_base: Color,
    pub bg_surface: Color,
    pub bg_elevated: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),
            accent_secondary: Color::Rgb(0x89, 0xb4, 0xfa),
            accent_tertiary: Color::Rgb(0xcb, 0xa6, 0xf7),
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),
            accent_warning: Color::Rgb(0xf9, 0xe2, 0xaf),
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),

            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde),
            text_tertiary: Color::Rgb(0xa6, 0xad, 0xc8),

            border_primary: Color::Rgb(0x7f, 0x84, 0x9c),
            border_secondary: Color::Rgb(0x6c, 0x70, 0x86),
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),
            bg_elevated: Color::Rgb(0x45, 0x47, 0x5a),
        }
    }

    fn latte() -> Self {
        Self {
            accent_primary: Color::Rgb(0x72, 0x87, 0xfd),
            accent_secondary: Color::Rgb(0x1e, 0x66, 0xf5),
            accent_tertiary: Color::Rgb(0x88, 0x39, 0xef),
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),
            accent_warning: Color::Rgb(0xdf, 0x8e, 0x1d),
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b),
            accent_muted: Color::Rgb(0xfe, 0x64, 0x0b),

            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77),
            text_tertiary: Color::Rgb(0x6c, 0x6f, 0x85),

            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1),
            border_secondary: Color::Rgb(0x9c, 0xa0, 0xb0),
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),
            bg_elevated: Color::Rgb(0xbc, 0xc0, 0xcc),
        }
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.accent_primary).bg(self.bg_surface)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent_tertiary).add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.text_tertiary)
    }

    pub fn key(&self) -> Style {
        Style::default().fg(self.accent_muted)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.accent_error)
    }
}

/// Terminal colour for a CSS hex value, `None` when it is not `#rgb`/`#rrggbb`
pub fn swatch(value: &str) -> Option<Color> {
    crate::editing::fields::parse_hex_color(value).map(|(r, g, b)| Color::Rgb(r, g, b))
}
