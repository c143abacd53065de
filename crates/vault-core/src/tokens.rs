//! The i.AM design token set: Tailwind theme extension and custom CSS classes.

use std::fmt;

use serde_json::{Value, json};

/// Named colors of the theme extension, in declaration order.
pub const THEME_COLORS: &[(&str, &str)] = &[
    ("bg-primary", "#000000"),
    ("bg-secondary", "#050505"),
    ("glass-surface", "rgba(255, 255, 255, 0.03)"),
    ("accent", "#ffffff"),
    ("accent-dim", "#a1a1aa"),
    ("text-main", "#ffffff"),
    ("text-muted", "#737373"),
    ("border-color", "rgba(255, 255, 255, 0.12)"),
    ("border-highlight", "rgba(255, 255, 255, 0.3)"),
    ("success", "#ffffff"),
    ("warning", "#d4d4d4"),
    ("error", "#ffffff"),
];

pub const SANS_FONTS: &[&str] = &["Inter", "sans-serif"];
pub const MONO_FONTS: &[&str] = &["JetBrains Mono", "monospace"];

/// Classes the generation contract refers to, plus the page background.
pub const CUSTOM_CSS: &str = "
    body { background-color: #000000; color: #ffffff; }
    .glass-panel {
        background: rgba(5, 5, 5, 0.7);
        backdrop-filter: blur(24px);
        -webkit-backdrop-filter: blur(24px);
        border: 1px solid rgba(255, 255, 255, 0.12);
        box-shadow: 0 4px 40px rgba(0, 0, 0, 0.4);
    }
    .btn-titanium {
        background: #ffffff;
        color: #000000;
        font-weight: 700;
        border: 1px solid #ffffff;
        text-transform: uppercase;
        letter-spacing: 0.05em;
        padding: 0.5rem 1rem;
        border-radius: 0.125rem;
        display: inline-flex;
        align-items: center;
        gap: 0.5rem;
    }
    .btn-titanium:hover { background: #d4d4d4; }
";

/// The `tailwind.config` object injected into previews and shown by the exporter.
pub fn tailwind_config() -> Value {
    let colors: serde_json::Map<String, Value> = THEME_COLORS
        .iter()
        .map(|(name, value)| ((*name).to_string(), json!(value)))
        .collect();

    json!({
        "theme": {
            "extend": {
                "colors": colors,
                "fontFamily": {
                    "sans": SANS_FONTS,
                    "mono": MONO_FONTS,
                }
            }
        }
    })
}

/// Pretty-printed config for display and clipboard export.
pub fn tailwind_config_pretty() -> String {
    serde_json::to_string_pretty(&tailwind_config()).unwrap_or_default()
}

/// Tabs of the token studio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenTab {
    #[default]
    Colors,
    Type,
    Space,
}

impl TokenTab {
    pub const ALL: [TokenTab; 3] = [TokenTab::Colors, TokenTab::Type, TokenTab::Space];

    pub fn label(self) -> &'static str {
        match self {
            TokenTab::Colors => "colors",
            TokenTab::Type => "type",
            TokenTab::Space => "space",
        }
    }

    /// Only the color tab accepts edits.
    pub fn is_locked(self) -> bool {
        !matches!(self, TokenTab::Colors)
    }

    pub fn next(self) -> Self {
        match self {
            TokenTab::Colors => TokenTab::Type,
            TokenTab::Type => TokenTab::Space,
            TokenTab::Space => TokenTab::Colors,
        }
    }
}

/// An `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0 };
    pub const WHITE: HexColor = HexColor {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    /// Parses `#rrggbb` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Editable colors of the token studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Primary,
    Surface,
    Accent,
}

impl PaletteSlot {
    pub const ALL: [PaletteSlot; 3] = [PaletteSlot::Primary, PaletteSlot::Surface, PaletteSlot::Accent];

    pub fn label(self) -> &'static str {
        match self {
            PaletteSlot::Primary => "primary",
            PaletteSlot::Surface => "surface",
            PaletteSlot::Accent => "accent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: HexColor,
    pub surface: HexColor,
    pub accent: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: HexColor::BLACK,
            surface: HexColor::BLACK,
            accent: HexColor::WHITE,
        }
    }
}

impl Palette {
    pub fn get(&self, slot: PaletteSlot) -> HexColor {
        match slot {
            PaletteSlot::Primary => self.primary,
            PaletteSlot::Surface => self.surface,
            PaletteSlot::Accent => self.accent,
        }
    }

    /// Sets a slot from user input. Returns false and leaves the palette
    /// unchanged when the input is not `#rrggbb`.
    pub fn set(&mut self, slot: PaletteSlot, input: &str) -> bool {
        let Some(color) = HexColor::parse(input) else {
            return false;
        };
        match slot {
            PaletteSlot::Primary => self.primary = color,
            PaletteSlot::Surface => self.surface = color,
            PaletteSlot::Accent => self.accent = color,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tailwind_config_exposes_contract_tokens() {
        let config = tailwind_config();
        let colors = &config["theme"]["extend"]["colors"];
        assert_eq!(colors["bg-primary"], "#000000");
        assert_eq!(colors["bg-secondary"], "#050505");
        assert_eq!(colors["border-color"], "rgba(255, 255, 255, 0.12)");
        assert_eq!(
            config["theme"]["extend"]["fontFamily"]["mono"],
            json!(["JetBrains Mono", "monospace"])
        );
    }

    #[test]
    fn custom_css_defines_contract_classes() {
        assert!(CUSTOM_CSS.contains(".glass-panel {"));
        assert!(CUSTOM_CSS.contains(".btn-titanium {"));
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(
            HexColor::parse(" #A1a1AA "),
            Some(HexColor {
                r: 0xa1,
                g: 0xa1,
                b: 0xaa
            })
        );
        assert_eq!(HexColor::parse("#fff"), None);
        assert_eq!(HexColor::parse("000000"), None);
        assert_eq!(HexColor::parse("#gggggg"), None);
        assert_eq!(HexColor::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn palette_rejects_invalid_input() {
        let mut palette = Palette::default();
        assert!(!palette.set(PaletteSlot::Accent, "white"));
        assert_eq!(palette.accent, HexColor::WHITE);
        assert!(palette.set(PaletteSlot::Surface, "#111111"));
        assert_eq!(palette.get(PaletteSlot::Surface).to_string(), "#111111");
    }

    #[test]
    fn only_color_tab_is_editable() {
        assert!(!TokenTab::Colors.is_locked());
        assert!(TokenTab::Type.is_locked());
        assert!(TokenTab::Space.is_locked());
        assert_eq!(TokenTab::Space.next(), TokenTab::Colors);
    }
}
