//! Palette registry and loader
//!
//! One palette per design theme, with user hex overrides from config.

pub mod brutalist;
pub mod cyberpunk;
pub mod editorial;
pub mod minimal;
pub mod retro;
pub mod terminal;

use flaio_core::config::ThemeColorOverrides;
use flaio_core::DesignTheme;
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Palette;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Built-in palette for a theme
pub fn base_palette(theme: DesignTheme) -> Palette {
    match theme {
        DesignTheme::Editorial => editorial::palette(),
        DesignTheme::Terminal => terminal::palette(),
        DesignTheme::Cyberpunk => cyberpunk::palette(),
        DesignTheme::Minimal => minimal::palette(),
        DesignTheme::Brutalist => brutalist::palette(),
        DesignTheme::Retro => retro::palette(),
    }
}

/// Palette for a theme with user overrides applied
pub fn load_palette(theme: DesignTheme, overrides: &ThemeColorOverrides) -> Palette {
    apply_overrides(base_palette(theme), overrides)
}

fn apply_overrides(mut palette: Palette, overrides: &ThemeColorOverrides) -> Palette {
    let slots: [(&Option<String>, &mut Color, &str); 6] = [
        (&overrides.page, &mut palette.page, "page"),
        (&overrides.sand, &mut palette.sand, "sand"),
        (&overrides.ink, &mut palette.ink, "ink"),
        (&overrides.muted, &mut palette.muted, "muted"),
        (&overrides.hairline, &mut palette.hairline, "hairline"),
        (&overrides.accent, &mut palette.accent, "accent"),
    ];

    for (hex, slot, name) in slots {
        let Some(hex) = hex else {
            continue;
        };
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => warn!("Invalid color '{}' for '{}', keeping theme default", hex, name),
        }
    }

    palette
}
