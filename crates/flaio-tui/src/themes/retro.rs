//! Retro: amber CRT

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0x1a, 0x10, 0x00),
        sand: Color::Rgb(0x26, 0x1a, 0x05),
        ink: Color::Rgb(0xff, 0xb0, 0x00),
        muted: Color::Rgb(0xb3, 0x7b, 0x00),
        hairline: Color::Rgb(0x4d, 0x35, 0x00),
        accent: Color::Rgb(0xff, 0xcc, 0x33),
        dark: true,
    }
}
