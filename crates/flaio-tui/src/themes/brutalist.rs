//! Brutalist: raw black on white, red accent

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0xff, 0xff, 0xff),
        sand: Color::Rgb(0xff, 0xff, 0x00),
        ink: Color::Rgb(0x00, 0x00, 0x00),
        muted: Color::Rgb(0x33, 0x33, 0x33),
        hairline: Color::Rgb(0x00, 0x00, 0x00),
        accent: Color::Rgb(0xff, 0x00, 0x00),
        dark: false,
    }
}
