//! Minimal: clean white with system blue

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0xff, 0xff, 0xff),
        sand: Color::Rgb(0xf5, 0xf5, 0xf7),
        ink: Color::Rgb(0x1d, 0x1d, 0x1f),
        muted: Color::Rgb(0x86, 0x86, 0x8b),
        hairline: Color::Rgb(0xd2, 0xd2, 0xd7),
        accent: Color::Rgb(0x00, 0x71, 0xe3),
        dark: false,
    }
}
