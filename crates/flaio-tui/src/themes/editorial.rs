//! Editorial: warm paper, serif luxury

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0xfa, 0xf7, 0xf2),
        sand: Color::Rgb(0xf0, 0xe9, 0xdd),
        ink: Color::Rgb(0x1c, 0x19, 0x17),
        muted: Color::Rgb(0x78, 0x71, 0x6c),
        hairline: Color::Rgb(0xe2, 0xd9, 0xcc),
        accent: Color::Rgb(0xb8, 0xa0, 0x82),
        dark: false,
    }
}
