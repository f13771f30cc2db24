//! Terminal: phosphor green on black

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0x0d, 0x02, 0x08),
        sand: Color::Rgb(0x0a, 0x1a, 0x0f),
        ink: Color::Rgb(0x00, 0xff, 0x41),
        muted: Color::Rgb(0x00, 0x8f, 0x11),
        hairline: Color::Rgb(0x00, 0x3b, 0x00),
        accent: Color::Rgb(0x00, 0xff, 0x41),
        dark: true,
    }
}
