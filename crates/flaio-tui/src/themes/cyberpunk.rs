//! Cyberpunk: neon pink and cyan on midnight

use ratatui::style::Color;

use crate::theme::Palette;

pub fn palette() -> Palette {
    Palette {
        page: Color::Rgb(0x0a, 0x0a, 0x1a),
        sand: Color::Rgb(0x14, 0x12, 0x2e),
        ink: Color::Rgb(0xe0, 0xe0, 0xff),
        muted: Color::Rgb(0x00, 0xf0, 0xff),
        hairline: Color::Rgb(0x2a, 0x1f, 0x4d),
        accent: Color::Rgb(0xff, 0x2e, 0x97),
        dark: true,
    }
}
