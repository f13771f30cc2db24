use ratatui::style::Color;

/// Runtime palette for one design theme
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Page background
    pub page: Color,
    /// Card surface, one step off the page
    pub sand: Color,
    /// Primary text
    pub ink: Color,
    /// Secondary text
    pub muted: Color,
    /// Borders and separators
    pub hairline: Color,
    /// Active wheel word, links
    pub accent: Color,
    /// Whether text sits on a dark page; drives project tint lightness
    pub dark: bool,
}

impl Default for Palette {
    fn default() -> Self {
        crate::themes::editorial::palette()
    }
}

impl Palette {
    /// Tint for a project card from its accent hue
    pub fn project_tint(&self, hue: u16) -> Color {
        let lightness = if self.dark { 0.62 } else { 0.42 };
        hsl_to_rgb(hue as f64, 0.55, lightness)
    }

    /// Page color with the accent mixed in, for subtle fills
    pub fn wash(&self, amount: f64) -> Color {
        blend(self.accent, self.page, amount)
    }
}

/// Mix `fg` over `bg` at `alpha`. Non-RGB colors are returned as-is when
/// alpha is at least one half, otherwise the background wins.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * a).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if a >= 0.5 => fg,
        _ => bg,
    }
}

/// HSL (degrees, 0-1, 0-1) to an RGB color
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round() as u8
    };

    Color::Rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}
