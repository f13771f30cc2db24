use flaio_core::Raster;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use crate::theme::{blend, Palette};

/// Paints the particle raster onto the page background
pub struct ParticleLayer<'a> {
    raster: &'a Raster,
    page: Color,
    color: Color,
}

impl<'a> ParticleLayer<'a> {
    pub fn new(raster: &'a Raster, palette: &Palette, color: [u8; 3]) -> Self {
        Self {
            raster,
            page: palette.page,
            color: Color::Rgb(color[0], color[1], color[2]),
        }
    }
}

impl Widget for ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (col, row, cell) in self.raster.lit() {
            if col >= area.width || row >= area.height {
                continue;
            }
            let Some(target) = buf.cell_mut(Position::new(area.x + col, area.y + row)) else {
                continue;
            };
            if cell.glow > 0.0 {
                let glow = (cell.glow as f64 * 0.5).min(0.5);
                target.set_bg(blend(self.color, self.page, glow));
            }
            if cell.glyph != ' ' && cell.alpha > 0.0 {
                target
                    .set_char(cell.glyph)
                    .set_fg(blend(self.color, self.page, cell.alpha as f64));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_cells_are_blended() {
        let mut raster = Raster::new(4, 2);
        raster.plot(1, 1, '•', 1.0);
        let palette = Palette {
            page: Color::Rgb(0, 0, 0),
            ..Palette::default()
        };
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        ParticleLayer::new(&raster, &palette, [200, 100, 50]).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "•");
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(200, 100, 50));
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_clipped_to_area() {
        let mut raster = Raster::new(8, 8);
        raster.plot(7, 7, '•', 1.0);
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        ParticleLayer::new(&raster, &Palette::default(), [255, 255, 255]).render(area, &mut buf);
        assert!(buf.content.iter().all(|c| c.symbol() == " "));
    }
}
