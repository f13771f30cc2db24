use image::{DynamicImage, GenericImageView};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

/// Image drawn with upper half blocks, two pixels per cell
pub struct HalfblockImage<'a> {
    image: &'a DynamicImage,
}

impl<'a> HalfblockImage<'a> {
    pub fn new(image: &'a DynamicImage) -> Self {
        Self { image }
    }
}

impl Widget for HalfblockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        // Each character cell represents 2 vertical pixels
        let target_width = area.width as u32;
        let target_height = (area.height as u32) * 2;

        // Calculate aspect-ratio preserving dimensions
        let (img_width, img_height) = self.image.dimensions();
        if img_width == 0 || img_height == 0 {
            return;
        }
        let scale_w = target_width as f32 / img_width as f32;
        let scale_h = target_height as f32 / img_height as f32;
        let scale = scale_w.min(scale_h);

        let new_width = ((img_width as f32 * scale) as u32).clamp(1, target_width);
        let new_height = ((img_height as f32 * scale) as u32).clamp(1, target_height);

        let resized = self.image.resize_exact(
            new_width,
            new_height,
            image::imageops::FilterType::Triangle,
        );
        let rgba = resized.to_rgba8();

        // Center the image
        let x_offset = (target_width - new_width) / 2;
        let rows = new_height.div_ceil(2);
        let y_offset = (area.height as u32).saturating_sub(rows) / 2;

        for row in 0..rows {
            let y = row * 2;
            for x in 0..new_width {
                let top = rgba.get_pixel(x, y);
                let bottom = if y + 1 < new_height {
                    rgba.get_pixel(x, y + 1)
                } else {
                    top
                };
                let position = Position::new(
                    area.x + (x_offset + x) as u16,
                    area.y + (y_offset + row) as u16,
                );
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char('▀')
                        .set_fg(Color::Rgb(top[0], top[1], top[2]))
                        .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn test_two_pixels_per_cell() {
        let mut img = RgbImage::new(4, 4);
        for (_, y, px) in img.enumerate_pixels_mut() {
            *px = if y < 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) };
        }
        let image = DynamicImage::ImageRgb8(img);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        HalfblockImage::new(&image).render(area, &mut buf);

        let top = &buf[(0, 0)];
        assert_eq!(top.symbol(), "▀");
        assert_eq!(top.fg, Color::Rgb(255, 0, 0));
        let bottom = &buf[(0, 1)];
        assert_eq!(bottom.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_empty_area_is_noop() {
        let image = DynamicImage::new_rgb8(2, 2);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        HalfblockImage::new(&image).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
