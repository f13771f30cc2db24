//! Cell raster the particle field paints into.
//!
//! Each terminal cell holds a glyph with a coverage alpha plus a separate glow
//! channel that tints the cell background. The renderer turns alpha into a
//! color blend against the page color.

/// Alpha below which a cell is treated as empty
const EMPTY_ALPHA: f32 = 0.004;

/// Terminal area in cells, plus the virtual-pixel size of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        Self {
            cols,
            rows,
            cell_width: if cell_width > 0.0 { cell_width } else { 8.0 },
            cell_height: if cell_height > 0.0 { cell_height } else { 16.0 },
        }
    }

    /// Width in virtual pixels
    #[inline]
    pub fn width(&self) -> f64 {
        self.cols as f64 * self.cell_width
    }

    /// Height in virtual pixels
    #[inline]
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_height
    }

    /// Cell containing a virtual-pixel point, if on screen
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width) as u64;
        let row = (y / self.cell_height) as u64;
        (col < self.cols as u64 && row < self.rows as u64).then_some((col as u16, row as u16))
    }

    /// Virtual-pixel center of a cell
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterCell {
    pub glyph: char,
    pub alpha: f32,
    pub glow: f32,
}

impl Default for RasterCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            alpha: 0.0,
            glow: 0.0,
        }
    }
}

impl RasterCell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alpha < EMPTY_ALPHA && self.glow < EMPTY_ALPHA
    }
}

#[derive(Debug, Clone, Default)]
pub struct Raster {
    cols: u16,
    rows: u16,
    cells: Vec<RasterCell>,
}

impl Raster {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![RasterCell::default(); cols as usize * rows as usize],
        }
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Change dimensions; contents are discarded
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        *self = Self::new(cols, rows);
    }

    pub fn clear(&mut self) {
        self.cells.fill(RasterCell::default());
    }

    /// Keep `keep` of every cell's intensity, the terminal version of painting
    /// a translucent background over the previous frame
    pub fn fade(&mut self, keep: f64) {
        let keep = keep.clamp(0.0, 1.0) as f32;
        for cell in &mut self.cells {
            cell.alpha *= keep;
            cell.glow *= keep;
            if cell.alpha < EMPTY_ALPHA {
                cell.alpha = 0.0;
                cell.glyph = ' ';
            }
            if cell.glow < EMPTY_ALPHA {
                cell.glow = 0.0;
            }
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&RasterCell> {
        self.index(col as i32, row as i32).map(|i| &self.cells[i])
    }

    /// Composite a glyph over a cell. Off-raster coordinates are ignored.
    pub fn plot(&mut self, col: i32, row: i32, glyph: char, alpha: f64) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        let cell = &mut self.cells[i];
        let a = alpha.clamp(0.0, 1.0) as f32;
        cell.alpha = (cell.alpha + a * (1.0 - cell.alpha)).min(1.0);
        cell.glyph = glyph;
    }

    /// Add glow to a cell background
    pub fn glow(&mut self, col: i32, row: i32, amount: f64) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        let cell = &mut self.cells[i];
        let a = amount.clamp(0.0, 1.0) as f32;
        cell.glow = (cell.glow + a * (1.0 - cell.glow)).min(1.0);
    }

    /// Glow on a cell and a dimmer spill onto its four neighbours
    pub fn spill(&mut self, col: i32, row: i32, amount: f64) {
        self.glow(col, row, amount);
        let side = amount * 0.5;
        for (dc, dr) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            self.glow(col + dc, row + dr, side);
        }
    }

    /// Non-empty cells with their coordinates
    pub fn lit(&self) -> impl Iterator<Item = (u16, u16, &RasterCell)> {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            (!cell.is_empty()).then_some(((i % cols) as u16, (i / cols) as u16, cell))
        })
    }

    pub fn lit_count(&self) -> usize {
        self.lit().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_mapping() {
        let vp = Viewport::new(80, 24, 8.0, 16.0);
        assert_eq!(vp.width(), 640.0);
        assert_eq!(vp.height(), 384.0);
        assert_eq!(vp.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(vp.cell_at(17.0, 33.0), Some((2, 2)));
        assert_eq!(vp.cell_at(-1.0, 0.0), None);
        assert_eq!(vp.cell_at(640.0, 0.0), None);
        assert_eq!(vp.cell_center(1, 1), (12.0, 24.0));
    }

    #[test]
    fn test_plot_composites() {
        let mut r = Raster::new(4, 2);
        r.plot(1, 1, '•', 0.5);
        r.plot(1, 1, '·', 0.5);
        let cell = r.get(1, 1).unwrap();
        assert_eq!(cell.glyph, '·');
        assert!((cell.alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_off_raster_ignored() {
        let mut r = Raster::new(4, 2);
        r.plot(-1, 0, '•', 1.0);
        r.plot(4, 0, '•', 1.0);
        r.spill(0, 0, 0.4);
        assert_eq!(r.lit_count(), 3);
    }

    #[test]
    fn test_fade_and_clear() {
        let mut r = Raster::new(3, 3);
        r.plot(0, 0, '•', 1.0);
        r.fade(0.5);
        assert!((r.get(0, 0).unwrap().alpha - 0.5).abs() < 1e-6);
        for _ in 0..10 {
            r.fade(0.5);
        }
        assert_eq!(r.get(0, 0).unwrap().glyph, ' ');
        assert_eq!(r.lit_count(), 0);

        r.plot(2, 2, '•', 1.0);
        r.clear();
        assert_eq!(r.lit_count(), 0);
    }

    #[test]
    fn test_resize_discards() {
        let mut r = Raster::new(3, 3);
        r.plot(0, 0, '•', 1.0);
        r.resize(3, 3);
        assert_eq!(r.lit_count(), 1);
        r.resize(5, 2);
        assert_eq!((r.cols(), r.rows()), (5, 2));
        assert_eq!(r.lit_count(), 0);
    }
}
