//! In-memory RGBA raster that biome maps are drawn into.

/// Opaque-by-default RGBA8 raster, rows top to bottom.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// `width * height` texels of four bytes each, ready for `image::RgbaImage::from_raw`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Blank (all-zero, transparent) raster.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        4 * (x as usize + y as usize * self.width as usize)
    }

    /// Paint texel `(x, y)` with an opaque colour. Panics when out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, (r, g, b): (u8, u8, u8)) {
        let at = self.offset(x, y);
        self.pixels[at..at + 4].copy_from_slice(&[r, g, b, u8::MAX]);
    }

    /// Texel `(x, y)` as `[r, g, b, a]`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let at = self.offset(x, y);
        [
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ]
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Distinct RGB colours present; a biome map has at most one per category.
    pub fn distinct_colors(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|texel| [texel[0], texel[1], texel[2]])
            .collect::<hashbrown::HashSet<_>>()
            .len()
    }
}
