use crate::color::ColorCode;
use crate::geometry::Rect2D;

/// Pixel layout of a byte-addressable surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Horizontal (drawable) pixel count.
    pub width: usize,
    /// Vertical (drawable) pixel count.
    pub height: usize,
    /// Bytes between the starts of two consecutive rows.
    pub pitch: usize,
    /// Bytes between two horizontally adjacent pixels.
    pub bytes_per_pixel: usize,
}

impl Geometry {
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        x * self.bytes_per_pixel + y * self.pitch
    }
}

/// A canvas over raw pixel bytes, also called a `PixelWriter`.
///
/// Every write is clipped to the geometry; out of range coordinates are dropped silently.
/// Pixels are stored B, G, R in the first three bytes of each pixel slot.
pub struct Canvas<'a> {
    bytes: &'a mut [u8],
    geometry: Geometry,
}

impl<'a> Canvas<'a> {
    /// `bytes` must cover `pitch * height` bytes of the geometry.
    pub fn new(bytes: &'a mut [u8], geometry: Geometry) -> Self {
        debug_assert!(geometry.bytes_per_pixel >= 3);
        debug_assert!(bytes.len() >= geometry.pitch * geometry.height);
        Self { bytes, geometry }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    /// Write a color code into specific pixel. No-op outside the surface.
    pub fn put_pixel(&mut self, c: ColorCode, x: usize, y: usize) {
        if !self.geometry.contains(x, y) {
            return;
        }
        let offset = self.geometry.offset(x, y);
        self.bytes[offset..offset + 3].copy_from_slice(&c.bgr());
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, c: ColorCode, x: usize, y: usize, w: usize, h: usize) {
        self.fill(c, Rect2D::new((x, y).into(), w, h));
    }

    #[inline]
    pub fn fill_square(&mut self, c: ColorCode, x: usize, y: usize, size: usize) {
        self.fill(c, Rect2D::square((x, y).into(), size));
    }

    fn fill(&mut self, c: ColorCode, rect: Rect2D) {
        let rect = rect.bound(self.geometry.width, self.geometry.height);
        if rect.is_empty() {
            return;
        }

        let bgr = c.bgr();
        let bpp = self.geometry.bytes_per_pixel;
        // row-major; the bound above already did the range check for every pixel.
        for row in rect.y_range() {
            let (start, end) = (
                self.geometry.offset(rect.x_range().start, row),
                self.geometry.offset(rect.x_range().end, row),
            );
            for pixel in self.bytes[start..end].chunks_exact_mut(bpp) {
                pixel[..3].copy_from_slice(&bgr);
            }
        }
    }

    /// Fill the whole surface.
    pub fn clear(&mut self, c: ColorCode) {
        let Geometry { width, height, pitch, bytes_per_pixel } = self.geometry;
        if width == 0 || height == 0 {
            return;
        }

        if c.is_gray() && bytes_per_pixel == 3 {
            // uniform byte fill; the span past `width` in each row is padding anyway.
            let end = (height - 1) * pitch + width * bytes_per_pixel;
            self.bytes[..end].fill(c.r);
        } else {
            self.fill_rect(c, 0, 0, width, height);
        }
    }

    /// Read back the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<ColorCode> {
        if !self.geometry.contains(x, y) {
            return None;
        }
        let offset = self.geometry.offset(x, y);
        let px = &self.bytes[offset..offset + 3];
        Some(ColorCode::rgb(px[2], px[1], px[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: Geometry = Geometry { width: 4, height: 3, pitch: 16, bytes_per_pixel: 3 };

    #[test]
    fn put_pixel_writes_bgr_at_pitch_offset() {
        let mut bytes = [0u8; 48];
        let mut canvas = Canvas::new(&mut bytes, GEOMETRY);
        canvas.put_pixel(ColorCode::from(0x112233), 2, 1);
        assert_eq!(&bytes[22..25], &[0x33, 0x22, 0x11]);
        assert_eq!(bytes.iter().filter(|&&b| b != 0).count(), 3);
    }

    #[test]
    fn put_pixel_outside_is_dropped() {
        let mut bytes = [0u8; 48];
        let mut canvas = Canvas::new(&mut bytes, GEOMETRY);
        canvas.put_pixel(ColorCode::WHITE, 4, 0);
        canvas.put_pixel(ColorCode::WHITE, 0, 3);
        canvas.put_pixel(ColorCode::WHITE, usize::MAX, usize::MAX);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut bytes = [0u8; 48];
        let mut canvas = Canvas::new(&mut bytes, GEOMETRY);
        canvas.fill_rect(ColorCode::RED, 2, 1, 10, 10);
        for y in 0..3 {
            for x in 0..4 {
                let expect = if x >= 2 && y >= 1 { ColorCode::RED } else { ColorCode::BLACK };
                assert_eq!(canvas.pixel(x, y), Some(expect), "pixel ({x}, {y})");
            }
        }
        // row padding stays untouched
        assert!(bytes[12..16].iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_gray_and_color() {
        let mut bytes = [0u8; 48];
        let mut canvas = Canvas::new(&mut bytes, GEOMETRY);
        canvas.clear(ColorCode::GRAY);
        assert_eq!(canvas.pixel(3, 2), Some(ColorCode::GRAY));
        canvas.clear(ColorCode::CYAN);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), Some(ColorCode::CYAN));
            }
        }
    }

    #[test]
    fn four_byte_pixels_keep_padding_byte() {
        let geometry = Geometry { width: 2, height: 1, pitch: 8, bytes_per_pixel: 4 };
        let mut bytes = [0xAAu8; 8];
        let mut canvas = Canvas::new(&mut bytes, geometry);
        canvas.clear(ColorCode::WHITE);
        assert_eq!(bytes, [0xFF, 0xFF, 0xFF, 0xAA, 0xFF, 0xFF, 0xFF, 0xAA]);
    }
}
