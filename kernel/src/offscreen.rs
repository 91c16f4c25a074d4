use crate::canvas::{Canvas, Geometry};
use crate::screen::Screen;

/// Bytes per pixel of the offscreen copy: packed B, G, R.
pub const OFFSCREEN_BYTES_PER_PIXEL: usize = 3;

type Pixel = [u8; OFFSCREEN_BYTES_PER_PIXEL];

/// In-memory mirror of the visible region.
///
/// Capacity is `W x H` pixels. The drawable (effective) region is the component-wise minimum of
/// that capacity and the attached display; anything beyond it is silently clipped.
/// Every drawing access marks the buffer dirty, and only [`OffscreenBuffer::flush`] clears it.
pub struct OffscreenBuffer<const W: usize, const H: usize> {
    pixels: [[Pixel; W]; H],
    width: usize,
    height: usize,
    dirty: bool,
}

impl<const W: usize, const H: usize> OffscreenBuffer<W, H> {
    /// A black buffer whose effective region is the full capacity.
    pub const fn new() -> Self {
        Self {
            pixels: [[[0; OFFSCREEN_BYTES_PER_PIXEL]; W]; H],
            width: W,
            height: H,
            dirty: false,
        }
    }

    pub const fn capacity(&self) -> (usize, usize) {
        (W, H)
    }

    /// Effective drawable size.
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clip the effective region to a display of `hor_res x ver_res` pixels.
    pub fn fit_to(&mut self, hor_res: usize, ver_res: usize) {
        self.width = hor_res.min(W);
        self.height = ver_res.min(H);
        self.dirty = true;
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height,
            pitch: W * OFFSCREEN_BYTES_PER_PIXEL,
            bytes_per_pixel: OFFSCREEN_BYTES_PER_PIXEL,
        }
    }

    /// Borrow the buffer for drawing. Marks it dirty, whether or not anything lands.
    pub fn canvas(&mut self) -> Canvas<'_> {
        self.dirty = true;
        let geometry = self.geometry();
        Canvas::new(self.pixels.as_flattened_mut().as_flattened_mut(), geometry)
    }

    /// Raw bytes, row stride `W * 3`.
    pub fn bytes(&self) -> &[u8] {
        self.pixels.as_flattened().as_flattened()
    }

    /// Push the effective region to the screen if anything was drawn since the last flush.
    ///
    /// Returns whether a copy took place. Costs O(1) when the buffer is clean.
    pub fn flush(&mut self, screen: &mut Screen) -> bool {
        if !self.dirty {
            return false;
        }
        let Geometry { width, height, pitch, .. } = self.geometry();
        screen.present(self.pixels.as_flattened().as_flattened(), pitch, width, height);
        self.dirty = false;
        true
    }
}

impl<const W: usize, const H: usize> Default for OffscreenBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorCode;
    use crate::screen::tests::leaked_screen;

    #[test]
    fn drawing_marks_dirty_and_flush_clears() {
        let mut buffer = Box::new(OffscreenBuffer::<16, 8>::new());
        let mut screen = leaked_screen(16, 8, 24);
        assert!(!buffer.is_dirty());

        buffer.canvas().put_pixel(ColorCode::WHITE, 1, 1);
        assert!(buffer.is_dirty());
        assert!(buffer.flush(&mut screen));
        assert!(!buffer.is_dirty());
        assert!(!buffer.flush(&mut screen));
    }

    #[test]
    fn clipped_draw_still_marks_dirty_but_changes_nothing() {
        let mut buffer = Box::new(OffscreenBuffer::<16, 8>::new());
        buffer.fit_to(10, 4);
        let mut screen = leaked_screen(10, 4, 24);
        buffer.flush(&mut screen);

        buffer.canvas().put_pixel(ColorCode::WHITE, 12, 1);
        buffer.canvas().put_pixel(ColorCode::WHITE, 1, 6);
        assert!(buffer.is_dirty());
        assert!(buffer.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn effective_region_is_min_of_display_and_capacity() {
        let mut buffer = Box::new(OffscreenBuffer::<16, 8>::new());
        assert_eq!(buffer.size(), (16, 8));
        buffer.fit_to(1024, 4);
        assert_eq!(buffer.size(), (16, 4));
        assert_eq!(buffer.capacity(), (16, 8));
    }

    #[test]
    fn flush_copies_to_screen() {
        let mut buffer = Box::new(OffscreenBuffer::<16, 8>::new());
        buffer.fit_to(12, 8);
        let mut screen = leaked_screen(12, 8, 24);

        buffer.canvas().fill_rect(ColorCode::from(0x102030), 2, 3, 4, 2);
        assert!(buffer.flush(&mut screen));

        let hw = screen.bytes();
        let pitch = 12 * 3;
        assert_eq!(&hw[3 * pitch + 2 * 3..3 * pitch + 3 * 3], &[0x30, 0x20, 0x10]);
        assert_eq!(&hw[0..3], &[0, 0, 0]);
    }
}
