//! Scaled glyph rasterization onto a [`Canvas`].

use crate::canvas::Canvas;
use crate::color::ColorCode;
use crate::sysfont::{self, SYSFONT_HEIGHT_PX, SYSFONT_WIDTH_PX};

/// Tab stops are this many character cells apart.
pub const TAB_WIDTH: usize = 4;

/// Pixel width of one character cell at `font_size`.
#[inline]
pub const fn font_width(font_size: usize) -> usize {
    font_size * SYSFONT_WIDTH_PX
}

/// Pixel height of one character cell at `font_size`.
#[inline]
pub const fn font_height(font_size: usize) -> usize {
    font_size * SYSFONT_HEIGHT_PX
}

/// Draw `ch` with its left top corner at `(x, y)`.
///
/// Every set font bit becomes a `font_size` square; unset bits leave the background alone.
pub fn draw_char(canvas: &mut Canvas, ch: u8, x: usize, y: usize, c: ColorCode, font_size: usize) {
    let bmp = sysfont::glyph(ch);
    for (row, &bits) in bmp.iter().enumerate() {
        if bits == 0 {
            continue;
        }
        for col in 0..SYSFONT_WIDTH_PX {
            if sysfont::is_set(bits, col) {
                canvas.fill_square(
                    c,
                    x.saturating_add(col * font_size),
                    y.saturating_add(row * font_size),
                    font_size,
                );
            }
        }
    }
}

/// Draw a label immediately, outside of any console bookkeeping.
///
/// `\n` moves to the next text row at the starting column, `\r` returns to the starting column,
/// `\t` skips [`TAB_WIDTH`] cells and `\b` steps back one cell but never left of `x`.
pub fn draw_string(canvas: &mut Canvas, s: &[u8], x: usize, y: usize, c: ColorCode, font_size: usize) {
    let fw = font_width(font_size);
    let fh = font_height(font_size);
    let (mut px, mut py) = (x, y);

    for &ch in s {
        match ch {
            b'\n' => {
                px = x;
                py = py.saturating_add(fh);
            }
            b'\r' => px = x,
            b'\t' => px = px.saturating_add(TAB_WIDTH * fw),
            0x08 => px = px.saturating_sub(fw).max(x),
            ch => {
                draw_char(canvas, ch, px, py, c, font_size);
                px = px.saturating_add(fw);
            }
        }
    }
}
