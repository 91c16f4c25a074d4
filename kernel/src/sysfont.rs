//! The system bitmap font.
//!
//! One glyph per single-byte character code. Each glyph is `SYSFONT_HEIGHT_PX` row bitmasks,
//! and in every row **bit 0 is the leftmost pixel**. The backing `font8x8` tables use the same
//! order, so rows are consumed as-is.

use font8x8::legacy::{BASIC_LEGACY, LATIN_LEGACY};

pub const SYSFONT_WIDTH_PX: usize = 8;
pub const SYSFONT_HEIGHT_PX: usize = 8;

pub type Glyph = [u8; SYSFONT_HEIGHT_PX];

const BLANK: Glyph = [0; SYSFONT_HEIGHT_PX];

/// Glyph for a character code.
///
/// 0x00..=0x7F are basic latin, 0xA0..=0xFF the latin-1 supplement.
/// The C1 control range has no glyph and renders blank.
pub fn glyph(ch: u8) -> Glyph {
    match ch {
        0x00..=0x7F => BASIC_LEGACY[ch as usize],
        0xA0..=0xFF => LATIN_LEGACY[(ch - 0xA0) as usize],
        _ => BLANK,
    }
}

/// Whether column `col` (0 = leftmost) of `row` is set.
#[inline]
pub fn is_set(row: u8, col: usize) -> bool {
    (row >> col) & 1 != 0
}
