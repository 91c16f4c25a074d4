//! Build-time sizing of the video subsystem and its runtime defaults.

use crate::color::ColorCode;
use crate::offscreen::OFFSCREEN_BYTES_PER_PIXEL;
use crate::sysfont::{SYSFONT_HEIGHT_PX, SYSFONT_WIDTH_PX};

pub use crate::console::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE};
pub use crate::glyph::TAB_WIDTH;

/// Offscreen capacity. Larger displays are clipped to this region.
pub const MAX_VIDEO_WIDTH: usize = 800;
pub const MAX_VIDEO_HEIGHT: usize = 600;
pub const MAX_BYTES_PER_PIXEL: usize = OFFSCREEN_BYTES_PER_PIXEL;

/// Unscaled font cell.
pub const CHAR_WIDTH: usize = SYSFONT_WIDTH_PX;
pub const CHAR_HEIGHT: usize = SYSFONT_HEIGHT_PX;

/// Console grid, sized for font scale 1 on a full-capacity surface.
pub const GRID_WIDTH: usize = MAX_VIDEO_WIDTH / CHAR_WIDTH;
pub const GRID_HEIGHT: usize = MAX_VIDEO_HEIGHT / CHAR_HEIGHT;

/// Runtime knobs of a [`crate::video::VideoContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoConfig {
    /// Initial console font scale, `1..=MAX_FONT_SIZE`.
    pub default_font_size: usize,
    /// Initial console background.
    pub background: ColorCode,
    /// Push the offscreen buffer to hardware after every console operation.
    pub auto_flush: bool,
    /// Most verbose level the console logger prints.
    pub log_level: log::LevelFilter,
}

impl VideoConfig {
    pub const DEFAULT: Self = Self {
        default_font_size: DEFAULT_FONT_SIZE,
        background: ColorCode::BLACK,
        auto_flush: true,
        log_level: log::LevelFilter::Info,
    };
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
