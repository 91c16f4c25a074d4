#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod geometry;
pub mod canvas;
mod sysfont;
pub mod glyph;
pub mod offscreen;
pub mod screen;
pub mod console;
pub mod config;
pub mod video;
pub mod syscall;
pub mod log_queue;

#[cfg(target_arch = "x86_64")]
pub mod globals;

pub use color::{packed_to_rgb, rgb_to_packed, ColorCode};
pub use config::VideoConfig;
pub use console::{Console, TextCell};
pub use offscreen::OffscreenBuffer;
pub use screen::{PixelFormat, Screen, ScreenError};
pub use video::{KernelVideo, VideoContext};
