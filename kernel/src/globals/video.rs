//! The kernel's video singleton and its interrupt-safe entry points.
//!
//! Every function here runs with interrupts masked, so a handler can never observe the console
//! mid-update nor spin on a lock held by the code it interrupted.

use crate::color::ColorCode;
use crate::config::VideoConfig;
use crate::screen::{Screen, ScreenError};
use crate::syscall;
use crate::video::KernelVideo;
use shared::VideoModeInfo;

use core::fmt::Arguments;
use spin::mutex::Mutex;

use x86_64::instructions::interrupts::without_interrupts;

// const construction keeps the offscreen buffer out of the boot stack.
pub static VIDEO: Mutex<KernelVideo> = Mutex::new(KernelVideo::new(VideoConfig::DEFAULT));

/// Attach the framebuffer the firmware left at [`shared::VBE_MODE_INFO_ADDR`].
///
/// On failure the console keeps buffering offscreen.
pub fn init() -> Result<(), ScreenError> {
    // SAFETY: the loader fills the mode record before the kernel starts, and the framebuffer is
    // identity mapped and only ever touched through `VIDEO`.
    let mode = unsafe { VideoModeInfo::read_firmware() };
    let screen = unsafe { Screen::from_mode_info(&mode) }?;
    with_video(|video| video.attach(screen));
    log::info!("video: {:?}", mode);
    Ok(())
}

fn with_video<R>(f: impl FnOnce(&mut KernelVideo) -> R) -> R {
    without_interrupts(|| {
        let ret = f(&mut VIDEO.lock());
        super::logger::print_pending();
        ret
    })
}

pub fn write(data: &[u8], c: ColorCode) {
    with_video(|video| video.write(data, c));
}

pub fn clear(c: ColorCode) {
    with_video(|video| video.clear(c));
}

pub fn set_font_size(font_size: usize) -> bool {
    with_video(|video| video.set_font_size(font_size))
}

pub fn redraw() {
    with_video(|video| video.redraw());
}

pub fn flush() -> bool {
    with_video(|video| video.flush())
}

pub fn put_pixel(c: ColorCode, x: usize, y: usize) {
    with_video(|video| video.put_pixel(c, x, y));
}

pub fn draw_rect(c: ColorCode, x: usize, y: usize, w: usize, h: usize) {
    with_video(|video| video.draw_rect(c, x, y, w, h));
}

pub fn draw_square(c: ColorCode, x: usize, y: usize, size: usize) {
    with_video(|video| video.draw_square(c, x, y, size));
}

pub fn draw_char(ch: u8, x: usize, y: usize, c: ColorCode) {
    with_video(|video| video.draw_char(ch, x, y, c));
}

pub fn draw_string(s: &[u8], x: usize, y: usize, c: ColorCode) {
    with_video(|video| video.draw_string(s, x, y, c));
}

/// Entry point of the write system call.
pub fn sys_write(fd: u64, buf: &[u8]) -> u64 {
    with_video(|video| syscall::sys_write(video, fd, buf))
}

pub fn _video_print(args: Arguments) {
    _video_print_colored(args, ColorCode::WHITE);
}

pub fn _video_print_colored(args: Arguments, c: ColorCode) {
    // the console itself never fails to take text.
    let _ = with_video(|video| video.write_fmt_colored(args, c));
}

#[macro_export]
macro_rules! video_print {
    ($($arg:tt)*) => ($crate::globals::video::_video_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! video_println {
    () => ($crate::video_print!("\n"));
    ($($arg:tt)*) => ($crate::video_print!("{}\n", format_args!($($arg)*)));
}
