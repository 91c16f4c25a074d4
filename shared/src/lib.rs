#![cfg_attr(not(test), no_std)]

//! Types handed from the bootloader to the kernel.

pub mod video_mode;

pub use video_mode::{VideoModeInfo, VBE_MODE_INFO_ADDR};
