//! Console side of the read and write system calls.

use crate::color::ColorCode;
use crate::video::VideoContext;

pub const STDIN: u64 = 0;
pub const STDOUT: u64 = 1;
pub const STDERR: u64 = 2;

const STDOUT_COLOR: ColorCode = ColorCode::from_packed(0xFFFFFF);
const STDERR_COLOR: ColorCode = ColorCode::from_packed(0xFF0000);

/// `write(fd, buf)`: stdout prints white, stderr red. Returns the number of bytes taken,
/// 0 for any other descriptor.
pub fn sys_write<const W: usize, const H: usize, const COLS: usize, const ROWS: usize>(
    video: &mut VideoContext<W, H, COLS, ROWS>,
    fd: u64,
    buf: &[u8],
) -> u64 {
    let color = match fd {
        STDOUT => STDOUT_COLOR,
        STDERR => STDERR_COLOR,
        _ => {
            log::trace!("write to unknown fd {}", fd);
            return 0;
        }
    };
    video.write(buf, color);
    buf.len() as u64
}

/// `read(fd, buf)`: there is no input source yet, nothing is ever read.
pub fn sys_read(_fd: u64, _buf: &mut [u8]) -> u64 {
    0
}
