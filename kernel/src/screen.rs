use shared::VideoModeInfo;

use core::fmt;

/// How the hardware packs one pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24-bit, B G R.
    Bgr24,
    /// 32-bit, B G R and one unused byte.
    Bgrx32,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgr24 => 3,
            PixelFormat::Bgrx32 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    /// The mode reports no linear framebuffer address.
    NullFramebuffer,
    /// The mode attributes do not advertise a linear framebuffer.
    NoLinearFramebuffer,
    /// Only 24 and 32 bits per pixel are drawn.
    UnsupportedDepth(u8),
    /// A row is shorter than `width * bytes_per_pixel`.
    PitchTooSmall { pitch: usize, width: usize },
    /// The backing memory cannot hold `pitch * height` bytes.
    BufferTooSmall { needed: usize, actual: usize },
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::NullFramebuffer => write!(f, "mode has no linear framebuffer address"),
            ScreenError::NoLinearFramebuffer => write!(f, "mode is not linear framebuffer capable"),
            ScreenError::UnsupportedDepth(bpp) => write!(f, "unsupported depth: {} bpp", bpp),
            ScreenError::PitchTooSmall { pitch, width } => {
                write!(f, "pitch {} too small for {} pixels", pitch, width)
            }
            ScreenError::BufferTooSmall { needed, actual } => {
                write!(f, "framebuffer holds {} bytes, mode needs {}", actual, needed)
            }
        }
    }
}

/// A screen model wrapping the physical frame buffer and its mode.
pub struct Screen {
    /// The frame buffer memory.
    bytes: &'static mut [u8],
    /// Bytes per scanline.
    pitch: usize,
    /// Horizontal (displayed) pixel count.
    hor_res: usize,
    /// Vertical (displayed) pixel count.
    ver_res: usize,
    format: PixelFormat,
}

impl Screen {
    /// Wrap framebuffer memory laid out as `mode` describes.
    pub fn new(bytes: &'static mut [u8], mode: &VideoModeInfo) -> Result<Self, ScreenError> {
        if !mode.has_linear_framebuffer() {
            return Err(ScreenError::NoLinearFramebuffer);
        }
        let format = match mode.bits_per_pixel() {
            24 => PixelFormat::Bgr24,
            32 => PixelFormat::Bgrx32,
            bpp => return Err(ScreenError::UnsupportedDepth(bpp)),
        };
        let (pitch, hor_res, ver_res) = (mode.pitch(), mode.width(), mode.height());

        if pitch < hor_res * format.bytes_per_pixel() {
            return Err(ScreenError::PitchTooSmall { pitch, width: hor_res });
        }
        let needed = pitch * ver_res;
        if bytes.len() < needed {
            return Err(ScreenError::BufferTooSmall { needed, actual: bytes.len() });
        }

        Ok(Self { bytes, pitch, hor_res, ver_res, format })
    }

    /// Map the physical framebuffer named by `mode`.
    ///
    /// # Safety
    /// The framebuffer must be identity mapped and not aliased by any other live reference.
    pub unsafe fn from_mode_info(mode: &VideoModeInfo) -> Result<Self, ScreenError> {
        if !mode.has_linear_framebuffer() {
            return Err(ScreenError::NoLinearFramebuffer);
        }
        if mode.framebuffer_addr() == 0 {
            return Err(ScreenError::NullFramebuffer);
        }
        let len = mode.pitch() * mode.height();
        let bytes = core::slice::from_raw_parts_mut(mode.framebuffer_addr() as *mut u8, len);
        Self::new(bytes, mode)
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.hor_res, self.ver_res)
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Current framebuffer contents.
    pub fn bytes(&self) -> &[u8] {
        self.bytes
    }

    /// Copy packed B, G, R rows onto the display, clipped to the resolution.
    pub fn present(&mut self, src: &[u8], src_pitch: usize, width: usize, height: usize) {
        let width = width.min(self.hor_res);
        let height = height.min(self.ver_res);
        let row_bytes = width * 3;

        match self.format {
            PixelFormat::Bgr24 if src_pitch == self.pitch => {
                // same layout, one bulk copy.
                if height > 0 {
                    let len = (height - 1) * self.pitch + row_bytes;
                    self.bytes[..len].copy_from_slice(&src[..len]);
                }
            }
            PixelFormat::Bgr24 => {
                for y in 0..height {
                    let (s, d) = (y * src_pitch, y * self.pitch);
                    self.bytes[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
                }
            }
            PixelFormat::Bgrx32 => {
                for y in 0..height {
                    let (s, d) = (y * src_pitch, y * self.pitch);
                    let src_row = src[s..s + row_bytes].chunks_exact(3);
                    let dst_row = self.bytes[d..d + width * 4].chunks_exact_mut(4);
                    for (dst, px) in dst_row.zip(src_row) {
                        dst[..3].copy_from_slice(px);
                    }
                }
            }
        }
    }
}
