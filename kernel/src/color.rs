/// Color code, decomposed into 8-bit channels. There is no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorCode {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorCode {
    /// Construct a color code with given RGB.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decompose a packed `0xRRGGBB` value. Bits above 23 are ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Bytes in framebuffer order. The hardware stores pixels little-endian, blue first.
    pub const fn bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Whether every channel holds the same value, so a pixel run is a uniform byte fill.
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub const BLACK  : Self = Self::rgb(0, 0, 0);
    pub const RED    : Self = Self::rgb(255, 0, 0);
    pub const GREEN  : Self = Self::rgb(0, 255, 0);
    pub const BLUE   : Self = Self::rgb(0, 0, 255);
    pub const CYAN   : Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const YELLOW : Self = Self::rgb(255, 255, 0);
    pub const WHITE  : Self = Self::rgb(255, 255, 255);

    pub const GRAY   : Self = Self::rgb(127, 127, 127);
}

impl From<u32> for ColorCode {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}

impl From<ColorCode> for u32 {
    fn from(c: ColorCode) -> Self {
        c.packed()
    }
}

/// Pack three channels into `0xRRGGBB`.
pub const fn rgb_to_packed(r: u8, g: u8, b: u8) -> u32 {
    ColorCode::rgb(r, g, b).packed()
}

/// Split `0xRRGGBB` into its channels.
pub const fn packed_to_rgb(packed: u32) -> ColorCode {
    ColorCode::from_packed(packed)
}
