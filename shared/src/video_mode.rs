use core::ptr::NonNull;
use volatile::VolatilePtr;

/// Physical address where the bootloader leaves the VBE mode information block.
pub const VBE_MODE_INFO_ADDR: usize = 0x5C00;

/// Raw VBE mode information block, as filled in by the BIOS call the bootloader makes.
///
/// Field order and packing byte-match the firmware layout (256 bytes, no padding).
/// Only pitch, width, height, bpp and the framebuffer address are consumed by the kernel.
#[derive(Copy, Clone)]
#[repr(C, packed)]
pub struct VideoModeInfo {
    /// bit 7 indicates the mode supports a linear frame buffer.
    attributes: u16,
    window_a: u8,
    window_b: u8,
    granularity: u16,
    window_size: u16,
    segment_a: u16,
    segment_b: u16,
    win_func_ptr: u32,
    /// How many bytes of VRAM you should skip to go one pixel down.
    pitch: u16,
    /// How many pixels you have on a horizontal line.
    width: u16,
    /// How many horizontal lines of pixels are present.
    height: u16,
    w_char: u8,
    y_char: u8,
    planes: u8,
    /// How many bits each pixel takes.
    bpp: u8,
    banks: u8,
    memory_model: u8,
    bank_size: u8,
    image_pages: u8,
    reserved0: u8,

    red_mask: u8,
    red_position: u8,
    green_mask: u8,
    green_position: u8,
    blue_mask: u8,
    blue_position: u8,
    reserved_mask: u8,
    reserved_position: u8,
    direct_color_attributes: u8,

    /// Physical address of the linear frame buffer.
    framebuffer: u32,
    off_screen_mem_off: u32,
    off_screen_mem_size: u16,
    reserved1: [u8; 206],
}

const _: () = assert!(core::mem::size_of::<VideoModeInfo>() == 256);
const _: () = assert!(VBE_MODE_INFO_ADDR != 0);

const LINEAR_FRAMEBUFFER_BIT: u16 = 1 << 7;

impl VideoModeInfo {
    /// Synthesize a mode record, e.g. for an emulated display.
    ///
    /// Every field not named here is zero, except the linear framebuffer attribute.
    pub const fn new(width: u16, height: u16, pitch: u16, bpp: u8, framebuffer: u32) -> Self {
        Self {
            attributes: LINEAR_FRAMEBUFFER_BIT,
            window_a: 0,
            window_b: 0,
            granularity: 0,
            window_size: 0,
            segment_a: 0,
            segment_b: 0,
            win_func_ptr: 0,
            pitch,
            width,
            height,
            w_char: 0,
            y_char: 0,
            planes: 1,
            bpp,
            banks: 0,
            memory_model: 0,
            bank_size: 0,
            image_pages: 0,
            reserved0: 0,
            red_mask: 8,
            red_position: 16,
            green_mask: 8,
            green_position: 8,
            blue_mask: 8,
            blue_position: 0,
            reserved_mask: 0,
            reserved_position: 0,
            direct_color_attributes: 0,
            framebuffer,
            off_screen_mem_off: 0,
            off_screen_mem_size: 0,
            reserved1: [0; 206],
        }
    }

    /// Read the record from the given physical address.
    ///
    /// # Safety
    /// `addr` must be non-null, identity mapped, and hold a record populated by the firmware.
    pub unsafe fn read_from(addr: usize) -> Option<Self> {
        NonNull::new(addr as *mut VideoModeInfo).map(|ptr| Self::read_ptr(ptr))
    }

    /// Read the record the bootloader left at [`VBE_MODE_INFO_ADDR`].
    ///
    /// # Safety
    /// Low memory must be identity mapped and the bootloader must have run the mode-info BIOS call.
    pub unsafe fn read_firmware() -> Self {
        // non-zero, checked at compile time above
        Self::read_ptr(NonNull::new_unchecked(VBE_MODE_INFO_ADDR as *mut VideoModeInfo))
    }

    unsafe fn read_ptr(ptr: NonNull<VideoModeInfo>) -> Self {
        // the record is owned by firmware memory, copy it out in one volatile read.
        VolatilePtr::new_read_only(ptr).read()
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn pitch(&self) -> usize {
        self.pitch as usize
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.bpp
    }

    /// How many bytes of VRAM you should skip to go one pixel right.
    pub fn bytes_per_pixel(&self) -> usize {
        self.bpp as usize / 8
    }

    pub fn framebuffer_addr(&self) -> usize {
        self.framebuffer as usize
    }

    pub fn has_linear_framebuffer(&self) -> bool {
        self.attributes & LINEAR_FRAMEBUFFER_BIT != 0
    }
}

impl core::fmt::Debug for VideoModeInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VideoModeInfo")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pitch", &self.pitch())
            .field("bpp", &self.bits_per_pixel())
            .field("framebuffer", &format_args!("{:#x}", self.framebuffer_addr()))
            .finish()
    }
}
