use crate::color::ColorCode;
use crate::config::{VideoConfig, GRID_HEIGHT, GRID_WIDTH, MAX_VIDEO_HEIGHT, MAX_VIDEO_WIDTH};
use crate::console::Console;
use crate::glyph;
use crate::offscreen::OffscreenBuffer;
use crate::screen::Screen;

use core::fmt;

/// The video subsystem instance used by the kernel: an 800x600 offscreen buffer and a 100x75 grid.
pub type KernelVideo = VideoContext<MAX_VIDEO_WIDTH, MAX_VIDEO_HEIGHT, GRID_WIDTH, GRID_HEIGHT>;

/// One rendering context: the offscreen buffer, the text console drawn into it, and the
/// hardware screen it is flushed to.
///
/// Console output and the immediate-mode primitives share the offscreen buffer but nothing else;
/// primitives never touch the grid or the cursor, and a later console replay paints over them.
pub struct VideoContext<const W: usize, const H: usize, const COLS: usize, const ROWS: usize> {
    offscreen: OffscreenBuffer<W, H>,
    console: Console<COLS, ROWS>,
    screen: Option<Screen>,
    config: VideoConfig,
}

impl<const W: usize, const H: usize, const COLS: usize, const ROWS: usize> VideoContext<W, H, COLS, ROWS> {
    /// A detached context. Drawing lands in the offscreen buffer until a screen is attached.
    pub const fn new(config: VideoConfig) -> Self {
        Self {
            offscreen: OffscreenBuffer::new(),
            console: Console::new(config.default_font_size, config.background),
            screen: None,
            config,
        }
    }

    /// Start presenting on `screen`, replacing any previous one.
    ///
    /// The drawable region shrinks to what the screen can show, the grid is replayed into it and
    /// the result pushed out at once.
    pub fn attach(&mut self, screen: Screen) -> Option<Screen> {
        let (hor_res, ver_res) = screen.resolution();
        self.offscreen.fit_to(hor_res, ver_res);
        let (width, height) = self.offscreen.size();
        log::debug!(
            "video: attached {}x{} {:?}, drawing {}x{}",
            hor_res, ver_res, screen.format(), width, height
        );

        let previous = self.screen.replace(screen);
        self.console.redraw(&mut self.offscreen.canvas());
        self.flush();
        previous
    }

    pub fn is_attached(&self) -> bool {
        self.screen.is_some()
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn console(&self) -> &Console<COLS, ROWS> {
        &self.console
    }

    pub fn offscreen(&self) -> &OffscreenBuffer<W, H> {
        &self.offscreen
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Print `data` on the console in color `c`.
    pub fn write(&mut self, data: &[u8], c: ColorCode) {
        self.console.write(&mut self.offscreen.canvas(), data, c);
        self.auto_flush();
    }

    /// Format `args` onto the console in color `c`, flushing once at the end.
    pub fn write_fmt_colored(&mut self, args: fmt::Arguments, c: ColorCode) -> fmt::Result {
        let console = &mut self.console;
        let mut canvas = self.offscreen.canvas();
        fmt::write(&mut Pen(|s: &str| console.write(&mut canvas, s.as_bytes(), c)), args)?;
        self.auto_flush();
        Ok(())
    }

    /// Blank the console and the screen with `c`, which becomes the console background.
    pub fn clear(&mut self, c: ColorCode) {
        self.console.clear(&mut self.offscreen.canvas(), c);
        self.auto_flush();
    }

    /// Change the console font scale. Returns false, changing nothing, when out of range.
    pub fn set_font_size(&mut self, font_size: usize) -> bool {
        let accepted = self.console.set_font_size(&mut self.offscreen.canvas(), font_size);
        self.auto_flush();
        accepted
    }

    /// Repaint the whole console from its grid.
    pub fn redraw(&mut self) {
        self.console.redraw(&mut self.offscreen.canvas());
        self.auto_flush();
    }

    /// Push pending offscreen changes to the screen.
    ///
    /// Returns whether a copy took place: never while detached, and never twice for one change.
    pub fn flush(&mut self) -> bool {
        match self.screen.as_mut() {
            Some(screen) => self.offscreen.flush(screen),
            None => false,
        }
    }

    fn auto_flush(&mut self) {
        if self.config.auto_flush {
            self.flush();
        }
    }

    pub fn put_pixel(&mut self, c: ColorCode, x: usize, y: usize) {
        self.offscreen.canvas().put_pixel(c, x, y);
    }

    pub fn draw_rect(&mut self, c: ColorCode, x: usize, y: usize, w: usize, h: usize) {
        self.offscreen.canvas().fill_rect(c, x, y, w, h);
    }

    pub fn draw_square(&mut self, c: ColorCode, x: usize, y: usize, size: usize) {
        self.offscreen.canvas().fill_square(c, x, y, size);
    }

    /// Draw one character at pixel `(x, y)` at the console's font scale.
    pub fn draw_char(&mut self, ch: u8, x: usize, y: usize, c: ColorCode) {
        let font_size = self.console.font_size();
        glyph::draw_char(&mut self.offscreen.canvas(), ch, x, y, c, font_size);
    }

    /// Draw a label at pixel `(x, y)` at the console's font scale, bypassing the console.
    pub fn draw_string(&mut self, s: &[u8], x: usize, y: usize, c: ColorCode) {
        let font_size = self.console.font_size();
        glyph::draw_string(&mut self.offscreen.canvas(), s, x, y, c, font_size);
    }
}

/// Plain `write!` prints in white.
impl<const W: usize, const H: usize, const COLS: usize, const ROWS: usize> fmt::Write
    for VideoContext<W, H, COLS, ROWS>
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes(), ColorCode::WHITE);
        Ok(())
    }
}

struct Pen<F: FnMut(&str)>(F);

impl<F: FnMut(&str)> fmt::Write for Pen<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::screen::tests::leaked_screen;
    use core::fmt::Write;

    pub(crate) type TestVideo = VideoContext<64, 48, 8, 6>;

    pub(crate) fn test_video(auto_flush: bool) -> Box<TestVideo> {
        Box::new(TestVideo::new(VideoConfig {
            default_font_size: 1,
            auto_flush,
            ..VideoConfig::DEFAULT
        }))
    }

    fn row_text(video: &TestVideo, row: usize) -> String {
        video.console().cells()[row].iter().map(|cell| cell.ch as char).collect()
    }

    #[test]
    fn write_then_newline_then_write() {
        let mut video = test_video(true);
        video.attach(leaked_screen(64, 48, 24));

        video.write(b"Hi\n", ColorCode::from(0xFFFFFF));
        video.write(b"!", ColorCode::from(0xFF0000));

        let console = video.console();
        assert_eq!(console.cell(0, 0).ch, b'H');
        assert_eq!(console.cell(0, 1).ch, b'i');
        assert_eq!(console.cell(1, 0).ch, b'!');
        assert_eq!(console.cell(0, 0).color, ColorCode::WHITE);
        assert_eq!(console.cell(1, 0).color, ColorCode::RED);
        assert_eq!(console.cursor(), (1, 1).into());
    }

    #[test]
    fn second_flush_without_drawing_copies_nothing() {
        let mut video = test_video(false);
        video.attach(leaked_screen(64, 48, 24));
        assert!(!video.offscreen().is_dirty());

        video.write(b"abc", ColorCode::WHITE);
        assert!(video.offscreen().is_dirty());
        assert!(video.flush());
        assert!(!video.flush());
    }

    #[test]
    fn auto_flush_keeps_screen_in_sync() {
        let mut video = test_video(true);
        video.attach(leaked_screen(64, 48, 24));
        video.write(b"sync\n\tme", ColorCode::GREEN);

        assert!(!video.offscreen().is_dirty());
        let screen = video.screen().map(|s| s.bytes().to_vec());
        assert_eq!(screen.as_deref(), Some(video.offscreen().bytes()));
        assert!(video.offscreen().bytes().iter().any(|&b| b != 0));
    }

    #[test]
    fn detached_flush_keeps_changes_pending() {
        let mut video = test_video(true);
        video.write(b"early", ColorCode::WHITE);
        assert!(!video.is_attached());
        assert!(!video.flush());
        assert!(video.offscreen().is_dirty());

        assert!(video.attach(leaked_screen(64, 48, 24)).is_none());
        assert!(!video.offscreen().is_dirty());
        let screen = video.screen().map(|s| s.bytes().to_vec());
        assert_eq!(screen.as_deref(), Some(video.offscreen().bytes()));
    }

    #[test]
    fn primitives_bypass_the_console() {
        let mut video = test_video(false);
        video.attach(leaked_screen(64, 48, 24));

        video.draw_string(b"label\n", 3, 3, ColorCode::YELLOW);
        video.draw_rect(ColorCode::BLUE, 40, 40, 100, 100);
        video.draw_char(b'#', 20, 20, ColorCode::RED);
        video.put_pixel(ColorCode::WHITE, 0, 0);

        assert!(video.offscreen().is_dirty());
        assert_eq!(video.console().cursor(), (0, 0).into());
        assert!(video.console().cells().iter().flatten().all(|cell| cell.is_blank()));
    }

    #[test]
    fn small_screen_clips_the_console() {
        let mut video = test_video(true);
        video.attach(leaked_screen(40, 20, 24));
        assert_eq!(video.offscreen().size(), (40, 20));

        // 40px at scale 1 holds 5 columns
        video.write(b"abcdef", ColorCode::WHITE);
        assert_eq!(row_text(&video, 0), "abcde   ");
        assert_eq!(video.console().cell(1, 0).ch, b'f');
    }

    #[test]
    fn large_screen_shows_only_capacity() {
        let mut video = test_video(true);
        video.attach(leaked_screen(100, 50, 24));
        assert_eq!(video.offscreen().size(), (64, 48));

        video.clear(ColorCode::WHITE);
        let bytes = video.screen().map(|s| s.bytes().to_vec()).unwrap_or_default();
        let pitch = 100 * 3;
        assert!(bytes[..64 * 3].iter().all(|&b| b == 0xFF));
        assert!(bytes[64 * 3..pitch].iter().all(|&b| b == 0));
        assert!(bytes[48 * pitch..].iter().all(|&b| b == 0));
    }

    #[test]
    fn formatted_output_reaches_the_grid() {
        let mut video = test_video(true);
        video.attach(leaked_screen(64, 48, 24));

        write!(video, "{}+{}", 1, 2).unwrap();
        video.write_fmt_colored(format_args!("={}", 3), ColorCode::CYAN).unwrap();

        assert_eq!(row_text(&video, 0), "1+2=3   ");
        assert_eq!(video.console().cell(0, 0).color, ColorCode::WHITE);
        assert_eq!(video.console().cell(0, 4).color, ColorCode::CYAN);
        assert!(!video.offscreen().is_dirty());
    }

    #[test]
    fn rejected_font_size_changes_nothing() {
        let mut video = test_video(true);
        video.attach(leaked_screen(64, 48, 24));
        video.write(b"keep", ColorCode::WHITE);
        let before = video.offscreen().bytes().to_vec();

        assert!(!video.set_font_size(0));
        assert!(!video.set_font_size(6));
        assert_eq!(video.console().font_size(), 1);
        assert!(!video.offscreen().is_dirty());
        assert!(video.offscreen().bytes() == before.as_slice());

        assert!(video.set_font_size(2));
        assert_eq!(row_text(&video, 0), "keep    ");
    }
}
