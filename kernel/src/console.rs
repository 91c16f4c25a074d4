use crate::canvas::Canvas;
use crate::color::ColorCode;
use crate::geometry::Pos2D;
use crate::glyph::{self, font_height, font_width, TAB_WIDTH};

use heapless::Vec;

/// Largest accepted font scale.
pub const MAX_FONT_SIZE: usize = 5;
/// Font scale a fresh console starts with.
pub const DEFAULT_FONT_SIZE: usize = 4;

/// Cells remembered between two renders before falling back to a full replay.
const TOUCH_LOG_LEN: usize = 128;

const BACKSPACE: u8 = 0x08;

/// One character cell of the console grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextCell {
    pub ch: u8,
    pub color: ColorCode,
}

impl TextCell {
    pub const fn new(ch: u8, color: ColorCode) -> Self {
        Self { ch, color }
    }

    pub const fn blank(color: ColorCode) -> Self {
        Self { ch: b' ', color }
    }

    pub const fn is_blank(&self) -> bool {
        self.ch == b' '
    }
}

/// A scrolling text console over a `COLS x ROWS` character grid.
///
/// The grid is sized for the smallest font scale and is the only source of truth for the text
/// on screen; pixels are re-derived from it, so font scale changes lose nothing.
pub struct Console<const COLS: usize, const ROWS: usize> {
    buffer: [[TextCell; COLS]; ROWS],
    cur_col: usize,
    cur_row: usize,
    font_size: usize,
    bg: ColorCode,

    /// cells written since the last render, as (row, col).
    touched: Vec<(usize, usize), TOUCH_LOG_LEN>,
    replay_pending: bool,
    /// first grid row shown at the top of the screen.
    view_top: usize,
}

impl<const COLS: usize, const ROWS: usize> Console<COLS, ROWS> {
    const NON_EMPTY: () = assert!(COLS > 0 && ROWS > 0, "console grid must not be empty");

    /// A blank console with the cursor at the origin.
    ///
    /// Out of range font sizes fall back to [`DEFAULT_FONT_SIZE`].
    pub const fn new(font_size: usize, bg: ColorCode) -> Self {
        let () = Self::NON_EMPTY;
        let font_size = if font_size >= 1 && font_size <= MAX_FONT_SIZE {
            font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        Self {
            buffer: [[TextCell::blank(bg); COLS]; ROWS],
            cur_col: 0,
            cur_row: 0,
            font_size,
            bg,
            touched: Vec::new(),
            replay_pending: true,
            view_top: 0,
        }
    }

    /// Cursor position in cells; `x` is the column, `y` the row.
    pub fn cursor(&self) -> Pos2D {
        (self.cur_col, self.cur_row).into()
    }

    pub fn font_size(&self) -> usize {
        self.font_size
    }

    pub fn background(&self) -> ColorCode {
        self.bg
    }

    pub fn cell(&self, row: usize, col: usize) -> TextCell {
        self.buffer[row][col]
    }

    pub fn cells(&self) -> &[[TextCell; COLS]; ROWS] {
        &self.buffer
    }

    /// Columns usable at the current scale on a surface `width` pixels wide. Never 0.
    pub fn chars_per_line(&self, width: usize) -> usize {
        (width / font_width(self.font_size)).clamp(1, COLS)
    }

    /// Grid rows visible at the current scale on a surface `height` pixels tall. Never 0.
    pub fn lines_per_screen(&self, height: usize) -> usize {
        (height / font_height(self.font_size)).clamp(1, ROWS)
    }

    /// Print `data` at the cursor, then render what changed.
    pub fn write(&mut self, canvas: &mut Canvas, data: &[u8], c: ColorCode) {
        let cpl = self.chars_per_line(canvas.width());

        for &ch in data {
            match ch {
                b'\n' => self.newline(),
                b'\r' => self.carriage_return(),
                b'\t' => {
                    self.cur_col = (self.cur_col / TAB_WIDTH + 1) * TAB_WIDTH;
                    if self.cur_col >= cpl {
                        self.newline();
                    }
                }
                BACKSPACE => self.backspace(cpl, c),
                ch => {
                    if self.cur_col >= cpl {
                        self.newline();
                    }
                    self.put(self.cur_row, self.cur_col, TextCell::new(ch, c));
                    self.cur_col += 1;
                }
            }
        }

        self.render(canvas);
    }

    /// Blank the grid with background `c`, home the cursor and paint the surface.
    pub fn clear(&mut self, canvas: &mut Canvas, c: ColorCode) {
        self.bg = c;
        for row in self.buffer.iter_mut() {
            row.fill(TextCell::blank(c));
        }
        self.cur_col = 0;
        self.cur_row = 0;
        self.view_top = 0;
        self.touched.clear();
        self.replay_pending = false;
        canvas.clear(c);
    }

    /// Change the font scale and replay the grid.
    ///
    /// Sizes outside `1..=MAX_FONT_SIZE` are ignored; returns whether the size was taken.
    pub fn set_font_size(&mut self, canvas: &mut Canvas, font_size: usize) -> bool {
        if !(1..=MAX_FONT_SIZE).contains(&font_size) {
            log::warn!("font size {} rejected, keeping {}", font_size, self.font_size);
            return false;
        }
        log::debug!("font size {} -> {}", self.font_size, font_size);
        self.font_size = font_size;
        self.redraw(canvas);
        true
    }

    /// Repaint the surface from the grid.
    pub fn redraw(&mut self, canvas: &mut Canvas) {
        self.view_top = self.view_top_for(self.lines_per_screen(canvas.height()));
        self.replay(canvas);
    }

    /// Rewind column position (carriage).
    #[inline]
    fn carriage_return(&mut self) {
        self.cur_col = 0;
    }

    /// Move to the start of the next row, scrolling at the bottom of the grid.
    fn newline(&mut self) {
        self.cur_row += 1;
        if self.cur_row >= ROWS {
            self.scroll();
            self.cur_row = ROWS - 1;
        }
        self.carriage_return();
    }

    /// Raise grid contents by a row; the top row is discarded and the bottom row blanked.
    fn scroll(&mut self) {
        self.buffer.copy_within(1.., 0);
        self.buffer[ROWS - 1].fill(TextCell::blank(self.bg));
        // every visible row moved
        self.replay_pending = true;
        log::trace!("console scrolled");
    }

    fn backspace(&mut self, cpl: usize, c: ColorCode) {
        if self.cur_col > 0 {
            self.cur_col -= 1;
        } else if self.cur_row > 0 {
            self.cur_row -= 1;
            self.cur_col = cpl - 1;
        } else {
            return;
        }
        self.put(self.cur_row, self.cur_col, TextCell::blank(c));
    }

    fn put(&mut self, row: usize, col: usize, cell: TextCell) {
        self.buffer[row][col] = cell;
        if self.touched.push((row, col)).is_err() {
            self.replay_pending = true;
        }
    }

    /// First grid row of a screenful of `lines` rows that ends at the cursor row.
    fn view_top_for(&self, lines: usize) -> usize {
        (self.cur_row + 1).saturating_sub(lines)
    }

    /// Draw the cells touched since the last render, or replay when cell geometry moved.
    fn render(&mut self, canvas: &mut Canvas) {
        let lines = self.lines_per_screen(canvas.height());
        let top = self.view_top_for(lines);
        if self.replay_pending || top != self.view_top {
            self.view_top = top;
            self.replay(canvas);
            return;
        }

        let cpl = self.chars_per_line(canvas.width());
        let (fw, fh) = (font_width(self.font_size), font_height(self.font_size));
        for &(row, col) in self.touched.iter() {
            if row < top || row >= top + lines || col >= cpl {
                continue;
            }
            let (px, py) = (col * fw, (row - top) * fh);
            // glyphs are transparent, wipe whatever the cell showed before
            canvas.fill_rect(self.bg, px, py, fw, fh);
            let cell = self.buffer[row][col];
            if !cell.is_blank() {
                glyph::draw_char(canvas, cell.ch, px, py, cell.color, self.font_size);
            }
        }
        self.touched.clear();
    }

    /// Clear the surface and draw every visible non-blank cell, row by row.
    fn replay(&mut self, canvas: &mut Canvas) {
        canvas.clear(self.bg);

        let cpl = self.chars_per_line(canvas.width());
        let lines = self.lines_per_screen(canvas.height());
        let (fw, fh) = (font_width(self.font_size), font_height(self.font_size));
        log::trace!("replaying rows {}..{} at scale {}", self.view_top, self.view_top + lines, self.font_size);

        let mut py = 0;
        for row in self.buffer.iter().skip(self.view_top).take(lines) {
            let mut px = 0;
            for cell in row.iter().take(cpl) {
                if cell.ch == b'\n' {
                    break;
                }
                if !cell.is_blank() {
                    glyph::draw_char(canvas, cell.ch, px, py, cell.color, self.font_size);
                }
                px += fw;
            }
            py += fh;
        }

        self.touched.clear();
        self.replay_pending = false;
    }
}
