//! Log records raised while the console is busy.
//!
//! The console logs from inside its own operations, when it cannot take new text. Such records
//! wait here and are printed once the console is free again.

use crate::color::ColorCode;
use crate::video::VideoContext;

use core::fmt::{self, Write};
use heapless::{Deque, String};

/// Records kept before the oldest ones are dropped.
pub const LOG_QUEUE_LEN: usize = 16;
/// Longer messages are cut short.
pub const LOG_RECORD_LEN: usize = 120;

/// Console color of a log level.
pub fn level_color(level: log::Level) -> ColorCode {
    match level {
        log::Level::Error => ColorCode::RED,
        log::Level::Warn => ColorCode::YELLOW,
        log::Level::Info => ColorCode::WHITE,
        log::Level::Debug | log::Level::Trace => ColorCode::GRAY,
    }
}

/// Print one `[LEVEL] message` line.
pub fn write_record<const W: usize, const H: usize, const COLS: usize, const ROWS: usize>(
    video: &mut VideoContext<W, H, COLS, ROWS>,
    level: log::Level,
    args: fmt::Arguments,
) {
    let _ = video.write_fmt_colored(format_args!("[{}] {}\n", level, args), level_color(level));
}

pub struct QueuedRecord {
    pub level: log::Level,
    pub text: String<LOG_RECORD_LEN>,
}

pub struct LogQueue {
    records: Deque<QueuedRecord, LOG_QUEUE_LEN>,
    /// records evicted since the last drain
    dropped: usize,
}

impl LogQueue {
    pub const fn new() -> Self {
        Self { records: Deque::new(), dropped: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.dropped == 0
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Queue a record, evicting the oldest one when full.
    pub fn push(&mut self, level: log::Level, args: fmt::Arguments) {
        let mut text = String::new();
        // overflowing text is truncated
        let _ = text.write_fmt(args);

        if self.records.is_full() {
            self.records.pop_front();
            self.dropped += 1;
        }
        let _ = self.records.push_back(QueuedRecord { level, text });
    }

    /// Move every queued record out, leaving the queue empty.
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedRecord> {
        self.records.iter()
    }

    /// Print the queued records oldest first, then a note on any that were lost.
    pub fn print<const W: usize, const H: usize, const COLS: usize, const ROWS: usize>(
        &self,
        video: &mut VideoContext<W, H, COLS, ROWS>,
    ) {
        for record in self.records.iter() {
            write_record(video, record.level, format_args!("{}", record.text));
        }
        if self.dropped > 0 {
            write_record(video, log::Level::Warn, format_args!("{} log records lost", self.dropped));
        }
    }
}

impl Default for LogQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::leaked_screen;
    use crate::video::tests::test_video;

    use spin::mutex::Mutex;

    /// Stands in for the kernel logger while the console is held: every record is queued.
    struct QueueingLogger;

    static QUEUE: Mutex<LogQueue> = Mutex::new(LogQueue::new());

    impl log::Log for QueueingLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                QUEUE.lock().push(record.level(), *record.args());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: QueueingLogger = QueueingLogger;

    fn row_text<const W: usize, const H: usize, const COLS: usize, const ROWS: usize>(
        video: &VideoContext<W, H, COLS, ROWS>,
        row: usize,
    ) -> std::string::String {
        video.console().cells()[row].iter().map(|cell| cell.ch as char).collect()
    }

    #[test]
    fn rejected_font_size_warning_is_printed_later() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);

        let mut video = test_video(true);
        video.attach(leaked_screen(64, 48, 24));
        assert!(!video.set_font_size(9));
        // nothing reached the console while it was busy
        assert_eq!(video.console().cursor(), (0, 0).into());

        let queued = QUEUE.lock().take();
        // other tests may have queued warnings of their own
        let mut ours = LogQueue::new();
        for record in queued.iter().filter(|r| r.text.starts_with("font size 9 rejected")) {
            ours.push(record.level, format_args!("{}", record.text));
        }
        assert_eq!(ours.len(), 1);

        ours.print(&mut *video);
        assert_eq!(row_text(&video, 0), "[WARN] f");
        assert_eq!(video.console().cell(0, 0).color, ColorCode::YELLOW);
        assert!(!video.offscreen().is_dirty());
    }

    #[test]
    fn full_queue_evicts_oldest_and_reports_it() {
        let mut queue = LogQueue::new();
        for i in 0..LOG_QUEUE_LEN + 2 {
            queue.push(log::Level::Info, format_args!("{}", i));
        }
        assert_eq!(queue.len(), LOG_QUEUE_LEN);
        assert_eq!(queue.iter().next().map(|r| r.text.as_str()), Some("2"));

        let mut video = Box::new(VideoContext::<256, 16, 32, 2>::new(crate::config::VideoConfig {
            default_font_size: 1,
            ..crate::config::VideoConfig::DEFAULT
        }));
        queue.take().print(&mut *video);
        assert!(queue.is_empty());
        // two row grid: the note printed last ends up on top after its newline scrolls
        assert!(row_text(&video, 0).starts_with("[WARN] 2 log records lost"));
    }

    #[test]
    fn long_records_are_truncated() {
        let mut queue = LogQueue::new();
        let (head, tail) = ("a".repeat(100), "b".repeat(LOG_RECORD_LEN));
        queue.push(log::Level::Error, format_args!("{}{}", head, tail));
        assert_eq!(queue.iter().next().map(|r| r.text.as_str()), Some(head.as_str()));
    }

    #[test]
    fn level_colors() {
        assert_eq!(level_color(log::Level::Error), ColorCode::RED);
        assert_eq!(level_color(log::Level::Warn), ColorCode::YELLOW);
        assert_eq!(level_color(log::Level::Info), ColorCode::WHITE);
        assert_eq!(level_color(log::Level::Trace), ColorCode::GRAY);
    }
}
