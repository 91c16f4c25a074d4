//! The console logger.

use crate::config::VideoConfig;
use crate::log_queue::{self, LogQueue};
use super::video::VIDEO;

use spin::mutex::Mutex;
use x86_64::instructions::interrupts::without_interrupts;

static LOGGER: Logger = Logger { filter: VideoConfig::DEFAULT.log_level };

/// Records raised while `VIDEO` was held, e.g. from inside a console write.
static PENDING: Mutex<LogQueue> = Mutex::new(LogQueue::new());

pub fn init() -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LOGGER.filter);
    Ok(())
}

/// Print records queued while the console was busy.
///
/// Must run with interrupts masked and `VIDEO` released.
pub(super) fn print_pending() {
    let pending = PENDING.lock().take();
    if !pending.is_empty() {
        // anything logged while printing waits for the next call
        pending.print(&mut *VIDEO.lock());
    }
}

pub struct Logger {
    pub filter: log::LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        without_interrupts(|| match VIDEO.try_lock() {
            Some(mut video) => log_queue::write_record(&mut *video, record.level(), *record.args()),
            None => PENDING.lock().push(record.level(), *record.args()),
        });
    }

    fn flush(&self) {
        without_interrupts(|| {
            if let Some(mut video) = VIDEO.try_lock() {
                video.flush();
            }
        });
    }
}
