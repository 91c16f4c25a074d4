pub mod video;
pub mod logger;

use crate::screen::ScreenError;

/// Initialize global variables.
pub fn init() -> Result<(), ScreenError> {
    // the logger may already be installed by an earlier call.
    let _ = logger::init();
    video::init()
}

pub use video::VIDEO;
