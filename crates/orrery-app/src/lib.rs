//! Headless orrery driver: platform directories, frame pacing, and the
//! per-frame loop that feeds scripted view requests into the schedule.

pub mod driver;
pub mod frame_timer;
pub mod platform;

pub use driver::{Orrery, load_catalog};
pub use frame_timer::{FrameTimer, clamp_frame_time};
pub use platform::{PlatformDirs, PlatformError};
