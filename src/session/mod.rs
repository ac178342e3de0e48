//! Session lifecycle, mode selection, and the interception state machine

mod controller;
mod lifecycle;
mod mode;

pub use controller::{InterceptionController, PlaybackStats};
pub use lifecycle::{with_vcr, VcrSession};
pub use mode::Mode;
