//! Platform abstraction layer
//!
//! Handles the outside world for the loop:
//! - Input polling (keyboard → per-tick commands)
//! - Frame pacing
//! - Terminal setup and teardown

pub mod clock;
pub mod input;
pub mod terminal;

pub use clock::{Clock, FrameClock, ManualClock};
pub use input::{InputSource, ScriptedInput};
pub use terminal::{TerminalInput, TerminalSession};
