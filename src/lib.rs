//! A CHIP-8 virtual machine.
//!
//! [`Processor`] owns the whole machine state. A host loads a ROM, calls
//! [`Processor::step`] at its instruction rate and drives the delay/sound
//! timers from a separate 60 Hz clock through [`TimerDriver`]. Rendering,
//! audio and input stay on the host side and only go through the processor's
//! public surface.

pub mod consts;
pub mod core;
pub mod error;
mod utils;

pub use crate::core::keypad::Keymap;
pub use crate::core::processor::{CycleStatus, Processor};
pub use crate::core::rom::Rom;
pub use crate::core::timer::{spawn_timer_thread, Silence, Ticker, TimerDriver, Tone};
pub use crate::error::{InitError, MachineError};
