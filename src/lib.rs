//! A CHIP-8 interpreter core.
//!
//! The [`ChipSet`](chip8::ChipSet) holds the complete machine state and is driven one
//! instruction at a time by [`ChipSet::cycle`](chip8::ChipSet::cycle). Presentation, key
//! capture and rom loading live outside of this crate and talk to it through the traits in
//! [`devices`].
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod quirks;
pub mod timer;
mod error;
mod runner;

// reexporting for convinience
pub use error::*;
pub use runner::*;
