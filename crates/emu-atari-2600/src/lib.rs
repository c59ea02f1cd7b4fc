//! Cycle-accurate Atari 2600 emulator.
//!
//! The console is a 6507 CPU, a TIA for video and input, a 6532 RIOT for
//! RAM, timer and ports, and a cartridge of up to 32 KiB behind a 4 KiB
//! window. The TIA clock is three times the CPU clock.
//!
//! One frame = 228 colour clocks × 262 scanlines = 19,912 CPU cycles.

mod atari2600;
mod bus;
pub mod capture;
pub mod cartridge;
mod config;
pub mod input;

use thiserror::Error;

pub use atari2600::{Atari2600, CYCLES_PER_FRAME};
pub use bus::Atari2600Bus;
pub use cartridge::{BankScheme, Cartridge, CartridgeError};
pub use config::Atari2600Config;
pub use input::{Button, ConsoleSwitches, InputQueue, Joystick};

#[derive(Debug, Error)]
pub enum Atari2600Error {
    #[error("cartridge error: {0}")]
    Cartridge(#[from] CartridgeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}
