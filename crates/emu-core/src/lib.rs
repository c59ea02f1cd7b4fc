//! Core traits shared by the emulator crates.
//!
//! The processor talks to the rest of the machine through [`Bus`], steps
//! one instruction at a time through [`Cpu`], and every chip exposes its
//! state through [`Observable`] so tests and tools can look inside
//! without disturbing emulation.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
