//! NMOS 6502 CPU emulator.
//!
//! The Atari 2600's 6507 is a 6502 die in a 28-pin package: 13 address
//! lines and no interrupt pins. Everything else, including the
//! undocumented opcodes and the NMOS decimal-mode flag quirks, is the
//! same chip, so this crate models the 6502 and leaves address masking
//! to the bus.
//!
//! Execution is instruction-stepped. [`Mos6502::step`] runs one whole
//! instruction and returns the cycles it took so the caller can clock the
//! rest of the machine by the same amount.

mod cpu;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use cpu::Mos6502;
pub use flags::Status;
pub use opcodes::{Mode, OPCODES, Op, Opcode};
pub use registers::Registers;
