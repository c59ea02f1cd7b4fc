//! CPU core trait.

use crate::Bus;

/// A processor that executes whole instructions.
///
/// The machine's frame loop asks the processor for one instruction at a
/// time and then feeds the returned cycle cost to every other chip. The bus
/// is passed in rather than owned so the loop can reach the chips between
/// instructions.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Execute one instruction and return the number of cycles it took.
    fn step<B: Bus>(&mut self, bus: &mut B) -> u32;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is not currently executing instructions.
    fn is_halted(&self) -> bool;

    /// Run the reset sequence, fetching the start address through the bus.
    fn reset<B: Bus>(&mut self, bus: &mut B);
}
