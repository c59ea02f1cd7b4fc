//! 6502 CPU implementation.
//!
//! Instruction-stepped: `step()` fetches an opcode, looks it up in
//! [`OPCODES`], resolves the operand for its addressing mode and executes
//! it in one go. Bus accesses happen in the order the real chip makes
//! them, including the dummy reads of indexed addressing and the dummy
//! write of read-modify-write instructions, because cartridge hot-spots
//! and TIA strobes react to them.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::Registers;
use crate::flags::{B, C, D, I, N, V, Z};
use crate::opcodes::{Mode, OPCODES, Opcode};

/// Reset vector.
const RESET_VECTOR: u16 = 0xFFFC;

/// BRK vector (shared with IRQ on chips that have the pin).
pub(crate) const BRK_VECTOR: u16 = 0xFFFE;

/// Cycles taken by the reset sequence.
const RESET_CYCLES: u64 = 7;

/// Cost of a `step()` while jammed. The real chip keeps the bus busy
/// without ever fetching another opcode.
const JAM_STEP_CYCLES: u32 = 2;

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    None,
    Accumulator,
    Immediate(u8),
    Address(u16),
    Branch(i8),
}

/// The MOS 6502 CPU.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,

    /// Stalled waiting for horizontal sync. Owned by the machine's frame
    /// loop, which sets and clears it around WSYNC.
    halted: bool,

    /// Executed a JAM opcode. Only reset recovers.
    pub(crate) jammed: bool,

    /// Total cycles executed.
    total_cycles: u64,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    /// Create a CPU in its power-on state. Call `reset()` with a bus to
    /// load the program counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            halted: false,
            jammed: false,
            total_cycles: 0,
        }
    }

    /// Stall or release the CPU for a sync-wait.
    pub fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }

    /// True if a JAM opcode has locked up the CPU.
    #[must_use]
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    /// Total cycles executed since power-on.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn read_word<B: Bus>(bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Read a pointer from zero page. The high byte wraps to $00, not $0100.
    fn read_zp_word<B: Bus>(bus: &mut B, zp: u8) -> u16 {
        let lo = bus.read(u16::from(zp));
        let hi = bus.read(u16::from(zp.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    /// Resolve the operand for `entry`. The flag is true when an indexed
    /// access crossed a page.
    fn resolve<B: Bus>(&mut self, bus: &mut B, entry: &Opcode) -> (Operand, bool) {
        let operand = match entry.mode {
            Mode::Implied => Operand::None,
            Mode::Accumulator => Operand::Accumulator,
            Mode::Immediate => Operand::Immediate(self.fetch(bus)),
            Mode::Relative => Operand::Branch(self.fetch(bus) as i8),
            Mode::ZeroPage => Operand::Address(u16::from(self.fetch(bus))),
            Mode::ZeroPageX => {
                let zp = self.fetch(bus);
                Operand::Address(u16::from(zp.wrapping_add(self.regs.x)))
            }
            Mode::ZeroPageY => {
                let zp = self.fetch(bus);
                Operand::Address(u16::from(zp.wrapping_add(self.regs.y)))
            }
            Mode::Absolute => Operand::Address(self.fetch_word(bus)),
            Mode::AbsoluteX => {
                let base = self.fetch_word(bus);
                return Self::indexed(bus, base, self.regs.x, entry.page_penalty);
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word(bus);
                return Self::indexed(bus, base, self.regs.y, entry.page_penalty);
            }
            Mode::IndirectX => {
                let zp = self.fetch(bus).wrapping_add(self.regs.x);
                Operand::Address(Self::read_zp_word(bus, zp))
            }
            Mode::IndirectY => {
                let zp = self.fetch(bus);
                let base = Self::read_zp_word(bus, zp);
                return Self::indexed(bus, base, self.regs.y, entry.page_penalty);
            }
            Mode::Indirect => {
                let ptr = self.fetch_word(bus);
                // JMP ($xxFF) takes its high byte from $xx00.
                let lo = bus.read(ptr);
                let hi = bus.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                Operand::Address(u16::from_le_bytes([lo, hi]))
            }
        };
        (operand, false)
    }

    /// Add an index to a base address.
    ///
    /// The chip first reads from the address with only the low byte
    /// carried. Reads skip that cycle when no page is crossed; stores and
    /// read-modify-write always spend it.
    fn indexed<B: Bus>(bus: &mut B, base: u16, index: u8, read_only: bool) -> (Operand, bool) {
        let addr = base.wrapping_add(u16::from(index));
        let crossed = (base ^ addr) & 0xFF00 != 0;
        if crossed || !read_only {
            let _ = bus.read((base & 0xFF00) | (addr & 0x00FF));
        }
        (Operand::Address(addr), crossed)
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.jammed {
            self.total_cycles += u64::from(JAM_STEP_CYCLES);
            return JAM_STEP_CYCLES;
        }

        let opcode_pc = self.regs.pc;
        let opcode = self.fetch(bus);
        let entry = OPCODES[usize::from(opcode)];
        let (operand, crossed) = self.resolve(bus, &entry);

        let mut cycles = u32::from(entry.cycles);
        if crossed && entry.page_penalty {
            cycles += 1;
        }
        cycles += self.execute(bus, entry.op, operand, opcode_pc);

        self.total_cycles += u64::from(cycles);
        cycles
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Self::Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.halted || self.jammed
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = Self::read_word(bus, RESET_VECTOR);
        self.halted = false;
        self.jammed = false;
        self.total_cycles += RESET_CYCLES;
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.0.into()),
            "flags.c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" => Some(self.regs.p.is_set(D).into()),
            "flags.v" => Some(self.regs.p.is_set(V).into()),
            // B only exists on the stack copy pushed by PHP and BRK
            "flags.b" => Some((self.regs.p.to_byte_brk() & B != 0).into()),
            "flags.n" => Some(self.regs.p.is_set(N).into()),
            "cycles" => Some(self.total_cycles.into()),
            "halted" => Some(self.halted.into()),
            "jammed" => Some(self.jammed.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc", "a", "x", "y", "s", "p", "flags.c", "flags.z", "flags.i", "flags.d", "flags.b",
            "flags.v", "flags.n", "cycles", "halted", "jammed",
        ]
    }
}
