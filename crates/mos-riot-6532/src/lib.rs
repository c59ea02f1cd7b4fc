//! MOS 6532 RAM-I/O-Timer (RIOT).
//!
//! The 6532 combines 128 bytes of static RAM, two 8-bit I/O ports with
//! data direction registers, and an interval timer with four prescalers.
//! In the Atari 2600 it is the console's only RAM; port A reads the
//! joysticks and port B the console switches.
//!
//! # Registers
//!
//! | Addr | Read   | Write                       |
//! |------|--------|-----------------------------|
//! | $0   | SWCHA  | SWCHA (port A output)       |
//! | $1   | SWACNT | SWACNT (port A direction)   |
//! | $2   | SWCHB  | SWCHB (port B output)       |
//! | $3   | SWBCNT | SWBCNT (port B direction)   |
//! | $4   | INTIM  | edge detect control         |
//! | $5   | TIMINT | edge detect control         |
//! | $14  | INTIM  | TIM1T (interval 1)          |
//! | $15  | TIMINT | TIM8T (interval 8)          |
//! | $16  | INTIM  | TIM64T (interval 64)        |
//! | $17  | TIMINT | T1024T (interval 1024)      |
//!
//! Bit 2 of the address separates the ports from the timer; on writes,
//! bit 4 separates the timer from the edge detect control.

use emu_core::{Observable, Value};

/// Prescaler intervals selected by the low two address bits of a timer
/// write.
const INTERVALS: [u32; 4] = [1, 8, 64, 1024];

/// Bit reported by INTIM and TIMINT once the timer has underflowed.
const UNDERFLOW_FLAG: u8 = 0x80;

/// MOS 6532 RIOT.
#[derive(Debug, Clone)]
pub struct Riot6532 {
    /// On-chip RAM.
    ram: [u8; 128],

    /// Port A output latch.
    port_a: u8,
    /// Port B output latch.
    port_b: u8,
    /// Port A data direction (1 = output).
    ddr_a: u8,
    /// Port B data direction (1 = output).
    ddr_b: u8,
    /// Lines driven into port A from outside the chip.
    input_a: u8,
    /// Lines driven into port B from outside the chip.
    input_b: u8,

    /// Remaining timer count in CPU cycles. The prescaler is folded in at
    /// write time, so one cycle always decrements by one.
    count: u32,
    /// Prescaler selected by the last timer write.
    interval: u32,
    /// Timer has passed zero and the flag has not been read through INTIM.
    underflow: bool,

    /// Last value written to the edge detect control.
    edge_control: u8,
}

impl Default for Riot6532 {
    fn default() -> Self {
        Self::new()
    }
}

impl Riot6532 {
    /// Create a RIOT in its power-on state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: [0; 128],
            port_a: 0,
            port_b: 0,
            ddr_a: 0,
            ddr_b: 0,
            input_a: 0xFF,
            input_b: 0xFF,
            count: 0,
            interval: 1024,
            underflow: false,
            edge_control: 0,
        }
    }

    /// Return to power-on state. External input lines are left alone: they
    /// belong to whatever is plugged into the ports.
    pub fn reset(&mut self) {
        let (input_a, input_b) = (self.input_a, self.input_b);
        *self = Self::new();
        self.input_a = input_a;
        self.input_b = input_b;
    }

    /// Advance the timer by `cycles` CPU cycles.
    pub fn tick(&mut self, cycles: u32) {
        if cycles > self.count {
            self.count = 0;
            self.underflow = true;
        } else {
            self.count -= cycles;
        }
    }

    /// Read a RAM byte. Only the low seven address bits are decoded.
    #[must_use]
    pub fn ram_read(&self, addr: u16) -> u8 {
        self.ram[usize::from(addr & 0x7F)]
    }

    /// Write a RAM byte.
    pub fn ram_write(&mut self, addr: u16, value: u8) {
        self.ram[usize::from(addr & 0x7F)] = value;
    }

    /// Read an I/O or timer register.
    ///
    /// Reading INTIM acknowledges the underflow flag.
    pub fn read(&mut self, reg: u8) -> u8 {
        if reg & 0x04 == 0 {
            return self.peek(reg);
        }
        let value = self.peek(reg);
        if reg & 0x01 == 0 {
            self.underflow = false;
        }
        value
    }

    /// Read a register without side effects.
    #[must_use]
    pub fn peek(&self, reg: u8) -> u8 {
        if reg & 0x04 == 0 {
            match reg & 0x03 {
                0 => (self.input_a & !self.ddr_a) | (self.port_a & self.ddr_a),
                1 => self.ddr_a,
                2 => (self.input_b & !self.ddr_b) | (self.port_b & self.ddr_b),
                _ => self.ddr_b,
            }
        } else if reg & 0x01 == 0 {
            self.intim()
        } else if self.underflow {
            UNDERFLOW_FLAG
        } else {
            0
        }
    }

    /// Write an I/O, timer or edge-control register.
    pub fn write(&mut self, reg: u8, value: u8) {
        if reg & 0x04 == 0 {
            match reg & 0x03 {
                0 => self.port_a = value,
                1 => self.ddr_a = value,
                2 => self.port_b = value,
                _ => self.ddr_b = value,
            }
        } else if reg & 0x10 != 0 {
            self.interval = INTERVALS[usize::from(reg & 0x03)];
            self.count = u32::from(value) * self.interval;
            self.underflow = false;
        } else {
            self.edge_control = value;
        }
    }

    /// Drive the external port A lines (joysticks on the 2600).
    pub fn set_port_a_input(&mut self, value: u8) {
        self.input_a = value;
    }

    /// Drive the external port B lines (console switches on the 2600).
    pub fn set_port_b_input(&mut self, value: u8) {
        self.input_b = value;
    }

    /// True once the timer has underflowed and INTIM has not been read since.
    #[must_use]
    pub fn underflowed(&self) -> bool {
        self.underflow
    }

    fn intim(&self) -> u8 {
        let value = (self.count / self.interval) as u8;
        if self.underflow {
            value | UNDERFLOW_FLAG
        } else {
            value
        }
    }
}

impl Observable for Riot6532 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "intim" => Some(self.peek(0x04).into()),
            "timint" => Some(self.peek(0x05).into()),
            "interval" => Some(self.interval.into()),
            "count" => Some(self.count.into()),
            "underflow" => Some(self.underflow.into()),
            "swcha" => Some(self.peek(0x00).into()),
            "swacnt" => Some(self.ddr_a.into()),
            "swchb" => Some(self.peek(0x02).into()),
            "swbcnt" => Some(self.ddr_b.into()),
            _ => path
                .strip_prefix("ram.")
                .and_then(|offset| u16::from_str_radix(offset.trim_start_matches('$'), 16).ok())
                .map(|addr| self.ram_read(addr).into()),
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "intim", "timint", "interval", "count", "underflow", "swcha", "swacnt", "swchb",
            "swbcnt",
        ]
    }
}
