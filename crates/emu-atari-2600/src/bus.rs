//! Atari 2600 bus: 6507 address decoding.
//!
//! The 6507 drives 13 address lines, so everything repeats every 8 KiB.
//! Three address bits pick the chip:
//!
//! | A12 | A9 | A7 | Destination          |
//! |-----|----|----|----------------------|
//! | 1   | -  | -  | cartridge            |
//! | 0   | -  | 0  | TIA                  |
//! | 0   | 0  | 1  | RIOT RAM (128 bytes) |
//! | 0   | 1  | 1  | RIOT I/O and timer   |
//!
//! RAM at $80-$FF is mirrored at $180-$1FF, which is where the stack
//! lives.

use atari_tia::Tia;
use emu_core::Bus;
use mos_riot_6532::Riot6532;

use crate::cartridge::Cartridge;

/// Decoded destination of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Tia,
    Ram,
    Riot,
    Cartridge,
}

fn decode(addr: u16) -> Region {
    let addr = addr & 0x1FFF;
    if addr & 0x1000 != 0 {
        Region::Cartridge
    } else if addr & 0x0080 == 0 {
        Region::Tia
    } else if addr & 0x0200 == 0 {
        Region::Ram
    } else {
        Region::Riot
    }
}

/// The Atari 2600 bus, implementing `emu_core::Bus`.
pub struct Atari2600Bus {
    pub tia: Tia,
    pub riot: Riot6532,
    pub cartridge: Cartridge,
}

impl Atari2600Bus {
    #[must_use]
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            tia: Tia::new(),
            riot: Riot6532::new(),
            cartridge,
        }
    }

    /// Read without side effects: no bank switch, no timer acknowledge.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        match decode(addr) {
            Region::Tia => self.tia.read(addr as u8),
            Region::Ram => self.riot.ram_read(addr),
            Region::Riot => self.riot.peek((addr & 0x1F) as u8),
            Region::Cartridge => self.cartridge.peek(addr),
        }
    }
}

impl Bus for Atari2600Bus {
    fn read(&mut self, addr: u16) -> u8 {
        match decode(addr) {
            Region::Tia => self.tia.read(addr as u8),
            Region::Ram => self.riot.ram_read(addr),
            Region::Riot => self.riot.read((addr & 0x1F) as u8),
            Region::Cartridge => self.cartridge.read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match decode(addr) {
            Region::Tia => self.tia.write((addr & 0x3F) as u8, value),
            Region::Ram => self.riot.ram_write(addr, value),
            Region::Riot => self.riot.write((addr & 0x1F) as u8, value),
            Region::Cartridge => self.cartridge.write(addr, value),
        }
    }
}
