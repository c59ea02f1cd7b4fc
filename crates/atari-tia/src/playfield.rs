//! Playfield: 20 bits per half-line, four pixels per bit.
//!
//! The left half reads PF0 bits 4-7, PF1 bits 7-0, then PF2 bits 0-7.
//! The right half repeats that order, or runs it backwards when CTRLPF
//! bit 0 (reflect) is set.

/// Playfield pattern registers.
#[derive(Debug, Clone, Default)]
pub struct Playfield {
    pub pf0: u8,
    pub pf1: u8,
    pub pf2: u8,
}

impl Playfield {
    /// True if the playfield is set at visible column `x` (0-159).
    #[must_use]
    pub fn pixel(&self, x: u8, reflect: bool) -> bool {
        let mut bit = (x % 80) / 4;
        if x >= 80 && reflect {
            bit = 19 - bit;
        }
        match bit {
            0..=3 => self.pf0 & (0x10 << bit) != 0,
            4..=11 => self.pf1 & (0x80 >> (bit - 4)) != 0,
            _ => self.pf2 & (1 << (bit - 12)) != 0,
        }
    }
}
