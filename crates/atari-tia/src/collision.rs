//! Collision latches.
//!
//! Fifteen sticky bits, one per pair of drawable objects. Each read
//! register reports two of them in bits 7 and 6. Latch bit `2 * reg` is
//! the register's bit 7 and `2 * reg + 1` its bit 6.

pub(crate) const P0: u8 = 0x01;
pub(crate) const P1: u8 = 0x02;
pub(crate) const M0: u8 = 0x04;
pub(crate) const M1: u8 = 0x08;
pub(crate) const BL: u8 = 0x10;
pub(crate) const PF: u8 = 0x20;

/// Object pair and the latch bit it sets, in read-register order.
const PAIRS: [(u8, u8, u16); 15] = [
    (M0, P1, 0),  // CXM0P  bit 7
    (M0, P0, 1),  // CXM0P  bit 6
    (M1, P0, 2),  // CXM1P  bit 7
    (M1, P1, 3),  // CXM1P  bit 6
    (P0, PF, 4),  // CXP0FB bit 7
    (P0, BL, 5),  // CXP0FB bit 6
    (P1, PF, 6),  // CXP1FB bit 7
    (P1, BL, 7),  // CXP1FB bit 6
    (M0, PF, 8),  // CXM0FB bit 7
    (M0, BL, 9),  // CXM0FB bit 6
    (M1, PF, 10), // CXM1FB bit 7
    (M1, BL, 11), // CXM1FB bit 6
    (BL, PF, 12), // CXBLPF bit 7
    (P0, P1, 14), // CXPPMM bit 7
    (M0, M1, 15), // CXPPMM bit 6
];

/// Latch bits set by each combination of active objects.
const TABLE: [u16; 64] = build_table();

const fn build_table() -> [u16; 64] {
    let mut table = [0u16; 64];
    let mut active = 0;
    while active < 64 {
        let mut bits = 0;
        let mut i = 0;
        while i < PAIRS.len() {
            let (a, b, bit) = PAIRS[i];
            if active & a != 0 && active & b != 0 {
                bits |= 1 << bit;
            }
            i += 1;
        }
        table[active as usize] = bits;
        active += 1;
    }
    table
}

/// Collision latch set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions(u16);

impl Collisions {
    /// Latch every pair present in the `active` object mask.
    pub fn record(&mut self, active: u8) {
        self.0 |= TABLE[usize::from(active & 0x3F)];
    }

    /// CXCLR.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Value of read register `reg` (0-7), in bits 7 and 6.
    #[must_use]
    pub fn read(self, reg: u8) -> u8 {
        let shift = u16::from(reg & 0x07) * 2;
        let hi = (self.0 >> shift) & 1;
        let lo = (self.0 >> (shift + 1)) & 1;
        ((hi << 7) | (lo << 6)) as u8
    }

    /// Raw latch bits.
    #[must_use]
    pub fn bits(self) -> u16 {
        self.0
    }
}
