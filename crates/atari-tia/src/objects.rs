//! Movable objects: two players, two missiles and the ball.
//!
//! Each object holds a horizontal position in visible columns (0-159)
//! and answers whether it draws at a given column. Positions wrap
//! modulo the 160-column line, so an object near the right edge
//! continues on the left.

use crate::VISIBLE_WIDTH;

/// Start offsets of each copy for the low three NUSIZ bits.
const COPIES: [&[u8]; 8] = [
    &[0],
    &[0, 16],
    &[0, 32],
    &[0, 16, 32],
    &[0, 64],
    &[0],
    &[0, 32, 64],
    &[0],
];

/// Column distance from `pos` to `x`, wrapping within the line.
fn distance(x: u8, pos: u8) -> u8 {
    ((u16::from(x) + u16::from(VISIBLE_WIDTH) - u16::from(pos)) % u16::from(VISIBLE_WIDTH)) as u8
}

/// Move a position by the signed high nibble of a motion register.
pub(crate) fn apply_motion(pos: u8, hm: u8) -> u8 {
    let delta = i16::from((hm as i8) >> 4);
    (i16::from(pos) + delta).rem_euclid(i16::from(VISIBLE_WIDTH)) as u8
}

/// Player sprite.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub pos: u8,
    pub gfx: u8,
    /// Vertical-delay shadow, refreshed when the other player's graphics
    /// are written.
    pub old_gfx: u8,
    pub nusiz: u8,
    pub reflect: bool,
    pub vdel: bool,
    pub hm: u8,
}

impl Player {
    /// Pixel width of one graphics bit.
    #[must_use]
    pub fn scale(&self) -> u8 {
        match self.nusiz & 0x07 {
            5 => 2,
            7 => 4,
            _ => 1,
        }
    }

    /// True if the player draws at column `x`.
    #[must_use]
    pub fn pixel(&self, x: u8) -> bool {
        let gfx = if self.vdel { self.old_gfx } else { self.gfx };
        if gfx == 0 {
            return false;
        }
        let scale = self.scale();
        let offset = distance(x, self.pos);
        COPIES[usize::from(self.nusiz & 0x07)].iter().any(|&start| {
            if offset < start || offset >= start + 8 * scale {
                return false;
            }
            let column = (offset - start) / scale;
            let bit = if self.reflect { column } else { 7 - column };
            gfx & (1 << bit) != 0
        })
    }

    /// Column a locked missile is parked on: the middle of the player.
    #[must_use]
    pub fn centre(&self) -> u8 {
        let offset = match self.scale() {
            2 => 6,
            4 => 10,
            _ => 3,
        };
        (self.pos + offset) % VISIBLE_WIDTH
    }
}

/// Missile. Shares NUSIZ with its player for copies and width.
#[derive(Debug, Clone, Default)]
pub struct Missile {
    pub pos: u8,
    pub enabled: bool,
    pub nusiz: u8,
    /// RESMP: missile follows its player and is not drawn.
    pub locked: bool,
    pub hm: u8,
}

impl Missile {
    #[must_use]
    pub fn width(&self) -> u8 {
        1 << ((self.nusiz >> 4) & 0x03)
    }

    #[must_use]
    pub fn pixel(&self, x: u8) -> bool {
        if !self.enabled || self.locked {
            return false;
        }
        let width = self.width();
        let offset = distance(x, self.pos);
        COPIES[usize::from(self.nusiz & 0x07)]
            .iter()
            .any(|&start| offset >= start && offset < start + width)
    }
}

/// Ball. Width comes from CTRLPF bits 4-5.
#[derive(Debug, Clone, Default)]
pub struct Ball {
    pub pos: u8,
    pub enabled: bool,
    pub old_enabled: bool,
    pub vdel: bool,
    pub hm: u8,
}

impl Ball {
    #[must_use]
    pub fn pixel(&self, x: u8, ctrlpf: u8) -> bool {
        let enabled = if self.vdel { self.old_enabled } else { self.enabled };
        enabled && distance(x, self.pos) < 1 << ((ctrlpf >> 4) & 0x03)
    }
}
