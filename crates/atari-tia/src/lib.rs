//! Atari TIA (Television Interface Adaptor).
//!
//! The TIA generates the 2600's video one colour clock at a time. Each
//! scanline is 228 clocks: 68 of horizontal blank followed by 160 visible
//! columns. A frame is 262 lines, of which 192 starting at line 40 are
//! kept in the framebuffer.
//!
//! There is no frame buffer on the real chip. The program races the beam,
//! rewriting playfield and sprite registers between lines, and uses WSYNC
//! to stall the CPU until the current line ends.

mod collision;
mod objects;
pub mod palette;
mod playfield;
pub mod registers;
mod tia;

pub use collision::Collisions;
pub use tia::{Tia, TiaEvents};

/// Colour clocks per scanline.
pub const DOTS_PER_LINE: u16 = 228;
/// Scanlines per frame.
pub const LINES_PER_FRAME: u16 = 262;
/// Colour clocks of horizontal blank at the start of each line.
pub const HBLANK_DOTS: u16 = 68;
/// First scanline copied into the framebuffer.
pub const FIRST_VISIBLE_LINE: u16 = 40;

/// Framebuffer dimensions.
pub const FB_WIDTH: u32 = 160;
pub const FB_HEIGHT: u32 = 192;

/// Visible columns per line, the modulus for all horizontal positions.
const VISIBLE_WIDTH: u8 = 160;
