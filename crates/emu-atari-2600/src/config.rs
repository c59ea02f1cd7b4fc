//! Atari 2600 configuration.

use crate::cartridge::BankScheme;
use crate::input::ConsoleSwitches;

/// Atari 2600 configuration.
#[derive(Debug, Clone, Default)]
pub struct Atari2600Config {
    /// Raw cartridge image.
    pub rom_data: Vec<u8>,
    /// Force a bank-switching scheme instead of detecting it from the size.
    pub scheme: Option<BankScheme>,
    /// Console switch positions at power-on.
    pub switches: ConsoleSwitches,
}
