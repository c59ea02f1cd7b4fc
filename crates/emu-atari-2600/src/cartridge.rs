//! Cartridge images and bank switching.
//!
//! The 6507 sees a single 4 KiB cartridge window at $1000-$1FFF. Larger
//! images are split into 4 KiB banks and swapped in by touching hot-spot
//! addresses near the top of the window. The scheme is chosen from the
//! image size; there is no header.
//!
//! | Scheme | Size   | Banks | Hot-spots      |
//! |--------|--------|-------|----------------|
//! | 2K     | 2 KiB  | 1     | none (mirrored)|
//! | 4K     | 4 KiB  | 1     | none           |
//! | F8     | 8 KiB  | 2     | $FF8-$FF9      |
//! | FA     | 12 KiB | 3     | $FF8-$FFA      |
//! | F6     | 16 KiB | 4     | $FF6-$FF9      |
//! | F4     | 32 KiB | 8     | $FF4-$FFB      |
//!
//! FA carts also carry 256 bytes of RAM: written through $000-$0FF and
//! read back through $100-$1FF.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Size of the cartridge window and of one bank.
pub const BANK_SIZE: usize = 0x1000;

/// Largest image accepted.
pub const MAX_ROM_SIZE: usize = 0x10000;

/// FA (CBS RAM Plus) on-cart RAM size.
const FA_RAM_SIZE: usize = 0x100;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("cartridge image is empty")]
    Empty,
    #[error("cartridge image is {0} bytes, larger than the 64 KiB maximum")]
    TooLarge(usize),
    #[error("unknown bank-switching scheme: {0}")]
    UnknownScheme(String),
    #[error("cannot read cartridge: {0}")]
    Io(#[from] std::io::Error),
}

/// Bank-switching scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankScheme {
    Fixed2K,
    Fixed4K,
    F8,
    Fa,
    F6,
    F4,
}

impl BankScheme {
    /// Pick a scheme from the image length.
    ///
    /// Unrecognised lengths fall back to a fixed scheme: 2K up to 2048
    /// bytes, 4K (first 4 KiB only) above that.
    #[must_use]
    pub fn detect(len: usize) -> Self {
        match len {
            8192 => Self::F8,
            12288 => Self::Fa,
            16384 => Self::F6,
            32768 => Self::F4,
            0..=2048 => Self::Fixed2K,
            _ => Self::Fixed4K,
        }
    }

    /// Number of 4 KiB banks.
    #[must_use]
    pub const fn bank_count(self) -> usize {
        match self {
            Self::Fixed2K | Self::Fixed4K => 1,
            Self::F8 => 2,
            Self::Fa => 3,
            Self::F6 => 4,
            Self::F4 => 8,
        }
    }

    /// Image size the scheme expects.
    #[must_use]
    pub const fn rom_size(self) -> usize {
        match self {
            Self::Fixed2K => 0x800,
            _ => self.bank_count() * BANK_SIZE,
        }
    }

    /// First hot-spot offset within the window. Banks are selected by
    /// consecutive offsets from here.
    const fn first_hotspot(self) -> Option<u16> {
        match self {
            Self::Fixed2K | Self::Fixed4K => None,
            Self::F8 | Self::Fa => Some(0xFF8),
            Self::F6 => Some(0xFF6),
            Self::F4 => Some(0xFF4),
        }
    }

    fn has_ram(self) -> bool {
        self == Self::Fa
    }
}

impl fmt::Display for BankScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixed2K => "2K",
            Self::Fixed4K => "4K",
            Self::F8 => "F8",
            Self::Fa => "FA",
            Self::F6 => "F6",
            Self::F4 => "F4",
        };
        f.write_str(name)
    }
}

impl FromStr for BankScheme {
    type Err = CartridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "2K" => Ok(Self::Fixed2K),
            "4K" => Ok(Self::Fixed4K),
            "F8" => Ok(Self::F8),
            "FA" => Ok(Self::Fa),
            "F6" => Ok(Self::F6),
            "F4" => Ok(Self::F4),
            _ => Err(CartridgeError::UnknownScheme(s.to_string())),
        }
    }
}

/// A loaded cartridge.
#[derive(Debug, Clone)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    scheme: BankScheme,
    bank: usize,
}

impl Cartridge {
    /// Build a cartridge from a raw image, choosing the scheme by size.
    ///
    /// # Errors
    ///
    /// Fails if the image is empty or larger than 64 KiB.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        Self::with_scheme(data, BankScheme::detect(data.len()))
    }

    /// Build a cartridge with an explicit scheme.
    ///
    /// The image is truncated or repeated to the scheme's size.
    ///
    /// # Errors
    ///
    /// Fails if the image is empty or larger than 64 KiB.
    pub fn with_scheme(data: &[u8], scheme: BankScheme) -> Result<Self, CartridgeError> {
        if data.is_empty() {
            return Err(CartridgeError::Empty);
        }
        if data.len() > MAX_ROM_SIZE {
            return Err(CartridgeError::TooLarge(data.len()));
        }

        let size = scheme.rom_size();
        if data.len() != size {
            warn!(
                "{} byte image does not match the {scheme} size of {size} bytes",
                data.len()
            );
        }
        let rom: Vec<u8> = data.iter().copied().cycle().take(size).collect();
        let ram = if scheme.has_ram() {
            vec![0; FA_RAM_SIZE]
        } else {
            Vec::new()
        };

        info!(
            "Cartridge: {} bytes, scheme {scheme}, {} bank(s)",
            data.len(),
            scheme.bank_count()
        );

        Ok(Self {
            rom,
            ram,
            scheme,
            bank: scheme.bank_count() - 1,
        })
    }

    /// Read an image from disk. `scheme` overrides size detection.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or the image is rejected.
    pub fn load(path: &Path, scheme: Option<BankScheme>) -> Result<Self, CartridgeError> {
        let data = std::fs::read(path)?;
        match scheme {
            Some(scheme) => Self::with_scheme(&data, scheme),
            None => Self::from_bytes(&data),
        }
    }

    /// Power-on state: last bank selected, RAM cleared.
    pub fn reset(&mut self) {
        self.bank = self.scheme.bank_count() - 1;
        self.ram.fill(0);
    }

    /// CPU read from the cartridge window. Touching a hot-spot switches
    /// bank first, so the byte comes from the newly selected bank.
    pub fn read(&mut self, addr: u16) -> u8 {
        let offset = addr & 0x0FFF;
        self.touch(offset);
        self.peek(addr)
    }

    /// CPU write to the cartridge window. ROM ignores the data; hot-spots
    /// still switch bank.
    pub fn write(&mut self, addr: u16, value: u8) {
        let offset = addr & 0x0FFF;
        self.touch(offset);
        if self.scheme.has_ram() && offset < 0x100 {
            self.ram[usize::from(offset)] = value;
        }
    }

    /// Read without switching bank.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        let offset = usize::from(addr & 0x0FFF);
        if self.scheme.has_ram() && (0x100..0x200).contains(&offset) {
            return self.ram[offset - 0x100];
        }
        match self.scheme {
            BankScheme::Fixed2K => self.rom[offset & 0x07FF],
            _ => self.rom[self.bank * BANK_SIZE + offset],
        }
    }

    fn touch(&mut self, offset: u16) {
        let Some(first) = self.scheme.first_hotspot() else {
            return;
        };
        let Some(bank) = offset.checked_sub(first).map(usize::from) else {
            return;
        };
        if bank < self.scheme.bank_count() && bank != self.bank {
            debug!("{} bank switch {} -> {bank}", self.scheme, self.bank);
            self.bank = bank;
        }
    }

    /// Currently selected bank.
    #[must_use]
    pub fn bank(&self) -> usize {
        self.bank
    }

    #[must_use]
    pub fn bank_count(&self) -> usize {
        self.scheme.bank_count()
    }

    #[must_use]
    pub fn scheme(&self) -> BankScheme {
        self.scheme
    }
}
