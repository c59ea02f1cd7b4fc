//! Top-level Atari 2600 system.
//!
//! The TIA runs at 3,579,545 Hz (NTSC colour burst) and the 6507 at a
//! third of that, 1,193,182 Hz. One frame = 228 colour clocks × 262
//! scanlines = 59,736 TIA ticks, or 19,912 CPU cycles.
//!
//! The CPU is stepped an instruction at a time. Each step returns the
//! cycles spent and the TIA and RIOT are then clocked by the same
//! amount, so a register write made by an instruction is seen by the
//! chips from the next tick onwards.

use atari_tia::{FB_HEIGHT, FB_WIDTH};
use emu_core::{Cpu, Observable, Value};
use mos_6502::Mos6502;
use tracing::{info, warn};

use crate::Atari2600Error;
use crate::bus::Atari2600Bus;
use crate::cartridge::Cartridge;
use crate::config::Atari2600Config;
use crate::input::{self, Button, ConsoleSwitches, InputQueue, InputState, Joystick};

/// TIA ticks per CPU cycle.
const TIA_TICKS_PER_CYCLE: u32 = 3;

/// CPU cycles in one frame.
pub const CYCLES_PER_FRAME: u64 = 76 * 262;

/// Give up on a frame after this many cycles. Only reachable if the
/// program keeps writing RSYNC.
const FRAME_CYCLE_LIMIT: u64 = CYCLES_PER_FRAME * 4;

/// Atari 2600 system.
pub struct Atari2600 {
    cpu: Mos6502,
    bus: Atari2600Bus,
    /// Completed frame counter.
    frame_count: u64,
    /// CPU cycles since power-on, including stalled ones.
    cycles: u64,
    /// Live joystick and switch state.
    input: InputState,
    /// Timed input event queue.
    input_queue: InputQueue,
}

impl Atari2600 {
    /// Create a console with the cartridge described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cartridge image is rejected.
    pub fn new(config: &Atari2600Config) -> Result<Self, Atari2600Error> {
        let cartridge = match config.scheme {
            Some(scheme) => Cartridge::with_scheme(&config.rom_data, scheme)?,
            None => Cartridge::from_bytes(&config.rom_data)?,
        };
        let mut atari = Self::from_cartridge(cartridge);
        atari.set_switches(config.switches);
        Ok(atari)
    }

    /// Create a console around an already loaded cartridge and reset it.
    #[must_use]
    pub fn from_cartridge(cartridge: Cartridge) -> Self {
        let mut atari = Self {
            cpu: Mos6502::new(),
            bus: Atari2600Bus::new(cartridge),
            frame_count: 0,
            cycles: 0,
            input: InputState::default(),
            input_queue: InputQueue::new(),
        };
        atari.cpu.reset(&mut atari.bus);
        atari.apply_input();
        atari
    }

    /// Press the console's power-on reset: CPU, TIA, RIOT and cartridge
    /// return to their power-on state together. A jammed CPU runs again.
    pub fn reset(&mut self) {
        self.bus.cartridge.reset();
        self.bus.tia.reset();
        self.bus.riot.reset();
        self.cpu.reset(&mut self.bus);
        self.apply_input();
        info!("Console reset, PC=${:04X}", self.cpu.regs.pc);
    }

    /// Run until the TIA finishes a frame.
    ///
    /// Processes any pending input queue events first. Returns the CPU
    /// cycles spent, counting cycles the CPU sat stalled on WSYNC.
    pub fn run_frame(&mut self) -> u64 {
        if self.input_queue.process(self.frame_count, &mut self.input) {
            self.apply_input();
        }
        self.bus.tia.clear_frame_complete();

        let mut spent = 0;
        loop {
            spent += u64::from(self.step());
            if self.bus.tia.frame_complete() {
                break;
            }
            if spent >= FRAME_CYCLE_LIMIT {
                warn!("No frame after {spent} cycles, ending frame early");
                break;
            }
        }

        self.frame_count += 1;
        spent
    }

    /// Run one CPU instruction, or one cycle if the CPU is stalled on
    /// WSYNC or jammed, and clock the TIA and RIOT to match.
    ///
    /// Returns the CPU cycles spent.
    pub fn step(&mut self) -> u32 {
        let cycles = if self.cpu.is_halted() {
            1
        } else {
            self.cpu.step(&mut self.bus)
        };
        self.bus.tia.advance(cycles * TIA_TICKS_PER_CYCLE);
        self.bus.riot.tick(cycles);
        self.cpu.set_halted(self.bus.tia.wsync_active());
        self.cycles += u64::from(cycles);
        cycles
    }

    /// Push the live input state into the RIOT ports and TIA fire lines.
    fn apply_input(&mut self) {
        let [p0, p1] = self.input.joysticks;
        self.bus.riot.set_port_a_input(input::swcha(p0, p1));
        self.bus.riot.set_port_b_input(self.input.switches.swchb());
        self.bus.tia.set_fire(0, p0.fire);
        self.bus.tia.set_fire(1, p1.fire);
    }

    /// Set a joystick's state (player 0 or 1).
    pub fn set_joystick(&mut self, player: usize, joystick: Joystick) {
        if let Some(slot) = self.input.joysticks.get_mut(player) {
            *slot = joystick;
            self.apply_input();
        }
    }

    /// Set the console switches.
    pub fn set_switches(&mut self, switches: ConsoleSwitches) {
        self.input.switches = switches;
        self.apply_input();
    }

    /// Press or release a single button immediately.
    pub fn set_button(&mut self, player: usize, button: Button, pressed: bool) {
        self.input.set(player, button, pressed);
        self.apply_input();
    }

    /// Current input state.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable reference to the timed input queue.
    pub fn input_queue(&mut self) -> &mut InputQueue {
        &mut self.input_queue
    }

    /// Reference to the framebuffer (ARGB32, 160x192).
    #[must_use]
    pub fn framebuffer(&self) -> &[u32] {
        self.bus.tia.framebuffer()
    }

    /// Framebuffer width in pixels.
    #[must_use]
    pub fn framebuffer_width(&self) -> u32 {
        FB_WIDTH
    }

    /// Framebuffer height in pixels.
    #[must_use]
    pub fn framebuffer_height(&self) -> u32 {
        FB_HEIGHT
    }

    /// True if the last `run_frame` ended on a finished frame.
    #[must_use]
    pub fn frame_complete(&self) -> bool {
        self.bus.tia.frame_complete()
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &Atari2600Bus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut Atari2600Bus {
        &mut self.bus
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// CPU cycles since power-on.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// Parse `$80`, `0x80` or `128`.
fn parse_address(text: &str) -> Option<u16> {
    if let Some(hex) = text
        .strip_prefix('$')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
    {
        u16::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

impl Observable for Atari2600 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("tia.") {
            self.bus.tia.query(rest)
        } else if let Some(rest) = path.strip_prefix("riot.") {
            self.bus.riot.query(rest)
        } else if let Some(rest) = path.strip_prefix("cart.") {
            let cart = &self.bus.cartridge;
            match rest {
                "bank" => Some((cart.bank() as u8).into()),
                "banks" => Some((cart.bank_count() as u8).into()),
                "scheme" => Some(cart.scheme().to_string().into()),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.peek(addr)))
        } else {
            match path {
                "frame" => Some(self.frame_count.into()),
                "cycles" => Some(self.cycles.into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<6502_paths>",
            "tia.<tia_paths>",
            "riot.<riot_paths>",
            "cart.bank",
            "cart.banks",
            "cart.scheme",
            "memory.<address>",
            "frame",
            "cycles",
        ]
    }
}
