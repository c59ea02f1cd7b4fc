//! Joysticks and console switches.
//!
//! Joystick directions and console switches arrive through the RIOT
//! ports; the fire buttons are TIA inputs. All lines are active low
//! except colour and the difficulty switches.
//!
//! Two layers:
//! 1. `Joystick` and `ConsoleSwitches`: live state packed into port bytes.
//! 2. `InputQueue`: timed events for scripted headless runs.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// SWCHA bits for player 0. Player 1 uses the same order in the low nibble.
mod swcha {
    pub const RIGHT: u8 = 0x80;
    pub const LEFT: u8 = 0x40;
    pub const DOWN: u8 = 0x20;
    pub const UP: u8 = 0x10;
}

/// SWCHB bits.
mod swchb {
    pub const RESET: u8 = 0x01;
    pub const SELECT: u8 = 0x02;
    pub const COLOUR: u8 = 0x08;
    pub const P0_DIFFICULTY: u8 = 0x40;
    pub const P1_DIFFICULTY: u8 = 0x80;
}

/// State of one joystick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Joystick {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Joystick {
    /// Direction lines as a high nibble, active low.
    #[must_use]
    pub fn nibble(self) -> u8 {
        let mut pressed = 0;
        if self.right {
            pressed |= swcha::RIGHT;
        }
        if self.left {
            pressed |= swcha::LEFT;
        }
        if self.down {
            pressed |= swcha::DOWN;
        }
        if self.up {
            pressed |= swcha::UP;
        }
        !pressed & 0xF0
    }

    fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Up => self.up = pressed,
            Button::Down => self.down = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
            Button::Fire => self.fire = pressed,
            _ => {}
        }
    }
}

/// Port A value for both joysticks: player 0 high nibble, player 1 low.
#[must_use]
pub fn swcha(p0: Joystick, p1: Joystick) -> u8 {
    p0.nibble() | (p1.nibble() >> 4)
}

/// Console switch positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSwitches {
    /// Game reset held down.
    pub reset: bool,
    /// Game select held down.
    pub select: bool,
    /// TV type switch in the colour position.
    pub colour: bool,
    /// Left difficulty in the A (expert) position.
    pub left_difficulty_a: bool,
    /// Right difficulty in the A (expert) position.
    pub right_difficulty_a: bool,
}

impl Default for ConsoleSwitches {
    fn default() -> Self {
        Self {
            reset: false,
            select: false,
            colour: true,
            left_difficulty_a: false,
            right_difficulty_a: false,
        }
    }
}

impl ConsoleSwitches {
    /// Port B value.
    #[must_use]
    pub fn swchb(self) -> u8 {
        let mut value = 0;
        if !self.reset {
            value |= swchb::RESET;
        }
        if !self.select {
            value |= swchb::SELECT;
        }
        if self.colour {
            value |= swchb::COLOUR;
        }
        if self.left_difficulty_a {
            value |= swchb::P0_DIFFICULTY;
        }
        if self.right_difficulty_a {
            value |= swchb::P1_DIFFICULTY;
        }
        value
    }

    fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Reset => self.reset = pressed,
            Button::Select => self.select = pressed,
            _ => {}
        }
    }
}

/// A scriptable input: a joystick line or a momentary console switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Reset,
    Select,
}

impl Button {
    const fn is_console(self) -> bool {
        matches!(self, Self::Reset | Self::Select)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Fire => "fire",
            Self::Reset => "reset",
            Self::Select => "select",
        };
        f.write_str(name)
    }
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "fire" => Ok(Self::Fire),
            "reset" => Ok(Self::Reset),
            "select" => Ok(Self::Select),
            _ => Err(format!("unknown button: {s}")),
        }
    }
}

/// Live input state for both ports and the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub joysticks: [Joystick; 2],
    pub switches: ConsoleSwitches,
}

impl InputState {
    /// Apply one button change. Console buttons ignore `player`.
    pub fn set(&mut self, player: usize, button: Button, pressed: bool) {
        if button.is_console() {
            self.switches.set(button, pressed);
        } else if let Some(stick) = self.joysticks.get_mut(player) {
            stick.set(button, pressed);
        }
    }
}

/// A timed button event.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// Frame number at which this event fires.
    pub frame: u64,
    /// Joystick port (0 or 1). Ignored for console switches.
    pub player: usize,
    pub button: Button,
    /// True = press, false = release.
    pub pressed: bool,
}

/// Timed input queue for scripted button sequences.
///
/// Events are sorted by frame number and processed at the start of each frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw input event.
    pub fn push(&mut self, event: InputEvent) {
        let pos = self
            .events
            .iter()
            .position(|e| e.frame > event.frame)
            .unwrap_or(self.events.len());
        self.events.insert(pos, event);
    }

    /// Enqueue a press and the matching release.
    pub fn enqueue_button(&mut self, player: usize, button: Button, at_frame: u64, hold_frames: u64) {
        self.push(InputEvent {
            frame: at_frame,
            player,
            button,
            pressed: true,
        });
        self.push(InputEvent {
            frame: at_frame + hold_frames,
            player,
            button,
            pressed: false,
        });
    }

    /// Apply every event due at or before `frame`. Returns true if
    /// anything changed.
    pub fn process(&mut self, frame: u64, state: &mut InputState) -> bool {
        let mut changed = false;
        while let Some(event) = self.events.pop_front() {
            if event.frame > frame {
                self.events.push_front(event);
                break;
            }
            state.set(event.player, event.button, event.pressed);
            changed = true;
        }
        changed
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
