//! TIA core: beam counters, register file and per-dot compositing.
//!
//! One `advance` tick is one colour clock. The CPU runs at a third of
//! that rate, so every CPU cycle is three ticks. Register writes land at
//! the current dot and affect the ticks that follow; nothing is applied
//! retroactively.

use emu_core::{Observable, Value};

use crate::collision::{BL, Collisions, M0, M1, P0, P1, PF};
use crate::objects::{Ball, Missile, Player, apply_motion};
use crate::palette::argb;
use crate::playfield::Playfield;
use crate::registers::{
    AUDC0, AUDV1, COLUBK, COLUP0, COLUP1, COLUPF, CTRLPF, CXCLR, ENABL, ENAM0, ENAM1, GRP0, GRP1,
    HMBL, HMCLR, HMM0, HMM1, HMOVE, HMP0, HMP1, INPT4, INPT5, NUSIZ0, NUSIZ1, PF0, PF1, PF2, REFP0,
    REFP1, RESBL, RESM0, RESM1, RESMP0, RESMP1, RESP0, RESP1, RSYNC, VBLANK, VDELBL, VDELP0,
    VDELP1, VSYNC, WSYNC,
};
use crate::{
    DOTS_PER_LINE, FB_HEIGHT, FB_WIDTH, FIRST_VISIBLE_LINE, HBLANK_DOTS, LINES_PER_FRAME,
};

/// Things that happened during one `advance` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiaEvents {
    /// At least one scanline ended (WSYNC released).
    pub line_end: bool,
    /// The last scanline of the frame ended.
    pub frame_complete: bool,
}

/// Television Interface Adaptor.
pub struct Tia {
    dot: u16,
    scanline: u16,
    frame: u64,
    wsync: bool,
    frame_complete: bool,

    vsync: u8,
    vblank: u8,
    colup0: u8,
    colup1: u8,
    colupf: u8,
    colubk: u8,
    ctrlpf: u8,

    playfield: Playfield,
    p0: Player,
    p1: Player,
    m0: Missile,
    m1: Missile,
    ball: Ball,
    collisions: Collisions,

    /// AUDC0..AUDV1, stored but not synthesised.
    audio: [u8; 6],

    /// Fire buttons as currently held.
    fire: [bool; 2],
    /// Fire presses caught while VBLANK bit 6 latch mode is on.
    fire_latched: [bool; 2],

    framebuffer: Vec<u32>,
}

impl Default for Tia {
    fn default() -> Self {
        Self::new()
    }
}

impl Tia {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dot: 0,
            scanline: 0,
            frame: 0,
            wsync: false,
            frame_complete: false,
            vsync: 0,
            vblank: 0,
            colup0: 0,
            colup1: 0,
            colupf: 0,
            colubk: 0,
            ctrlpf: 0,
            playfield: Playfield::default(),
            p0: Player::default(),
            p1: Player::default(),
            m0: Missile::default(),
            m1: Missile::default(),
            ball: Ball::default(),
            collisions: Collisions::default(),
            audio: [0; 6],
            fire: [false; 2],
            fire_latched: [false; 2],
            framebuffer: vec![argb(0); (FB_WIDTH * FB_HEIGHT) as usize],
        }
    }

    /// Return to power-on state. Held fire buttons stay held.
    pub fn reset(&mut self) {
        let fire = self.fire;
        *self = Self::new();
        self.fire = fire;
    }

    /// Run `ticks` colour clocks.
    pub fn advance(&mut self, ticks: u32) -> TiaEvents {
        let mut events = TiaEvents::default();
        for _ in 0..ticks {
            self.tick(&mut events);
        }
        events
    }

    fn tick(&mut self, events: &mut TiaEvents) {
        if self.dot >= HBLANK_DOTS {
            self.render((self.dot - HBLANK_DOTS) as u8);
        }

        self.dot += 1;
        if self.dot < DOTS_PER_LINE {
            return;
        }
        self.dot = 0;
        self.wsync = false;
        events.line_end = true;

        self.scanline += 1;
        if self.scanline == LINES_PER_FRAME {
            self.scanline = 0;
            self.frame += 1;
            self.frame_complete = true;
            events.frame_complete = true;
        }
    }

    /// Composite one visible column of the current scanline.
    ///
    /// Only the 192 displayed lines latch collisions. Vertical blank holds
    /// the background colour.
    fn render(&mut self, x: u8) {
        let line = self.scanline.wrapping_sub(FIRST_VISIBLE_LINE);
        if u32::from(line) >= FB_HEIGHT {
            return;
        }
        let active = self.active_objects(x);
        self.collisions.record(active);

        let colour = if self.vblank & 0x02 != 0 {
            self.colubk
        } else {
            self.resolve_colour(active, x)
        };
        let idx = usize::from(line) * FB_WIDTH as usize + usize::from(x);
        self.framebuffer[idx] = argb(colour);
    }

    fn active_objects(&self, x: u8) -> u8 {
        let mut active = 0;
        if self.p0.pixel(x) {
            active |= P0;
        }
        if self.p1.pixel(x) {
            active |= P1;
        }
        if self.m0.pixel(x) {
            active |= M0;
        }
        if self.m1.pixel(x) {
            active |= M1;
        }
        if self.ball.pixel(x, self.ctrlpf) {
            active |= BL;
        }
        if self.playfield.pixel(x, self.ctrlpf & 0x01 != 0) {
            active |= PF;
        }
        active
    }

    fn resolve_colour(&self, active: u8, x: u8) -> u8 {
        let priority = self.ctrlpf & 0x04 != 0;
        let score = self.ctrlpf & 0x02 != 0 && !priority;

        let player0 = (active & (P0 | M0) != 0).then_some(self.colup0);
        let player1 = (active & (P1 | M1) != 0).then_some(self.colup1);
        let field = if active & BL != 0 {
            Some(self.colupf)
        } else if active & PF != 0 {
            Some(match (score, x < 80) {
                (true, true) => self.colup0,
                (true, false) => self.colup1,
                (false, _) => self.colupf,
            })
        } else {
            None
        };

        let colour = if priority {
            field.or(player0).or(player1)
        } else {
            player0.or(player1).or(field)
        };
        colour.unwrap_or(self.colubk)
    }

    /// Write a register at the chip's current dot.
    pub fn write(&mut self, reg: u8, value: u8) {
        self.apply_write(reg, value, self.dot);
    }

    /// Write a register as if the beam were at `dot`.
    ///
    /// `dot` only matters to the position strobes.
    pub fn apply_write(&mut self, reg: u8, value: u8, dot: u16) {
        match reg & 0x3F {
            VSYNC => self.vsync = value,
            VBLANK => {
                self.vblank = value;
                if value & 0x40 == 0 {
                    self.fire_latched = [false; 2];
                }
            }
            WSYNC => self.wsync = true,
            RSYNC => {
                self.dot = 0;
                self.scanline = 0;
            }
            NUSIZ0 => {
                self.p0.nusiz = value;
                self.m0.nusiz = value;
                self.lock_missiles();
            }
            NUSIZ1 => {
                self.p1.nusiz = value;
                self.m1.nusiz = value;
                self.lock_missiles();
            }
            COLUP0 => self.colup0 = value,
            COLUP1 => self.colup1 = value,
            COLUPF => self.colupf = value,
            COLUBK => self.colubk = value,
            CTRLPF => self.ctrlpf = value,
            REFP0 => self.p0.reflect = value & 0x08 != 0,
            REFP1 => self.p1.reflect = value & 0x08 != 0,
            PF0 => self.playfield.pf0 = value,
            PF1 => self.playfield.pf1 = value,
            PF2 => self.playfield.pf2 = value,
            RESP0 => {
                self.p0.pos = strobe_position(dot);
                self.lock_missiles();
            }
            RESP1 => {
                self.p1.pos = strobe_position(dot);
                self.lock_missiles();
            }
            RESM0 => self.m0.pos = strobe_position(dot),
            RESM1 => self.m1.pos = strobe_position(dot),
            RESBL => self.ball.pos = strobe_position(dot),
            AUDC0..=AUDV1 => self.audio[usize::from((reg & 0x3F) - AUDC0)] = value,
            GRP0 => {
                self.p0.gfx = value;
                self.p1.old_gfx = self.p1.gfx;
            }
            GRP1 => {
                self.p1.gfx = value;
                self.p0.old_gfx = self.p0.gfx;
                self.ball.old_enabled = self.ball.enabled;
            }
            ENAM0 => self.m0.enabled = value & 0x02 != 0,
            ENAM1 => self.m1.enabled = value & 0x02 != 0,
            ENABL => self.ball.enabled = value & 0x02 != 0,
            HMP0 => self.p0.hm = value,
            HMP1 => self.p1.hm = value,
            HMM0 => self.m0.hm = value,
            HMM1 => self.m1.hm = value,
            HMBL => self.ball.hm = value,
            VDELP0 => self.p0.vdel = value & 0x01 != 0,
            VDELP1 => self.p1.vdel = value & 0x01 != 0,
            VDELBL => self.ball.vdel = value & 0x01 != 0,
            RESMP0 => {
                self.m0.locked = value & 0x02 != 0;
                self.lock_missiles();
            }
            RESMP1 => {
                self.m1.locked = value & 0x02 != 0;
                self.lock_missiles();
            }
            HMOVE => {
                self.p0.pos = apply_motion(self.p0.pos, self.p0.hm);
                self.p1.pos = apply_motion(self.p1.pos, self.p1.hm);
                self.m0.pos = apply_motion(self.m0.pos, self.m0.hm);
                self.m1.pos = apply_motion(self.m1.pos, self.m1.hm);
                self.ball.pos = apply_motion(self.ball.pos, self.ball.hm);
                self.lock_missiles();
            }
            HMCLR => {
                self.p0.hm = 0;
                self.p1.hm = 0;
                self.m0.hm = 0;
                self.m1.hm = 0;
                self.ball.hm = 0;
            }
            CXCLR => self.collisions.clear(),
            _ => {}
        }
    }

    fn lock_missiles(&mut self) {
        if self.m0.locked {
            self.m0.pos = self.p0.centre();
        }
        if self.m1.locked {
            self.m1.pos = self.p1.centre();
        }
    }

    /// Read a register. Only the low nibble of the address is decoded.
    ///
    /// Reads have no side effects.
    #[must_use]
    pub fn read(&self, reg: u8) -> u8 {
        match reg & 0x0F {
            cx @ 0x00..=0x07 => self.collisions.read(cx),
            INPT4 => self.fire_line(0),
            INPT5 => self.fire_line(1),
            // Paddles and unused addresses
            _ => 0,
        }
    }

    fn fire_line(&self, player: usize) -> u8 {
        if self.fire[player] || self.fire_latched[player] {
            0x00
        } else {
            0x80
        }
    }

    /// Press or release a joystick fire button (player 0 or 1).
    pub fn set_fire(&mut self, player: usize, pressed: bool) {
        let Some(held) = self.fire.get_mut(player) else {
            return;
        };
        *held = pressed;
        if pressed && self.vblank & 0x40 != 0 {
            self.fire_latched[player] = true;
        }
    }

    /// True while a WSYNC write is holding the CPU.
    #[must_use]
    pub fn wsync_active(&self) -> bool {
        self.wsync
    }

    /// True once a frame has finished since the flag was last cleared.
    #[must_use]
    pub fn frame_complete(&self) -> bool {
        self.frame_complete
    }

    pub fn clear_frame_complete(&mut self) {
        self.frame_complete = false;
    }

    /// Reference to the framebuffer (ARGB32, 160x192).
    #[must_use]
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    /// Current dot (0-227).
    #[must_use]
    pub fn dot(&self) -> u16 {
        self.dot
    }

    /// Current scanline (0-261).
    #[must_use]
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Frames completed since power-on.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Visible column captured by a position strobe at `dot`.
fn strobe_position(dot: u16) -> u8 {
    dot.saturating_sub(HBLANK_DOTS).min(u16::from(crate::VISIBLE_WIDTH) - 1) as u8
}

impl Observable for Tia {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "dot" => Some(self.dot.into()),
            "scanline" => Some(self.scanline.into()),
            "frame" => Some(self.frame.into()),
            "wsync" => Some(self.wsync.into()),
            "vblank" => Some(self.vblank.into()),
            "vsync" => Some(self.vsync.into()),
            "colubk" => Some(self.colubk.into()),
            "colupf" => Some(self.colupf.into()),
            "pf0" => Some(self.playfield.pf0.into()),
            "pf1" => Some(self.playfield.pf1.into()),
            "pf2" => Some(self.playfield.pf2.into()),
            "grp0" => Some(self.p0.gfx.into()),
            "grp1" => Some(self.p1.gfx.into()),
            "ctrlpf" => Some(self.ctrlpf.into()),
            "posp0" => Some(self.p0.pos.into()),
            "posp1" => Some(self.p1.pos.into()),
            "posm0" => Some(self.m0.pos.into()),
            "posm1" => Some(self.m1.pos.into()),
            "posbl" => Some(self.ball.pos.into()),
            "cx" => Some(self.collisions.bits().into()),
            "audio" => Some(self.audio.as_slice().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "dot", "scanline", "frame", "wsync", "vblank", "vsync", "colubk", "colupf", "pf0",
            "pf1", "pf2", "grp0", "grp1", "ctrlpf", "posp0", "posp1", "posm0", "posm1", "posbl",
            "cx", "audio",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;
    use crate::registers::{CXM0P, CXPPMM, INPT0};

    const FRAME_TICKS: u32 = DOTS_PER_LINE as u32 * LINES_PER_FRAME as u32;

    /// Advance to the start of `line`, dot 0.
    fn goto_line(tia: &mut Tia, line: u16) {
        while tia.scanline() != line || tia.dot() != 0 {
            tia.advance(1);
        }
    }

    fn pixel(tia: &Tia, x: usize, y: usize) -> u32 {
        tia.framebuffer()[y * FB_WIDTH as usize + x]
    }

    #[test]
    fn wsync_releases_on_the_line_ending_tick() {
        let mut tia = Tia::new();
        tia.advance(100);
        tia.write(WSYNC, 0);
        assert!(tia.wsync_active());

        let remaining = u32::from(DOTS_PER_LINE - tia.dot());
        let events = tia.advance(remaining - 1);
        assert!(tia.wsync_active());
        assert!(!events.line_end);

        let events = tia.advance(1);
        assert!(!tia.wsync_active());
        assert!(events.line_end);
        assert_eq!(tia.scanline(), 1);
        assert_eq!(tia.dot(), 0);
    }

    #[test]
    fn exactly_one_frame_per_frame_of_ticks() {
        let mut tia = Tia::new();
        let mut completions = 0;
        for _ in 0..FRAME_TICKS {
            if tia.advance(1).frame_complete {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!((tia.scanline(), tia.dot()), (0, 0));
        assert_eq!(tia.frame(), 1);
    }

    #[test]
    fn batched_frame_completes_once() {
        let mut tia = Tia::new();
        let events = tia.advance(FRAME_TICKS - 1);
        assert!(!events.frame_complete);
        assert!(tia.advance(1).frame_complete);
        assert!(tia.frame_complete());
        tia.clear_frame_complete();
        assert!(!tia.frame_complete());
    }

    #[test]
    fn strobe_captures_dot_minus_hblank() {
        let mut tia = Tia::new();
        tia.apply_write(RESP0, 0, 30);
        assert_eq!(tia.query("posp0"), Some(Value::U8(0)));
        tia.apply_write(RESP0, 0, 100);
        assert_eq!(tia.query("posp0"), Some(Value::U8(32)));
        tia.apply_write(RESBL, 0, 227);
        assert_eq!(tia.query("posbl"), Some(Value::U8(159)));
    }

    #[test]
    fn write_uses_current_dot() {
        let mut tia = Tia::new();
        tia.advance(80);
        tia.write(RESM1, 0);
        assert_eq!(tia.query("posm1"), Some(Value::U8(12)));
    }

    #[test]
    fn hmove_adds_signed_motion_and_wraps() {
        let mut tia = Tia::new();
        tia.apply_write(RESP0, 0, HBLANK_DOTS);
        tia.apply_write(RESP1, 0, HBLANK_DOTS + 159);
        tia.write(HMP0, 0xF0);
        tia.write(HMP1, 0x20);
        tia.write(HMOVE, 0);
        assert_eq!(tia.query("posp0"), Some(Value::U8(159)));
        assert_eq!(tia.query("posp1"), Some(Value::U8(1)));

        tia.write(HMCLR, 0);
        tia.write(HMOVE, 0);
        assert_eq!(tia.query("posp0"), Some(Value::U8(159)));
    }

    #[test]
    fn rsync_zeroes_counters() {
        let mut tia = Tia::new();
        tia.advance(5000);
        tia.write(RSYNC, 0);
        assert_eq!((tia.scanline(), tia.dot()), (0, 0));
    }

    #[test]
    fn player_missile_collision_and_clear() {
        let mut tia = Tia::new();
        tia.apply_write(RESP0, 0, HBLANK_DOTS + 50);
        tia.apply_write(RESM0, 0, HBLANK_DOTS + 50);
        tia.write(GRP0, 0x80);
        tia.write(ENAM0, 0x02);
        assert_eq!(tia.read(CXM0P), 0);

        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(tia.read(CXM0P), 0x40);
        assert_eq!(tia.read(CXPPMM), 0);

        tia.write(CXCLR, 0);
        assert_eq!(tia.read(CXM0P), 0);
    }

    #[test]
    fn collisions_only_latch_on_displayed_lines() {
        let mut tia = Tia::new();
        tia.write(GRP0, 0xFF);
        tia.write(GRP1, 0xFF);
        tia.advance(u32::from(DOTS_PER_LINE));
        assert_eq!(tia.scanline(), 1);
        assert_eq!(tia.read(CXPPMM), 0x00);

        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(tia.read(CXPPMM), 0x80);

        goto_line(&mut tia, FIRST_VISIBLE_LINE + FB_HEIGHT as u16);
        tia.write(CXCLR, 0);
        goto_line(&mut tia, LINES_PER_FRAME - 1);
        assert_eq!(tia.read(CXPPMM), 0x00, "overscan does not latch");
    }

    #[test]
    fn collisions_latch_during_vblank_on_displayed_lines() {
        let mut tia = Tia::new();
        tia.write(VBLANK, 0x02);
        tia.write(GRP0, 0xFF);
        tia.write(GRP1, 0xFF);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(tia.read(CXPPMM), 0x80);
    }

    #[test]
    fn background_fills_visible_lines() {
        let mut tia = Tia::new();
        tia.write(COLUBK, 0x1E);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(pixel(&tia, 0, 0), PALETTE[0x0F]);
        assert_eq!(pixel(&tia, 159, 0), PALETTE[0x0F]);
        assert_eq!(pixel(&tia, 0, 1), PALETTE[0], "line not reached yet");
    }

    #[test]
    fn vblank_holds_background() {
        let mut tia = Tia::new();
        tia.write(COLUBK, 0x1E);
        tia.advance(FRAME_TICKS);
        assert_eq!(pixel(&tia, 10, 50), argb(0x1E));

        tia.write(VBLANK, 0x02);
        tia.write(COLUP0, 0x40);
        tia.write(GRP0, 0xFF);
        tia.apply_write(RESP0, 0, HBLANK_DOTS + 8);
        tia.advance(FRAME_TICKS);
        assert_eq!(pixel(&tia, 10, 50), argb(0x1E));
        assert_eq!(pixel(&tia, 0, 0), argb(0x1E));
    }

    #[test]
    fn player_over_playfield_unless_priority() {
        let mut tia = Tia::new();
        tia.write(COLUP0, 0x40);
        tia.write(COLUPF, 0x80);
        tia.write(PF0, 0x10);
        tia.write(GRP0, 0x80);
        tia.apply_write(RESP0, 0, HBLANK_DOTS);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(pixel(&tia, 0, 0), argb(0x40));
        assert_eq!(pixel(&tia, 1, 0), argb(0x80));

        tia.write(CTRLPF, 0x04);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 2);
        assert_eq!(pixel(&tia, 0, 1), argb(0x80));
    }

    #[test]
    fn score_mode_uses_player_colours() {
        let mut tia = Tia::new();
        tia.write(COLUP0, 0x40);
        tia.write(COLUP1, 0xC0);
        tia.write(PF0, 0x10);
        tia.write(CTRLPF, 0x02);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(pixel(&tia, 0, 0), argb(0x40));
        assert_eq!(pixel(&tia, 80, 0), argb(0xC0));
    }

    #[test]
    fn reflected_playfield_on_screen() {
        let mut tia = Tia::new();
        tia.write(COLUPF, 0x0E);
        tia.write(PF0, 0x10);
        tia.write(CTRLPF, 0x01);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(pixel(&tia, 159, 0), argb(0x0E));
        assert_eq!(pixel(&tia, 80, 0), argb(0x00));
    }

    #[test]
    fn nusiz_three_copies_on_screen() {
        let mut tia = Tia::new();
        tia.write(COLUP0, 0x0E);
        tia.write(NUSIZ0, 0x03);
        tia.write(GRP0, 0x80);
        tia.apply_write(RESP0, 0, HBLANK_DOTS + 10);
        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        let lit: Vec<usize> = (0..160)
            .filter(|&x| pixel(&tia, x, 0) == argb(0x0E))
            .collect();
        assert_eq!(lit, vec![10, 26, 42]);
    }

    #[test]
    fn vertical_delay_shadow_rules() {
        let mut tia = Tia::new();
        tia.write(VDELP0, 0x01);
        tia.write(GRP0, 0xAA);
        assert_eq!(tia.p0.old_gfx, 0, "GRP0 write does not refresh its own shadow");
        tia.write(GRP1, 0x55);
        assert_eq!(tia.p0.old_gfx, 0xAA);

        tia.write(ENABL, 0x02);
        assert!(!tia.ball.old_enabled);
        tia.write(GRP1, 0);
        assert!(tia.ball.old_enabled);

        tia.write(GRP0, 0);
        assert_eq!(tia.p1.old_gfx, 0);
        assert_eq!(tia.p1.gfx, 0);
    }

    #[test]
    fn resmp_locks_missile_to_player() {
        let mut tia = Tia::new();
        tia.apply_write(RESP0, 0, HBLANK_DOTS + 20);
        tia.write(ENAM0, 0x02);
        tia.write(RESMP0, 0x02);
        assert_eq!(tia.query("posm0"), Some(Value::U8(23)));

        tia.apply_write(RESP0, 0, HBLANK_DOTS + 40);
        assert_eq!(tia.query("posm0"), Some(Value::U8(43)));

        goto_line(&mut tia, FIRST_VISIBLE_LINE + 1);
        assert_eq!(tia.read(CXM0P), 0, "locked missile is hidden");
    }

    #[test]
    fn fire_buttons_active_low() {
        let mut tia = Tia::new();
        assert_eq!(tia.read(INPT4), 0x80);
        assert_eq!(tia.read(INPT5), 0x80);
        tia.set_fire(0, true);
        assert_eq!(tia.read(INPT4), 0x00);
        assert_eq!(tia.read(INPT5), 0x80);
        tia.set_fire(0, false);
        assert_eq!(tia.read(INPT4), 0x80);
        tia.set_fire(7, true);
        assert_eq!(tia.read(INPT0), 0);
    }

    #[test]
    fn latched_fire_holds_until_latch_disabled() {
        let mut tia = Tia::new();
        tia.write(VBLANK, 0x40);
        tia.set_fire(1, true);
        tia.set_fire(1, false);
        assert_eq!(tia.read(INPT5), 0x00);
        tia.write(VBLANK, 0x00);
        assert_eq!(tia.read(INPT5), 0x80);
    }

    #[test]
    fn reads_are_idempotent() {
        let mut tia = Tia::new();
        tia.write(GRP0, 0xFF);
        tia.write(PF2, 0xFF);
        tia.advance(u32::from(DOTS_PER_LINE) * 2);
        for reg in 0..0x10 {
            assert_eq!(tia.read(reg), tia.read(reg), "register {reg:#04X}");
        }
        assert_eq!(tia.read(0x12), tia.read(0x02), "upper address bits ignored");
    }

    #[test]
    fn reset_keeps_held_fire() {
        let mut tia = Tia::new();
        tia.set_fire(0, true);
        tia.write(COLUBK, 0x44);
        tia.advance(1000);
        tia.reset();
        assert_eq!(tia.read(INPT4), 0);
        assert_eq!(tia.query("colubk"), Some(Value::U8(0)));
        assert_eq!(tia.dot(), 0);
    }
}
