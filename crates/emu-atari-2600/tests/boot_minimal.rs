//! Minimal cartridge boot tests.
//!
//! Each test builds a tiny cartridge as a byte array, boots it and runs
//! whole frames through the CPU, TIA, RIOT and bank-switching logic
//! together.

use atari_tia::palette::argb;
use emu_atari_2600::{
    Atari2600, Atari2600Config, CYCLES_PER_FRAME, ConsoleSwitches, Joystick, capture,
};
use emu_core::{Observable, Value};

/// Build a 4K image with `code` at $F000 and the reset vector pointing at it.
fn rom_4k(code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0xEA; 4096];
    rom[..code.len()].copy_from_slice(code);
    rom[0xFFC] = 0x00;
    rom[0xFFD] = 0xF0;
    rom
}

fn boot(rom_data: Vec<u8>) -> Atari2600 {
    let config = Atari2600Config {
        rom_data,
        ..Atari2600Config::default()
    };
    Atari2600::new(&config).expect("cartridge should load")
}

fn ram(atari: &Atari2600, addr: u16) -> u8 {
    atari.bus().peek(addr)
}

#[test]
fn background_colour_fills_frame() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xA9, 0x1E,       // F000: LDA #$1E
        0x85, 0x09,       // F002: STA COLUBK
        0x4C, 0x04, 0xF0, // F004: JMP $F004
    ]);
    let mut atari = boot(code);
    atari.run_frame();

    let colour = argb(0x1E);
    assert!(atari.framebuffer().iter().all(|&p| p == colour));
}

#[test]
fn wsync_kernel_counts_scanlines() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xA2, 0x00,       // F000: LDX #0
        0x85, 0x02,       // F002: STA WSYNC   (loop)
        0xE8,             // F004: INX
        0x86, 0x80,       // F005: STX $80
        0x4C, 0x02, 0xF0, // F007: JMP $F002
    ]);
    let mut atari = boot(code);

    // X counts line starts 1..=261; the frame ends while stalled on line 261.
    let cycles = atari.run_frame();
    assert_eq!(cycles, CYCLES_PER_FRAME);
    assert_eq!(ram(&atari, 0x80), (261 % 256) as u8);

    let cycles = atari.run_frame();
    assert_eq!(cycles, CYCLES_PER_FRAME);
    assert_eq!(ram(&atari, 0x80), ((261 + 262) % 256) as u8);
    assert_eq!(atari.query("tia.scanline"), Some(Value::U16(0)));
}

#[test]
fn wsync_resumes_at_line_start() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0x85, 0x02,       // F000: STA WSYNC
        0x4C, 0x02, 0xF0, // F002: JMP $F002
    ]);
    let mut atari = boot(code);

    // STA WSYNC takes 3 cycles, then the CPU stalls to the end of line 0.
    let mut cycles = 0;
    while atari.query("tia.scanline") == Some(Value::U16(0)) {
        cycles += atari.step();
    }
    assert_eq!(cycles, 76);
    assert_eq!(atari.query("tia.dot"), Some(Value::U16(0)));
    assert_eq!(atari.query("cpu.halted"), Some(Value::Bool(false)));
    assert_eq!(atari.query("cpu.pc"), Some(Value::U16(0xF002)));
}

#[test]
fn riot_timer_polling() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xA9, 0x02,       // F000: LDA #2
        0x8D, 0x96, 0x02, // F002: STA TIM64T
        0xAD, 0x84, 0x02, // F005: LDA INTIM   (wait)
        0xD0, 0xFB,       // F008: BNE wait
        0xE6, 0x80,       // F00A: INC $80
        0x4C, 0x0C, 0xF0, // F00C: JMP $F00C
    ]);
    let mut atari = boot(code);
    atari.run_frame();
    assert_eq!(ram(&atari, 0x80), 1);
    assert_eq!(atari.query("riot.underflow"), Some(Value::Bool(true)));
}

#[test]
fn f8_bank_switch_from_code() {
    #[rustfmt::skip]
    let bank1: &[u8] = &[
        0xAD, 0xF8, 0x1F, // F000: LDA $1FF8   switch to bank 0
    ];
    // Bank 0 picks up at the next instruction
    #[rustfmt::skip]
    let bank0: &[u8] = &[
        0xA9, 0x42,       // F003: LDA #$42
        0x85, 0x80,       // F005: STA $80
        0x4C, 0x07, 0xF0, // F007: JMP $F007
    ];
    let mut rom = vec![0xEA; 8192];
    rom[0x0003..0x0003 + bank0.len()].copy_from_slice(bank0);
    rom[0x1000..0x1000 + bank1.len()].copy_from_slice(bank1);
    rom[0x1FFC] = 0x00;
    rom[0x1FFD] = 0xF0;

    let mut atari = boot(rom);
    assert_eq!(atari.query("cart.bank"), Some(Value::U8(1)));
    atari.run_frame();
    assert_eq!(ram(&atari, 0x80), 0x42);
    assert_eq!(atari.query("cart.bank"), Some(Value::U8(0)));
}

#[test]
fn f6_hotspot_round_trip_from_code() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0x8D, 0xF6, 0x1F, // F000: STA $1FF6   bank 0
        0xAD, 0x00, 0xF8, // F003: LDA $F800
        0x85, 0x80,       // F006: STA $80
        0x8D, 0xF7, 0x1F, // F008: STA $1FF7   bank 1
        0xAD, 0x00, 0xF8, // F00B: LDA $F800
        0x85, 0x81,       // F00E: STA $81
        0x8D, 0xF8, 0x1F, // F010: STA $1FF8   bank 2
        0xAD, 0x00, 0xF8, // F013: LDA $F800
        0x85, 0x82,       // F016: STA $82
        0x8D, 0xF9, 0x1F, // F018: STA $1FF9   bank 3
        0xAD, 0x00, 0xF8, // F01B: LDA $F800
        0x85, 0x83,       // F01E: STA $83
        0x4C, 0x20, 0xF0, // F020: JMP $F020
    ];
    // Same code in every bank, a bank marker at $F800
    let mut rom = Vec::with_capacity(16384);
    for bank in 0..4u8 {
        let mut image = rom_4k(code);
        image[0x800] = 0xB0 + bank;
        rom.extend_from_slice(&image);
    }

    let mut atari = boot(rom);
    atari.run_frame();
    assert_eq!(
        [0x80, 0x81, 0x82, 0x83].map(|a| ram(&atari, a)),
        [0xB0, 0xB1, 0xB2, 0xB3]
    );
    assert_eq!(atari.query("cart.bank"), Some(Value::U8(3)));
}

#[test]
fn jam_still_completes_frames() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xA9, 0x44,       // F000: LDA #$44
        0x85, 0x09,       // F002: STA COLUBK
        0x02,             // F004: JAM
    ]);
    let mut atari = boot(code);

    let cycles = atari.run_frame();
    assert!(atari.frame_complete());
    assert!(atari.cpu().is_jammed());
    assert!((CYCLES_PER_FRAME..CYCLES_PER_FRAME + 3).contains(&cycles));
    assert_eq!(atari.framebuffer()[0], argb(0x44));

    atari.run_frame();
    assert_eq!(atari.frame_count(), 2);

    atari.reset();
    assert!(!atari.cpu().is_jammed());
    assert_eq!(atari.query("cpu.pc"), Some(Value::U16(0xF000)));
}

#[test]
fn playfield_drawn_from_code() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xA9, 0x0E,       // F000: LDA #$0E
        0x85, 0x08,       // F002: STA COLUPF
        0xA9, 0xF0,       // F004: LDA #$F0
        0x85, 0x0D,       // F006: STA PF0
        0x4C, 0x08, 0xF0, // F008: JMP $F008
    ]);
    let mut atari = boot(code);
    atari.run_frame();

    let fb = atari.framebuffer();
    let row = &fb[100 * 160..101 * 160];
    assert!(row[..16].iter().all(|&p| p == argb(0x0E)));
    assert!(row[16..80].iter().all(|&p| p == argb(0x00)));
    assert!(row[80..96].iter().all(|&p| p == argb(0x0E)));
}

#[test]
fn inputs_visible_to_program() {
    #[rustfmt::skip]
    let code = rom_4k(&[
        0xAD, 0x80, 0x02, // F000: LDA SWCHA
        0x85, 0x80,       // F003: STA $80
        0xA5, 0x0C,       // F005: LDA INPT4
        0x85, 0x81,       // F007: STA $81
        0xAD, 0x82, 0x02, // F009: LDA SWCHB
        0x85, 0x82,       // F00C: STA $82
        0x4C, 0x00, 0xF0, // F00E: JMP $F000
    ]);
    let mut atari = boot(code);
    atari.run_frame();
    assert_eq!(ram(&atari, 0x80), 0xFF);
    assert_eq!(ram(&atari, 0x81), 0x80);
    assert_eq!(ram(&atari, 0x82), 0x0B);

    atari.set_joystick(
        0,
        Joystick {
            left: true,
            fire: true,
            ..Joystick::default()
        },
    );
    atari.set_switches(ConsoleSwitches {
        colour: false,
        ..ConsoleSwitches::default()
    });
    atari.run_frame();
    assert_eq!(ram(&atari, 0x80), 0xBF);
    assert_eq!(ram(&atari, 0x81), 0x00);
    assert_eq!(ram(&atari, 0x82), 0x03);
}

#[test]
fn screenshot_writes_png() {
    let mut atari = boot(rom_4k(&[0x4C, 0x00, 0xF0])); // JMP $F000
    atari.run_frame();

    let path = std::env::temp_dir().join(format!("atari2600-shot-{}.png", std::process::id()));
    capture::save_screenshot(&atari, &path).expect("screenshot should save");
    let bytes = std::fs::read(&path).expect("screenshot should exist");
    std::fs::remove_file(&path).ok();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
