//! Atari 2600 emulator binary.
//!
//! Runs a cartridge headless for a number of frames, optionally saving a
//! screenshot of the last frame or every frame as PNGs.

use std::path::{Path, PathBuf};
use std::process;

use emu_atari_2600::{Atari2600, Atari2600Error, BankScheme, Button, Cartridge, capture};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Frames a `--press` holds its button down.
const PRESS_FRAMES: u64 = 5;

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// A scripted button press from `--press frame:button[:player]`.
struct Press {
    frame: u64,
    button: Button,
    player: usize,
}

struct CliArgs {
    rom_path: Option<PathBuf>,
    frames: u32,
    screenshot_path: Option<PathBuf>,
    record_dir: Option<PathBuf>,
    scheme: Option<BankScheme>,
    presses: Vec<Press>,
}

fn parse_press(arg: &str) -> Result<Press, String> {
    let mut parts = arg.split(':');
    let frame = parts
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| format!("bad frame in --press {arg}"))?;
    let button = parts
        .next()
        .ok_or_else(|| format!("missing button in --press {arg}"))?
        .parse()?;
    let player = match parts.next() {
        Some(p) => p
            .parse()
            .ok()
            .filter(|&p: &usize| p < 2)
            .ok_or_else(|| format!("bad player in --press {arg}"))?,
        None => 0,
    };
    Ok(Press {
        frame,
        button,
        player,
    })
}

fn print_usage() {
    eprintln!("Usage: emu-atari-2600 --rom <file> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --rom <file>              Cartridge image (.bin, .a26)");
    eprintln!("  --frames <n>              Number of frames to run [default: 60]");
    eprintln!("  --screenshot <file>       Save a PNG of the last frame");
    eprintln!("  --record <dir>            Save every frame as a PNG");
    eprintln!("  --scheme <2k|4k|f8|fa|f6|f4>  Force a bank-switching scheme");
    eprintln!("  --press <frame:button[:player]>");
    eprintln!("                            Press up/down/left/right/fire/reset/select");
    eprintln!();
    eprintln!("Logging is controlled by RUST_LOG [default: info].");
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        rom_path: None,
        frames: 60,
        screenshot_path: None,
        record_dir: None,
        scheme: None,
        presses: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rom" => {
                i += 1;
                cli.rom_path = args.get(i).map(PathBuf::from);
            }
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().map_err(|_| format!("bad frame count: {s}"))?;
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--record" => {
                i += 1;
                cli.record_dir = args.get(i).map(PathBuf::from);
            }
            "--scheme" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.scheme = Some(s.parse().map_err(|e| format!("{e}"))?);
                }
            }
            "--press" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.presses.push(parse_press(s)?);
                }
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(cli)
}

// ---------------------------------------------------------------------------
// Headless run
// ---------------------------------------------------------------------------

fn run(cli: &CliArgs, rom_path: &Path) -> Result<(), Atari2600Error> {
    let cartridge = Cartridge::load(rom_path, cli.scheme)?;
    let mut atari = Atari2600::from_cartridge(cartridge);

    for press in &cli.presses {
        atari
            .input_queue()
            .enqueue_button(press.player, press.button, press.frame, PRESS_FRAMES);
    }

    if let Some(ref dir) = cli.record_dir {
        return capture::record(&mut atari, dir, cli.frames);
    }

    for _ in 0..cli.frames {
        atari.run_frame();
    }
    if atari.cpu().is_jammed() {
        warn!("CPU jammed at ${:04X}", atari.cpu().regs.pc);
    }
    info!(
        "Ran {} frames ({} cycles), PC=${:04X}",
        atari.frame_count(),
        atari.cycles(),
        atari.cpu().regs.pc
    );

    if let Some(ref path) = cli.screenshot_path {
        capture::save_screenshot(&atari, path)?;
        info!("Screenshot saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            error!("{e}");
            print_usage();
            process::exit(1);
        }
    };
    let Some(rom_path) = cli.rom_path.clone() else {
        error!("--rom is required");
        print_usage();
        process::exit(1);
    };

    if let Err(e) = run(&cli, &rom_path) {
        error!("{e}");
        process::exit(1);
    }
}
