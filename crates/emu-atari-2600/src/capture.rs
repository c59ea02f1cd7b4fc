//! Headless capture: PNG screenshots.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::{Atari2600, Atari2600Error};

/// Save the current framebuffer as a PNG file.
///
/// The framebuffer is ARGB32 (`u32` array). This converts to RGB bytes
/// for the PNG encoder.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_screenshot(atari: &Atari2600, path: &Path) -> Result<(), Atari2600Error> {
    let width = atari.framebuffer_width();
    let height = atari.framebuffer_height();

    let file = fs::File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&to_rgb(atari.framebuffer()))?;
    Ok(())
}

/// Convert ARGB32 pixels to packed RGB bytes.
fn to_rgb(framebuffer: &[u32]) -> Vec<u8> {
    framebuffer
        .iter()
        .flat_map(|&pixel| {
            let [_, r, g, b] = pixel.to_be_bytes();
            [r, g, b]
        })
        .collect()
}

/// Record video: run `num_frames` frames, saving each as a numbered PNG.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a frame cannot
/// be saved.
pub fn record(atari: &mut Atari2600, dir: &Path, num_frames: u32) -> Result<(), Atari2600Error> {
    let frames_dir = dir.join("frames");
    fs::create_dir_all(&frames_dir)?;

    for i in 1..=num_frames {
        atari.run_frame();
        save_screenshot(atari, &frames_dir.join(format!("{i:06}.png")))?;
    }

    info!("Captured {num_frames} frames to {}", frames_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_to_rgb_drops_alpha() {
        assert_eq!(
            to_rgb(&[0xFF12_3456, 0xFF00_00FF]),
            vec![0x12, 0x34, 0x56, 0x00, 0x00, 0xFF]
        );
    }
}
