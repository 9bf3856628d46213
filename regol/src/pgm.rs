//! Binary PGM (P5) reader and writer.

use anyhow::{bail, Context, Result};
use libgol::GrayImage;
use log::debug;
use std::path::Path;

/// Read a binary PGM file into a grayscale image buffer.
pub fn read_pgm(path: &Path) -> Result<GrayImage> {
    let data = std::fs::read(path).context("Failed to read PGM file")?;
    parse_pgm(&data)
}

/// Parse PGM bytes. Only the 8-bit binary variant (P5, maxval <= 255) is
/// accepted.
pub fn parse_pgm(data: &[u8]) -> Result<GrayImage> {
    let mut pos = 0usize;

    let magic = next_token(data, &mut pos).context("Missing PGM magic")?;
    if magic != b"P5" {
        bail!("Not a binary PGM (P5) file");
    }

    let width = parse_number(next_token(data, &mut pos).context("Missing PGM width")?)?;
    let height = parse_number(next_token(data, &mut pos).context("Missing PGM height")?)?;
    let maxval = parse_number(next_token(data, &mut pos).context("Missing PGM maxval")?)?;
    if maxval == 0 || maxval > 255 {
        bail!("Only 8-bit PGM supported, got maxval {}", maxval);
    }

    // Exactly one whitespace byte separates the maxval from the raster.
    pos += 1;

    let expected = width as usize * height as usize;
    let raster = data
        .get(pos..pos + expected)
        .context("PGM raster truncated")?;
    debug!("parsed P5 image: {}x{}, maxval {}", width, height, maxval);

    Ok(GrayImage::new(width, height, raster.to_vec())?)
}

/// Write a grayscale image as binary PGM.
pub fn write_pgm(path: &Path, image: &GrayImage) -> Result<()> {
    let mut out = format!("P5\n{} {}\n255\n", image.width(), image.height()).into_bytes();
    out.extend_from_slice(image.pixels());
    std::fs::write(path, out).context("Failed to write PGM file")
}

/// Skip whitespace and `#` comments, then return the next token.
fn next_token<'a>(data: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    loop {
        while *pos < data.len() && data[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < data.len() && data[*pos] == b'#' {
            while *pos < data.len() && data[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }

    if *pos >= data.len() {
        return None;
    }

    let start = *pos;
    while *pos < data.len() && !data[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    Some(&data[start..*pos])
}

fn parse_number(token: &[u8]) -> Result<u32> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .with_context(|| format!("Invalid PGM header field: {:?}", String::from_utf8_lossy(token)))
}
