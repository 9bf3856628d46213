use crate::container::GimgHeader;
use crate::core::{BitSource, GolombCoder};
use crate::error::{Error, Result};

use super::{GrayImage, IMAGE_BLOCK_SIZE};

/// Pixel-count ceiling for a decode; rejects absurd tampered headers
/// before any allocation happens.
const MAX_PIXELS: usize = 1 << 30;

/// Decoder for the GIMG container.
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        ImageDecoder
    }

    /// Read and decode a GIMG file from disk.
    pub fn decode_file(&self, path: &std::path::Path) -> Result<GrayImage> {
        let data = std::fs::read(path)?;
        self.decode(&data)
    }

    /// Decode a complete GIMG file back to a grayscale image.
    pub fn decode(&self, data: &[u8]) -> Result<GrayImage> {
        let header = GimgHeader::read(data)?;
        let width = header.width as usize;
        let height = header.height as usize;
        let total = width
            .checked_mul(height)
            .filter(|&t| t <= MAX_PIXELS)
            .ok_or(Error::InvalidParameter("image dimensions too large"))?;

        let mut source = BitSource::new(&data[GimgHeader::SIZE..]);
        let mut pixels = vec![0u8; total];

        let mut pos = 0;
        while pos < total {
            let m = source.read_n_bits(16)? as u32;
            let coder = GolombCoder::new(m, header.negative_mode)?;
            let block_end = (pos + IMAGE_BLOCK_SIZE).min(total);

            for index in pos..block_end {
                let row = index / width;
                let col = index % width;

                let residual = coder.decode(&mut source)?;
                let prediction = header.predictor.predict(&pixels, width, row, col);
                pixels[index] = (prediction + residual).clamp(0, 255) as u8;
            }

            pos = block_end;
        }

        GrayImage::new(header.width as u32, header.height as u32, pixels)
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}
