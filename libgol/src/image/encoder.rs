use crate::container::{GimgHeader, DEFAULT_FIXED_M};
use crate::core::{estimate_parameter, BitSink, GolombCoder, NegativeMode};
use crate::error::{Error, Result};

use super::predictor::ImagePredictor;
use super::{GrayImage, IMAGE_BLOCK_SIZE};

/// Encoder for the GIMG container.
pub struct ImageEncoder {
    predictor: ImagePredictor,
    negative_mode: NegativeMode,
    fixed_m: Option<u32>,
}

impl ImageEncoder {
    /// Defaults: Paeth prediction, adaptive `m`, interleaved mapping.
    pub fn new() -> Self {
        ImageEncoder {
            predictor: ImagePredictor::Paeth,
            negative_mode: NegativeMode::Interleaved,
            fixed_m: None,
        }
    }

    pub fn with_predictor(mut self, predictor: ImagePredictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_negative_mode(mut self, mode: NegativeMode) -> Self {
        self.negative_mode = mode;
        self
    }

    /// Use one caller-supplied `m` for every block instead of estimating.
    pub fn with_fixed_parameter(mut self, m: u32) -> Self {
        self.fixed_m = Some(m);
        self
    }

    /// Encode to a file on disk; returns the compressed size in bytes.
    pub fn encode_to_file(&self, path: &std::path::Path, image: &GrayImage) -> Result<usize> {
        let bytes = self.encode(image)?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }

    /// Encode a grayscale image into a complete GIMG file.
    pub fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        if image.width() > i32::MAX as u32 || image.height() > i32::MAX as u32 {
            return Err(Error::InvalidParameter("image dimensions too large"));
        }
        if let Some(m) = self.fixed_m {
            if !(1..=65535).contains(&m) {
                return Err(Error::InvalidParameter("fixed m must be in 1..=65535"));
            }
        }

        let header = GimgHeader {
            width: image.width() as i32,
            height: image.height() as i32,
            predictor: self.predictor,
            adaptive: self.fixed_m.is_none(),
            fixed_m: self.fixed_m.unwrap_or(DEFAULT_FIXED_M),
            negative_mode: self.negative_mode,
        };

        let mut out = Vec::new();
        header.write_to(&mut out);
        let mut sink = BitSink::over(out);

        let width = image.width() as usize;
        let height = image.height() as usize;
        let pixels = image.pixels();
        let total = width * height;

        let mut residuals = Vec::with_capacity(IMAGE_BLOCK_SIZE);
        let mut emitted = 0usize;

        for row in 0..height {
            for col in 0..width {
                let prediction = self.predictor.predict(pixels, width, row, col);
                residuals.push(pixels[row * width + col] as i32 - prediction);
                emitted += 1;

                if residuals.len() == IMAGE_BLOCK_SIZE || emitted == total {
                    self.flush_block(&residuals, &mut sink)?;
                    residuals.clear();
                }
            }
        }

        Ok(sink.finish())
    }

    fn flush_block(&self, residuals: &[i32], sink: &mut BitSink) -> Result<()> {
        let m = match self.fixed_m {
            Some(m) => m,
            None => estimate_parameter(residuals),
        };

        sink.write_n_bits(m as u64, 16);
        let coder = GolombCoder::new(m, self.negative_mode)?;
        for &residual in residuals {
            coder.encode(residual, sink);
        }
        Ok(())
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new()
    }
}
