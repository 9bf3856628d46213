use crate::container::{AgolHeader, DEFAULT_FIXED_M};
use crate::core::{estimate_parameter, BitSink, GolombCoder, NegativeMode};
use crate::error::{Error, Result};

use super::predictor::AudioPredictor;
use super::stereo::{self, StereoMode};
use super::AUDIO_BLOCK_SIZE;

/// Encoder for the AGOL container.
pub struct AudioEncoder {
    predictor: AudioPredictor,
    stereo_mode: StereoMode,
    negative_mode: NegativeMode,
    fixed_m: Option<u32>,
}

impl AudioEncoder {
    /// Defaults: Order-2 prediction, mid-side stereo, adaptive `m`,
    /// interleaved negative mapping.
    pub fn new() -> Self {
        AudioEncoder {
            predictor: AudioPredictor::Order2,
            stereo_mode: StereoMode::MidSide,
            negative_mode: NegativeMode::Interleaved,
            fixed_m: None,
        }
    }

    pub fn with_predictor(mut self, predictor: AudioPredictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_stereo_mode(mut self, mode: StereoMode) -> Self {
        self.stereo_mode = mode;
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
    pub fn encode_to_file(
        &self,
        path: &std::path::Path,
        samples: &[i16],
        channels: u16,
        sample_rate: u32,
    ) -> Result<usize> {
        let bytes = self.encode(samples, channels, sample_rate)?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }

    /// Encode interleaved 16-bit samples into a complete AGOL file.
    pub fn encode(&self, samples: &[i16], channels: u16, sample_rate: u32) -> Result<Vec<u8>> {
        if channels != 1 && channels != 2 {
            return Err(Error::Unsupported("only mono and stereo audio supported"));
        }
        if samples.len() % channels as usize != 0 {
            return Err(Error::InvalidParameter(
                "sample count not a multiple of channel count",
            ));
        }
        if let Some(m) = self.fixed_m {
            if !(1..=65535).contains(&m) {
                return Err(Error::InvalidParameter("fixed m must be in 1..=65535"));
            }
        }

        let frames = (samples.len() / channels as usize) as i64;
        let header = AgolHeader {
            channels: channels as i32,
            sample_rate: sample_rate as i32,
            frames,
            predictor: self.predictor,
            stereo_mode: self.stereo_mode,
            adaptive: self.fixed_m.is_none(),
            fixed_m: self.fixed_m.unwrap_or(DEFAULT_FIXED_M),
            negative_mode: self.negative_mode,
        };

        let mut out = Vec::new();
        header.write_to(&mut out);
        let mut sink = BitSink::over(out);

        if channels == 1 {
            let mono: Vec<i32> = samples.iter().map(|&s| s as i32).collect();
            self.encode_channel(&mono, &mut sink)?;
        } else {
            let left: Vec<i32> = samples.iter().step_by(2).map(|&s| s as i32).collect();
            let right: Vec<i32> = samples.iter().skip(1).step_by(2).map(|&s| s as i32).collect();

            match self.stereo_mode {
                StereoMode::MidSide => {
                    let (mid, side) = stereo::to_mid_side(&left, &right);
                    self.encode_channel(&mid, &mut sink)?;
                    self.encode_channel(&side, &mut sink)?;
                }
                StereoMode::Independent => {
                    self.encode_channel(&left, &mut sink)?;
                    self.encode_channel(&right, &mut sink)?;
                }
            }
        }

        Ok(sink.finish())
    }

    fn encode_channel(&self, samples: &[i32], sink: &mut BitSink) -> Result<()> {
        let mut pos = 0;
        while pos < samples.len() {
            let block_end = (pos + AUDIO_BLOCK_SIZE).min(samples.len());

            let mut residuals = Vec::with_capacity(block_end - pos);
            for i in pos..block_end {
                let prediction = self.predictor.predict(samples, i);
                residuals.push(samples[i] - prediction);
            }

            let m = match self.fixed_m {
                Some(m) => m,
                None => estimate_parameter(&residuals),
            };

            sink.write_n_bits(m as u64, 16);
            let coder = GolombCoder::new(m, self.negative_mode)?;
            for &residual in &residuals {
                coder.encode(residual, sink);
            }

            pos = block_end;
        }
        Ok(())
    }
}

impl Default for AudioEncoder {
    fn default() -> Self {
        Self::new()
    }
}
