use crate::container::AgolHeader;
use crate::core::{BitSource, GolombCoder, NegativeMode};
use crate::error::Result;

use super::predictor::AudioPredictor;
use super::stereo::{self, StereoMode};
use super::AUDIO_BLOCK_SIZE;

/// Decoded PCM and stream geometry.
pub struct DecodedAudio {
    /// Interleaved 16-bit samples.
    pub samples: Vec<i16>,
    pub channels: u16,
    pub sample_rate: u32,
}

/// Decoder for the AGOL container.
pub struct AudioDecoder;

impl AudioDecoder {
    pub fn new() -> Self {
        AudioDecoder
    }

    /// Read and decode an AGOL file from disk.
    pub fn decode_file(&self, path: &std::path::Path) -> Result<DecodedAudio> {
        let data = std::fs::read(path)?;
        self.decode(&data)
    }

    /// Decode a complete AGOL file back to interleaved 16-bit samples.
    pub fn decode(&self, data: &[u8]) -> Result<DecodedAudio> {
        let header = AgolHeader::read(data)?;
        let mut source = BitSource::new(&data[AgolHeader::SIZE..]);
        let frames = header.frames as usize;

        let interleaved = if header.channels == 1 {
            decode_channel(&mut source, frames, header.predictor, header.negative_mode)?
        } else {
            let first = decode_channel(&mut source, frames, header.predictor, header.negative_mode)?;
            let second =
                decode_channel(&mut source, frames, header.predictor, header.negative_mode)?;

            let (left, right) = match header.stereo_mode {
                StereoMode::MidSide => stereo::from_mid_side(&first, &second),
                StereoMode::Independent => (first, second),
            };

            let mut out = Vec::with_capacity(left.len() + right.len());
            for i in 0..frames {
                out.push(left[i]);
                out.push(right[i]);
            }
            out
        };

        // Channel values stay i32 until here; narrowing clamps only on
        // tampered streams, never on well-formed ones.
        let samples = interleaved
            .iter()
            .map(|&s| s.clamp(-32768, 32767) as i16)
            .collect();

        Ok(DecodedAudio {
            samples,
            channels: header.channels as u16,
            sample_rate: header.sample_rate as u32,
        })
    }
}

impl Default for AudioDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one channel of `count` samples, reading a fresh 16-bit `m` at
/// each block boundary.
fn decode_channel(
    source: &mut BitSource,
    count: usize,
    predictor: AudioPredictor,
    negative_mode: NegativeMode,
) -> Result<Vec<i32>> {
    let mut samples = Vec::with_capacity(count.min(1 << 20));

    let mut pos = 0;
    while pos < count {
        let m = source.read_n_bits(16)? as u32;
        let coder = GolombCoder::new(m, negative_mode)?;
        let block_end = (pos + AUDIO_BLOCK_SIZE).min(count);

        for _ in pos..block_end {
            let residual = coder.decode(source)?;
            let prediction = predictor.predict(&samples, samples.len());
            samples.push(prediction + residual);
        }

        pos = block_end;
    }

    Ok(samples)
}
