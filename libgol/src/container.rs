//! AGOL / GIMG container headers.
//!
//! Fixed layout, little-endian scalars, no padding beyond the sequence of
//! writes. The Golomb-coded payload starts immediately after the header,
//! so a [`crate::core::BitSink`] seeded with the header bytes produces the
//! whole file in one pass.

use crate::audio::{AudioPredictor, StereoMode};
use crate::core::NegativeMode;
use crate::error::{Error, Result};
use crate::image::ImagePredictor;

/// Audio container magic.
pub const AUDIO_MAGIC: [u8; 4] = *b"AGOL";

/// Image container magic.
pub const IMAGE_MAGIC: [u8; 4] = *b"GIMG";

/// Header value for fixed `m` when the stream is adaptive. The field is
/// written unconditionally for layout stability; decoders ignore it unless
/// the adaptive flag is clear.
pub const DEFAULT_FIXED_M: u32 = 16;

/// AGOL fixed-layout header.
#[derive(Debug, Clone)]
pub struct AgolHeader {
    pub channels: i32,
    pub sample_rate: i32,
    pub frames: i64,
    pub predictor: AudioPredictor,
    pub stereo_mode: StereoMode,
    pub adaptive: bool,
    pub fixed_m: u32,
    pub negative_mode: NegativeMode,
}

impl AgolHeader {
    /// Serialized size in bytes, magic included.
    pub const SIZE: usize = 40;

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&AUDIO_MAGIC);
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.frames.to_le_bytes());
        out.extend_from_slice(&self.predictor.code().to_le_bytes());
        out.extend_from_slice(&self.stereo_mode.code().to_le_bytes());
        out.extend_from_slice(&(self.adaptive as i32).to_le_bytes());
        out.extend_from_slice(&self.fixed_m.to_le_bytes());
        out.extend_from_slice(&self.negative_mode.code().to_le_bytes());
    }

    pub fn read(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        if cursor.read_bytes(4)? != AUDIO_MAGIC {
            return Err(Error::InvalidFormat("bad magic, not an AGOL file"));
        }

        let channels = cursor.read_i32_le()?;
        let sample_rate = cursor.read_i32_le()?;
        let frames = cursor.read_i64_le()?;
        let predictor = AudioPredictor::from_code(cursor.read_i32_le()?)?;
        let stereo_mode = StereoMode::from_code(cursor.read_i32_le()?)?;
        let adaptive = cursor.read_i32_le()? != 0;
        let fixed_m = cursor.read_u32_le()?;
        let negative_mode = NegativeMode::from_code(cursor.read_i32_le()?)?;

        if channels != 1 && channels != 2 {
            return Err(Error::Unsupported("only mono and stereo audio supported"));
        }
        if frames < 0 {
            return Err(Error::InvalidParameter("negative frame count"));
        }
        if sample_rate < 0 {
            return Err(Error::InvalidParameter("negative sample rate"));
        }

        Ok(AgolHeader {
            channels,
            sample_rate,
            frames,
            predictor,
            stereo_mode,
            adaptive,
            fixed_m,
            negative_mode,
        })
    }
}

/// GIMG fixed-layout header.
#[derive(Debug, Clone)]
pub struct GimgHeader {
    pub width: i32,
    pub height: i32,
    pub predictor: ImagePredictor,
    pub adaptive: bool,
    pub fixed_m: u32,
    pub negative_mode: NegativeMode,
}

impl GimgHeader {
    /// Serialized size in bytes, magic included.
    pub const SIZE: usize = 28;

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&IMAGE_MAGIC);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.predictor.code().to_le_bytes());
        out.extend_from_slice(&(self.adaptive as i32).to_le_bytes());
        out.extend_from_slice(&self.fixed_m.to_le_bytes());
        out.extend_from_slice(&self.negative_mode.code().to_le_bytes());
    }

    pub fn read(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        if cursor.read_bytes(4)? != IMAGE_MAGIC {
            return Err(Error::InvalidFormat("bad magic, not a GIMG file"));
        }

        let width = cursor.read_i32_le()?;
        let height = cursor.read_i32_le()?;
        let predictor = ImagePredictor::from_code(cursor.read_i32_le()?)?;
        let adaptive = cursor.read_i32_le()? != 0;
        let fixed_m = cursor.read_u32_le()?;
        let negative_mode = NegativeMode::from_code(cursor.read_i32_le()?)?;

        if width < 0 || height < 0 {
            return Err(Error::InvalidParameter("negative image dimensions"));
        }

        Ok(GimgHeader {
            width,
            height,
            predictor,
            adaptive,
            fixed_m,
            negative_mode,
        })
    }
}

// cursor helper

struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.pos + count > self.data.len() {
            return Err(Error::InvalidFormat("truncated header"));
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    fn read_i32_le(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i64_le(&mut self) -> Result<i64> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }
}
