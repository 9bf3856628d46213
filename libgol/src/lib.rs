//! Lossless Golomb-coded media compression.
//!
//! Two container formats share one entropy layer: `AGOL` for 16-bit PCM
//! audio and `GIMG` for 8-bit grayscale images. Residuals from a fixed
//! predictor are Golomb-coded in blocks (1024 samples / 256 pixels), each
//! block prefixed by the 16-bit divisor `m` it was coded with. `m` is
//! either estimated per block from the residual distribution or fixed by
//! the caller. Decoding is exact: output equals input byte-for-byte.

pub mod audio;
pub mod container;
pub mod core;
pub mod error;
pub mod image;

pub use audio::{
    AudioDecoder, AudioEncoder, AudioPredictor, DecodedAudio, StereoMode, AUDIO_BLOCK_SIZE,
};
pub use container::{AgolHeader, GimgHeader, AUDIO_MAGIC, IMAGE_MAGIC};
pub use crate::core::{estimate_parameter, BitSink, BitSource, GolombCoder, NegativeMode, END_MARKER};
pub use error::{Error, Result};
pub use image::{GrayImage, ImageDecoder, ImageEncoder, ImagePredictor, IMAGE_BLOCK_SIZE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_predictor_codes() {
        for code in 0..=2 {
            let predictor = AudioPredictor::from_code(code).unwrap();
            assert_eq!(predictor.code(), code);
        }
        assert!(AudioPredictor::from_code(3).is_err());
        assert!(AudioPredictor::from_code(-1).is_err());
    }

    #[test]
    fn test_image_predictor_codes() {
        for code in 0..=6 {
            let predictor = ImagePredictor::from_code(code).unwrap();
            assert_eq!(predictor.code(), code);
        }
        assert!(ImagePredictor::from_code(7).is_err());
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(NegativeMode::from_code(0).unwrap(), NegativeMode::Interleaved);
        assert_eq!(NegativeMode::from_code(1).unwrap(), NegativeMode::SignMagnitude);
        assert!(NegativeMode::from_code(2).is_err());

        assert_eq!(StereoMode::from_code(0).unwrap(), StereoMode::Independent);
        assert_eq!(StereoMode::from_code(1).unwrap(), StereoMode::MidSide);
        assert!(StereoMode::from_code(-1).is_err());
    }
}
