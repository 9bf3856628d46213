//! Block-wise lossless audio codec over the Golomb layer.

mod decoder;
mod encoder;
pub mod predictor;
pub mod stereo;

pub use decoder::{AudioDecoder, DecodedAudio};
pub use encoder::AudioEncoder;
pub use predictor::AudioPredictor;
pub use stereo::{from_mid_side, to_mid_side, StereoMode};

/// Samples per channel sharing one Golomb parameter. Not encoded in the
/// header; changing it breaks file compatibility.
pub const AUDIO_BLOCK_SIZE: usize = 1024;
