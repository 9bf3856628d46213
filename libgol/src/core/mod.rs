pub mod bitstream;
pub mod golomb;

pub use bitstream::{BitSink, BitSource, END_MARKER};
pub use golomb::{estimate_parameter, GolombCoder, NegativeMode};
