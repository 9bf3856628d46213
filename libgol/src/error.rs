use thiserror::Error;

/// Codec-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error surface of the codec library.
///
/// Everything propagates to the caller; the codec never retries and never
/// silently corrects a malformed stream.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected option or header field: `m = 0`, unknown predictor or mode
    /// code, negative dimensions.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Bad magic or a header shorter than its fixed layout.
    #[error("invalid format: {0}")]
    InvalidFormat(&'static str),
    /// Bit stream ended in the middle of a codeword.
    #[error("bit stream truncated mid-codeword")]
    TruncatedCode,
    /// Underlying byte source failed.
    #[error("i/o failure")]
    IoFailure(#[from] std::io::Error),
    /// Well-formed file, unsupported configuration.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}
