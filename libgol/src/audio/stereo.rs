use crate::error::{Error, Result};

/// How a stereo pair is split into two coded channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoMode {
    /// Left and right coded as two plain mono streams, L then R.
    Independent,
    /// Mid/side transform before coding, Mid then Side.
    MidSide,
}

impl StereoMode {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(StereoMode::Independent),
            1 => Ok(StereoMode::MidSide),
            _ => Err(Error::InvalidParameter("unknown stereo mode code")),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            StereoMode::Independent => 0,
            StereoMode::MidSide => 1,
        }
    }
}

/// `mid = (L + R) >> 1`, `side = L - R`.
///
/// The low bit dropped from the sum is the parity of `side`, so the pair is
/// fully invertible. Side spans 17 bits and must stay in `i32`.
pub fn to_mid_side(left: &[i32], right: &[i32]) -> (Vec<i32>, Vec<i32>) {
    left.iter()
        .zip(right.iter())
        .map(|(&l, &r)| ((l + r) >> 1, l - r))
        .unzip()
}

/// Inverse of [`to_mid_side`]; the `side & 1` term restores the rounding bit.
pub fn from_mid_side(mid: &[i32], side: &[i32]) -> (Vec<i32>, Vec<i32>) {
    mid.iter()
        .zip(side.iter())
        .map(|(&m, &s)| (m + (s >> 1) + (s & 1), m - (s >> 1)))
        .unzip()
}
