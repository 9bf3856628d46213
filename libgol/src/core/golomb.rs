//! Golomb coding of signed residuals.

use crate::core::bitstream::{BitSink, BitSource};
use crate::error::{Error, Result};

/// How signed values map onto the non-negative Golomb domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeMode {
    /// One sign bit (1 = negative), then the Golomb-coded magnitude.
    SignMagnitude,
    /// Bijection `n >= 0 -> 2n`, `n < 0 -> 2|n| - 1`. No sign bit.
    Interleaved,
}

impl NegativeMode {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(NegativeMode::Interleaved),
            1 => Ok(NegativeMode::SignMagnitude),
            _ => Err(Error::InvalidParameter("unknown negative mode code")),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            NegativeMode::Interleaved => 0,
            NegativeMode::SignMagnitude => 1,
        }
    }
}

/// Golomb coder with divisor `m`.
///
/// `b = floor(log2(m))` and `cutoff = 2^(b+1) - m` are derived once at
/// construction. The truncated remainder saves one bit whenever `m` is not
/// a power of two; for powers of two the cutoff branch never fires and the
/// code degenerates to a Rice code.
pub struct GolombCoder {
    m: u32,
    b: u32,
    cutoff: u32,
    mode: NegativeMode,
}

impl GolombCoder {
    pub fn new(m: u32, mode: NegativeMode) -> Result<Self> {
        if m < 1 {
            return Err(Error::InvalidParameter("Golomb parameter m must be positive"));
        }
        let b = 31 - m.leading_zeros();
        let cutoff = ((1u64 << (b + 1)) - m as u64) as u32;
        Ok(GolombCoder { m, b, cutoff, mode })
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn mode(&self) -> NegativeMode {
        self.mode
    }

    pub fn encode(&self, value: i32, sink: &mut BitSink) {
        match self.mode {
            NegativeMode::SignMagnitude => {
                sink.write_bit(u32::from(value < 0));
                self.encode_unsigned(value.unsigned_abs() as u64, sink);
            }
            NegativeMode::Interleaved => {
                let mapped = if value >= 0 {
                    2 * value as u64
                } else {
                    2 * value.unsigned_abs() as u64 - 1
                };
                self.encode_unsigned(mapped, sink);
            }
        }
    }

    pub fn decode(&self, source: &mut BitSource) -> Result<i32> {
        match self.mode {
            NegativeMode::SignMagnitude => {
                let negative = source.read_bit()? == 1;
                let magnitude = self.decode_unsigned(source)? as i64;
                Ok(if negative { -magnitude } else { magnitude } as i32)
            }
            NegativeMode::Interleaved => {
                let mapped = self.decode_unsigned(source)?;
                Ok(if mapped % 2 == 0 {
                    (mapped / 2) as i64
                } else {
                    -(((mapped + 1) / 2) as i64)
                } as i32)
            }
        }
    }

    fn encode_unsigned(&self, n: u64, sink: &mut BitSink) {
        let q = n / self.m as u64;
        let r = (n % self.m as u64) as u32;

        // Unary quotient: q zeros, then the terminating one.
        for _ in 0..q {
            sink.write_bit(0);
        }
        sink.write_bit(1);

        if r < self.cutoff {
            sink.write_n_bits(r as u64, self.b as u8);
        } else {
            sink.write_n_bits(r as u64 + self.cutoff as u64, (self.b + 1) as u8);
        }
    }

    fn decode_unsigned(&self, source: &mut BitSource) -> Result<u64> {
        let mut q = 0u64;
        while source.read_bit()? == 0 {
            q += 1;
        }

        let mut r = source.read_n_bits(self.b as u8)? as u32;
        if r < self.cutoff {
            Ok(q * self.m as u64 + r as u64)
        } else {
            r = (r << 1) | source.read_bit()?;
            Ok(q * self.m as u64 + (r - self.cutoff) as u64)
        }
    }
}

/// Pick `m` for a block of residuals, assuming a geometric distribution.
///
/// With `p = mean / (mean + 1)`, the expected Golomb code length is
/// minimized near `m = ceil(-1 / log2(p))`. All-zero blocks get `m = 1`.
pub fn estimate_parameter(residuals: &[i32]) -> u32 {
    if residuals.is_empty() {
        return 1;
    }

    let mean = residuals
        .iter()
        .map(|&r| r.unsigned_abs() as f64)
        .sum::<f64>()
        / residuals.len() as f64;

    if mean < 0.5 {
        return 1;
    }

    let p = mean / (mean + 1.0);
    let m = (-1.0 / p.log2()).ceil();
    m.clamp(1.0, 65535.0) as u32
}
