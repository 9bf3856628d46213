use crate::error::{Error, Result};

/// Clamp a prediction into the 16-bit sample range.
///
/// Predictions are clamped; reconstructed samples are not. Residuals absorb
/// the clamp, so encoder and decoder contexts stay identical bit-for-bit.
fn clamp16(value: i32) -> i32 {
    value.clamp(-32768, 32767)
}

/// Fixed audio predictors over the already-emitted part of a channel.
///
/// Each order falls back to the next lower one while the channel is too
/// short to supply its full context; index 0 always predicts 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPredictor {
    /// Previous sample.
    Order1,
    /// Linear extrapolation of the last two samples.
    Order2,
    /// Quadratic extrapolation of the last three samples.
    Order3,
}

impl AudioPredictor {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(AudioPredictor::Order1),
            1 => Ok(AudioPredictor::Order2),
            2 => Ok(AudioPredictor::Order3),
            _ => Err(Error::InvalidParameter("unknown audio predictor code")),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            AudioPredictor::Order1 => 0,
            AudioPredictor::Order2 => 1,
            AudioPredictor::Order3 => 2,
        }
    }

    /// Predict the sample at `index` from `samples[..index]`.
    pub fn predict(self, samples: &[i32], index: usize) -> i32 {
        if index == 0 {
            return 0;
        }

        match self {
            AudioPredictor::Order1 => samples[index - 1],
            AudioPredictor::Order2 => {
                if index < 2 {
                    samples[index - 1]
                } else {
                    clamp16(2 * samples[index - 1] - samples[index - 2])
                }
            }
            AudioPredictor::Order3 => {
                if index < 2 {
                    samples[index - 1]
                } else if index < 3 {
                    clamp16(2 * samples[index - 1] - samples[index - 2])
                } else {
                    clamp16(3 * samples[index - 1] - 3 * samples[index - 2] + samples[index - 3])
                }
            }
        }
    }
}
