use crate::error::{Error, Result};

/// Value neighbors outside the image read as.
const BORDER: i32 = 128;

/// Causal-neighborhood image predictors.
///
/// A = left, B = top, C = top-left; missing neighbors read as 128. All
/// arithmetic is on non-negative pixel values except the `/2` gradient
/// terms, which truncate toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePredictor {
    Left,
    Top,
    TopLeft,
    /// `(A + B) / 2`.
    Average,
    /// PNG-style: the neighbor closest to `A + B - C`, ties A, B, C.
    Paeth,
    /// `A + (B - C) / 2`.
    LeftGradient,
    /// `B + (A - C) / 2`.
    TopGradient,
}

impl ImagePredictor {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ImagePredictor::Left),
            1 => Ok(ImagePredictor::Top),
            2 => Ok(ImagePredictor::TopLeft),
            3 => Ok(ImagePredictor::Average),
            4 => Ok(ImagePredictor::Paeth),
            5 => Ok(ImagePredictor::LeftGradient),
            6 => Ok(ImagePredictor::TopGradient),
            _ => Err(Error::InvalidParameter("unknown image predictor code")),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ImagePredictor::Left => 0,
            ImagePredictor::Top => 1,
            ImagePredictor::TopLeft => 2,
            ImagePredictor::Average => 3,
            ImagePredictor::Paeth => 4,
            ImagePredictor::LeftGradient => 5,
            ImagePredictor::TopGradient => 6,
        }
    }

    /// Predict the pixel at `(row, col)` from the causal part of `pixels`.
    pub fn predict(self, pixels: &[u8], width: usize, row: usize, col: usize) -> i32 {
        let a = if col > 0 {
            pixels[row * width + col - 1] as i32
        } else {
            BORDER
        };
        let b = if row > 0 {
            pixels[(row - 1) * width + col] as i32
        } else {
            BORDER
        };
        let c = if row > 0 && col > 0 {
            pixels[(row - 1) * width + col - 1] as i32
        } else {
            BORDER
        };

        match self {
            ImagePredictor::Left => a,
            ImagePredictor::Top => b,
            ImagePredictor::TopLeft => c,
            ImagePredictor::Average => (a + b) / 2,
            ImagePredictor::Paeth => {
                let p = a + b - c;
                let pa = (p - a).abs();
                let pb = (p - b).abs();
                let pc = (p - c).abs();

                if pa <= pb && pa <= pc {
                    a
                } else if pb <= pc {
                    b
                } else {
                    c
                }
            }
            ImagePredictor::LeftGradient => a + (b - c) / 2,
            ImagePredictor::TopGradient => b + (a - c) / 2,
        }
    }
}
