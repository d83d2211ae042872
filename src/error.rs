use crate::InvalidConfig;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Expected {expected}, got {actual}")]
pub struct SizeMismatchError {
    pub expected: usize,
    pub actual: usize,
}

/// Two-dimensional shape mismatch, both sides given as `(width, height)`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "Expected {}x{}, got {}x{}",
    .expected.0,
    .expected.1,
    .actual.0,
    .actual.1
)]
pub struct DimensionMismatch {
    pub expected: (usize, usize),
    pub actual: (usize, usize),
}

impl DimensionMismatch {
    pub(crate) fn check(expected: (usize, usize), actual: (usize, usize)) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self { expected, actual })
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),
    #[error("Geometry mismatch: {0}")]
    Geometry(#[from] DimensionMismatch),
    #[error("Size mismatch: {0}")]
    Size(#[from] SizeMismatchError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
