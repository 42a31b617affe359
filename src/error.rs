use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MandelbrotError {
    /// Step derivation divides by `dimension - 1`, so both sides need at least
    /// two pixels, and the pixel count has to fit in a buffer.
    #[error("invalid dimensions {width}x{height}: sides must be greater than 1 and the image must fit in memory")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid color spec {0:?}: expected hex rrggbb or rrggbbaa")]
    InvalidColorSpec(String),
    #[error("invalid plane bounds: re [{min_re}, {max_re}], min im {min_im}")]
    InvalidBounds { min_re: f64, max_re: f64, min_im: f64 },
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MandelbrotError>;
