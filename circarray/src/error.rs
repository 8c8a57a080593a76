use thiserror::Error;

/// Errors returned by fallible [`CircularBuffer`](crate::CircularBuffer) operations.
///
/// A call that returns an error never leaves the buffer partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircularBufferError {
    #[error("index {index} out of range for circular buffer of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("{op} called on an empty circular buffer")]
    EmptyBuffer { op: &'static str },

    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    #[error("attempt to assign sequence of size {actual} to extended slice of size {expected}")]
    SliceLengthMismatch { expected: usize, actual: usize },

    #[error("invalid resize policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, CircularBufferError>;
