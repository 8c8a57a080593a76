//! An auto-resizing, indexable circular array with amortized O(1) pushes and
//! pops at either end.
//!
//! ```
//! use circarray::{ca, CircularBuffer};
//!
//! let mut buf: CircularBuffer<i32> = ca![1, 2, 3];
//! buf.push_front(0);
//! assert_eq!(buf.get(-1), Ok(&3));
//! assert_eq!(buf.pop_front_n(2), vec![0, 1]);
//! assert_eq!(buf.pop_front_n_or(3, 42), vec![2, 3, 42]);
//! assert_eq!(buf.to_string(), "(||)");
//! ```
pub mod circular_buffer;
pub mod error;
pub mod index;
pub mod iter;
pub mod policy;

pub use circular_buffer::CircularBuffer;
pub use error::{CircularBufferError, Result};
pub use policy::ResizePolicy;

/// Builds a [`CircularBuffer`] from a list of elements, front first.
#[macro_export]
macro_rules! ca {
    () => {
        $crate::CircularBuffer::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::CircularBuffer::from(vec![$($value),+])
    };
}
