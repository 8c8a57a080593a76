//! Index normalization for negative indices and Python-style slices.
//!
//! Both helpers are independent of storage and only look at the logical
//! length of the sequence being addressed.

use crate::error::{CircularBufferError, Result};

/// Maps a possibly negative logical index onto `0..len`.
///
/// Negative indices count from the rear, so `-1` is the last element.
pub fn normalize(index: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    if (0..len).contains(&index) {
        Some(index as usize)
    } else if (-len..0).contains(&index) {
        Some((len + index) as usize)
    } else {
        None
    }
}

/// Resolved slice bounds, clamped to a sequence of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: isize,
    pub stop: isize,
    pub step: isize,
    /// Number of positions the slice selects.
    pub len: usize,
}

impl SliceIndices {
    /// Logical positions selected by the slice, in slice order.
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        let SliceIndices { start, step, len, .. } = *self;
        let start = start as usize;
        let stride = step.unsigned_abs();
        (0..len).map(move |i| {
            if step > 0 {
                start + i * stride
            } else {
                start - i * stride
            }
        })
    }
}

/// Clamps `start`/`stop` against `len` following half-open slice rules.
///
/// Missing bounds default to the whole sequence in the direction of
/// `step`. Out of range bounds are clamped rather than rejected, so the
/// only error is a zero step.
pub fn normalize_slice(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    len: usize,
) -> Result<SliceIndices> {
    if step == 0 {
        return Err(CircularBufferError::ZeroSliceStep);
    }
    let len = len as isize;
    let reversed = step < 0;

    let clamp = |bound: isize| -> isize {
        if bound < 0 {
            let bound = bound + len;
            if bound < 0 {
                if reversed { -1 } else { 0 }
            } else {
                bound
            }
        } else if bound >= len {
            if reversed { len - 1 } else { len }
        } else {
            bound
        }
    };

    let start = match start {
        Some(bound) => clamp(bound),
        None if reversed => len - 1,
        None => 0,
    };
    let stop = match stop {
        Some(bound) => clamp(bound),
        None if reversed => -1,
        None => len,
    };

    let count = if reversed {
        if stop < start {
            (start - stop - 1) as usize / step.unsigned_abs() + 1
        } else {
            0
        }
    } else if start < stop {
        (stop - start - 1) as usize / step.unsigned_abs() + 1
    } else {
        0
    };

    Ok(SliceIndices {
        start,
        stop,
        step,
        len: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(start: Option<isize>, stop: Option<isize>, step: isize, len: usize) -> Vec<usize> {
        normalize_slice(start, stop, step, len)
            .unwrap()
            .positions()
            .collect()
    }

    #[test]
    fn test_normalize_positive_and_negative() {
        assert_eq!(normalize(0, 3), Some(0));
        assert_eq!(normalize(2, 3), Some(2));
        assert_eq!(normalize(-1, 3), Some(2));
        assert_eq!(normalize(-3, 3), Some(0));
        assert_eq!(normalize(3, 3), None);
        assert_eq!(normalize(-4, 3), None);
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(0, 0), None);
        assert_eq!(normalize(-1, 0), None);
    }

    #[test]
    fn test_full_slice() {
        assert_eq!(selected(None, None, 1, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(selected(None, None, -1, 5), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stepped_slices() {
        assert_eq!(selected(None, None, 2, 5), vec![0, 2, 4]);
        assert_eq!(selected(Some(1), None, 2, 6), vec![1, 3, 5]);
        assert_eq!(selected(Some(-1), Some(0), -2, 6), vec![5, 3, 1]);
        assert_eq!(selected(None, Some(1), -3, 8), vec![7, 4]);
    }

    #[test]
    fn test_bounds_are_clamped() {
        assert_eq!(selected(Some(-100), Some(100), 1, 4), vec![0, 1, 2, 3]);
        assert_eq!(selected(Some(100), Some(-100), -1, 4), vec![3, 2, 1, 0]);
        assert_eq!(selected(Some(3), Some(1), 1, 4), Vec::<usize>::new());
        assert_eq!(selected(Some(1), Some(3), -1, 4), Vec::<usize>::new());
    }

    #[test]
    fn test_negative_bounds() {
        assert_eq!(selected(Some(-3), Some(-1), 1, 5), vec![2, 3]);
        assert_eq!(selected(Some(-2), None, 1, 5), vec![3, 4]);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(selected(None, None, 1, 0), Vec::<usize>::new());
        assert_eq!(selected(None, None, -1, 0), Vec::<usize>::new());
    }

    #[test]
    fn test_extreme_steps() {
        assert_eq!(selected(None, None, isize::MIN, 3), vec![2]);
        assert_eq!(selected(None, None, isize::MAX, 3), vec![0]);
        assert_eq!(selected(Some(-1), Some(-100), isize::MIN, 5), vec![4]);
        assert_eq!(selected(Some(1), Some(100), isize::MAX, 5), vec![1]);
    }

    #[test]
    fn test_zero_step_rejected() {
        assert_eq!(
            normalize_slice(None, None, 0, 3),
            Err(CircularBufferError::ZeroSliceStep)
        );
    }

    #[test]
    fn test_reported_bounds() {
        let idx = normalize_slice(Some(-1), None, -1, 4).unwrap();
        assert_eq!((idx.start, idx.stop, idx.len), (3, -1, 4));
    }
}
