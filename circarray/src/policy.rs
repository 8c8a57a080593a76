use crate::error::{CircularBufferError, Result};

pub const DEFAULT_MIN_CAPACITY: usize = 2;
pub const DEFAULT_SHRINK_RATIO: usize = 4;

/// Controls when a [`CircularBuffer`](crate::CircularBuffer) grows and shrinks.
///
/// Capacity doubles whenever a push finds the store full. After a pop the
/// capacity is halved once if `len <= capacity / shrink_ratio` and the
/// capacity is above `min_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePolicy {
    min_capacity: usize,
    shrink_ratio: usize,
}

impl ResizePolicy {
    /// Builds a validated policy.
    ///
    /// `min_capacity` is rounded up to a power of two of at least 2. A
    /// `shrink_ratio` below 3 would let a single push/pop pair bounce
    /// between two capacities, so it is rejected.
    pub fn new(min_capacity: usize, shrink_ratio: usize) -> Result<Self> {
        if shrink_ratio < 3 {
            return Err(CircularBufferError::InvalidPolicy(format!(
                "shrink ratio must be at least 3, got {shrink_ratio}"
            )));
        }
        let min_capacity = min_capacity
            .max(DEFAULT_MIN_CAPACITY)
            .checked_next_power_of_two()
            .ok_or_else(|| {
                CircularBufferError::InvalidPolicy(format!(
                    "minimum capacity {min_capacity} is too large"
                ))
            })?;
        Ok(ResizePolicy {
            min_capacity,
            shrink_ratio,
        })
    }

    pub fn with_min_capacity(self, min_capacity: usize) -> Result<Self> {
        ResizePolicy::new(min_capacity, self.shrink_ratio)
    }

    pub fn with_shrink_ratio(self, shrink_ratio: usize) -> Result<Self> {
        ResizePolicy::new(self.min_capacity, shrink_ratio)
    }

    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    pub fn shrink_ratio(&self) -> usize {
        self.shrink_ratio
    }

    /// Capacity to grow to when a store of `capacity` slots is full.
    pub(crate) fn grown(&self, capacity: usize) -> usize {
        (capacity * 2).max(self.min_capacity)
    }

    /// Capacity to shrink to after a pop, if any.
    pub(crate) fn shrunk(&self, len: usize, capacity: usize) -> Option<usize> {
        if capacity > self.min_capacity && len <= capacity / self.shrink_ratio {
            Some((capacity / 2).max(self.min_capacity))
        } else {
            None
        }
    }

    /// Smallest capacity this policy allows for `len` elements.
    pub(crate) fn fitted(&self, len: usize) -> usize {
        len.next_power_of_two().max(self.min_capacity)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy {
            min_capacity: DEFAULT_MIN_CAPACITY,
            shrink_ratio: DEFAULT_SHRINK_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ResizePolicy::default();
        assert_eq!(policy.min_capacity(), 2);
        assert_eq!(policy.shrink_ratio(), 4);
    }

    #[test]
    fn test_min_capacity_rounded_up() {
        assert_eq!(ResizePolicy::new(0, 4).unwrap().min_capacity(), 2);
        assert_eq!(ResizePolicy::new(5, 4).unwrap().min_capacity(), 8);
        assert_eq!(ResizePolicy::new(16, 4).unwrap().min_capacity(), 16);
    }

    #[test]
    fn test_small_ratio_rejected() {
        assert!(matches!(
            ResizePolicy::new(2, 2),
            Err(CircularBufferError::InvalidPolicy(_))
        ));
        assert!(ResizePolicy::default().with_shrink_ratio(3).is_ok());
    }

    #[test]
    fn test_grow_and_shrink_steps() {
        let policy = ResizePolicy::default().with_min_capacity(4).unwrap();
        assert_eq!(policy.grown(4), 8);
        assert_eq!(policy.shrunk(2, 8), Some(4));
        assert_eq!(policy.shrunk(3, 8), None);
        assert_eq!(policy.shrunk(0, 4), None);
        assert_eq!(policy.fitted(0), 4);
        assert_eq!(policy.fitted(9), 16);
    }

    #[test]
    fn test_huge_shrink_ratio_never_overflows() {
        let policy = ResizePolicy::new(2, usize::MAX / 2).unwrap();
        assert_eq!(policy.shrunk(3, 8), None);
        assert_eq!(policy.shrunk(usize::MAX / 4, 8), None);
        assert_eq!(policy.shrunk(0, 8), Some(4));
    }
}
