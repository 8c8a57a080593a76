use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use log::{debug, trace};

use crate::error::{CircularBufferError, Result};
use crate::index::{normalize, normalize_slice};
use crate::iter::{IntoIter, Iter, Snapshot};
use crate::policy::ResizePolicy;

/// An auto-resizing, indexable double-ended queue stored in a circular array.
///
/// Logical element `i` lives in physical slot `(front + i) % capacity`.
/// Capacity is always a power of two, doubles when a push finds the store
/// full and halves after a pop leaves it sparsely used (see
/// [`ResizePolicy`]).
///
/// Equality is only defined between buffers:
///
/// ```compile_fail
/// use circarray::ca;
///
/// let buf = ca![1, 2, 3];
/// assert!(buf != vec![1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct CircularBuffer<T> {
    store: Vec<Option<T>>,
    front: usize,
    len: usize,
    policy: ResizePolicy,
}

fn empty_store<T>(capacity: usize) -> Vec<Option<T>> {
    let mut store = Vec::with_capacity(capacity);
    store.resize_with(capacity, || None);
    store
}

fn clamp_count(count: isize) -> usize {
    usize::try_from(count).unwrap_or(0)
}

impl<T> CircularBuffer<T> {
    pub fn new() -> Self {
        CircularBuffer::with_policy(ResizePolicy::default())
    }

    pub fn with_policy(policy: ResizePolicy) -> Self {
        CircularBuffer {
            store: empty_store(policy.min_capacity()),
            front: 0,
            len: 0,
            policy,
        }
    }

    /// Builds a buffer holding `items` front to rear, with room for at
    /// least one more push before the first resize.
    pub fn from_vec_with_policy(items: Vec<T>, policy: ResizePolicy) -> Self {
        let capacity = policy.fitted(items.len() + 1);
        let len = items.len();
        let mut store = Vec::with_capacity(capacity);
        store.extend(items.into_iter().map(Some));
        store.resize_with(capacity, || None);
        CircularBuffer {
            store,
            front: 0,
            len,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of physical slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    pub fn fraction_filled(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    fn slot(&self, pos: usize) -> usize {
        (self.front + pos) % self.capacity()
    }

    fn slot_ref(&self, pos: usize) -> Option<&T> {
        self.store[self.slot(pos)].as_ref()
    }

    fn checked_slot(&self, index: isize) -> Result<usize> {
        normalize(index, self.len)
            .map(|pos| self.slot(pos))
            .ok_or(CircularBufferError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// Moves the live elements into a fresh store of `capacity` slots,
    /// front first, and resets `front` to 0.
    fn relinearize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let old_capacity = self.capacity();
        let mut store = Vec::with_capacity(capacity);
        for pos in 0..self.len {
            let slot = (self.front + pos) % old_capacity;
            store.push(self.store[slot].take());
        }
        store.resize_with(capacity, || None);
        self.store = store;
        self.front = 0;
        trace!(
            "resized circular buffer from {} to {} slots ({} live)",
            old_capacity,
            capacity,
            self.len
        );
    }

    fn grow_if_full(&mut self) {
        if self.len == self.capacity() {
            self.relinearize(self.policy.grown(self.capacity()));
        }
    }

    fn shrink_if_sparse(&mut self) {
        if let Some(capacity) = self.policy.shrunk(self.len, self.capacity()) {
            self.relinearize(capacity);
        }
    }

    // Element access

    /// Returns the element at `index`; negative indices count from the rear.
    pub fn get(&self, index: isize) -> Result<&T> {
        let slot = self.checked_slot(index)?;
        self.store[slot]
            .as_ref()
            .ok_or(CircularBufferError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    pub fn get_mut(&mut self, index: isize) -> Result<&mut T> {
        let slot = self.checked_slot(index)?;
        let len = self.len;
        self.store[slot]
            .as_mut()
            .ok_or(CircularBufferError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, dropping the previous occupant.
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        let slot = self.checked_slot(index)?;
        self.store[slot] = Some(value);
        Ok(())
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn rear(&self) -> Option<&T> {
        self.get(-1).ok()
    }

    // Single push/pop

    pub fn push_front(&mut self, value: T) {
        self.grow_if_full();
        self.front = (self.front + self.capacity() - 1) % self.capacity();
        self.store[self.front] = Some(value);
        self.len += 1;
    }

    pub fn push_rear(&mut self, value: T) {
        self.grow_if_full();
        let slot = self.slot(self.len);
        self.store[slot] = Some(value);
        self.len += 1;
    }

    fn take_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.store[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
        self.shrink_if_sparse();
        value
    }

    fn take_rear(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.slot(self.len - 1);
        let value = self.store[slot].take();
        self.len -= 1;
        self.shrink_if_sparse();
        value
    }

    pub fn pop_front(&mut self) -> Result<T> {
        self.take_front()
            .ok_or(CircularBufferError::EmptyBuffer { op: "pop_front" })
    }

    pub fn pop_rear(&mut self) -> Result<T> {
        self.take_rear()
            .ok_or(CircularBufferError::EmptyBuffer { op: "pop_rear" })
    }

    /// Pops the front element for callers that already know the buffer is
    /// not empty.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty. This is a broken precondition, not a
    /// recoverable condition; use [`pop_front`](Self::pop_front) otherwise.
    pub fn pop_front_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_front_unchecked on empty buffer");
        match self.take_front() {
            Some(value) => value,
            None => panic!("pop_front_unchecked called on an empty circular buffer"),
        }
    }

    /// Pops the rear element for callers that already know the buffer is
    /// not empty.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn pop_rear_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_rear_unchecked on empty buffer");
        match self.take_rear() {
            Some(value) => value,
            None => panic!("pop_rear_unchecked called on an empty circular buffer"),
        }
    }

    pub fn pop_front_or(&mut self, default: T) -> T {
        self.take_front().unwrap_or(default)
    }

    pub fn pop_rear_or(&mut self, default: T) -> T {
        self.take_rear().unwrap_or(default)
    }

    // Batch pop/push

    /// Pops up to `count` elements from the front, in removal order.
    ///
    /// Returns fewer elements when the buffer runs out and nothing at all
    /// when `count <= 0`.
    pub fn pop_front_n(&mut self, count: isize) -> Vec<T> {
        let count = clamp_count(count).min(self.len);
        (0..count).filter_map(|_| self.take_front()).collect()
    }

    /// Pops up to `count` elements from the rear; the former last element
    /// comes first.
    pub fn pop_rear_n(&mut self, count: isize) -> Vec<T> {
        let count = clamp_count(count).min(self.len);
        (0..count).filter_map(|_| self.take_rear()).collect()
    }

    /// Like [`pop_front_n`](Self::pop_front_n), but always returns exactly
    /// `count` values for `count >= 1`, padding with `default` once the
    /// buffer is exhausted.
    pub fn pop_front_n_or(&mut self, count: isize, default: T) -> Vec<T>
    where
        T: Clone,
    {
        let mut popped = self.pop_front_n(count);
        popped.resize(clamp_count(count), default);
        popped
    }

    pub fn pop_rear_n_or(&mut self, count: isize, default: T) -> Vec<T>
    where
        T: Clone,
    {
        let mut popped = self.pop_rear_n(count);
        popped.resize(clamp_count(count), default);
        popped
    }

    pub fn extend_rear<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push_rear(value);
        }
    }

    /// Pushes each value onto the front in turn, so the last value yielded
    /// ends up at index 0.
    pub fn extend_front<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push_front(value);
        }
    }

    // Slicing

    /// Returns a new buffer with the elements selected by a half-open,
    /// step-aware slice. The source buffer is left untouched.
    pub fn slice(&self, start: Option<isize>, stop: Option<isize>, step: isize) -> Result<Self>
    where
        T: Clone,
    {
        let indices = normalize_slice(start, stop, step, self.len)?;
        let items = indices
            .positions()
            .filter_map(|pos| self.slot_ref(pos).cloned())
            .collect();
        Ok(CircularBuffer::from_vec_with_policy(items, self.policy))
    }

    /// Slice assignment.
    ///
    /// With `step == 1` the selected range is replaced by `values`, which
    /// may be of any length. Any other step requires exactly one value per
    /// selected position.
    pub fn set_slice<I>(
        &mut self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
        values: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let indices = normalize_slice(start, stop, step, self.len)?;
        let values: Vec<T> = values.into_iter().collect();

        if step == 1 {
            let start = indices.start as usize;
            let stop = indices.stop.max(indices.start) as usize;
            let mut items = self.take_all();
            items.splice(start..stop, values);
            let capacity = self.policy.fitted(items.len());
            if capacity > self.capacity() {
                self.relinearize(capacity);
            }
            self.len = items.len();
            for (slot, value) in self.store.iter_mut().zip(items) {
                *slot = Some(value);
            }
            return Ok(());
        }

        if values.len() != indices.len {
            return Err(CircularBufferError::SliceLengthMismatch {
                expected: indices.len,
                actual: values.len(),
            });
        }
        for (pos, value) in indices.positions().zip(values) {
            let slot = self.slot(pos);
            self.store[slot] = Some(value);
        }
        Ok(())
    }

    // Capacity management

    /// Drops every element but keeps the current capacity.
    pub fn clear(&mut self) {
        self.store.iter_mut().for_each(|slot| *slot = None);
        self.front = 0;
        self.len = 0;
    }

    /// Shrinks capacity to the smallest the policy allows for the current
    /// length.
    pub fn compact(&mut self) {
        let capacity = self.policy.fitted(self.len);
        if capacity != self.capacity() {
            debug!(
                "compacting circular buffer from {} to {} slots",
                self.capacity(),
                capacity
            );
            self.relinearize(capacity);
        }
    }

    pub fn double(&mut self) {
        self.relinearize(self.capacity() * 2);
    }

    /// Compacts, then grows to at least `capacity` slots (rounded up to a
    /// power of two). Subsequent pops may shrink it again.
    pub fn resize(&mut self, capacity: usize) {
        self.compact();
        let capacity = self.policy.fitted(capacity);
        if capacity > self.capacity() {
            self.relinearize(capacity);
        }
    }

    /// Moves every element out, front to rear, leaving the buffer empty.
    fn take_all(&mut self) -> Vec<T> {
        let items = (0..self.len)
            .filter_map(|pos| {
                let slot = self.slot(pos);
                self.store[slot].take()
            })
            .collect();
        self.front = 0;
        self.len = 0;
        items
    }

    // Iteration and folds

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.store, self.front, self.len)
    }

    /// Takes a copy of the current contents to iterate over. The buffer can
    /// be mutated while the snapshot is consumed.
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.to_vec())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn map<U, F>(&self, f: F) -> CircularBuffer<U>
    where
        F: FnMut(&T) -> U,
    {
        CircularBuffer::from_vec_with_policy(self.iter().map(f).collect(), self.policy)
    }

    pub fn fold_left<L, F>(&self, initial: L, f: F) -> L
    where
        F: FnMut(L, &T) -> L,
    {
        self.iter().fold(initial, f)
    }

    /// Folds from the rear; `f` receives the element first and the
    /// accumulator second.
    pub fn fold_right<R, F>(&self, initial: R, mut f: F) -> R
    where
        F: FnMut(&T, R) -> R,
    {
        self.iter().rev().fold(initial, |acc, value| f(value, acc))
    }

    /// Left fold seeded with the front element. `None` when empty.
    pub fn reduce_left<F>(&self, f: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(T, &T) -> T,
    {
        let mut iter = self.iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, f))
    }

    /// Right fold seeded with the rear element. `None` when empty.
    pub fn reduce_right<F>(&self, mut f: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(&T, T) -> T,
    {
        let mut iter = self.iter().rev();
        let last = iter.next()?.clone();
        Some(iter.fold(last, |acc, value| f(value, acc)))
    }
}

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self {
        CircularBuffer::new()
    }
}

impl<T> Index<isize> for CircularBuffer<T> {
    type Output = T;

    fn index(&self, index: isize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<isize> for CircularBuffer<T> {
    fn index_mut(&mut self, index: isize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: PartialOrd> PartialOrd for CircularBuffer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for CircularBuffer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for CircularBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CA(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value:?}")?;
        }
        f.write_str(")")
    }
}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(|")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("|)")
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_rear(iter);
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        CircularBuffer::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> From<Vec<T>> for CircularBuffer<T> {
    fn from(items: Vec<T>) -> Self {
        CircularBuffer::from_vec_with_policy(items, ResizePolicy::default())
    }
}

impl<T, const N: usize> From<[T; N]> for CircularBuffer<T> {
    fn from(items: [T; N]) -> Self {
        CircularBuffer::from(Vec::from(items))
    }
}

impl<T> IntoIterator for CircularBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(self.take_all())
    }
}

impl<'a, T> IntoIterator for &'a CircularBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
