use std::iter::FusedIterator;

/// Borrowing iterator over a [`CircularBuffer`](crate::CircularBuffer), front to rear.
pub struct Iter<'a, T> {
    store: &'a [Option<T>],
    head: usize,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(store: &'a [Option<T>], head: usize, len: usize) -> Self {
        Iter { store, head, len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.head;
        self.head = (self.head + 1) % self.store.len();
        self.len -= 1;
        self.store[slot].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let slot = (self.head + self.len) % self.store.len();
        self.store[slot].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Owning iterator over the elements a buffer held when the snapshot was taken.
///
/// The snapshot shares nothing with the buffer, so the buffer can be pushed
/// to or popped from while the snapshot is being consumed.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Snapshot {
            inner: items.into_iter(),
        }
    }
}

impl<T> Iterator for Snapshot<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Snapshot<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Snapshot<T> {}
impl<T> FusedIterator for Snapshot<T> {}

/// Consuming iterator returned by `CircularBuffer::into_iter`.
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        IntoIter {
            inner: items.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
