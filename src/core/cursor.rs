use super::Traversal;
use std::{fmt, iter::FusedIterator, mem, ptr};

/// Position in a sequence of slots.
///
/// Required: equality, single step forward. The rest is optional and used
/// opportunistically, correctness never depends on it.
pub trait Cursor: Clone + PartialEq {
    /// Capabilities of this kind of cursor. Queried once per call.
    fn traversal() -> Traversal {
        Traversal::forward()
    }

    fn step(&mut self);

    fn step_by(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Number of steps from `self` to `later`, if it can be known without walking.
    fn distance_to(&self, _later: &Self) -> Option<usize> {
        None
    }
}

/// Cursor over storage slots for values of `Self::Value`.
pub trait SlotCursor: Cursor {
    type Value;

    /// Slot at this position. Not required to be initialized.
    fn slot(&self) -> *mut Self::Value;
}

/// Number of slots in `[first, last)` if the cursor can tell without walking.
pub(crate) fn span<C: Cursor>(first: &C, last: &C) -> Option<usize> {
    if C::traversal().random_access() {
        first.distance_to(last)
    } else {
        None
    }
}

impl<T> Cursor for *mut T {
    fn traversal() -> Traversal {
        Traversal::contiguous()
    }

    fn step(&mut self) {
        *self = self.wrapping_add(1);
    }

    fn step_by(&mut self, n: usize) {
        *self = self.wrapping_add(n);
    }

    /// Zero sized values have no measurable distance.
    fn distance_to(&self, later: &Self) -> Option<usize> {
        let size = mem::size_of::<T>();
        if size == 0 {
            return None;
        }
        (*later as usize)
            .checked_sub(*self as usize)
            .map(|bytes| bytes / size)
    }
}

impl<T> SlotCursor for *mut T {
    type Value = T;

    fn slot(&self) -> *mut T {
        *self
    }
}

/// Cursor that visits every `stride`-th slot of a contiguous buffer.
///
/// Random access but not contiguous, ex. a column of a row major matrix.
pub struct Strided<T> {
    ptr: *mut T,
    stride: usize,
}

impl<T> Strided<T> {
    /// Panics if stride is zero.
    pub fn new(ptr: *mut T, stride: usize) -> Self {
        assert!(stride > 0, "Stride must be positive");
        Self { ptr, stride }
    }

    pub fn ptr(&self) -> *mut T {
        self.ptr
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<T> Clone for Strided<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Strided<T> {}

impl<T> PartialEq for Strided<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for Strided<T> {}

impl<T> fmt::Debug for Strided<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strided({:p}, {})", self.ptr, self.stride)
    }
}

impl<T> Cursor for Strided<T> {
    fn traversal() -> Traversal {
        Traversal::indexed()
    }

    fn step(&mut self) {
        self.ptr = self.ptr.wrapping_add(self.stride);
    }

    fn step_by(&mut self, n: usize) {
        self.ptr = self.ptr.wrapping_add(self.stride * n);
    }

    fn distance_to(&self, later: &Self) -> Option<usize> {
        let step = mem::size_of::<T>() * self.stride;
        if step == 0 {
            return None;
        }
        let bytes = (later.ptr as usize).checked_sub(self.ptr as usize)?;
        if bytes % step == 0 {
            Some(bytes / step)
        } else {
            None
        }
    }
}

impl<T> SlotCursor for Strided<T> {
    type Value = T;

    fn slot(&self) -> *mut T {
        self.ptr
    }
}

/// Consuming source over `len` live slots starting at `first`.
///
/// Yields values by bitwise move, leaving the read slots logically uninitialized.
/// Slots that were not read stay live and are not dropped with the iterator,
/// they remain the caller's responsibility.
pub struct Consume<T> {
    next: *mut T,
    remaining: usize,
}

impl<T> Consume<T> {
    /// # Safety
    /// `[first, first + len)` must be live slots exclusively owned by the caller
    /// for the lifetime of the iterator, and nothing else may drop the values
    /// it yields.
    pub unsafe fn new(first: *mut T, len: usize) -> Self {
        Self {
            next: first,
            remaining: len,
        }
    }

    /// Position of the next slot to be read.
    pub fn position(&self) -> *mut T {
        self.next
    }
}

impl<T> Iterator for Consume<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: Caller guaranteed that the slot is live and owned, and it is read only once.
        let value = unsafe { ptr::read(self.next) };
        self.next.step();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Consume<T> {}

impl<T> FusedIterator for Consume<T> {}

impl<T> fmt::Debug for Consume<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Consume({:p}, {})", self.next, self.remaining)
    }
}

/// Forward only cursor over arbitrary slots, walks by equality.
#[cfg(test)]
pub(crate) struct Chain<'a, T> {
    slots: &'a [*mut T],
    at: usize,
}

#[cfg(test)]
impl<'a, T> Chain<'a, T> {
    /// Cursors at the first slot and one past the last.
    pub(crate) fn bounds(slots: &'a [*mut T]) -> (Self, Self) {
        let last = Self {
            slots,
            at: slots.len(),
        };
        (Self { slots, at: 0 }, last)
    }
}

#[cfg(test)]
impl<T> Clone for Chain<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            at: self.at,
        }
    }
}

#[cfg(test)]
impl<T> PartialEq for Chain<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

#[cfg(test)]
impl<T> Cursor for Chain<'_, T> {
    fn step(&mut self) {
        self.at += 1;
    }
}

#[cfg(test)]
impl<T> SlotCursor for Chain<'_, T> {
    type Value = T;

    fn slot(&self) -> *mut T {
        self.slots[self.at]
    }
}
