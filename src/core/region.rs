use std::{fmt, marker::PhantomData, mem::MaybeUninit, slice};

/// Caller owned run of uninitialized slots for values of `T`.
///
/// Region doesn't track which slots are live, nor does it drop anything.
/// That is the job of whoever constructs into it.
///
/// Base pointer is taken once, so cursors from [`Region::begin`] and
/// [`Region::end`] stay valid together and alongside the views.
pub struct Region<'a, T> {
    ptr: *mut T,
    len: usize,
    _slots: PhantomData<&'a mut [MaybeUninit<T>]>,
}

impl<'a, T> Region<'a, T> {
    pub fn new(slots: &'a mut [MaybeUninit<T>]) -> Self {
        Self {
            ptr: slots.as_mut_ptr().cast(),
            len: slots.len(),
            _slots: PhantomData,
        }
    }

    /// Region over spare capacity of `vec`.
    ///
    /// Once `n` values are constructed from `begin`, `vec.set_len(vec.len() + n)`
    /// hands them over to the vec.
    pub fn spare(vec: &'a mut Vec<T>) -> Self {
        Self::new(vec.spare_capacity_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cursor at the first slot.
    pub fn begin(&self) -> *mut T {
        self.ptr
    }

    /// Cursor one past the last slot.
    ///
    /// For zero sized `T` this equals [`Region::begin`], so range forms given
    /// `begin()..end()` construct nothing. Use the `_n` forms with
    /// [`Region::len`] instead.
    pub fn end(&self) -> *mut T {
        self.ptr.wrapping_add(self.len)
    }

    /// View of the first `len` slots.
    ///
    /// # Safety
    /// First `len` slots must be live.
    pub unsafe fn assume_init(&self, len: usize) -> &[T] {
        assert!(len <= self.len, "Out of region");
        // SAFETY: Caller guarantees the first `len` slots are live.
        unsafe { slice::from_raw_parts(self.ptr, len) }
    }

    /// Mutable view of the first `len` slots.
    ///
    /// # Safety
    /// First `len` slots must be live.
    pub unsafe fn assume_init_mut(&mut self, len: usize) -> &mut [T] {
        assert!(len <= self.len, "Out of region");
        // SAFETY: Caller guarantees the first `len` slots are live.
        unsafe { slice::from_raw_parts_mut(self.ptr, len) }
    }
}

impl<'a, T> fmt::Debug for Region<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region<{}>({:p}, {})",
            std::any::type_name::<T>(),
            self.ptr,
            self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cursor;

    #[test]
    fn bounds() {
        let mut slots = [MaybeUninit::<u64>::uninit(); 4];
        let region = Region::new(&mut slots);
        assert_eq!(region.len(), 4);
        assert!(!region.is_empty());
        let begin = region.begin();
        let end = region.end();
        assert_eq!(begin.distance_to(&end), Some(4));
    }

    #[test]
    fn spare_capacity() {
        let mut vec = Vec::<u8>::with_capacity(16);
        vec.push(1);
        let region = Region::spare(&mut vec);
        assert!(region.len() >= 15);
    }

    #[test]
    fn view_prefix() {
        let mut slots = [MaybeUninit::<u32>::uninit(); 3];
        slots[0].write(10);
        slots[1].write(20);
        let mut region = Region::new(&mut slots);
        // SAFETY: First two slots were written.
        assert_eq!(unsafe { region.assume_init(2) }, &[10, 20]);
        // SAFETY: Same.
        unsafe { region.assume_init_mut(2)[1] = 21 };
        // SAFETY: Same.
        assert_eq!(unsafe { region.assume_init(2) }, &[10, 21]);
    }

    #[test]
    fn cursors_stay_valid_together() {
        let mut slots = [MaybeUninit::<u32>::uninit(); 2];
        let mut region = Region::new(&mut slots);
        let (begin, end) = (region.begin(), region.end());
        // SAFETY: Both cursors come from the same base, slots are owned.
        unsafe {
            begin.write(7);
            end.wrapping_sub(1).write(8);
        }
        // SAFETY: Both slots were written.
        assert_eq!(unsafe { region.assume_init(2) }, &[7, 8]);
        // SAFETY: Same.
        unsafe { region.assume_init_mut(1)[0] = 9 };
        // SAFETY: Same, begin is still usable after the mutable view.
        assert_eq!(unsafe { begin.read() }, 9);
    }

    #[test]
    fn zero_sized_range_is_empty() {
        let mut slots = [MaybeUninit::<()>::uninit(); 4];
        let region = Region::new(&mut slots);
        assert_eq!(region.len(), 4);
        assert_eq!(region.begin(), region.end());
    }
}
