use super::backout::Backout;
use crate::core::{ConstructionFailure, CopyConstruct, SlotCursor};

type Failure<T> = ConstructionFailure<<T as CopyConstruct>::Error>;

/// Copy constructs every element of `source` into consecutive slots from `dest`.
///
/// Returns cursor one past the last constructed slot. If copying element `i`
/// fails, slots `[0, i)` are destroyed and the failure is returned with index `i`.
/// `source` is only read.
///
/// # Safety
/// There must be as many uninitialized slots from `dest` as `source` has
/// elements, exclusively owned by the caller for the duration of the call.
pub unsafe fn uninitialized_copy<'s, I, C>(source: I, dest: C) -> Result<C, Failure<C::Value>>
where
    I: IntoIterator<Item = &'s C::Value>,
    C: SlotCursor,
    C::Value: CopyConstruct + 's,
{
    let mut backout = Backout::new(dest);
    for element in source {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| element.copy_construct())? };
    }
    Ok(backout.release())
}

/// Copy constructs the first `count` elements of `source` into consecutive slots from `dest`.
///
/// Same as [`uninitialized_copy`] but bounded by count.
///
/// # Panics
/// If `source` has fewer than `count` elements. Slots constructed so far are
/// destroyed first.
///
/// # Safety
/// There must be `count` uninitialized slots from `dest`, exclusively owned by
/// the caller for the duration of the call.
pub unsafe fn uninitialized_copy_n<'s, I, C>(
    source: I,
    count: usize,
    dest: C,
) -> Result<C, Failure<C::Value>>
where
    I: IntoIterator<Item = &'s C::Value>,
    C: SlotCursor,
    C::Value: CopyConstruct + 's,
{
    let mut backout = Backout::new(dest);
    let mut source = source.into_iter();
    for _ in 0..count {
        let element = source.next().expect("Source shorter than count");
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| element.copy_construct())? };
    }
    Ok(backout.release())
}
