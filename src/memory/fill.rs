use super::backout::Backout;
use crate::core::{span, ConstructionFailure, CopyConstruct, SlotCursor};

type Failure<T> = ConstructionFailure<<T as CopyConstruct>::Error>;

/// Copy constructs `value` into every slot of `[first, last)`.
///
/// If copy `i` fails, slots `[0, i)` are destroyed and the failure is returned
/// with index `i`. `value` is only read.
///
/// # Safety
/// Every slot in `[first, last)` must be uninitialized and exclusively owned by
/// the caller for the duration of the call, and `last` reachable from `first`.
/// Pointer cursors over zero sized values can't tell `first` from `last`, so
/// nothing is constructed; use [`uninitialized_fill_n`] for those.
pub unsafe fn uninitialized_fill<C>(
    first: C,
    last: C,
    value: &C::Value,
) -> Result<(), Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: CopyConstruct,
{
    if let Some(count) = span(&first, &last) {
        // SAFETY: Forwarded to caller.
        return unsafe { uninitialized_fill_n(first, count, value) }.map(|_| ());
    }

    let mut backout = Backout::new(first);
    while *backout.current() != last {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| value.copy_construct())? };
    }
    backout.release();
    Ok(())
}

/// Copy constructs `value` into `count` slots from `first`.
///
/// Returns cursor one past the last constructed slot. Failure as in [`uninitialized_fill`].
///
/// # Safety
/// There must be `count` uninitialized slots from `first`, exclusively owned by
/// the caller for the duration of the call.
pub unsafe fn uninitialized_fill_n<C>(
    first: C,
    count: usize,
    value: &C::Value,
) -> Result<C, Failure<C::Value>>
where
    C: SlotCursor,
    C::Value: CopyConstruct,
{
    let mut backout = Backout::new(first);
    for _ in 0..count {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| value.copy_construct())? };
    }
    Ok(backout.release())
}
