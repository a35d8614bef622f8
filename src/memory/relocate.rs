//! Moving construction.
//!
//! Whether an element is moved or copied depends only on what the source
//! yields. Owned values are consumed, `&T` is copied, see [`Emplace`].

use super::backout::Backout;
use crate::core::{ConstructionFailure, Emplace, SlotCursor};

type Failure<S, T> = ConstructionFailure<<S as Emplace<T>>::Error>;

/// Emplaces every element of `source` into consecutive slots from `dest`.
///
/// Returns cursor one past the last constructed slot. If element `i` fails,
/// slots `[0, i)` are destroyed and the failure is returned with index `i`.
/// Source elements `[0, i)` are consumed by then, and element `i` is in
/// whatever state its failed emplacement left it.
///
/// # Safety
/// There must be as many uninitialized slots from `dest` as `source` has
/// elements, exclusively owned by the caller for the duration of the call.
pub unsafe fn uninitialized_move<I, C>(
    source: I,
    dest: C,
) -> Result<C, Failure<I::Item, C::Value>>
where
    I: IntoIterator,
    I::Item: Emplace<C::Value>,
    C: SlotCursor,
{
    let mut backout = Backout::new(dest);
    for element in source {
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| element.emplace())? };
    }
    Ok(backout.release())
}

/// Emplaces the first `count` elements of `source` into consecutive slots from `dest`.
///
/// Returns `source` advanced past the emplaced elements and cursor one past the
/// last constructed slot. Failure as in [`uninitialized_move`].
///
/// # Panics
/// If `source` has fewer than `count` elements. Slots constructed so far are
/// destroyed first.
///
/// # Safety
/// There must be `count` uninitialized slots from `dest`, exclusively owned by
/// the caller for the duration of the call.
pub unsafe fn uninitialized_move_n<I, C>(
    mut source: I,
    count: usize,
    dest: C,
) -> Result<(I, C), Failure<I::Item, C::Value>>
where
    I: Iterator,
    I::Item: Emplace<C::Value>,
    C: SlotCursor,
{
    let mut backout = Backout::new(dest);
    for _ in 0..count {
        let element = source.next().expect("Source shorter than count");
        // SAFETY: Forwarded to caller.
        unsafe { backout.construct(|| element.emplace())? };
    }
    Ok((source, backout.release()))
}
