//! Single slot construction and destruction, and bulk destruction.
//!
//! None of these track anything. Rollback around a single `construct_at` is the
//! caller's job.

use crate::core::{span, Capabilities, SlotCursor};
use std::ptr;

/// Constructs `value` in place at `slot`.
///
/// # Safety
/// `slot` must be valid for writes, properly aligned, and uninitialized or
/// otherwise hold nothing that needs dropping.
#[inline]
pub unsafe fn construct_at<'a, T>(slot: *mut T, value: T) -> &'a mut T {
    // SAFETY: Caller guarantees slot is valid for writes.
    unsafe {
        slot.write(value);
        &mut *slot
    }
}

/// Runs `make` and constructs its result at `slot`.
///
/// On `Err` the slot stays uninitialized and the error is returned unchanged.
/// If `make` panics the slot also stays uninitialized.
///
/// # Safety
/// Same as [`construct_at`].
#[inline]
pub unsafe fn try_construct_at<'a, T, E>(
    slot: *mut T,
    make: impl FnOnce() -> Result<T, E>,
) -> Result<&'a mut T, E> {
    let value = make()?;
    // SAFETY: Forwarded to caller.
    Ok(unsafe { construct_at(slot, value) })
}

/// Destroys the live value at `slot`. Arrays are destroyed element by element in order.
///
/// # Safety
/// `slot` must hold a live value that is not used, nor destroyed again, afterwards.
/// Destruction must not panic.
#[inline]
pub unsafe fn destroy_at<T: ?Sized>(slot: *mut T) {
    // SAFETY: Caller guarantees slot is live.
    unsafe { ptr::drop_in_place(slot) }
}

/// Destroys every slot in `[first, last)`, front to back.
///
/// Zero sized values behind a pointer cursor can't be told apart by position,
/// use [`destroy_n`] for them.
///
/// # Safety
/// Every slot in `[first, last)` must be live and `last` reachable from `first`.
pub unsafe fn destroy<C: SlotCursor>(mut first: C, last: C) {
    if Capabilities::of::<C::Value>().trivially_destructible() {
        return;
    }

    if let Some(count) = span(&first, &last) {
        // SAFETY: Forwarded to caller.
        unsafe { destroy_n(first, count) };
        return;
    }

    while first != last {
        // SAFETY: Forwarded to caller.
        unsafe { destroy_at(first.slot()) };
        first.step();
    }
}

/// Destroys `count` slots starting at `first`, front to back.
///
/// Returns cursor one past the last destroyed slot.
///
/// # Safety
/// `count` slots starting at `first` must be live.
pub unsafe fn destroy_n<C: SlotCursor>(mut first: C, count: usize) -> C {
    if Capabilities::of::<C::Value>().trivially_destructible() {
        first.step_by(count);
        return first;
    }

    if C::traversal().contiguous_block() {
        let run = ptr::slice_from_raw_parts_mut(first.slot(), count);
        // SAFETY: Slots are adjacent and live as guaranteed by caller.
        unsafe { ptr::drop_in_place(run) };
        first.step_by(count);
        return first;
    }

    for _ in 0..count {
        // SAFETY: Forwarded to caller.
        unsafe { destroy_at(first.slot()) };
        first.step();
    }
    first
}
