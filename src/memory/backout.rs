use super::lifecycle::{destroy_n, try_construct_at};
use crate::core::{Capabilities, ConstructionFailure, SlotCursor};
use log::*;

/// Scoped tracker of a constructed prefix `[start, current)`.
///
/// Every slot in `[start, current)` is live, every slot from `current` onward
/// is uninitialized. Unless released, dropping it destroys the prefix exactly
/// once, be it due to an early return or unwinding.
pub(crate) struct Backout<C: SlotCursor> {
    start: C,
    current: C,
    /// Length of `[start, current)`.
    live: usize,
    state: State,
    caps: Capabilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Released,
}

impl<C: SlotCursor> Backout<C> {
    pub fn new(start: C) -> Self {
        Self {
            current: start.clone(),
            start,
            live: 0,
            state: State::Active,
            caps: Capabilities::of::<C::Value>(),
        }
    }

    pub fn current(&self) -> &C {
        &self.current
    }

    /// Constructs the next slot with `make`, advancing on success.
    ///
    /// On failure nothing is advanced and the failure carries the index of the
    /// slot. The prefix is left for the drop to destroy.
    ///
    /// # Safety
    /// Slot at `current` must be valid for writes and uninitialized.
    #[inline]
    pub unsafe fn construct<E>(
        &mut self,
        make: impl FnOnce() -> Result<C::Value, E>,
    ) -> Result<(), ConstructionFailure<E>> {
        debug_assert_eq!(self.state, State::Active);
        // SAFETY: Forwarded to caller.
        match unsafe { try_construct_at(self.current.slot(), make) } {
            Ok(_) => {
                self.advance();
                Ok(())
            }
            Err(cause) => {
                trace!(
                    "Construction of {} at index {} failed",
                    std::any::type_name::<C::Value>(),
                    self.live
                );
                Err(ConstructionFailure::new(self.live, cause))
            }
        }
    }

    #[inline]
    fn advance(&mut self) {
        self.current.step();
        self.live += 1;
    }

    /// Stops owning the prefix and returns cursor past it.
    pub fn release(mut self) -> C {
        self.state = State::Released;
        self.current.clone()
    }
}

impl<C: SlotCursor> Drop for Backout<C> {
    fn drop(&mut self) {
        if self.state == State::Released || self.live == 0 {
            return;
        }

        let live = std::mem::replace(&mut self.live, 0);
        self.state = State::Released;

        if self.caps.trivial_rollback() {
            trace!(
                "Dropping {} constructed {} without drop glue",
                live,
                std::any::type_name::<C::Value>()
            );
            return;
        }

        debug!(
            "Rolling back {} constructed {}",
            live,
            std::any::type_name::<C::Value>()
        );
        // Counted instead of start..current, zero sized values don't move a pointer cursor.
        // SAFETY: Exactly `live` slots from `start` were constructed by this guard and
        // nothing else has taken ownership of them.
        unsafe { destroy_n(self.start.clone(), live) };
    }
}
