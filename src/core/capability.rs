use modular_bitfield::prelude::*;
use std::mem;

/// Static facts about an element type that algorithms branch on.
///
/// Resolved once per call through [`Capabilities::of`], never per element.
/// Constructibility facts (copy, default, emplace) are trait bounds instead,
/// see [`CopyConstruct`](super::CopyConstruct) and friends.
#[bitfield]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Dropping a value performs no observable work.
    pub trivially_destructible: bool,
    /// Moving a value can't fail. Always true for Rust's bitwise moves.
    pub nothrow_move: bool,
    /// Values occupy no storage.
    pub zero_sized: bool,
    #[skip]
    __: B5,
}

impl Capabilities {
    pub fn of<T>() -> Self {
        Self::new()
            .with_trivially_destructible(!mem::needs_drop::<T>())
            .with_nothrow_move(true)
            .with_zero_sized(mem::size_of::<T>() == 0)
    }

    /// True if rollback of already constructed values is a no-op.
    pub fn trivial_rollback(&self) -> bool {
        self.trivially_destructible() && self.nothrow_move()
    }
}

/// Flat set of traversal capabilities a cursor supports.
///
/// Algorithms branch on presence of a capability, never on cursor type.
#[bitfield]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traversal {
    pub read_forward: bool,
    pub read_backward: bool,
    /// Can advance by N and measure distance in constant time.
    pub random_access: bool,
    /// Consecutive positions are adjacent in memory.
    pub contiguous_block: bool,
    #[skip]
    __: B4,
}

impl Traversal {
    pub fn forward() -> Self {
        Self::new().with_read_forward(true)
    }

    pub fn indexed() -> Self {
        Self::forward()
            .with_read_backward(true)
            .with_random_access(true)
    }

    pub fn contiguous() -> Self {
        Self::indexed().with_contiguous_block(true)
    }
}
