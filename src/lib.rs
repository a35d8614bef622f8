//! # Goal
//! The main goal of this library is to provide foundation for container code
//! that manages its own storage: constructing and destroying values directly
//! inside raw, uninitialized memory that the caller owns.
//!
//! Primary attribute of the library is the prefix guarantee. A bulk operation
//! that fails while constructing the k-th of n values destroys exactly the k
//! values it already built, leaves the rest of the destination untouched, and
//! hands the failure back unchanged.
//!
//! Secondary attribute is zero-overhead for trivial types. Capabilities of the
//! element type are resolved once per call, so types without drop glue pay only
//! for pointer and counter arithmetic.
//!
//! # Architecture
//! - Core - collaborators the algorithms are generic over.
//!      - Cursors: where the values go.
//!      - Element traits: how a value is copied, defaulted, or emplaced.
//!      - Capabilities: static facts about the element type.
//! - Memory - the algorithms.
//!      - Lifecycle primitives: construct and destroy single slots or runs.
//!      - Backout: scoped tracker of a constructed prefix.
//!      - Bulk constructors: copy, fill, move, default and value construction.
//! - Util - instrumentation for testing rollback paths.
//!
//! # Failure
//! A construction can fail in two ways, and both are rolled back:
//! - By returning `Err(cause)`, which surfaces as [`ConstructionFailure`]
//!   carrying the element index and the untouched cause.
//! - By panicking, in which case the prefix is destroyed during unwinding and the
//!   panic continues.
//!
//! Destruction must never fail. A panicking `Drop` voids every guarantee.

//? Important decisions:
//? - Storage is never allocated here. Regions are pre-sized by the caller.
//? - Move versus copy is chosen by what the source yields, owned or borrowed,
//?   never by whether the construction can fail.

pub mod core;
pub mod memory;
// Generic things
pub mod util;

pub use crate::core::{
    Capabilities, ConstructionFailure, Consume, CopyConstruct, Cursor, DefaultConstruct, Emplace,
    Region, SlotCursor, Strided, Traversal,
};
pub use crate::memory::*;
