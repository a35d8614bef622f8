//! Algorithms over caller owned, uninitialized storage.
//!
//! Bulk constructors share one discipline: if constructing element `i` fails,
//! exactly the `i` values built so far are destroyed, the rest of the
//! destination stays uninitialized, and the failure is handed back unchanged.
//! Copy and fill only read their source.

mod backout;
mod copy;
mod fill;
mod init;
mod lifecycle;
mod relocate;

pub use copy::*;
pub use fill::*;
pub use init::*;
pub use lifecycle::*;
pub use relocate::*;
