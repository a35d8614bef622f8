//! Collaborators the algorithms are generic over.
//!
//! - Cursor - where values are constructed.
//! - Element - how a value is copied, defaulted, or emplaced.
//! - Capability - static facts about element types and cursors.
//! - Region - caller owned storage.

mod capability;
mod cursor;
mod element;
mod error;
mod region;

pub use capability::*;
pub use cursor::*;
pub use element::*;
pub use error::*;
pub use region::*;
