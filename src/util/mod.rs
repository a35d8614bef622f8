//! Generic things
#[cfg(feature = "probe")]
pub mod probe;
