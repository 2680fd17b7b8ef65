//! Affiliate partnership growth projection.
//!
//! Turns six business inputs into a 12-month projection comparing an
//! affiliate/partnership strategy with equivalent paid acquisition spend.

pub mod errors;
pub mod projections;

pub use errors::{Error, Result};
