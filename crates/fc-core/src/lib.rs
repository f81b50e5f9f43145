//! fc-core: shared foundation for the feedback-loop crates.
//!
//! Contains:
//! - numeric (finiteness checks and half-up rounding)
//! - step (discrete time index)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod step;

pub use error::{FcError, FcResult};
pub use numeric::*;
pub use step::Step;
