//! fp-core: stable foundation for footplate.
//!
//! Contains:
//! - numeric (Real + tolerances + guarded float helpers)
//! - units (imperial/SI conversion constants and helpers)
//! - smoothing (first-order smoothing filter for damped quantities)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod smoothing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use smoothing::Smoother;
pub use units::*;
