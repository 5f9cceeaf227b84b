//! fp-steam: steam property tables for the footplate powerplant.
//!
//! Provides:
//! - piecewise-linear `Curve` and bilinear `Curve2` interpolation, clamped at
//!   domain edges
//! - a `CurveId`-indexed immutable `SteamTables` set built once from baked
//!   saturation data plus locomotive-specific calibration curves
//! - synthesized defaults (from boiler geometry) for curves a locomotive
//!   definition omits, with the substitutions reported to the caller

pub mod curve;
pub mod error;
pub mod tables;

// Internal modules
mod data;
mod synth;

// Re-exports for public API
pub use curve::{Curve, Curve2};
pub use error::{SteamError, SteamResult};
pub use tables::{
    Curve2Id, CurveId, Grid2, SteamTables, TableGeometry, TableOverrides, TableSubstitution,
};
