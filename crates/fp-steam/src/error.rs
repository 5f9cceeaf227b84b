//! Error types for steam property tables.

use thiserror::Error;

pub type SteamResult<T> = Result<T, SteamError>;

#[derive(Error, Debug)]
pub enum SteamError {
    #[error("Curve needs at least two points: {what}")]
    TooFewPoints { what: &'static str },

    #[error("Curve abscissae must be strictly increasing: {what}")]
    NonMonotonic { what: &'static str },

    #[error("Non-finite curve data: {what}")]
    NonFinite { what: &'static str },

    #[error("Grid shape mismatch: {what}")]
    GridShape { what: &'static str },

    #[error("Curve is not invertible: {what}")]
    NotInvertible { what: &'static str },
}
