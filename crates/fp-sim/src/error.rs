//! Error types for powerplant simulation.

use thiserror::Error;

/// Errors encountered while building or ticking a powerplant.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<fp_config::ConfigError> for SimError {
    fn from(e: fp_config::ConfigError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<fp_cylinder::CylinderError> for SimError {
    fn from(e: fp_cylinder::CylinderError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<fp_motion::MotionError> for SimError {
    fn from(e: fp_motion::MotionError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
