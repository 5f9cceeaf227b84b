//! Error types for the cylinder crate.

pub type CylinderResult<T> = Result<T, CylinderError>;

#[derive(thiserror::Error, Debug)]
pub enum CylinderError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
