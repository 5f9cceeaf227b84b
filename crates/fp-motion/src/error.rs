//! Error types for the motion crate.

pub type MotionResult<T> = Result<T, MotionError>;

#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
