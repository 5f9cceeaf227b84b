//! Error types for the boiler crate.

pub type BoilerResult<T> = Result<T, BoilerError>;

#[derive(thiserror::Error, Debug)]
pub enum BoilerError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Steam table error: {0}")]
    Tables(#[from] fp_steam::SteamError),
}
