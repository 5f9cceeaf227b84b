//! fp-config: locomotive definition files and normalization.
//!
//! A locomotive is described by a YAML [`LocomotiveSpec`]. Loading is
//! forgiving: missing sections default, zero critical fields are replaced
//! with documented values, and malformed calibration curves fall back to
//! synthesized ones. Every substitution comes back as a [`ConfigWarning`]
//! for one-time reporting. The normalized [`LocomotiveConfig`] carries all
//! derived geometry and the built steam tables, and is immutable from then
//! on.

pub mod normalize;
pub mod schema;

pub use normalize::{
    BoilerKind, BrakeFeed, ConfigWarning, EngineKind, INJECTOR_SIZES_MM, LocomotiveConfig,
    injector_max_flow_lb_per_h, normalize,
};
pub use schema::*;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("steam table error: {0}")]
    Tables(#[from] fp_steam::SteamError),
}

/// Load a raw definition without normalizing it.
pub fn load_yaml(path: &std::path::Path) -> ConfigResult<LocomotiveSpec> {
    let content = std::fs::read_to_string(path)?;
    let spec: LocomotiveSpec = serde_yaml::from_str(&content)?;
    Ok(spec)
}

/// Load and normalize in one step.
pub fn load_and_normalize(
    path: &std::path::Path,
) -> ConfigResult<(LocomotiveConfig, Vec<ConfigWarning>)> {
    let spec = load_yaml(path)?;
    normalize(&spec)
}

pub fn save_yaml(path: &std::path::Path, spec: &LocomotiveSpec) -> ConfigResult<()> {
    let content = serde_yaml::to_string(spec)?;
    std::fs::write(path, content)?;
    Ok(())
}
