use std::path::Path;

use horoscope_models::HoroscopeConfig;

use crate::error::LoaderError;

/// Where the binaries look for configuration when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/horoscope.toml";

/// Load configuration from `path`.
///
/// With an explicit path the file must exist. Without one, the default path is
/// read if present and all defaults are used otherwise.
pub fn load_config(path: Option<&str>) -> Result<HoroscopeConfig, LoaderError> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
        None => {
            tracing::debug!("No configuration file, using defaults");
            return Ok(HoroscopeConfig::default());
        }
    };

    let contents = std::fs::read_to_string(path)
        .map_err(|e| LoaderError::Config(format!("Failed to read {path}: {e}")))?;
    let config: HoroscopeConfig = toml::from_str(&contents)
        .map_err(|e| LoaderError::Config(format!("Failed to parse {path}: {e}")))?;

    tracing::debug!(path, "Loaded configuration");
    Ok(config)
}
