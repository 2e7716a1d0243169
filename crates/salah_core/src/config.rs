//! Loading a [`CalculationConfig`] from the environment or JSON.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use salah_types::{CalculationConfig, Result, SalahError};
use tracing::{debug, instrument};

pub const ENV_METHOD: &str = "SALAH_METHOD";
pub const ENV_JURISDICTION: &str = "SALAH_JURISDICTION";
pub const ENV_HIGH_LATITUDE: &str = "SALAH_HIGH_LATITUDE";
pub const ENV_TIME_FORMAT: &str = "SALAH_TIME_FORMAT";
/// Seven comma-separated minute offsets in Fajr..Isha order.
pub const ENV_OFFSETS: &str = "SALAH_OFFSETS";
pub const ENV_DHUHR_MINUTES: &str = "SALAH_DHUHR_MINUTES";

/// Reads the `SALAH_*` environment variables over the defaults.
///
/// # Errors
/// `InvalidConfiguration` when a set variable is malformed or the result fails validation.
#[instrument]
pub fn config_from_env() -> Result<CalculationConfig> {
    debug!("Loading calculation config from environment variables");
    config_from_lookup(|key| env::var(key).ok())
}

/// Like [`config_from_env`] with an arbitrary variable lookup.
pub fn config_from_lookup<F>(lookup: F) -> Result<CalculationConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = CalculationConfig::default();

    if let Some(v) = get(ENV_METHOD) {
        config = config.method(parse_var(ENV_METHOD, &v)?);
    }
    if let Some(v) = get(ENV_JURISDICTION) {
        config = config.jurisdiction(parse_var(ENV_JURISDICTION, &v)?);
    }
    if let Some(v) = get(ENV_HIGH_LATITUDE) {
        config = config.high_latitude(parse_var(ENV_HIGH_LATITUDE, &v)?);
    }
    if let Some(v) = get(ENV_TIME_FORMAT) {
        config = config.time_format(parse_var(ENV_TIME_FORMAT, &v)?);
    }
    if let Some(v) = get(ENV_OFFSETS) {
        config = config.offsets(parse_offsets(&v)?);
    }
    if let Some(v) = get(ENV_DHUHR_MINUTES) {
        config = config.dhuhr_minutes(parse_var(ENV_DHUHR_MINUTES, &v)?);
    }

    config.validate()?;
    Ok(config)
}

/// Parses and validates a JSON config. Missing fields take their defaults.
pub fn config_from_json_str(json: &str) -> Result<CalculationConfig> {
    let config: CalculationConfig = serde_json::from_str(json)
        .map_err(|e| SalahError::invalid_config(format!("Invalid config JSON: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Reads a JSON config file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn config_from_json_file(path: impl AsRef<Path>) -> Result<CalculationConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SalahError::invalid_config(format!("Failed to read {}: {e}", path.display()))
    })?;
    config_from_json_str(&content)
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| SalahError::invalid_config(format!("{key}={value:?}: {e}")))
}

fn parse_offsets(value: &str) -> Result<[i32; 7]> {
    let parsed = value
        .split(',')
        .map(|part| parse_var::<i32>(ENV_OFFSETS, part))
        .collect::<Result<Vec<_>>>()?;
    parsed.try_into().map_err(|v: Vec<i32>| {
        SalahError::invalid_config(format!("{ENV_OFFSETS} needs 7 values, got {}", v.len()))
    })
}
