//! Environment configuration for the storefront.
//!
//! Every key is optional. A missing key falls back to its default (logged
//! at `info`); a key that is present but unparsable is an error.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use pipeline::DEFAULT_PAGE_SIZE;
use sources::DEFAULT_BASE_URL;

pub const SOURCE_URL_KEY: &str = "STOREFRONT_SOURCE_URL";
pub const REVALIDATE_SECS_KEY: &str = "STOREFRONT_REVALIDATE_SECS";
pub const PAGE_SIZE_KEY: &str = "STOREFRONT_PAGE_SIZE";
pub const TIMEOUT_SECS_KEY: &str = "STOREFRONT_TIMEOUT_SECS";

/// Revalidation window used when none is configured
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Storefront settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of the product REST API
    pub source_url: String,
    /// How long a snapshot (or a product detail) stays fresh
    pub revalidate: Duration,
    pub page_size: usize,
    /// Per-request timeout for the product source
    pub timeout: Duration,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size: usize = try_load(&lookup, PAGE_SIZE_KEY, DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: PAGE_SIZE_KEY,
                value: "0".to_string(),
                reason: "page size must be at least 1".to_string(),
            });
        }

        Ok(Self {
            source_url: try_load(&lookup, SOURCE_URL_KEY, DEFAULT_BASE_URL.to_string())?,
            revalidate: Duration::from_secs(try_load(
                &lookup,
                REVALIDATE_SECS_KEY,
                DEFAULT_REVALIDATE_SECS,
            )?),
            page_size,
            timeout: Duration::from_secs(try_load(&lookup, TIMEOUT_SECS_KEY, DEFAULT_TIMEOUT_SECS)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_BASE_URL.to_string(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
