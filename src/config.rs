use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

pub const API_URL_VAR: &str = "PHOTO_API_URL";
pub const THUMBNAIL_SIZE_VAR: &str = "PHOTO_THUMBNAIL_SIZE";
pub const REQUEST_TIMEOUT_VAR: &str = "PHOTO_REQUEST_TIMEOUT_SECS";
pub const THUMBNAIL_CONCURRENCY_VAR: &str = "PHOTO_THUMBNAIL_CONCURRENCY";

const DEFAULT_THUMBNAIL_SIZE: u32 = 164;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_THUMBNAIL_CONCURRENCY: usize = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the photo API; requests go to `<api_url>/photos`
    pub api_url: String,
    /// Edge length of decoded grid thumbnails, in pixels
    pub thumbnail_size: u32,
    pub request_timeout: Duration,
    /// Thumbnail downloads allowed in flight at once, at least 1
    pub thumbnail_concurrency: usize,
}

impl Config {
    /// Read configuration from the process environment.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(API_URL_VAR))?;

        let valid = reqwest::Url::parse(&api_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: api_url,
            });
        }

        let thumbnail_size = parse_or(&lookup, THUMBNAIL_SIZE_VAR, DEFAULT_THUMBNAIL_SIZE);
        let timeout_secs = parse_or(&lookup, REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS);
        let thumbnail_concurrency =
            parse_or(&lookup, THUMBNAIL_CONCURRENCY_VAR, DEFAULT_THUMBNAIL_CONCURRENCY).max(1);

        Ok(Self {
            api_url,
            thumbnail_size,
            request_timeout: Duration::from_secs(timeout_secs),
            thumbnail_concurrency,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has unparsable value {:?}, using {}", key, raw, default);
            default
        }),
    }
}
