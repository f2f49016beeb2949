use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Settings for [`CodeTrackClient`](crate::CodeTrackClient) and its query cache.
///
/// Every field has a default, so `ClientConfig::default()` talks to a local
/// development backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the REST API; resource paths are appended to it.
    pub base_url: String,
    /// Keep session cookies between requests and send them back.
    pub with_credentials: bool,
    /// Overall request timeout. `None` leaves reqwest's default.
    #[serde(with = "opt_secs")]
    pub timeout: Option<Duration>,
    /// How long details/stats/list results stay fresh.
    #[serde(with = "secs")]
    pub stale_time: Duration,
    /// How long leaderboard results stay fresh.
    #[serde(with = "secs")]
    pub leaderboard_stale_time: Duration,
    /// Maximum number of cached query results.
    pub cache_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            with_credentials: true,
            timeout: None,
            stale_time: Duration::from_secs(5 * 60),
            leaderboard_stale_time: Duration::from_secs(10 * 60),
            cache_capacity: 256,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load settings from `CODETRACK_*` environment variables, falling back
    /// to defaults for anything unset.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `CODETRACK_API_URL` | `base_url` |
    /// | `CODETRACK_WITH_CREDENTIALS` | `with_credentials` |
    /// | `CODETRACK_TIMEOUT_SECS` | `timeout` |
    /// | `CODETRACK_STALE_SECS` | `stale_time` |
    /// | `CODETRACK_LEADERBOARD_STALE_SECS` | `leaderboard_stale_time` |
    /// | `CODETRACK_CACHE_CAPACITY` | `cache_capacity` |
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            base_url: try_load("CODETRACK_API_URL", defaults.base_url)?,
            with_credentials: try_load("CODETRACK_WITH_CREDENTIALS", defaults.with_credentials)?,
            timeout: optional("CODETRACK_TIMEOUT_SECS")?.map(Duration::from_secs),
            stale_time: Duration::from_secs(try_load(
                "CODETRACK_STALE_SECS",
                defaults.stale_time.as_secs(),
            )?),
            leaderboard_stale_time: Duration::from_secs(try_load(
                "CODETRACK_LEADERBOARD_STALE_SECS",
                defaults.leaderboard_stale_time.as_secs(),
            )?),
            cache_capacity: try_load("CODETRACK_CACHE_CAPACITY", defaults.cache_capacity)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("base_url {:?}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url {:?} cannot be a base",
                self.base_url
            )));
        }
        if self.cache_capacity == 0 {
            return Err(Error::Config("cache_capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Build the underlying HTTP client for these settings.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().cookie_store(self.with_credentials);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    match optional(key)? {
        Some(value) => Ok(value),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}

fn optional<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e| {
            warn!("Invalid {key} value: {e}");
            Error::Config(format!("{key}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|o| o.map(Duration::from_secs))
    }
}
