//! Client Configuration
//!
//! Settings are resolved once at start-up into a [`ClientConfig`]. Native
//! front-ends call [`load_environment`] first so values from an env file are
//! visible, then [`ClientConfig::from_env`]. The browser build has no process
//! environment and uses [`ClientConfig::from_build_env`] instead.
//!
//! ## Recognized variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STYLESAGE_BACKEND_URL` | `http://localhost:8000` |
//! | `STYLESAGE_REQUEST_TIMEOUT_SECS` | unset (no timeout) |
//! | `STYLESAGE_RECOMMENDATION_ORDERING` | `last-response-wins` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Backend address used when nothing is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub const BACKEND_URL_VAR: &str = "STYLESAGE_BACKEND_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "STYLESAGE_REQUEST_TIMEOUT_SECS";
pub const ORDERING_VAR: &str = "STYLESAGE_RECOMMENDATION_ORDERING";
/// Explicit env file, checked before [`ENV_FILE_PATHS`]
pub const ENV_FILE_VAR: &str = "STYLESAGE_ENV_FILE";

/// Env files to check (in order of priority)
pub const ENV_FILE_PATHS: &[&str] = &["/etc/stylesage/environment", ".env"];

/// How overlapping recommendation requests settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationOrdering {
    /// Every response is applied as it lands; the last one to land stays
    #[default]
    LastResponseWins,
    /// Only the response to the most recently issued request is applied
    LatestRequestWins,
}

impl fmt::Display for RecommendationOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationOrdering::LastResponseWins => write!(f, "last-response-wins"),
            RecommendationOrdering::LatestRequestWins => write!(f, "latest-request-wins"),
        }
    }
}

impl FromStr for RecommendationOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "last-response-wins" | "last-response" => Ok(RecommendationOrdering::LastResponseWins),
            "latest-request-wins" | "latest-request" => {
                Ok(RecommendationOrdering::LatestRequestWins)
            }
            other => Err(Error::InvalidConfig(format!(
                "unknown recommendation ordering: {}",
                other
            ))),
        }
    }
}

/// Client settings shared by every front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the backend, without a trailing slash
    pub backend_base_url: String,
    /// Per-request timeout; `None` lets a hung request hang
    pub request_timeout: Option<Duration>,
    pub recommendation_ordering: RecommendationOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
            recommendation_ordering: RecommendationOrdering::default(),
        }
    }
}

impl ClientConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_value)
    }

    /// Resolve from values baked in at compile time.
    pub fn from_build_env() -> Result<Self> {
        Self::from_lookup(|key| {
            let value = match key {
                BACKEND_URL_VAR => option_env!("STYLESAGE_BACKEND_URL"),
                REQUEST_TIMEOUT_VAR => option_env!("STYLESAGE_REQUEST_TIMEOUT_SECS"),
                ORDERING_VAR => option_env!("STYLESAGE_RECOMMENDATION_ORDERING"),
                _ => None,
            };
            value.filter(|v| !v.is_empty()).map(String::from)
        })
    }

    /// Resolve using an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_base_url = lookup(BACKEND_URL_VAR)
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        if !(backend_base_url.starts_with("http://") || backend_base_url.starts_with("https://"))
        {
            return Err(Error::InvalidConfig(format!(
                "{} must be an http(s) URL, got {}",
                BACKEND_URL_VAR, backend_base_url
            )));
        }

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::InvalidConfig(format!("{} is not a number: {}", REQUEST_TIMEOUT_VAR, raw))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let recommendation_ordering = match lookup(ORDERING_VAR) {
            Some(raw) => raw.parse()?,
            None => RecommendationOrdering::default(),
        };

        Ok(Self {
            backend_base_url,
            request_timeout,
            recommendation_ordering,
        })
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_base_url = normalize_base_url(url);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_ordering(mut self, ordering: RecommendationOrdering) -> Self {
        self.recommendation_ordering = ordering;
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Load the first env file found into the process environment.
///
/// `STYLESAGE_ENV_FILE` is tried first, then [`ENV_FILE_PATHS`]. Variables
/// already set are left alone. Returns the file that was loaded.
pub fn load_environment() -> Option<PathBuf> {
    let custom = std::env::var_os(ENV_FILE_VAR).map(PathBuf::from);
    let found = custom
        .into_iter()
        .chain(ENV_FILE_PATHS.iter().map(PathBuf::from))
        .find(|path| load_env_file(path));

    if found.is_none() {
        debug!("No environment file found, using existing environment");
    }
    found
}

/// Load one env file; only the path is logged, never values.
fn load_env_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("Loaded environment file {}", path.display());
            true
        }
        Err(e) => {
            warn!("Skipping environment file {}: {}", path.display(), e);
            false
        }
    }
}

/// Process environment lookup; empty counts as unset.
pub fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
