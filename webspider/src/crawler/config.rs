use std::{fs, path::Path, time::Duration};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::utils::duration::serde_str;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_USER_AGENT: &str = "DirectWebSpider/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONCURRENCY: usize = 5;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("max depth cannot be negative: {0}")]
    NegativeMaxDepth(i64),

    #[error("max pages cannot be negative: {0}")]
    NegativeMaxPages(i64),

    #[error("delay cannot be negative: {0}")]
    NegativeDelay(TimeDelta),

    #[error("user agent cannot be empty")]
    EmptyUserAgent,

    #[error("timeout must be positive: {0}")]
    NonPositiveTimeout(String),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("concurrency must be at least 1: {0}")]
    InvalidConcurrency(i64),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crawl limits handed to a [`Spider`](crate::Spider).
///
/// Fields are public so a config can be filled in from a file or by hand;
/// the setters check one field at a time and [`SpiderConfig::validate`] is
/// the gate the orchestrator runs before accepting a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiderConfig {
    /// Reserved for depth-bounded traversal; validated but not used by the loop.
    pub max_depth: usize,

    /// Number of loop iterations per crawl.
    pub max_pages: usize,

    /// Pacing wait before each fetch.
    #[serde(rename = "delay", with = "serde_str")]
    pub request_delay: Duration,

    pub user_agent: String,

    /// Upper bound for a single fetch.
    #[serde(rename = "timeout", with = "serde_str")]
    pub request_timeout: Duration,

    /// Maximum fetches in flight for concurrent crawls.
    pub concurrency: usize,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            request_delay: DEFAULT_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl SpiderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config from a JSON file. The result has not been validated.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn set_max_depth(&mut self, depth: i64) -> Result<(), ConfigError> {
        self.max_depth = usize::try_from(depth).map_err(|_| ConfigError::NegativeMaxDepth(depth))?;
        Ok(())
    }

    pub fn set_max_pages(&mut self, pages: i64) -> Result<(), ConfigError> {
        self.max_pages = usize::try_from(pages).map_err(|_| ConfigError::NegativeMaxPages(pages))?;
        Ok(())
    }

    pub fn set_request_delay(&mut self, delay: TimeDelta) -> Result<(), ConfigError> {
        self.request_delay = delay
            .to_std()
            .map_err(|_| ConfigError::NegativeDelay(delay))?;
        Ok(())
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> Result<(), ConfigError> {
        let user_agent = user_agent.into();
        if user_agent.is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        self.user_agent = user_agent;
        Ok(())
    }

    /// Zero is rejected: it does not mean "no timeout".
    pub fn set_request_timeout(&mut self, timeout: TimeDelta) -> Result<(), ConfigError> {
        let timeout = match timeout.to_std() {
            Ok(timeout) if !timeout.is_zero() => timeout,
            _ => return Err(ConfigError::NonPositiveTimeout(timeout.to_string())),
        };
        self.request_timeout = timeout;
        Ok(())
    }

    pub fn set_concurrency(&mut self, concurrency: i64) -> Result<(), ConfigError> {
        self.concurrency = match usize::try_from(concurrency) {
            Ok(concurrency) if concurrency >= 1 => concurrency,
            _ => return Err(ConfigError::InvalidConcurrency(concurrency)),
        };
        Ok(())
    }

    /// Re-checks every field against its current value.
    ///
    /// Negative depth, page count and delay cannot be stored, so only the
    /// fields with representable invalid values are inspected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::NonPositiveTimeout(
                crate::utils::format_duration(self.request_timeout),
            ));
        }
        if self.concurrency < 1 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}
