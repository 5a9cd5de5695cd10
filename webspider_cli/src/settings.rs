use std::{path::PathBuf, time::Duration};

use chrono::TimeDelta;
use clap::Args;
use webspider::{utils::parse_delay, SpiderConfig};

use crate::error::AppError;

/// Crawl limits. Flags override the config file, which overrides defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON config file
    #[arg(long, env = "WEBSPIDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum crawl depth
    #[arg(long, env = "WEBSPIDER_MAX_DEPTH", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Pages fetched per crawl
    #[arg(long, env = "WEBSPIDER_MAX_PAGES", allow_negative_numbers = true)]
    pub max_pages: Option<i64>,

    /// Wait before each request, e.g. `500ms`, `2s` or `3`
    #[arg(long, env = "WEBSPIDER_DELAY", value_parser = parse_delay)]
    pub delay: Option<Duration>,

    /// User agent sent with each request
    #[arg(long, env = "WEBSPIDER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout, e.g. `30s`
    #[arg(long, env = "WEBSPIDER_TIMEOUT", value_parser = parse_delay)]
    pub timeout: Option<Duration>,

    /// Fetches in flight for concurrent crawls
    #[arg(long, env = "WEBSPIDER_CONCURRENCY", allow_negative_numbers = true)]
    pub concurrency: Option<i64>,
}

fn to_time_delta(duration: Duration) -> Result<TimeDelta, AppError> {
    TimeDelta::from_std(duration)
        .map_err(|_| AppError::Validation(format!("duration out of range: {:?}", duration)))
}

impl ConfigArgs {
    pub fn build_config(&self) -> Result<SpiderConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                SpiderConfig::from_file(path)?
            }
            None => SpiderConfig::new(),
        };

        if let Some(depth) = self.max_depth {
            config.set_max_depth(depth)?;
        }
        if let Some(pages) = self.max_pages {
            config.set_max_pages(pages)?;
        }
        if let Some(delay) = self.delay {
            config.set_request_delay(to_time_delta(delay)?)?;
        }
        if let Some(user_agent) = &self.user_agent {
            config.set_user_agent(user_agent.as_str())?;
        }
        if let Some(timeout) = self.timeout {
            config.set_request_timeout(to_time_delta(timeout)?)?;
        }
        if let Some(concurrency) = self.concurrency {
            config.set_concurrency(concurrency)?;
        }

        config.validate()?;
        Ok(config)
    }
}
