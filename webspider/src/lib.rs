//! A paced, bounded crawl orchestrator.
//!
//! A [`SpiderConfig`] carries the crawl limits, a [`Spider`] runs the
//! fetch loop against an injected [`Fetcher`] and reports through an
//! [`EventSink`], and [`utils`] holds the URL and delay helpers.

mod crawler;
mod error;
mod traits;
pub mod utils;
mod version;

pub use crawler::{
    cancel::CancelHandle,
    config::{
        ConfigError, SpiderConfig, DEFAULT_CONCURRENCY, DEFAULT_DELAY, DEFAULT_MAX_DEPTH,
        DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
    },
    events::{CrawlEvent, LogSink},
    http_fetcher::HttpFetcher,
    spider_builder::SpiderBuilder,
    stats::SpiderStats,
    CrawlSummary, PageCallback, Spider,
};
pub use error::{Error, ErrorKind, SpiderError};
pub use traits::{EventSink, Fetcher};
pub use utils::{ProcessedUrl, UrlError};
pub use version::VersionInfo;
