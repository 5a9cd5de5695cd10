use std::{fmt, time::Duration};

use log::Level;

use crate::{utils::format_duration, EventSink, SpiderError};

use super::CrawlSummary;

/// Something the orchestrator did, reported to its [`EventSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    Started { url: String, pages: usize },
    Pacing { page: usize, delay: Duration },
    Fetching { page: usize, total: usize },
    Fetched { page: usize, status: u16 },
    FetchFailed { page: usize, error: SpiderError },
    /// A derived page URL handed to a crawl callback.
    Dispatched { page: usize, url: String },
    Cancelled { page: usize },
    Completed { summary: CrawlSummary },
    Closing,
}

impl CrawlEvent {
    pub fn level(&self) -> Level {
        match self {
            CrawlEvent::Pacing { .. } | CrawlEvent::Dispatched { .. } => Level::Debug,
            CrawlEvent::FetchFailed { .. } => Level::Warn,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlEvent::Started { url, pages } => {
                write!(f, "Starting crawl from: {} ({} pages)", url, pages)
            }
            CrawlEvent::Pacing { page, delay } => {
                write!(f, "Waiting {} before page {}", format_duration(*delay), page)
            }
            CrawlEvent::Fetching { page, total } => write!(f, "Crawling page {}/{}", page, total),
            CrawlEvent::Fetched { page, status } => {
                write!(f, "Successfully crawled page {} (HTTP {})", page, status)
            }
            CrawlEvent::FetchFailed { page, error } => {
                write!(f, "Error fetching page {}: {}", page, error)
            }
            CrawlEvent::Dispatched { page, url } => write!(f, "Dispatched page {}: {}", page, url),
            CrawlEvent::Cancelled { page } => write!(f, "Crawl cancelled before page {}", page),
            CrawlEvent::Completed { summary } => write!(
                f,
                "Crawl completed: {} attempted, {} succeeded, {} failed",
                summary.attempted, summary.succeeded, summary.failed
            ),
            CrawlEvent::Closing => write!(f, "Closing spider"),
        }
    }
}

/// Default sink: one `log` line per event under the `webspider` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: CrawlEvent) {
        log::log!(target: "webspider", event.level(), "{}", event);
    }
}
