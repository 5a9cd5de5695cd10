//! URL and delay helpers that feed the crawl orchestrator.

pub mod duration;
pub mod urls;

pub use duration::{format_duration, parse_delay, parse_duration};
pub use urls::{
    batch_process_urls, extract_domain, is_valid_url, map_to_query, process_url, query_to_map,
    ProcessedUrl,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("delay string cannot be empty")]
    EmptyDelay,

    #[error("invalid delay format: {0}")]
    InvalidDelay(String),

    #[error("delay cannot be negative: {0}")]
    NegativeDelay(String),

    #[error("URLs list cannot be empty")]
    EmptyBatch,

    #[error("failed to process URL {index} ({url}): {source}")]
    Batch {
        index: usize,
        url: String,
        #[source]
        source: Box<UrlError>,
    },
}
