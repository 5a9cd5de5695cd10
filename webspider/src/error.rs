use std::fmt;

use crate::crawler::config::ConfigError;
use crate::utils::UrlError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("config cannot be missing")]
    MissingConfig,

    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("callback cannot be missing")]
    MissingCallback,

    #[error("URL Error: {0}")]
    Url(#[from] UrlError),

    #[error("Reqwest Error: {0}")]
    Client(#[from] reqwest::Error),
}

impl Error {
    pub fn category(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::MissingConfig | Error::Client(_) => ErrorKind::Config,
            Error::EmptyUrl | Error::MissingCallback => ErrorKind::Input,
            Error::Url(_) => ErrorKind::Url,
        }
    }

    /// Turns this error into a [`SpiderError`] report for the given URL.
    pub fn into_report(self, url: impl Into<String>) -> SpiderError {
        SpiderError::new(self.category(), self.to_string(), url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Input,
    Timeout,
    Connect,
    Request,
    Url,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Input => "input",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Connect => "connect",
            ErrorKind::Request => "request",
            ErrorKind::Url => "url",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure report tied to the URL that triggered it.
///
/// Fetch failures travel through the event sink and crawl callbacks as
/// `SpiderError` values; they are never returned from `crawl` itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message} (URL: {url})")]
pub struct SpiderError {
    pub kind: ErrorKind,
    pub message: String,
    pub url: String,
}

impl SpiderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Categorizes a transport error from the HTTP client.
    pub fn from_reqwest(url: impl Into<String>, error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            ErrorKind::Timeout
        } else if error.is_connect() {
            ErrorKind::Connect
        } else {
            ErrorKind::Request
        };

        Self::new(kind, error.to_string(), url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spider_error_display() {
        let err = SpiderError::new(ErrorKind::Timeout, "request timed out", "https://example.com");
        assert_eq!(
            err.to_string(),
            "timeout: request timed out (URL: https://example.com)"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::EmptyUrl.category(), ErrorKind::Input);
        assert_eq!(Error::MissingCallback.category(), ErrorKind::Input);
        assert_eq!(Error::MissingConfig.category(), ErrorKind::Config);
        assert_eq!(
            Error::Config(ConfigError::ZeroConcurrency).category(),
            ErrorKind::Config
        );
        assert_eq!(Error::Url(UrlError::EmptyBatch).category(), ErrorKind::Url);
    }

    #[test]
    fn test_into_report_keeps_url() {
        let report = Error::EmptyUrl.into_report("");
        assert_eq!(report.kind, ErrorKind::Input);
        assert_eq!(report.message, "URL cannot be empty");
        assert_eq!(report.url, "");
    }
}
