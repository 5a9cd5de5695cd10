use async_trait::async_trait;

use crate::SpiderError;

/// One bounded-time HTTP GET.
///
/// Implementations consume and discard the body and return the response
/// status. Any status is a completed fetch; only transport failures are
/// errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<u16, SpiderError>;
}
