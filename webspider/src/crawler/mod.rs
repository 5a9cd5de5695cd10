pub mod cancel;
pub mod config;
pub mod events;
pub mod http_fetcher;
mod page_processor;
pub mod spider_builder;
pub mod stats;

use tokio::sync::mpsc;

use crate::{Error, EventSink, Fetcher, SpiderError};

use self::{
    cancel::CancelHandle,
    config::SpiderConfig,
    events::CrawlEvent,
    page_processor::{PageOutcome, PageProcessor},
    spider_builder::SpiderBuilder,
    stats::SpiderStats,
};

/// Called once per page by [`Spider::crawl_with_callback`] with the derived
/// page URL.
pub type PageCallback<'a> = &'a mut dyn FnMut(&str, Option<&SpiderError>);

/// Totals for one crawl call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Set when a [`CancelHandle`] stopped the crawl early.
    pub cancelled: bool,
}

/// A paced crawl orchestrator.
///
/// Each crawl runs `max_pages` iterations against the seed URL. Every
/// iteration waits `request_delay` first, which is also the only point a
/// [`CancelHandle`] is observed. Failed fetches are reported through the
/// event sink and never abort the loop.
///
/// A spider is not meant to be driven from several tasks at once; callers
/// that share one must serialize access themselves.
pub struct Spider {
    config: SpiderConfig,
    fetcher: Box<dyn Fetcher>,
    sink: Box<dyn EventSink>,
    cancel: CancelHandle,
}

impl Spider {
    /// Builds a spider with an HTTP fetcher and the `log` backed sink.
    pub fn new(config: SpiderConfig) -> Result<Self, Error> {
        SpiderBuilder::new().config(config).build()
    }

    pub fn builder() -> SpiderBuilder {
        SpiderBuilder::new()
    }

    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn page_processor<'a>(&'a self, seed_url: &'a str) -> PageProcessor<'a> {
        PageProcessor {
            fetcher: self.fetcher.as_ref(),
            sink: self.sink.as_ref(),
            cancel: &self.cancel,
            seed_url,
            total: self.config.max_pages,
            delay: self.config.request_delay,
        }
    }

    /// Fetches `seed_url` once per page, strictly one page after another.
    ///
    /// Returns `Ok` for any non-empty URL, however many fetches failed.
    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlSummary, Error> {
        if seed_url.is_empty() {
            return Err(Error::EmptyUrl);
        }

        let total = self.config.max_pages;
        self.sink.record(CrawlEvent::Started {
            url: seed_url.to_string(),
            pages: total,
        });

        let processor = self.page_processor(seed_url);
        let mut summary = CrawlSummary::default();

        for page in 1..=total {
            match processor.visit(page).await {
                PageOutcome::Fetched => summary.succeeded += 1,
                PageOutcome::Failed => summary.failed += 1,
                PageOutcome::Cancelled => {
                    self.sink.record(CrawlEvent::Cancelled { page });
                    summary.cancelled = true;
                    break;
                }
            }
            summary.attempted += 1;
        }

        self.sink.record(CrawlEvent::Completed { summary });
        Ok(summary)
    }

    /// Like [`Spider::crawl`], but keeps up to `concurrency` fetches in flight.
    ///
    /// Each page still paces before its fetch and the page count is still
    /// `max_pages`. Per-page events arrive in completion order.
    pub async fn crawl_concurrent(&self, seed_url: &str) -> Result<CrawlSummary, Error> {
        if seed_url.is_empty() {
            return Err(Error::EmptyUrl);
        }

        let total = self.config.max_pages;
        let concurrency = self.config.concurrency;
        self.sink.record(CrawlEvent::Started {
            url: seed_url.to_string(),
            pages: total,
        });

        let (pages_tx, pages_rx) = mpsc::channel::<usize>(concurrency);
        let queue_pages = async move {
            for page in 1..=total {
                if pages_tx.send(page).await.is_err() {
                    break;
                }
            }
        };

        let processor = self.page_processor(seed_url);
        let (_, summary) = tokio::join!(
            queue_pages,
            processor.process_pages(pages_rx, concurrency)
        );

        self.sink.record(CrawlEvent::Completed { summary });
        Ok(summary)
    }

    /// Paces like [`Spider::crawl`] but hands `<seed_url>/page<n>` to the
    /// callback instead of fetching, for n in `1..=max_pages`.
    pub async fn crawl_with_callback(
        &self,
        seed_url: &str,
        callback: Option<PageCallback<'_>>,
    ) -> Result<CrawlSummary, Error> {
        if seed_url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        let callback = callback.ok_or(Error::MissingCallback)?;

        let total = self.config.max_pages;
        let delay = self.config.request_delay;
        self.sink.record(CrawlEvent::Started {
            url: seed_url.to_string(),
            pages: total,
        });

        let mut summary = CrawlSummary::default();
        for page in 1..=total {
            self.sink.record(CrawlEvent::Pacing { page, delay });
            if !self.cancel.pace(delay).await {
                self.sink.record(CrawlEvent::Cancelled { page });
                summary.cancelled = true;
                break;
            }

            let page_url = format!("{}/page{}", seed_url, page);
            self.sink.record(CrawlEvent::Dispatched {
                page,
                url: page_url.clone(),
            });
            callback(&page_url, None);

            summary.attempted += 1;
            summary.succeeded += 1;
        }

        self.sink.record(CrawlEvent::Completed { summary });
        Ok(summary)
    }

    /// Snapshot of the current limits.
    pub fn stats(&self) -> SpiderStats {
        SpiderStats::from(&self.config)
    }

    pub fn close(&self) -> Result<(), Error> {
        self.sink.record(CrawlEvent::Closing);
        Ok(())
    }
}
