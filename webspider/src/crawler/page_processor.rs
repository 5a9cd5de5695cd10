use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::{CrawlEvent, EventSink, Fetcher};

use super::{cancel::CancelHandle, CrawlSummary};

pub(crate) enum PageOutcome {
    Fetched,
    Failed,
    Cancelled,
}

/// Paces and fetches the pages of one crawl.
pub(crate) struct PageProcessor<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub sink: &'a dyn EventSink,
    pub cancel: &'a CancelHandle,
    pub seed_url: &'a str,
    pub total: usize,
    pub delay: Duration,
}

impl<'a> PageProcessor<'a> {
    /// Waits out the pacing delay, then fetches the seed once.
    pub async fn visit(&self, page: usize) -> PageOutcome {
        self.sink.record(CrawlEvent::Pacing {
            page,
            delay: self.delay,
        });
        if !self.cancel.pace(self.delay).await {
            return PageOutcome::Cancelled;
        }

        self.sink.record(CrawlEvent::Fetching {
            page,
            total: self.total,
        });

        match self.fetcher.fetch(self.seed_url).await {
            Ok(status) => {
                self.sink.record(CrawlEvent::Fetched { page, status });
                PageOutcome::Fetched
            }
            Err(error) => {
                self.sink.record(CrawlEvent::FetchFailed { page, error });
                PageOutcome::Failed
            }
        }
    }

    /// Visits queued pages with at most `concurrency` in flight.
    ///
    /// Events for different pages interleave in completion order.
    pub async fn process_pages(
        &self,
        pages: mpsc::Receiver<usize>,
        concurrency: usize,
    ) -> CrawlSummary {
        let succeeded = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let cancelled = AtomicBool::new(false);

        ReceiverStream::new(pages)
            .for_each_concurrent(concurrency, |page| {
                let succeeded = &succeeded;
                let failed = &failed;
                let cancelled = &cancelled;
                async move {
                    match self.visit(page).await {
                        PageOutcome::Fetched => {
                            succeeded.fetch_add(1, Ordering::SeqCst);
                        }
                        PageOutcome::Failed => {
                            failed.fetch_add(1, Ordering::SeqCst);
                        }
                        PageOutcome::Cancelled => {
                            if !cancelled.swap(true, Ordering::SeqCst) {
                                self.sink.record(CrawlEvent::Cancelled { page });
                            }
                        }
                    }
                }
            })
            .await;

        let succeeded = succeeded.into_inner();
        let failed = failed.into_inner();
        CrawlSummary {
            attempted: succeeded + failed,
            succeeded,
            failed,
            cancelled: cancelled.into_inner(),
        }
    }
}
