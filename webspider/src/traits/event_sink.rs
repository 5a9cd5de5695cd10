use crate::CrawlEvent;

pub trait EventSink: Send + Sync {
    fn record(&self, event: CrawlEvent);
}
