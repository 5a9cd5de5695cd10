mod event_sink;
mod fetcher;

pub use event_sink::EventSink;
pub use fetcher::Fetcher;
