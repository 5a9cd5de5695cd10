use crate::{Error, EventSink, Fetcher, HttpFetcher, LogSink, Spider, SpiderConfig};

use super::cancel::CancelHandle;

/// Assembles a [`Spider`] from a config and optional capabilities.
///
/// Without a fetcher a [`HttpFetcher`] is built from the config; without a
/// sink events go to [`LogSink`].
#[derive(Default)]
pub struct SpiderBuilder {
    config: Option<SpiderConfig>,
    fetcher: Option<Box<dyn Fetcher>>,
    sink: Option<Box<dyn EventSink>>,
}

impl SpiderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config<O>(mut self, config: O) -> Self
    where
        O: Into<Option<SpiderConfig>>,
    {
        self.config = config.into();
        self
    }

    pub fn fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: Fetcher + 'static,
    {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: EventSink + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validates the config and builds the spider.
    pub fn build(self) -> Result<Spider, Error> {
        let config = self.config.ok_or(Error::MissingConfig)?;
        config.validate()?;

        let fetcher: Box<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpFetcher::from_config(&config)?),
        };
        let sink: Box<dyn EventSink> = match self.sink {
            Some(sink) => sink,
            None => Box::new(LogSink),
        };

        Ok(Spider {
            config,
            fetcher,
            sink,
            cancel: CancelHandle::new(),
        })
    }
}
