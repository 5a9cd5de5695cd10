use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::{utils::format_duration, SpiderConfig};

/// Read-only snapshot of a spider's limits, durations rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpiderStats {
    pub max_depth: usize,
    pub max_pages: usize,
    pub delay: String,
    pub user_agent: String,
    pub timeout: String,
    pub concurrency: usize,
}

impl SpiderStats {
    pub fn to_map(&self) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("max_depth", json!(self.max_depth)),
            ("max_pages", json!(self.max_pages)),
            ("delay", json!(self.delay)),
            ("user_agent", json!(self.user_agent)),
            ("timeout", json!(self.timeout)),
            ("concurrency", json!(self.concurrency)),
        ])
    }
}

impl From<&SpiderConfig> for SpiderStats {
    fn from(config: &SpiderConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_pages: config.max_pages,
            delay: format_duration(config.request_delay),
            user_agent: config.user_agent.clone(),
            timeout: format_duration(config.request_timeout),
            concurrency: config.concurrency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_map_keys() {
        let stats = SpiderStats::from(&SpiderConfig::new());
        let map = stats.to_map();

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(
            keys,
            ["concurrency", "delay", "max_depth", "max_pages", "timeout", "user_agent"]
        );
        assert_eq!(map["max_depth"], json!(3));
        assert_eq!(map["max_pages"], json!(100));
        assert_eq!(map["delay"], json!("1s"));
        assert_eq!(map["user_agent"], json!("DirectWebSpider/1.0"));
        assert_eq!(map["timeout"], json!("30s"));
        assert_eq!(map["concurrency"], json!(5));
    }
}
