use std::time::Duration;

/// Fixed knobs of a traversal. `CrawlerConfig::default()` is what the CLI runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// Upper bound for a single GET, body included.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after a transport failure. Non-200 statuses are never retried.
    pub max_retries: u32,
    /// How often the waiter re-checks the deadline while tasks are in flight.
    pub poll_interval: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(13),
            connect_timeout: Duration::from_secs(5),
            max_retries: 2,
            poll_interval: Duration::from_millis(250),
        }
    }
}
