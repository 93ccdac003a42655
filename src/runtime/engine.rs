use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;
use crate::error::{CrawlError, Result};
use crate::fetch::Fetcher;
use crate::fetch::http::HttpFetcher;
use crate::runtime::config::CrawlerConfig;
use crate::runtime::context::Context;
use crate::runtime::node::Node;
use crate::runtime::task::Task;

/// Drives a concurrent traversal of the resource graph.
///
/// Every claimed path gets its own tokio task. A task fetches its node,
/// records the message, claims the successors and spawns their tasks, and
/// only then leaves the in-flight count. The traversal is complete the moment
/// that count reaches zero.
#[derive(Debug, Clone)]
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new_with_config(fetcher, CrawlerConfig::default())
    }

    pub fn new_with_config(fetcher: Arc<dyn Fetcher>, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Crawler backed by an [`HttpFetcher`] rooted at `base_url`.
    pub fn http(base_url: &str) -> Result<Self> {
        Self::http_with_config(base_url, CrawlerConfig::default())
    }

    pub fn http_with_config(base_url: &str, config: CrawlerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::with_config(base_url, &config)?;
        Ok(Self::new_with_config(Arc::new(fetcher), config))
    }

    /// Visits everything reachable from `start_path` and returns the collected
    /// messages in ascending order.
    ///
    /// Fails with [`CrawlError::DeadlineExceeded`] if the graph is not exhausted
    /// within `deadline`; whatever was collected until then is discarded.
    pub async fn crawl(&self, start_path: &str, deadline: Duration) -> Result<Vec<String>> {
        self.crawl_until(start_path, deadline, std::future::pending::<()>()).await
    }

    /// Like [`Crawler::crawl`], but gives up with [`CrawlError::Interrupted`]
    /// as soon as `shutdown` resolves.
    pub async fn crawl_until<F>(&self, start_path: &str, deadline: Duration, shutdown: F) -> Result<Vec<String>>
    where
        F: Future<Output = ()>,
    {
        let crawl_id = Uuid::new_v4();
        let span = info_span!("crawl", %crawl_id);
        self.run(crawl_id, start_path, deadline, shutdown)
            .instrument(span)
            .await
    }

    async fn run<F>(&self, crawl_id: Uuid, start_path: &str, deadline: Duration, shutdown: F) -> Result<Vec<String>>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let deadline_at = started.checked_add(deadline).unwrap_or_else(far_future);
        let ctx = Arc::new(Context::new(crawl_id, self.fetcher.clone()));

        info!(start_path, ?deadline, "Traversal started");

        // seeding
        if ctx.visited.claim(start_path) {
            schedule(&ctx, Task::root(start_path));
        } else {
            warn!(start_path, "Start path already claimed, nothing to traverse");
        }

        // running
        tokio::pin!(shutdown);
        loop {
            if ctx.in_flight() == 0 {
                break;
            }

            let now = Instant::now();
            if now >= deadline_at {
                error!(
                    ?deadline,
                    in_flight = ctx.in_flight(),
                    visited = ctx.visited.len(),
                    "Traversal deadline exceeded, discarding partial results"
                );
                return Err(CrawlError::DeadlineExceeded(deadline));
            }

            let wake_at = now
                .checked_add(self.config.poll_interval)
                .map_or(deadline_at, |at| at.min(deadline_at));
            tokio::select! {
                _ = ctx.idle() => {}
                _ = sleep_until(wake_at) => {}
                _ = &mut shutdown => {
                    warn!(in_flight = ctx.in_flight(), "Traversal interrupted");
                    return Err(CrawlError::Interrupted);
                }
            }
        }

        // completed
        let messages = ctx.messages.drain_sorted();
        info!(
            visited = ctx.visited.len(),
            messages = messages.len(),
            elapsed = ?started.elapsed(),
            "Traversal completed"
        );
        Ok(messages)
    }
}

/// Stand-in for deadlines too large to represent as an `Instant`.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400 * 365 * 30)
}

/// Counts `task` as in flight and spawns it.
/// The count is taken before the spawn, so a parent never finishes ahead of it.
fn schedule(ctx: &Arc<Context>, task: Task) {
    let guard = ctx.enter();
    let ctx = Arc::clone(ctx);
    tokio::spawn(
        async move {
            let _guard = guard;
            visit(&ctx, task).await;
        }
        .in_current_span(),
    );
}

async fn visit(ctx: &Arc<Context>, task: Task) {
    debug!(crawl_id = %ctx.crawl_id, path = %task.path, depth = task.depth, "Visiting");

    let Some(node) = ctx.fetcher.fetch(&task.path).await else {
        return;
    };

    if let Some(message) = node.contribution() {
        ctx.messages.append(message);
    }

    let Node { successors, .. } = node;
    for next in successors {
        if ctx.visited.claim(&next) {
            schedule(ctx, task.child(next));
        }
    }
}
