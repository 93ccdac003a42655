use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use uuid::Uuid;
use crate::fetch::Fetcher;
use crate::runtime::storage::{MessageStore, VisitedSet};

/// Shared state of a single traversal.
/// Lives behind an `Arc` for the duration of one `crawl` call and is never reused.
#[derive(Debug)]
pub struct Context {
    pub crawl_id: Uuid,
    pub fetcher: Arc<dyn Fetcher>,
    pub visited: VisitedSet,
    pub messages: MessageStore,
    in_flight: AtomicUsize,
    done: Notify,
}

impl Context {
    pub fn new(crawl_id: Uuid, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            crawl_id,
            fetcher,
            visited: VisitedSet::new(),
            messages: MessageStore::new(),
            in_flight: AtomicUsize::new(0),
            done: Notify::new(),
        }
    }

    /// Number of tasks scheduled but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Registers a task before it is spawned.
    /// The count drops again when the returned guard is dropped.
    pub fn enter(self: &Arc<Self>) -> TaskGuard {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        TaskGuard {
            ctx: Arc::clone(self),
        }
    }

    /// Resolves once the in-flight count has dropped to zero since the last wake-up.
    pub async fn idle(&self) {
        self.done.notified().await
    }

    fn leave(&self) {
        if self.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            // notify_one keeps a permit when nobody is waiting yet
            self.done.notify_one();
        }
    }
}

/// Keeps a task counted as in flight until dropped, including on panic or abort.
#[derive(Debug)]
pub struct TaskGuard {
    ctx: Arc<Context>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.ctx.leave();
    }
}
