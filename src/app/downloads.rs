//! Staggered image download scheduling with generation-based cancellation.
//!
//! Opening every image URL of an item at once trips popup/rate limits, so
//! each URL is scheduled on its own task with a fixed per-index stagger.
//! Cancellation is a generation bump: pending tasks capture the generation
//! current when they were scheduled and fire only if it still matches once
//! their delay elapses. Already-fired downloads are unaffected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Destination for a scheduled download, typically a browser/OS opener.
pub trait DownloadSink: Send + Sync {
    fn open(&self, url: &str);
}

/// Schedules one download task per URL, staggered by a fixed interval.
pub struct DownloadScheduler<S: DownloadSink + 'static> {
    sink: Arc<S>,
    stagger: Duration,
    generation: Arc<AtomicU64>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<S: DownloadSink + 'static> DownloadScheduler<S> {
    #[must_use]
    pub fn new(sink: Arc<S>, stagger: Duration) -> Self {
        Self {
            sink,
            stagger,
            generation: Arc::new(AtomicU64::new(0)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Schedules `urls` for download, the i-th after `i * stagger`.
    ///
    /// Returns immediately; the downloads run on background tasks.
    pub fn schedule(&self, urls: &[String]) {
        let scheduled_generation = self.generation.load(Ordering::SeqCst);
        tracing::debug!(count = urls.len(), "scheduling downloads");

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        for (index, url) in urls.iter().enumerate() {
            let sink = Arc::clone(&self.sink);
            let generation = Arc::clone(&self.generation);
            let delay = self.stagger * index as u32;
            let url = url.clone();
            tasks.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if generation.load(Ordering::SeqCst) == scheduled_generation {
                    sink.open(&url);
                } else {
                    tracing::debug!(url = %url, "download cancelled before firing");
                }
            }));
        }
    }

    /// Cancels all downloads whose delay has not yet elapsed.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Waits for every scheduled task to settle, fired or cancelled.
    pub async fn drain(&self) {
        let tasks = std::mem::take(
            &mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for task in tasks {
            // A panicking sink only loses its own download.
            let _ = task.await;
        }
    }
}
