//! Worker pool coordination.

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::DEFAULT_THREAD_COUNT;
use crate::download::fetcher::{Fetcher, RetryPolicy};
use crate::download::queue::WorkQueue;
use crate::download::state::{DownloadEvent, DownloadStats, EventSink, RunSummary};
use crate::download::worker::{run_worker, WorkerContext, WorkerExit, WorkerOptions};
use crate::media::Thread;

/// Downloads every attachment of a thread with a fixed pool of workers.
///
/// All workers share one HTTP client and one work queue.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    policy: RetryPolicy,
    options: WorkerOptions,
    workers: usize,
    events: EventSink,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
            options: WorkerOptions::default(),
            workers: DEFAULT_THREAD_COUNT,
            events: EventSink::default(),
        }
    }

    /// Number of concurrent workers. Values below one are raised to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_options(mut self, options: WorkerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Forward every [`DownloadEvent`] to `sender`.
    pub fn with_events(mut self, sender: UnboundedSender<DownloadEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Download all attachments of `thread` into `destination`.
    ///
    /// The directory must already exist. Individual failures are logged and
    /// counted, never returned; the run always completes.
    pub async fn download_thread(&self, thread: &Thread, destination: &Path) -> RunSummary {
        let queue = Arc::new(WorkQueue::new(thread.images.clone()));
        let total = queue.len();

        let ctx = Arc::new(WorkerContext {
            board: thread.board.clone(),
            thread_id: thread.id.clone(),
            destination: destination.to_path_buf(),
            options: self.options,
            fetcher: Fetcher::new(self.client.clone(), self.policy),
            stats: DownloadStats::default(),
            events: self.events.clone(),
        });

        tracing::debug!(
            "Starting {} workers for {} attachments of {}/{}",
            self.workers,
            total,
            thread.board,
            thread.id
        );

        let handles: Vec<_> = (0..self.workers)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&queue),
                    Arc::clone(&ctx),
                ))
            })
            .collect();

        let mut stopped_early = 0;
        for (worker_id, result) in join_all(handles).await.into_iter().enumerate() {
            match result {
                Ok(WorkerExit::Drained) => {}
                Ok(WorkerExit::FoundExisting) => stopped_early += 1,
                Err(e) => tracing::error!("Download worker {} crashed: {}", worker_id, e),
            }
        }

        if stopped_early > 0 && queue.remaining() > 0 {
            tracing::warn!(
                "{} worker(s) stopped on existing files, {} attachment(s) left unprocessed",
                stopped_early,
                queue.remaining()
            );
        }

        let summary = ctx.stats.summary(total);
        tracing::info!("Download complete");
        self.events.emit(DownloadEvent::Complete(summary));
        summary
    }
}
