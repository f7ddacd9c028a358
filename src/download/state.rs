//! Download outcomes, progress events and run statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::mpsc::UnboundedSender;

/// Result of processing a single attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was downloaded and written to disk.
    Written { bytes: u64 },
    /// A file already existed at the output path.
    SkippedExists,
    /// The server answered with a non-success status other than 429.
    FailedHttp(StatusCode),
    /// A transport or filesystem error occurred.
    FailedIo(String),
}

/// Structured progress event emitted by the download engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// A worker claimed an item and is about to process it.
    Started { index: usize, id: String },
    /// The server rate limited the item; the worker waits before retrying.
    RateLimited { index: usize, id: String, wait: Duration },
    /// Processing of an item ended.
    Finished {
        index: usize,
        id: String,
        outcome: DownloadOutcome,
    },
    /// All workers have finished.
    Complete(RunSummary),
}

/// Optional channel that receives every [`DownloadEvent`].
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<UnboundedSender<DownloadEvent>>,
}

impl EventSink {
    pub fn new(sender: UnboundedSender<DownloadEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Send an event. A closed or absent receiver is ignored.
    pub fn emit(&self, event: DownloadEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}

/// Counters shared by all workers of one run.
#[derive(Debug, Default)]
pub struct DownloadStats {
    written: AtomicU64,
    bytes: AtomicU64,
    skipped: AtomicU64,
    failed_http: AtomicU64,
    failed_io: AtomicU64,
    rate_limited: AtomicU64,
}

impl DownloadStats {
    /// Record the outcome of one item.
    pub fn record(&self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Written { bytes } => {
                self.written.fetch_add(1, Ordering::Relaxed);
                self.bytes.fetch_add(*bytes, Ordering::Relaxed);
            }
            DownloadOutcome::SkippedExists => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::FailedHttp(_) => {
                self.failed_http.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::FailedIo(_) => {
                self.failed_io.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record one 429 response.
    pub fn record_rate_limit(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of the counters.
    pub fn summary(&self, total: usize) -> RunSummary {
        RunSummary {
            total: total as u64,
            written: self.written.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed_http: self.failed_http.load(Ordering::Relaxed),
            failed_io: self.failed_io.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
        }
    }
}

/// Final statistics of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Attachments found in the thread.
    pub total: u64,
    pub written: u64,
    pub bytes: u64,
    pub skipped: u64,
    pub failed_http: u64,
    pub failed_io: u64,
    /// 429 responses received across all items.
    pub rate_limited: u64,
}

impl RunSummary {
    /// Total failed items.
    pub fn failed(&self) -> u64 {
        self.failed_http + self.failed_io
    }

    /// Items never processed because their worker stopped early.
    pub fn not_attempted(&self) -> u64 {
        self.total
            .saturating_sub(self.written + self.skipped + self.failed())
    }
}
