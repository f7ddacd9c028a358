//! Download module for thread attachments.
//!
//! This module provides:
//! - The shared work queue
//! - HTTP fetching with 429 backoff
//! - The per-worker download loop
//! - The worker pool coordinator
//! - Outcomes, progress events and run statistics

pub mod fetcher;
pub mod pool;
pub mod queue;
pub mod state;
pub mod worker;

pub use fetcher::{retry_delay, FetchError, Fetcher, RetryPolicy};
pub use pool::Downloader;
pub use queue::{WorkItem, WorkQueue};
pub use state::{DownloadEvent, DownloadOutcome, DownloadStats, EventSink, RunSummary};
pub use worker::{run_worker, WorkerContext, WorkerExit, WorkerOptions};
