//! Download worker loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::download::fetcher::{FetchError, Fetcher};
use crate::download::queue::{WorkItem, WorkQueue};
use crate::download::state::{DownloadEvent, DownloadOutcome, DownloadStats, EventSink};
use crate::error::Result;
use crate::fs::output_filename;
use crate::output::{format_progress_line, ProgressLine};

/// Flags that shape naming and progress output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Show a `[n / total]` counter.
    pub counter: bool,
    /// Show the date next to the time.
    pub date: bool,
    /// Save under the sanitized original filename instead of the id.
    pub original_filename: bool,
}

/// State shared by every worker of one run.
#[derive(Debug)]
pub struct WorkerContext {
    pub board: String,
    pub thread_id: String,
    pub destination: PathBuf,
    pub options: WorkerOptions,
    pub fetcher: Fetcher,
    pub stats: DownloadStats,
    pub events: EventSink,
}

/// Why a worker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// The queue ran dry.
    Drained,
    /// The worker found an existing output file and stopped.
    FoundExisting,
}

/// Drain the queue until it is empty or an output file already exists.
///
/// An existing file stops this worker entirely, leaving the rest of the
/// queue to the other workers. Fetch and write failures only end the
/// current item.
pub async fn run_worker(
    worker_id: usize,
    queue: Arc<WorkQueue>,
    ctx: Arc<WorkerContext>,
) -> WorkerExit {
    tracing::debug!("Worker {} started", worker_id);

    while let Some(item) = queue.claim_next() {
        let outcome = process_item(&ctx, item, queue.len()).await;
        let stop = outcome == DownloadOutcome::SkippedExists;

        ctx.stats.record(&outcome);
        ctx.events.emit(DownloadEvent::Finished {
            index: item.index,
            id: item.link.id.clone(),
            outcome,
        });

        if stop {
            tracing::debug!("Worker {} stopping after existing file", worker_id);
            return WorkerExit::FoundExisting;
        }
    }

    tracing::debug!("Worker {} drained the queue", worker_id);
    WorkerExit::Drained
}

async fn process_item(ctx: &WorkerContext, item: WorkItem<'_>, total: usize) -> DownloadOutcome {
    let link = item.link;
    let filename = output_filename(link, ctx.options.original_filename);
    let item_path = link.display_path(&ctx.board, &ctx.thread_id);

    ctx.events.emit(DownloadEvent::Started {
        index: item.index,
        id: link.id.clone(),
    });

    let line = ProgressLine {
        show_date: ctx.options.date,
        counter: ctx.options.counter.then_some((item.index, total)),
        path: &item_path,
        renamed_to: ctx.options.original_filename.then_some(filename.as_str()),
    };
    tracing::info!("{}", format_progress_line(&line, &chrono::Local::now()));

    let output_path = ctx.destination.join(&filename);

    if output_path.exists() {
        tracing::info!("File exists, skipping");
        return DownloadOutcome::SkippedExists;
    }

    let response = ctx
        .fetcher
        .fetch(&link.url, |wait| {
            ctx.stats.record_rate_limit();
            ctx.events.emit(DownloadEvent::RateLimited {
                index: item.index,
                id: link.id.clone(),
                wait,
            });
            tracing::info!(
                "HTTP 429 received for {}, waiting for {}s before retrying...",
                item_path,
                wait.as_secs_f64()
            );
        })
        .await;

    let response = match response {
        Ok(response) => response,
        Err(FetchError::Status(status)) => {
            tracing::warn!(
                "Could not download {}, server returned HTTP {}",
                item_path,
                status
            );
            return DownloadOutcome::FailedHttp(status);
        }
        Err(FetchError::Transport(e)) => {
            tracing::error!("An error occurred while fetching image {}: {}", item_path, e);
            return DownloadOutcome::FailedIo(e.to_string());
        }
    };

    match write_response(response, &output_path).await {
        Ok(bytes) => {
            tracing::debug!("Wrote {} bytes to {}", bytes, output_path.display());
            DownloadOutcome::Written { bytes }
        }
        Err(e) => {
            tracing::error!("An error occurred while fetching image {}: {}", item_path, e);
            // Drop the partial file so the next run does not skip it.
            if let Err(remove_err) = tokio::fs::remove_file(&output_path).await {
                tracing::debug!(
                    "Could not remove partial file {}: {}",
                    output_path.display(),
                    remove_err
                );
            }
            DownloadOutcome::FailedIo(e.to_string())
        }
    }
}

/// Stream a response body to `path` chunk by chunk.
async fn write_response(response: Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
