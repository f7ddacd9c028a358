//! chan-downloader - download every attachment of an imageboard thread
//!
//! The thread page is scraped for its board, id, subject and attachment
//! links, then a fixed pool of workers downloads the attachments
//! concurrently into a destination folder.
//!
//! # Features
//!
//! - Exactly-once work distribution across any number of workers
//! - Streaming downloads straight to disk
//! - `429 Too Many Requests` backoff honouring `Retry-After`
//! - Naming by attachment id or by sanitized original filename
//! - Structured progress events alongside log output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chan_downloader::{ChanClient, Downloader, ImageLink, Thread};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChanClient::new("4chan-Downloader")?;
//!     let thread = Thread {
//!         board: "g".into(),
//!         id: "98765432".into(),
//!         subject: "Wallpapers".into(),
//!         images: vec![ImageLink::new(
//!             "1700000000001",
//!             "https://i.4cdn.org/g/1700000000001.png",
//!             "desk.png",
//!         )],
//!     };
//!
//!     let summary = Downloader::new(client.http())
//!         .with_workers(5)
//!         .download_thread(&thread, Path::new("downloads"))
//!         .await;
//!     println!("{} written", summary.written);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::ChanClient;
pub use config::Config;
pub use download::{DownloadEvent, DownloadOutcome, Downloader, RetryPolicy, RunSummary};
pub use error::{Error, Result};
pub use media::{ImageLink, Thread};
