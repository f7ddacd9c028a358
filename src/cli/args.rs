//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Imageboard thread downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "chan-downloader",
    version,
    about = "Download every attachment of an imageboard thread",
    long_about = "Scrapes a 4chan thread page and downloads all of its images and videos\n\
                  concurrently, backing off whenever the server rate limits."
)]
pub struct Args {
    /// URL of the thread.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Show counter next to the image that has been downloaded.
    #[arg(short, long)]
    pub counter: bool,

    /// Show date next to the image that has been downloaded.
    #[arg(short, long)]
    pub date: bool,

    /// Use thread name instead of thread ID for the folder.
    #[arg(short = 'n', long = "use-names")]
    pub use_names: bool,

    /// Save original filenames.
    #[arg(short = 'f', long = "original-filename")]
    pub original_filename: bool,

    /// Number of concurrent threads used for downloading (default: 5).
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Directory to save images to.
    /// Defaults to <Downloads>/4Chan-Downloader; board and thread folders are added below it.
    #[arg(short, long = "output")]
    pub output: Option<PathBuf>,

    /// Sets the thread subject manually instead of inferring from the thread.
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Path to configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(threads) = self.threads {
            config.options.threads = threads;
        }

        if let Some(subject) = &self.subject {
            config.options.subject = Some(subject.clone());
        }

        // Boolean flags (only override if set)
        if self.counter {
            config.options.counter = true;
        }

        if self.date {
            config.options.date = true;
        }

        if self.use_names {
            config.options.use_thread_names = true;
        }

        if self.original_filename {
            config.options.original_filename = true;
        }
    }
}
