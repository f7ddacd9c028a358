//! chan-downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use chan_downloader::{
    api::ChanClient,
    cli::Args,
    config::{parse_thread_url, thread_path, validate_config, Config},
    download::{Downloader, WorkerOptions},
    error::{exit_codes, Error, Result},
    fs::{ensure_dir, get_thread_folder},
    media::parse_thread,
    output::{
        print_banner, print_error, print_info, print_run_stats, print_thread_summary,
        print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::InvalidThreadUrl(_)
                | Error::UrlParse(_)
                | Error::Scrape(_)
                | Error::ThreadStatus(_)
                | Error::Http(_) => ExitCode::from(exit_codes::THREAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let thread_url = parse_thread_url(&args.url).map_err(|e| {
        tracing::error!("Provided URL is invalid.");
        e
    })?;
    match thread_path(&thread_url) {
        Some((board, id)) => print_info(&format!("Fetching thread /{}/{}", board, id)),
        None => print_info(&format!("Fetching {}", thread_url)),
    }

    let client = ChanClient::new(&config.http.user_agent)?;
    let html = client.fetch_thread_html(&thread_url).await?;

    let thread = parse_thread(&html)?.into_thread(config.options.subject.as_deref());

    let download_folder = get_thread_folder(
        &config.download_directory(),
        &thread,
        config.options.use_thread_names,
    )?;
    ensure_dir(&download_folder).await?;
    print_info(&format!("Download folder: {}", download_folder.display()));

    let downloader = Downloader::new(client.http())
        .with_workers(config.thread_count())
        .with_options(WorkerOptions {
            counter: config.options.counter,
            date: config.options.date,
            original_filename: config.options.original_filename,
        });
    print_thread_summary(
        &thread.board,
        &thread.subject,
        thread.images.len(),
        downloader.workers(),
    );

    let summary = downloader
        .download_thread(&thread, &download_folder)
        .await;

    print_run_stats(&summary);

    Ok(())
}
