//! Integration tests for the download engine.
//!
//! These tests run the worker pool against mock HTTP servers.

use std::path::Path;
use std::time::Duration;

use chan_downloader::download::{
    DownloadEvent, DownloadOutcome, Downloader, RetryPolicy, RunSummary, WorkerOptions,
};
use chan_downloader::{ImageLink, Thread};
use reqwest::Client;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a file endpoint at `/g/<id>.jpg`.
async fn mount_file(server: &MockServer, id: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/g/{}.jpg", id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

fn link(server: &MockServer, id: &str, original: &str) -> ImageLink {
    ImageLink::new(id, format!("{}/g/{}.jpg", server.uri(), id), original)
}

fn thread(images: Vec<ImageLink>) -> Thread {
    Thread {
        board: "g".to_string(),
        id: "98765432".to_string(),
        subject: "Test thread".to_string(),
        images,
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        min_wait: Duration::from_millis(10),
        max_wait: Duration::from_millis(50),
        default_wait: Duration::from_millis(20),
    }
}

fn drain(rx: &mut UnboundedReceiver<DownloadEvent>) -> Vec<DownloadEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn finished(events: &[DownloadEvent]) -> Vec<(String, DownloadOutcome)> {
    let mut out: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            DownloadEvent::Finished { id, outcome, .. } => Some((id.clone(), outcome.clone())),
            _ => None,
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn completions(events: &[DownloadEvent]) -> Vec<RunSummary> {
    events
        .iter()
        .filter_map(|event| match event {
            DownloadEvent::Complete(summary) => Some(*summary),
            _ => None,
        })
        .collect()
}

fn read(dir: &Path, name: &str) -> Vec<u8> {
    std::fs::read(dir.join(name)).expect("file should exist")
}

#[tokio::test]
async fn test_downloads_all_files_with_two_workers() {
    let server = MockServer::start().await;
    mount_file(&server, "101", b"first image").await;
    mount_file(&server, "102", b"second image").await;
    mount_file(&server, "103", b"third image").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let images = vec![
        link(&server, "101", "a.jpg"),
        link(&server, "102", "b.jpg"),
        link(&server, "103", "c.jpg"),
    ];

    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(2)
        .with_events(tx)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert_eq!(read(temp_dir.path(), "101.jpg"), b"first image");
    assert_eq!(read(temp_dir.path(), "102.jpg"), b"second image");
    assert_eq!(read(temp_dir.path(), "103.jpg"), b"third image");

    let events = drain(&mut rx);
    let written = finished(&events)
        .into_iter()
        .filter(|(_, outcome)| matches!(outcome, DownloadOutcome::Written { .. }))
        .count();
    assert_eq!(written, 3);

    let completions = completions(&events);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0], summary);
    assert!(matches!(events.last(), Some(DownloadEvent::Complete(_))));

    assert_eq!(summary.total, 3);
    assert_eq!(summary.written, 3);
    assert_eq!(
        summary.bytes,
        (b"first image".len() + b"second image".len() + b"third image".len()) as u64
    );
    assert_eq!(summary.failed(), 0);
}

#[tokio::test]
async fn test_not_found_item_does_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_file(&server, "201", b"ok one").await;
    mount_file(&server, "203", b"ok three").await;
    Mock::given(method("GET"))
        .and(path("/g/202.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let images = vec![
        link(&server, "201", "a.jpg"),
        link(&server, "202", "b.jpg"),
        link(&server, "203", "c.jpg"),
    ];

    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(1)
        .with_events(tx)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert!(!temp_dir.path().join("202.jpg").exists());
    assert_eq!(read(temp_dir.path(), "201.jpg"), b"ok one");
    assert_eq!(read(temp_dir.path(), "203.jpg"), b"ok three");

    let events = drain(&mut rx);
    let outcomes = finished(&events);
    assert_eq!(
        outcomes[1],
        (
            "202".to_string(),
            DownloadOutcome::FailedHttp(reqwest::StatusCode::NOT_FOUND)
        )
    );
    assert_eq!(completions(&events).len(), 1);

    assert_eq!(summary.written, 2);
    assert_eq!(summary.failed_http, 1);
}

#[tokio::test]
async fn test_existing_file_stops_the_worker() {
    let server = MockServer::start().await;
    for id in ["301", "302", "303"] {
        Mock::given(method("GET"))
            .and(path(format!("/g/{}.jpg", id)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .expect(0)
            .mount(&server)
            .await;
    }

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    for id in ["301", "302", "303"] {
        std::fs::write(temp_dir.path().join(format!("{}.jpg", id)), b"old").unwrap();
    }
    let images = vec![
        link(&server, "301", "a.jpg"),
        link(&server, "302", "b.jpg"),
        link(&server, "303", "c.jpg"),
    ];

    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(2)
        .with_events(tx)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    // Each worker stops at its first existing file, so with two workers the
    // third item is never claimed.
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.not_attempted(), 1);
    assert_eq!(read(temp_dir.path(), "301.jpg"), b"old");

    let events = drain(&mut rx);
    let outcomes = finished(&events);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|(_, outcome)| *outcome == DownloadOutcome::SkippedExists));
    assert_eq!(completions(&events).len(), 1);
}

#[tokio::test]
async fn test_existing_file_leaves_later_items_with_single_worker() {
    let server = MockServer::start().await;
    mount_file(&server, "402", b"never fetched").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(temp_dir.path().join("401.jpg"), b"old").unwrap();
    let images = vec![link(&server, "401", "a.jpg"), link(&server, "402", "b.jpg")];

    let summary = Downloader::new(Client::new())
        .with_workers(1)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.written, 0);
    assert!(!temp_dir.path().join("402.jpg").exists());
}

#[tokio::test]
async fn test_rate_limited_item_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/g/501.jpg"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_file(&server, "501", b"finally").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(1)
        .with_retry_policy(fast_policy())
        .with_events(tx)
        .download_thread(&thread(vec![link(&server, "501", "a.jpg")]), temp_dir.path())
        .await;

    assert_eq!(read(temp_dir.path(), "501.jpg"), b"finally");
    assert_eq!(summary.written, 1);
    assert_eq!(summary.rate_limited, 2);

    let waits: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            DownloadEvent::RateLimited { wait, .. } => Some(wait),
            _ => None,
        })
        .collect();
    assert_eq!(waits, vec![Duration::from_millis(10); 2]);
}

#[tokio::test]
async fn test_rate_limit_without_header_uses_default_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/g/601.jpg"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_file(&server, "601", b"body").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let (tx, mut rx) = mpsc::unbounded_channel();
    Downloader::new(Client::new())
        .with_retry_policy(fast_policy())
        .with_events(tx)
        .download_thread(&thread(vec![link(&server, "601", "a.jpg")]), temp_dir.path())
        .await;

    let rate_limited: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, DownloadEvent::RateLimited { .. }))
        .collect();
    assert_eq!(
        rate_limited,
        vec![DownloadEvent::RateLimited {
            index: 0,
            id: "601".to_string(),
            wait: Duration::from_millis(20),
        }]
    );
    assert_eq!(read(temp_dir.path(), "601.jpg"), b"body");
}

#[tokio::test]
async fn test_original_filename_mode_sanitizes_names() {
    let server = MockServer::start().await;
    mount_file(&server, "701", b"colon").await;
    mount_file(&server, "702", b"space").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let images = vec![
        link(&server, "701", "foo:bar.png"),
        link(&server, "702", "funny pic.jpg"),
    ];

    let summary = Downloader::new(Client::new())
        .with_options(WorkerOptions {
            counter: true,
            date: true,
            original_filename: true,
        })
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert_eq!(summary.written, 2);
    assert_eq!(read(temp_dir.path(), "foo_bar.png"), b"colon");
    assert_eq!(read(temp_dir.path(), "funny pic.jpg"), b"space");
    assert!(!temp_dir.path().join("701.jpg").exists());
}

#[tokio::test]
async fn test_transport_error_is_per_item() {
    let server = MockServer::start().await;
    mount_file(&server, "802", b"reachable").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let images = vec![
        ImageLink::new("801", "http://127.0.0.1:1/g/801.jpg", "a.jpg"),
        link(&server, "802", "b.jpg"),
    ];

    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(1)
        .with_events(tx)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert_eq!(summary.failed_io, 1);
    assert_eq!(summary.written, 1);
    assert!(!temp_dir.path().join("801.jpg").exists());
    assert_eq!(read(temp_dir.path(), "802.jpg"), b"reachable");

    let outcomes = finished(&drain(&mut rx));
    assert!(matches!(outcomes[0].1, DownloadOutcome::FailedIo(_)));
}

/// Serve one response that promises more body bytes than it sends.
async fn spawn_truncating_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\npartial body")
            .await;
        let _ = socket.flush().await;
        // Dropping the socket cuts the body short.
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_truncated_body_removes_partial_file() {
    let base = spawn_truncating_server().await;
    let server = MockServer::start().await;
    mount_file(&server, "902", b"complete").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let images = vec![
        ImageLink::new("901", format!("{}/g/901.jpg", base), "a.jpg"),
        link(&server, "902", "b.jpg"),
    ];

    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(1)
        .with_events(tx)
        .download_thread(&thread(images), temp_dir.path())
        .await;

    assert!(!temp_dir.path().join("901.jpg").exists());
    assert_eq!(read(temp_dir.path(), "902.jpg"), b"complete");
    assert_eq!(summary.failed_io, 1);
    assert_eq!(summary.written, 1);

    let outcomes = finished(&drain(&mut rx));
    assert!(matches!(outcomes[0].1, DownloadOutcome::FailedIo(_)));
}

#[tokio::test]
async fn test_empty_thread_completes() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let summary = Downloader::new(Client::new())
        .with_workers(0)
        .with_events(tx)
        .download_thread(&thread(Vec::new()), temp_dir.path())
        .await;

    assert_eq!(summary, RunSummary::default());
    assert_eq!(completions(&drain(&mut rx)).len(), 1);
}
