//! Thread page scraping.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::media::item::{ImageLink, Thread};

static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="subject"(?: .+?=.+?)*>([^<]*?)</span>"#).unwrap()
});

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title(?: .+?=.+?)*>/\w+?/ - (.+?) - .+? - 4chan</title>").unwrap()
});

static CANONICAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<link rel="canonical" href="https?://boards\.4chan\.org/(.+?)/thread/(\d+)/(.+?)/?">"#,
    )
    .unwrap()
});

static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<a(?: title="(.+?\.(?:jpg|png|gif|webm))")? href="//(is?\.(?:4chan|4cdn)\.org/\w+?/(\d+?)\.(?:jpg|png|gif|webm))".+?>(.+?\.(?:jpg|png|gif|webm))</a>"#,
    )
    .unwrap()
});

/// Raw fields scraped from a thread page, before subject resolution.
#[derive(Debug, Clone)]
pub struct ScrapedThread {
    pub board: String,
    pub id: String,
    /// Text of the opening post's subject span (may be blank).
    pub subject: String,
    /// Subject part of the page title (may be blank).
    pub title: String,
    /// Slug segment of the canonical URL.
    pub slug: String,
    pub images: Vec<ImageLink>,
}

/// Scrape the board, thread id, subject candidates and attachments from a
/// thread page.
///
/// Fails if the subject span, the canonical link or the title is missing,
/// since the page is then not a thread page we understand.
pub fn parse_thread(html: &str) -> Result<ScrapedThread> {
    let subject = SUBJECT_PATTERN
        .captures(html)
        .ok_or(Error::Scrape("subject"))?;
    let canonical = CANONICAL_PATTERN
        .captures(html)
        .ok_or(Error::Scrape("canonical URL"))?;
    let title = TITLE_PATTERN.captures(html).ok_or(Error::Scrape("title"))?;

    Ok(ScrapedThread {
        board: canonical[1].to_string(),
        id: canonical[2].to_string(),
        subject: subject[1].to_string(),
        title: title[1].to_string(),
        slug: canonical[3].to_string(),
        images: extract_images(html),
    })
}

/// Extract attachment links in page order.
pub fn extract_images(html: &str) -> Vec<ImageLink> {
    IMAGE_PATTERN
        .captures_iter(html)
        .map(|caps| {
            let full_title = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let original_filename = if full_title.trim().is_empty() {
                &caps[4]
            } else {
                full_title
            };
            ImageLink::new(&caps[3], format!("https://{}", &caps[2]), original_filename)
        })
        .collect()
}

/// Pick the thread subject.
///
/// An explicit override wins. Otherwise the first non-blank of subject span,
/// page title and canonical slug is used, falling back to the thread id.
pub fn resolve_subject(scraped: &ScrapedThread, subject_override: Option<&str>) -> String {
    if let Some(subject) = subject_override {
        return subject.to_string();
    }

    [&scraped.subject, &scraped.title, &scraped.slug]
        .into_iter()
        .find(|candidate| !candidate.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| {
            tracing::info!("Could not infer thread subject, resulting to thread ID");
            scraped.id.clone()
        })
}

impl ScrapedThread {
    /// Turn the scraped fields into a [`Thread`] with a resolved subject.
    pub fn into_thread(self, subject_override: Option<&str>) -> Thread {
        let subject = resolve_subject(&self, subject_override);
        Thread {
            board: self.board,
            id: self.id,
            subject,
            images: self.images,
        }
    }
}
