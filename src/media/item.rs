//! Thread and attachment representation.

/// A single attachment referenced by a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink {
    /// Remote-assigned identifier, unique within a thread.
    pub id: String,

    /// Fully-qualified download URL.
    pub url: String,

    /// Filename as advertised by the thread page. Not filesystem-safe.
    pub original_filename: String,
}

impl ImageLink {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        original_filename: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            original_filename: original_filename.into(),
        }
    }

    /// File extension taken from the URL, including the leading dot.
    ///
    /// Everything after the last `.` of the URL is used, so a URL without a
    /// dot yields the whole URL.
    pub fn extension(&self) -> String {
        let ext = match self.url.rfind('.') {
            Some(pos) => &self.url[pos + 1..],
            None => self.url.as_str(),
        };
        format!(".{}", ext)
    }

    /// Display path used in log lines (`board/thread/id.ext`).
    pub fn display_path(&self, board: &str, thread_id: &str) -> String {
        format!("{}/{}/{}{}", board, thread_id, self.id, self.extension())
    }
}

/// A scraped thread.
#[derive(Debug, Clone, Default)]
pub struct Thread {
    pub board: String,
    pub id: String,
    pub subject: String,
    pub images: Vec<ImageLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_url() {
        let link = ImageLink::new("123456", "https://i.4cdn.org/g/123456.jpg", "funny pic.jpg");
        assert_eq!(link.extension(), ".jpg");

        let link = ImageLink::new("1", "https://i.4cdn.org/wsg/1.webm", "clip.webm");
        assert_eq!(link.extension(), ".webm");
    }

    #[test]
    fn test_display_path() {
        let link = ImageLink::new("123456", "https://i.4cdn.org/g/123456.png", "x.png");
        assert_eq!(link.display_path("g", "999"), "g/999/123456.png");
    }
}
