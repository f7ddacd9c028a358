//! Progress line formatting.

use chrono::{DateTime, TimeZone};

/// Contents of one per-attachment progress line.
#[derive(Debug, Clone)]
pub struct ProgressLine<'a> {
    /// Prefix the time with the date.
    pub show_date: bool,
    /// `(index, total)` when the counter is enabled; `index` is zero-based.
    pub counter: Option<(usize, usize)>,
    /// `board/thread/id.ext`
    pub path: &'a str,
    /// Output filename, shown when saving under original names.
    pub renamed_to: Option<&'a str>,
}

/// Render a progress line such as `[12:00:01] [03 / 12] g/123/456.jpg -> cat.jpg`.
pub fn format_progress_line<Tz>(line: &ProgressLine<'_>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::from("[");
    if line.show_date {
        out.push_str(&now.format("%Y-%m-%d ").to_string());
    }
    out.push_str(&now.format("%H:%M:%S").to_string());
    out.push_str("] ");

    if let Some((index, total)) = line.counter {
        let total = total.to_string();
        out.push_str(&format!(
            "[{:0>width$} / {}] ",
            index + 1,
            total,
            width = total.len()
        ));
    }

    out.push_str(line.path);

    if let Some(name) = line.renamed_to {
        out.push_str(" -> ");
        out.push_str(name);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 1).unwrap()
    }

    #[test]
    fn test_minimal_line() {
        let line = ProgressLine {
            show_date: false,
            counter: None,
            path: "g/123/456.jpg",
            renamed_to: None,
        };
        assert_eq!(format_progress_line(&line, &noon()), "[12:00:01] g/123/456.jpg");
    }

    #[test]
    fn test_full_line() {
        let line = ProgressLine {
            show_date: true,
            counter: Some((2, 12)),
            path: "g/123/456.jpg",
            renamed_to: Some("cat.jpg"),
        };
        assert_eq!(
            format_progress_line(&line, &noon()),
            "[2024-03-09 12:00:01] [03 / 12] g/123/456.jpg -> cat.jpg"
        );
    }

    #[test]
    fn test_counter_padding_width() {
        let line = ProgressLine {
            show_date: false,
            counter: Some((99, 100)),
            path: "x",
            renamed_to: None,
        };
        assert_eq!(format_progress_line(&line, &noon()), "[12:00:01] [100 / 100] x");

        let line = ProgressLine {
            counter: Some((0, 5)),
            ..line
        };
        assert_eq!(format_progress_line(&line, &noon()), "[12:00:01] [1 / 5] x");
    }
}
