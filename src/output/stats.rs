//! Statistics reporting.

use console::style;

use crate::download::RunSummary;

/// Print statistics for a finished run.
pub fn print_run_stats(summary: &RunSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    println!("  Attachments:  {}", summary.total);
    println!(
        "  Downloaded:   {} ({})",
        style(summary.written).green(),
        format_bytes(summary.bytes)
    );
    println!("  Skipped:      {} (already on disk)", style(summary.skipped).yellow());
    if summary.failed() > 0 {
        println!(
            "  Failed:       {} ({} HTTP, {} I/O)",
            style(summary.failed()).red(),
            summary.failed_http,
            summary.failed_io
        );
    }
    if summary.not_attempted() > 0 {
        println!("  Not reached:  {}", summary.not_attempted());
    }
    if summary.rate_limited > 0 {
        println!("  Rate limited: {} time(s)", summary.rate_limited);
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
