//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     chan-downloader                                   ║
║     Download every attachment of a thread             ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print a summary of the thread about to be downloaded.
pub fn print_thread_summary(board: &str, subject: &str, attachments: usize, workers: usize) {
    println!();
    println!("{}", style("Thread:").bold());
    println!("  Board:       /{}/", board);
    println!("  Subject:     {}", subject);
    println!("  Attachments: {}", attachments);
    println!("  Workers:     {}", workers);
    println!();
}
