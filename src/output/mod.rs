//! Output module for console output and progress lines.
//!
//! Provides:
//! - Colored console output
//! - Per-attachment progress lines
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use self::console::{print_banner, print_error, print_info, print_thread_summary, print_warning};
pub use progress::{format_progress_line, ProgressLine};
pub use stats::{format_bytes, print_run_stats};
