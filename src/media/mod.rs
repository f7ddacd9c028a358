//! Media module for thread representation and scraping.

pub mod item;
pub mod parser;

pub use item::{ImageLink, Thread};
pub use parser::{parse_thread, resolve_subject, ScrapedThread};
