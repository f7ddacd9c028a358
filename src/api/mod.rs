//! Imageboard API module.
//!
//! This module provides the shared HTTP client and thread page fetching.

pub mod client;

pub use client::{ChanClient, DEFAULT_USER_AGENT};
