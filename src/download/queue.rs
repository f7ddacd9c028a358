//! Shared work queue for download workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::media::ImageLink;

/// One claimed unit of work: an attachment and its position in the thread.
#[derive(Debug, Clone, Copy)]
pub struct WorkItem<'a> {
    /// Zero-based position in scrape order.
    pub index: usize,
    pub link: &'a ImageLink,
}

/// Fixed list of attachments handed out to workers exactly once each.
///
/// The list itself is read-only; the only shared mutable state is the claim
/// cursor, so claiming is a single atomic increment.
#[derive(Debug)]
pub struct WorkQueue {
    links: Arc<[ImageLink]>,
    cursor: AtomicUsize,
}

impl WorkQueue {
    pub fn new(links: impl Into<Arc<[ImageLink]>>) -> Self {
        Self {
            links: links.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claim the next unclaimed item, or `None` once the queue is drained.
    pub fn claim_next(&self) -> Option<WorkItem<'_>> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.links.get(index).map(|link| WorkItem { index, link })
    }

    /// Total number of items, claimed or not.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of items not yet claimed.
    pub fn remaining(&self) -> usize {
        self.links
            .len()
            .saturating_sub(self.cursor.load(Ordering::Relaxed))
    }
}
