use crate::report::TradeReport;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

type ContentKey = [u8; 32];

/// Remembers reports by the SHA-256 digest of the export they were built from,
/// so re-submitting the same file skips the recomputation.
///
/// A cache must only be shared by callers using the same engine settings, since
/// the key covers the uploaded bytes and nothing else. When full, the oldest
/// entry is evicted first.
#[derive(Debug)]
pub struct ReportCache {
    capacity: usize,
    entries: HashMap<ContentKey, Arc<TradeReport>>,
    order: VecDeque<ContentKey>,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, content: &[u8]) -> Option<Arc<TradeReport>> {
        let report = self.entries.get(&content_key(content)).cloned();
        if report.is_some() {
            tracing::debug!(bytes = content.len(), "Report cache hit.");
        }
        report
    }

    /// Stores the report built from `content` and returns the shared handle.
    /// If an identical upload was stored in the meantime, that report is kept.
    pub fn insert(&mut self, content: &[u8], report: TradeReport) -> Arc<TradeReport> {
        let key = content_key(content);
        if let Some(existing) = self.entries.get(&key) {
            return Arc::clone(existing);
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        let report = Arc::new(report);
        self.entries.insert(key, Arc::clone(&report));
        self.order.push_back(key);
        report
    }
}

fn content_key(content: &[u8]) -> ContentKey {
    Sha256::digest(content).into()
}
