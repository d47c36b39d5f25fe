//! Session-scoped history of completed enhancements.

use crate::result::EnhancementResult;

/// Most-recent-first list of results, unique on `filename`.
///
/// Never persisted and never bounded; it lives as long as the session.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<EnhancementResult>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any entry with the same `filename`, then put `result` first.
    pub fn insert(&mut self, result: EnhancementResult) {
        self.entries.retain(|entry| entry.filename != result.filename);
        self.entries.insert(0, result);
    }

    pub fn find_by_key(&self, filename: &str) -> Option<&EnhancementResult> {
        self.entries.iter().find(|entry| entry.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnhancementResult> {
        self.entries.iter()
    }

    /// Identity keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.filename.as_str())
    }
}
