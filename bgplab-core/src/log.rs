//! Bounded output log.
//!
//! Append-only sink for operator-visible messages: command echoes, step
//! descriptions, service replies, and errors. Capacity is fixed at
//! construction; once full, the oldest entry is evicted first (strict
//! FIFO, not LRU).

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of retained entries, matching the original frontend.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Message severity, rendered as a per-entry style by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Command,
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Command => "command",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

/// A single timestamped log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub text: String,
}

impl OutputEntry {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            text: text.into(),
        }
    }
}

/// Ordered message history, newest appended last.
#[derive(Debug, Clone)]
pub struct OutputLog {
    entries: VecDeque<OutputEntry>,
    capacity: usize,
}

impl OutputLog {
    /// Creates a log retaining at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest entries beyond capacity.
    /// Returns a reference to the appended entry.
    pub fn push(&mut self, entry: OutputEntry) -> &OutputEntry {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.entries.back().expect("just pushed")
    }

    /// Drops every entry. Used by reset before the placeholder is written.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.back()
    }
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(text: &str) -> OutputEntry {
        OutputEntry::new(Severity::Info, text)
    }

    #[test]
    fn appends_in_order() {
        let mut log = OutputLog::with_capacity(10);
        log.push(entry("first"));
        log.push(entry("second"));
        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut log = OutputLog::with_capacity(3);
        for i in 0..5 {
            log.push(entry(&format!("msg-{i}")));
        }
        assert_eq!(log.len(), 3);
        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["msg-2", "msg-3", "msg-4"]);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut log = OutputLog::with_capacity(0);
        log.push(entry("only"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = OutputLog::with_capacity(5);
        log.push(entry("a"));
        log.push(entry("b"));
        log.clear();
        assert!(log.is_empty());
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity_and_keeps_newest(
            capacity in 1usize..64,
            count in 0usize..200,
        ) {
            let mut log = OutputLog::with_capacity(capacity);
            for i in 0..count {
                log.push(entry(&format!("{i}")));
            }
            prop_assert!(log.len() <= capacity);
            if count > 0 {
                prop_assert_eq!(log.last().unwrap().text.clone(), format!("{}", count - 1));
            }
            // Retained window is contiguous and ends at the newest entry.
            let first_kept = count.saturating_sub(capacity);
            let texts: Vec<String> = log.iter().map(|e| e.text.clone()).collect();
            let expected: Vec<String> = (first_kept..count).map(|i| format!("{i}")).collect();
            prop_assert_eq!(texts, expected);
        }
    }
}
