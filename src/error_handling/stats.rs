//! Fetch statistics tracking.
//!
//! This module provides thread-safe counters for failures and informational
//! events observed by a client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorCategory, InfoType};

/// Thread-safe fetch statistics tracker.
///
/// Tracks failures by category and informational events using atomic
/// counters. All counters are initialized to zero on creation.
pub struct FetchStats {
    successes: AtomicUsize,
    errors: HashMap<ErrorCategory, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for FetchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchStats")
            .field("successes", &self.successes())
            .field("errors", &self.total_errors())
            .field("info", &self.total_info())
            .finish()
    }
}

impl FetchStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for category in ErrorCategory::iter() {
            errors.insert(category, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        FetchStats {
            successes: AtomicUsize::new(0),
            errors,
            info,
        }
    }

    pub fn increment_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment an error counter.
    pub fn increment_error(&self, category: ErrorCategory) {
        if let Some(counter) = self.errors.get(&category) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                category
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map",
                info_type
            );
        }
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn get_error_count(&self, category: ErrorCategory) -> usize {
        self.errors
            .get(&category)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Logs a one-line summary of every non-zero counter.
    pub fn log_summary(&self) {
        let mut parts: Vec<String> = vec![format!("{} succeeded", self.successes())];
        for category in ErrorCategory::iter() {
            let count = self.get_error_count(category);
            if count > 0 {
                parts.push(format!("{category}: {count}"));
            }
        }
        for info_type in InfoType::iter() {
            let count = self.get_info_count(info_type);
            if count > 0 {
                parts.push(format!("{}: {count}", info_type.as_str()));
            }
        }
        log::info!("Fetch statistics: {}", parts.join(", "));
    }
}
