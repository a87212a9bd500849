//! Recording operator notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::relay::ports::OperatorNotifier;

/// Notifier that keeps every report in memory.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    reports: Arc<RwLock<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every report received so far.
    #[must_use]
    pub fn reports(&self) -> Vec<String> {
        self.reports
            .read()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OperatorNotifier for RecordingNotifier {
    async fn notify(&self, report: &str) {
        if let Ok(mut reports) = self.reports.write() {
            reports.push(report.to_owned());
        }
    }
}
