use std::time::Duration;

/// Timeout and slow-statement settings for [`super::InstrumentedExecutor`].
///
/// Both are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Statement timeout. `None` means wait indefinitely.
    pub statement_timeout: Option<Duration>,
    /// Statements at or above this duration trigger `on_slow_statement`.
    pub slow_statement_threshold: Option<Duration>,
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the statement timeout.
    ///
    /// A statement still running when it elapses fails with
    /// [`crate::DmlError::Timeout`]; the warehouse job itself is not cancelled.
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    /// Set the slow statement threshold.
    pub fn with_slow_statement_threshold(mut self, threshold: Duration) -> Self {
        self.slow_statement_threshold = Some(threshold);
        self
    }
}
