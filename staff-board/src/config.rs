//! Board configuration

/// Staff board configuration
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Passed as `cascade` when deleting an assignment
    pub cascade_delete: bool,

    /// Buffered notifications per subscriber before the oldest are dropped
    pub notification_capacity: usize,
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cascade flag used for deletions
    pub fn with_cascade_delete(mut self, cascade: bool) -> Self {
        self.cascade_delete = cascade;
        self
    }

    /// Set the notification channel capacity
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity.max(1);
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cascade_delete: false,
            notification_capacity: 64,
        }
    }
}
