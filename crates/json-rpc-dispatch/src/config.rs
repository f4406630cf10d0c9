use serde::{Deserialize, Serialize};

/// Dispatcher configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Largest number of envelopes accepted in one batch. `None` means unlimited.
    pub max_batch_size: Option<usize>,
}

impl DispatcherConfig {
    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = Some(max);
        self
    }

    pub(crate) fn batch_too_large(&self, len: usize) -> bool {
        self.max_batch_size.is_some_and(|max| len > max)
    }
}
