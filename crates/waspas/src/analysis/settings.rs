use serde::{Deserialize, Serialize};

use super::cache::DEFAULT_CACHE_CAPACITY;
use super::domain::Lambda;

/// Defaults applied when a request leaves λ or the sweep resolution unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub default_lambda: Lambda,
    pub sweep_divisions: usize,
    /// Most normalized matrices the service's store keeps before evicting the oldest.
    pub cache_capacity: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_lambda: Lambda::DEFAULT,
            sweep_divisions: 10,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
