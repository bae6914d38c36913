use crate::error::{MotifError, Result};
use serde::{Deserialize, Serialize};

/// Settings for repeated randomized and Gibbs motif searches
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of independent runs; the best motif set across runs is kept
    pub restarts: usize,
    /// Sampling rounds per Gibbs run
    pub gibbs_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            restarts: 20,
            gibbs_iterations: 100,
        }
    }
}

impl SearchConfig {
    /// # Errors
    /// * `MotifError::InvalidParameter` - If `restarts` is 0
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(MotifError::invalid_parameter(
                "restarts",
                self.restarts,
                "at least one run is required",
            ));
        }
        Ok(())
    }
}
