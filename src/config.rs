//! Loading analyses from JSON.
//!
//! ```json
//! {
//!   "parameters": {
//!     "y1": {
//!       "field": { "a": 1, "b": 2, "exp_x1": 2, "exp_x2": 3 },
//!       "range": { "min": 5, "max": 15 }
//!     },
//!     "y2": {
//!       "field": { "c": 0.5, "exp_x1": 1, "exp_x2": 2 },
//!       "range": { "min": 2, "max": 10 }
//!     },
//!     "rectangle": { "lower_left": [1, 1], "upper_right": [2, 2] }
//!   },
//!   "sampling": { "samples": 1000, "lo": 0, "hi": 10 }
//! }
//! ```
//!
//! `sampling` may be omitted and defaults to 1000 samples over `[0, 10]`.

use serde::{Deserialize, Serialize};

use crate::analysis::{GridIntersectionAnalyzer, Parameters};
use crate::domain::grid::Sampling;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub parameters: Parameters,
    #[serde(default)]
    pub sampling: Sampling,
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(samples = config.sampling.samples(), "loaded analyzer config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_analyzer(self) -> GridIntersectionAnalyzer {
        GridIntersectionAnalyzer::with_sampling(self.parameters, self.sampling)
    }
}
