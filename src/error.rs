use thiserror::Error;

/// Errors raised while sampling or summarising a grid.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The reference rectangle has zero width or height, so the percentage has no denominator.
    #[error("reference rectangle is degenerate (width={width}, height={height})")]
    DegenerateRectangle { width: f64, height: f64 },

    #[error("invalid sampling of [{lo}, {hi}] with {samples} samples: {reason}")]
    InvalidSampling {
        samples: usize,
        lo: f64,
        hi: f64,
        reason: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
