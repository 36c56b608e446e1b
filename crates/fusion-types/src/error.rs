use thiserror::Error;

use crate::state::Camera;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Degenerate {camera} camera signal: channel sum {sum} gives no weighted position")]
    DegenerateSignal { camera: Camera, sum: f64 },

    #[error("Lines of sight are parallel (slope {slope}): no finite intersection")]
    ParallelLines { slope: f64 },

    #[error("Geometry configuration error: {0}")]
    GeometryConfig(String),

    #[error("Signal batch has {got} channels, expected {expected}")]
    SignalShape { expected: usize, got: usize },

    #[error("Sample {sample} failed: {source}")]
    SampleFailed {
        sample: usize,
        #[source]
        source: Box<FusionError>,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FusionError {
    /// True for errors that describe one sample's data rather than setup.
    pub fn is_per_sample(&self) -> bool {
        matches!(
            self,
            FusionError::DegenerateSignal { .. }
                | FusionError::ParallelLines { .. }
                | FusionError::SampleFailed { .. }
        )
    }
}

pub type FusionResult<T> = Result<T, FusionError>;
