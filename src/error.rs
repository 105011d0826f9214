use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FareError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    InvalidInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("failed to read model artifact at {}: {source}", .path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    ArtifactParse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureLength { got: usize, expected: usize },

    #[error("inference failed: {0}")]
    Inference(String),
}

impl FareError {
    /// True when the artifact file simply is not there.
    pub fn is_missing_artifact(&self) -> bool {
        matches!(
            self,
            FareError::ArtifactRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, FareError>;
