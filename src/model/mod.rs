//! Loading the pre-trained fare model.
//!
//! The artifact is opaque to the rest of the program: all it offers is a
//! feature order and `predict(features) -> fare`.

mod forest;
mod linear;
#[cfg(feature = "torch")]
mod torch;

use std::{fs, path::Path, sync::Arc};

use serde::Deserialize;

use crate::error::{FareError, Result};
use crate::estimate::Notice;
use crate::features::check_schema;

pub use forest::{ForestModel, TreeArrays};
pub use linear::LinearModel;

pub const DEFAULT_MODEL_FILE: &str = "nyc_taxi_fare_model.json";

pub trait FareModel: Send + Sync {
    /// Authoritative input order.
    fn feat_list(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Short human-readable kind, e.g. "linear".
    fn kind(&self) -> &'static str;
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    Linear {
        feat_list: Vec<String>,
        in_dim: Option<usize>,
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Forest {
        feat_list: Vec<String>,
        in_dim: Option<usize>,
        trees: Vec<TreeArrays>,
    },
}

/// Read, validate and warm up a model artifact.
pub fn load_model(path: &Path) -> Result<Arc<dyn FareModel>> {
    if path.extension().and_then(|e| e.to_str()) == Some("pt") {
        return load_torchscript(path);
    }

    let txt = fs::read_to_string(path).map_err(|source| FareError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact = serde_json::from_str(&txt)?;

    let model: Arc<dyn FareModel> = match artifact {
        ModelArtifact::Linear {
            feat_list,
            in_dim,
            intercept,
            coefficients,
        } => {
            warn_on_in_dim(in_dim, &feat_list);
            check_schema(&feat_list)?;
            Arc::new(LinearModel::new(feat_list, intercept, coefficients)?)
        }
        ModelArtifact::Forest {
            feat_list,
            in_dim,
            trees,
        } => {
            warn_on_in_dim(in_dim, &feat_list);
            check_schema(&feat_list)?;
            Arc::new(ForestModel::new(feat_list, trees)?)
        }
    };

    // Warmup so a broken artifact fails here rather than on the first ride
    let n = model.feat_list().len();
    model.predict(&vec![0.0; n])?;
    tracing::info!(
        "loaded {} model from {}; feat_list[{}]",
        model.kind(),
        path.display(),
        n
    );
    Ok(model)
}

fn warn_on_in_dim(in_dim: Option<usize>, feat_list: &[String]) {
    if let Some(d) = in_dim {
        if d != feat_list.len() {
            tracing::warn!(
                "artifact in_dim ({}) != feat_list.len() ({}); using feat_list.len()",
                d,
                feat_list.len()
            );
        }
    }
}

#[cfg(feature = "torch")]
fn load_torchscript(path: &Path) -> Result<Arc<dyn FareModel>> {
    let meta = path.with_extension("meta.json");
    let model = torch::TorchModel::new(path, &meta)?;
    check_schema(model.feat_list())?;
    let n = model.feat_list().len();
    model.predict(&vec![0.0; n])?;
    tracing::info!("loaded torchscript model from {}; feat_list[{}]", path.display(), n);
    Ok(Arc::new(model))
}

#[cfg(not(feature = "torch"))]
fn load_torchscript(path: &Path) -> Result<Arc<dyn FareModel>> {
    Err(FareError::InvalidArtifact(format!(
        "{} is a TorchScript module; rebuild with the `torch` feature to load it",
        path.display()
    )))
}

/// Outcome of the startup load: a model, or the reason we run on the formula.
#[derive(Clone)]
pub struct ModelState {
    pub model: Option<Arc<dyn FareModel>>,
    pub notice: Notice,
}

impl ModelState {
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::warn!("no model path resolved; using formula");
            return Self::formula_only(Notice::warning(
                "Model file not found. Using simplified calculation instead.",
            ));
        };

        match load_model(path) {
            Ok(model) => Self {
                model: Some(model),
                notice: Notice::success("Model loaded successfully!"),
            },
            Err(e) if e.is_missing_artifact() => {
                tracing::warn!("model file {} not found; using formula", path.display());
                Self::formula_only(Notice::warning(
                    "Model file not found. Using simplified calculation instead.",
                ))
            }
            Err(e) => {
                tracing::warn!("model at {} unusable: {}; using formula", path.display(), e);
                Self::formula_only(Notice::warning(format!(
                    "Model could not be loaded: {}. Using simplified calculation instead.",
                    e
                )))
            }
        }
    }

    pub fn formula_only(notice: Notice) -> Self {
        Self {
            model: None,
            notice,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&dyn FareModel> {
        self.model.as_deref()
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelState")
            .field("model", &self.model.as_ref().map(|m| m.kind()))
            .field("notice", &self.notice)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::NoticeLevel;
    use std::io::Write;

    fn write_artifact(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_linear_artifact() {
        let f = write_artifact(
            r#"{"kind":"linear","feat_list":["trip_distance","trip_duration"],
                "intercept":3.0,"coefficients":[2.0,0.5]}"#,
        );
        let model = load_model(f.path()).unwrap();
        assert_eq!(model.kind(), "linear");
        assert_eq!(model.predict(&[2.0, 10.0]).unwrap(), 12.0);
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let err = load_model(Path::new("/definitely/not/here/model.json")).err().unwrap();
        assert!(err.is_missing_artifact());

        let state = ModelState::load(Some(Path::new("/definitely/not/here/model.json")));
        assert!(!state.is_loaded());
        assert_eq!(state.notice.level, NoticeLevel::Warning);
        assert!(state.notice.message.starts_with("Model file not found"));
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let f = write_artifact(r#"{"kind":"svm","feat_list":["extra"]}"#);
        assert!(matches!(
            load_model(f.path()),
            Err(FareError::ArtifactParse(_))
        ));
    }

    #[test]
    fn foreign_schema_is_rejected() {
        let f = write_artifact(
            r#"{"kind":"linear","feat_list":["pickup_longitude"],
                "intercept":1.0,"coefficients":[1.0]}"#,
        );
        assert!(matches!(
            load_model(f.path()),
            Err(FareError::SchemaMismatch(_))
        ));

        let state = ModelState::load(Some(f.path()));
        assert!(!state.is_loaded());
        assert!(state.notice.message.contains("schema mismatch"));
    }

    #[test]
    fn no_path_means_formula() {
        let state = ModelState::load(None);
        assert!(state.model().is_none());
        assert_eq!(state.notice.level, NoticeLevel::Warning);
    }

    #[cfg(not(feature = "torch"))]
    #[test]
    fn torchscript_needs_feature() {
        let err = load_model(Path::new("model.pt")).err().unwrap();
        assert!(matches!(err, FareError::InvalidArtifact(_)));
    }
}
