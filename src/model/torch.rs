use serde::Deserialize;
use std::{fs, path::Path};
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::error::{FareError, Result};

use super::FareModel;

#[derive(Deserialize)]
struct MetaJson {
    feat_list: Vec<String>,
    in_dim: Option<usize>,
}

/// TorchScript regressor with a sidecar `<name>.meta.json` for feature order.
pub struct TorchModel {
    model: CModule,
    device: Device,
    feat_list: Vec<String>,
}

impl TorchModel {
    pub fn new(model_path: &Path, meta_path: &Path) -> Result<Self> {
        let device = Device::Cpu;

        if !model_path.exists() {
            return Err(FareError::ArtifactRead {
                path: model_path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        // the .pt is there, so a missing sidecar is a broken artifact
        let meta_txt = fs::read_to_string(meta_path).map_err(|e| {
            FareError::InvalidArtifact(format!(
                "missing meta {}: {}",
                meta_path.display(),
                e
            ))
        })?;
        let meta: MetaJson = serde_json::from_str(&meta_txt)?;
        super::warn_on_in_dim(meta.in_dim, &meta.feat_list);

        let model = CModule::load_on_device(model_path, device).map_err(|e| {
            FareError::InvalidArtifact(format!(
                "failed to load TorchScript {}: {}",
                model_path.display(),
                e
            ))
        })?;

        Ok(Self {
            model,
            device,
            feat_list: meta.feat_list,
        })
    }
}

impl FareModel for TorchModel {
    fn feat_list(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, x: &[f64]) -> Result<f64> {
        let in_dim = self.feat_list.len();
        if x.len() != in_dim {
            return Err(FareError::FeatureLength {
                got: x.len(),
                expected: in_dim,
            });
        }

        let xs: Vec<f32> = x.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_slice(&xs)
            .reshape([1, in_dim as i64])
            .to_device(self.device);

        let out = self
            .model
            .forward_ts(&[input])
            .map_err(|e| FareError::Inference(e.to_string()))?
            .to_kind(Kind::Double)
            .flatten(0, -1);

        let sz = out.size();
        if sz.len() != 1 || sz[0] != 1 {
            return Err(FareError::Inference(format!(
                "expected a single fare, got output of size {:?}",
                sz
            )));
        }
        let y = out.double_value(&[0]);
        if !y.is_finite() {
            return Err(FareError::Inference(format!("non-finite output {}", y)));
        }
        Ok(y)
    }

    fn kind(&self) -> &'static str {
        "torchscript"
    }
}
