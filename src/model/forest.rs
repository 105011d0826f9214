use serde::Deserialize;

use crate::error::{FareError, Result};

use super::FareModel;

/// One regression tree in scikit-learn's exported array layout.
/// `children_left[i] == -1` marks a leaf.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArrays {
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub value: Vec<f64>,
}

impl TreeArrays {
    fn n_nodes(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("no nodes".into());
        }
        if [
            self.feature.len(),
            self.threshold.len(),
            self.children_left.len(),
            self.children_right.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("arrays differ in length".into());
        }

        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == -1 {
                if !self.value[i].is_finite() {
                    return Err(format!("leaf {} has non-finite value", i));
                }
                continue;
            }
            // sklearn numbers children after their parent; requiring it here
            // also rules out cycles
            for child in [l, r] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {} has bad child index {}", i, child));
                }
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!(
                    "node {} splits on feature {} of {}",
                    i, f, n_features
                ));
            }
        }
        Ok(())
    }

    fn leaf_value(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != -1 {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Random-forest regressor: mean of the tree predictions.
#[derive(Debug, Clone)]
pub struct ForestModel {
    feat_list: Vec<String>,
    trees: Vec<TreeArrays>,
}

impl ForestModel {
    pub fn new(feat_list: Vec<String>, trees: Vec<TreeArrays>) -> Result<Self> {
        if trees.is_empty() {
            return Err(FareError::InvalidArtifact("forest has no trees".into()));
        }
        for (i, t) in trees.iter().enumerate() {
            t.validate(feat_list.len())
                .map_err(|e| FareError::InvalidArtifact(format!("tree {}: {}", i, e)))?;
        }
        Ok(Self { feat_list, trees })
    }
}

impl FareModel for ForestModel {
    fn feat_list(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.feat_list.len() {
            return Err(FareError::FeatureLength {
                got: x.len(),
                expected: self.feat_list.len(),
            });
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(FareError::Inference(format!(
                "feature {} is not finite",
                self.feat_list[i]
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.leaf_value(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn kind(&self) -> &'static str {
        "forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // distance <= 5.0 ? 10.0 : 30.0
    fn stump(value_left: f64, value_right: f64) -> TreeArrays {
        TreeArrays {
            feature: vec![0, -2, -2],
            threshold: vec![5.0, -2.0, -2.0],
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            value: vec![20.0, value_left, value_right],
        }
    }

    fn feats() -> Vec<String> {
        vec!["trip_distance".to_string(), "trip_duration".to_string()]
    }

    #[test]
    fn single_tree_routes_on_threshold() {
        let m = ForestModel::new(feats(), vec![stump(10.0, 30.0)]).unwrap();
        assert_eq!(m.predict(&[2.0, 0.0]).unwrap(), 10.0);
        // equal goes left
        assert_eq!(m.predict(&[5.0, 0.0]).unwrap(), 10.0);
        assert_eq!(m.predict(&[5.1, 0.0]).unwrap(), 30.0);
    }

    #[test]
    fn forest_averages_trees() {
        let m = ForestModel::new(feats(), vec![stump(10.0, 30.0), stump(20.0, 40.0)]).unwrap();
        assert_eq!(m.predict(&[1.0, 0.0]).unwrap(), 15.0);
        assert_eq!(m.predict(&[9.0, 0.0]).unwrap(), 35.0);
    }

    #[test]
    fn leaf_only_tree_is_constant() {
        let leaf = TreeArrays {
            feature: vec![-2],
            threshold: vec![-2.0],
            children_left: vec![-1],
            children_right: vec![-1],
            value: vec![12.5],
        };
        let m = ForestModel::new(feats(), vec![leaf]).unwrap();
        assert_eq!(m.predict(&[0.0, 0.0]).unwrap(), 12.5);
    }

    #[test]
    fn rejects_malformed_trees() {
        assert!(ForestModel::new(feats(), vec![]).is_err());

        let mut cyclic = stump(1.0, 2.0);
        cyclic.children_left[0] = 0;
        assert!(ForestModel::new(feats(), vec![cyclic]).is_err());

        let mut wide = stump(1.0, 2.0);
        wide.feature[0] = 7;
        assert!(ForestModel::new(feats(), vec![wide]).is_err());

        let mut ragged = stump(1.0, 2.0);
        ragged.threshold.pop();
        assert!(ForestModel::new(feats(), vec![ragged]).is_err());
    }

    #[test]
    fn nan_feature_is_an_inference_error() {
        let m = ForestModel::new(feats(), vec![stump(1.0, 2.0)]).unwrap();
        assert!(matches!(
            m.predict(&[f64::NAN, 0.0]),
            Err(FareError::Inference(_))
        ));
        assert!(matches!(
            m.predict(&[1.0]),
            Err(FareError::FeatureLength { .. })
        ));
    }
}
