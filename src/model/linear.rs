use crate::error::{FareError, Result};

use super::FareModel;

/// `fare = intercept + Σ coef_i · x_i`, as exported from a fitted
/// multiple linear regression.
#[derive(Debug, Clone)]
pub struct LinearModel {
    feat_list: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(feat_list: Vec<String>, intercept: f64, coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.len() != feat_list.len() {
            return Err(FareError::InvalidArtifact(format!(
                "{} coefficients for {} features",
                coefficients.len(),
                feat_list.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(FareError::InvalidArtifact(
                "non-finite linear coefficient".into(),
            ));
        }
        Ok(Self {
            feat_list,
            intercept,
            coefficients,
        })
    }
}

impl FareModel for LinearModel {
    fn feat_list(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.coefficients.len() {
            return Err(FareError::FeatureLength {
                got: x.len(),
                expected: self.coefficients.len(),
            });
        }
        let y = self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(c, v)| c * v)
                .sum::<f64>();
        if !y.is_finite() {
            return Err(FareError::Inference(format!("non-finite output {}", y)));
        }
        Ok(y)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn predicts_dot_product_plus_intercept() {
        let m = LinearModel::new(names(&["extra", "tip_amount"]), 1.5, vec![1.0, 2.0]).unwrap();
        assert_eq!(m.predict(&[0.5, 3.0]).unwrap(), 8.0);
    }

    #[test]
    fn wrong_length_is_an_error() {
        let m = LinearModel::new(names(&["extra"]), 0.0, vec![1.0]).unwrap();
        match m.predict(&[1.0, 2.0]) {
            Err(FareError::FeatureLength { got, expected }) => {
                assert_eq!(got, 2);
                assert_eq!(expected, 1);
            }
            other => panic!("expected FeatureLength, got {:?}", other),
        }
    }

    #[test]
    fn coefficient_count_must_match() {
        assert!(LinearModel::new(names(&["extra", "mta_tax"]), 0.0, vec![1.0]).is_err());
        assert!(LinearModel::new(names(&["extra"]), f64::NAN, vec![1.0]).is_err());
    }

    #[test]
    fn overflowing_output_is_an_inference_error() {
        let m = LinearModel::new(names(&["extra"]), 0.0, vec![f64::MAX]).unwrap();
        assert!(matches!(m.predict(&[10.0]), Err(FareError::Inference(_))));
    }
}
