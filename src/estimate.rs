//! Fare estimate: model prediction with the fixed formula as fallback.

use serde::Serialize;

use crate::features::FeatureRecord;
use crate::model::FareModel;
use crate::types::RideInput;

pub const PER_MILE_RATE: f64 = 2.50;
pub const PER_MINUTE_RATE: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message surfaced to the rider alongside the number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    Model,
    Formula,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareEstimate {
    pub total: f64,
    pub source: EstimateSource,
    pub notices: Vec<Notice>,
}

impl FareEstimate {
    pub fn label(&self) -> &'static str {
        match self.source {
            EstimateSource::Model => "Predicted Total Fare",
            EstimateSource::Formula => "Estimated Total Fare",
        }
    }

    pub fn headline(&self) -> String {
        format!("{}: {}", self.label(), dollars(self.total))
    }
}

pub fn dollars(v: f64) -> String {
    format!("${:.2}", v)
}

pub fn distance_charge(ride: &RideInput) -> f64 {
    ride.trip_distance * PER_MILE_RATE
}

pub fn time_charge(ride: &RideInput) -> f64 {
    ride.trip_duration as f64 * PER_MINUTE_RATE
}

/// base + distance·2.50 + minutes·0.35 + every listed fee.
pub fn formula_total(ride: &RideInput) -> f64 {
    ride.fare_amount
        + distance_charge(ride)
        + time_charge(ride)
        + ride.extra
        + ride.mta_tax
        + ride.tip_amount
        + ride.tolls_amount
        + ride.improvement_surcharge
        + ride.congestion_surcharge
}

/// Predict with the model if there is one; on any failure fall back to the
/// formula and say why.
pub fn estimate(model: Option<&dyn FareModel>, ride: &RideInput) -> FareEstimate {
    let mut notices = Vec::new();

    if let Some(model) = model {
        let record = FeatureRecord::from_ride(ride);
        let vec = record.ordered(model.feat_list());
        log_feature_vector(model.feat_list(), &vec);

        match model.predict(&vec) {
            Ok(total) => {
                return FareEstimate {
                    total,
                    source: EstimateSource::Model,
                    notices,
                }
            }
            Err(e) => {
                tracing::warn!("{} model failed: {}; falling back to formula", model.kind(), e);
                notices.push(Notice::error(format!("Error making prediction: {}", e)));
            }
        }
    }

    FareEstimate {
        total: formula_total(ride),
        source: EstimateSource::Formula,
        notices,
    }
}

// Confirms we are not feeding the model all-zeros.
fn log_feature_vector(feat_list: &[String], vec: &[f64]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let nz = vec.iter().filter(|x| **x != 0.0).count();
    let mean = if vec.is_empty() {
        0.0
    } else {
        vec.iter().sum::<f64>() / vec.len() as f64
    };
    let sample: Vec<String> = feat_list
        .iter()
        .zip(vec)
        .take(6)
        .map(|(name, v)| format!("{}={:.3}", name, v))
        .collect();
    tracing::debug!(
        "in_dim={} nonzero={} mean={:.3} sample=[{}]",
        vec.len(),
        nz,
        mean,
        sample.join(", ")
    );
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub item: &'static str,
    pub amount: f64,
}

/// Nine itemised lines; distance and time use the formula rates whatever the
/// estimate source was.
pub fn breakdown(ride: &RideInput) -> Vec<BreakdownLine> {
    let line = |item, amount| BreakdownLine { item, amount };
    vec![
        line("Base Fare", ride.fare_amount),
        line("Distance Charge (estimated)", distance_charge(ride)),
        line("Time Charge (estimated)", time_charge(ride)),
        line("Extra", ride.extra),
        line("MTA Tax", ride.mta_tax),
        line("Tip", ride.tip_amount),
        line("Tolls", ride.tolls_amount),
        line("Improvement Surcharge", ride.improvement_surcharge),
        line("Congestion Surcharge", ride.congestion_surcharge),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FareError, Result};

    struct Fixed(Vec<String>, Result<f64>);

    impl FareModel for Fixed {
        fn feat_list(&self) -> &[String] {
            &self.0
        }
        fn predict(&self, _features: &[f64]) -> Result<f64> {
            match &self.1 {
                Ok(v) => Ok(*v),
                Err(_) => Err(FareError::Inference("boom".into())),
            }
        }
        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn formula_for_default_ride() {
        // 2.5 + 2.5*2.5 + 15*0.35 + 0.5 + 0.3 + 2.5
        let total = formula_total(&RideInput::default());
        assert!(close(total, 17.30), "got {}", total);
        assert_eq!(dollars(total), "$17.30");
    }

    #[test]
    fn formula_adds_every_fee() {
        let ride = RideInput {
            trip_distance: 10.0,
            trip_duration: 30,
            fare_amount: 5.0,
            extra: 1.0,
            mta_tax: 0.5,
            tip_amount: 4.0,
            tolls_amount: 6.55,
            improvement_surcharge: 0.3,
            congestion_surcharge: 2.75,
            ..RideInput::default()
        };
        // 5 + 25 + 10.5 + 1 + 0.5 + 4 + 6.55 + 0.3 + 2.75
        assert!(close(formula_total(&ride), 55.6));
    }

    #[test]
    fn no_model_uses_formula_silently() {
        let est = estimate(None, &RideInput::default());
        assert_eq!(est.source, EstimateSource::Formula);
        assert!(est.notices.is_empty());
        assert_eq!(est.label(), "Estimated Total Fare");
    }

    #[test]
    fn model_result_is_used() {
        let m = Fixed(vec!["trip_distance".into()], Ok(21.0));
        let est = estimate(Some(&m), &RideInput::default());
        assert_eq!(est.source, EstimateSource::Model);
        assert_eq!(est.total, 21.0);
        assert_eq!(est.headline(), "Predicted Total Fare: $21.00");
    }

    #[test]
    fn inference_failure_falls_back() {
        let m = Fixed(
            vec!["trip_distance".into()],
            Err(FareError::Inference("x".into())),
        );
        let est = estimate(Some(&m), &RideInput::default());
        assert_eq!(est.source, EstimateSource::Formula);
        assert!(close(est.total, 17.30));
        assert_eq!(est.notices.len(), 1);
        assert_eq!(est.notices[0].level, NoticeLevel::Error);
        assert!(est.notices[0].message.starts_with("Error making prediction"));
    }

    #[test]
    fn breakdown_lines_in_order() {
        let lines = breakdown(&RideInput::default());
        let items: Vec<&str> = lines.iter().map(|l| l.item).collect();
        assert_eq!(
            items,
            vec![
                "Base Fare",
                "Distance Charge (estimated)",
                "Time Charge (estimated)",
                "Extra",
                "MTA Tax",
                "Tip",
                "Tolls",
                "Improvement Surcharge",
                "Congestion Surcharge",
            ]
        );
        assert!(close(lines[1].amount, 6.25));
        assert!(close(lines[2].amount, 5.25));
        let sum: f64 = lines.iter().map(|l| l.amount).sum();
        assert!(close(sum, formula_total(&RideInput::default())));
    }
}
