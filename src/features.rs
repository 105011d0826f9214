//! Flat feature record handed to the fare model.
//!
//! Categorical inputs are one-hot encoded the way the training frame was:
//! payment code 1, Friday and street-hail are reference categories and get
//! no column.

use std::collections::{HashMap, HashSet};

use crate::error::{FareError, Result};
use crate::types::{RideInput, TripType, Weekday};

pub const NUMERIC_FEATURES: [&str; 10] = [
    "trip_distance",
    "fare_amount",
    "extra",
    "mta_tax",
    "tip_amount",
    "tolls_amount",
    "improvement_surcharge",
    "congestion_surcharge",
    "trip_duration",
    "passenger_count",
];

/// Weekdays that carry a flag column (Friday is the reference).
pub const FLAGGED_WEEKDAYS: [Weekday; 6] = [
    Weekday::Monday,
    Weekday::Saturday,
    Weekday::Sunday,
    Weekday::Thursday,
    Weekday::Tuesday,
    Weekday::Wednesday,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    values: HashMap<String, f64>,
}

impl FeatureRecord {
    pub fn from_ride(ride: &RideInput) -> Self {
        let mut values = HashMap::with_capacity(22);
        let flag = |on: bool| if on { 1.0 } else { 0.0 };

        values.insert("trip_distance".to_string(), ride.trip_distance);
        values.insert("fare_amount".to_string(), ride.fare_amount);
        values.insert("extra".to_string(), ride.extra);
        values.insert("mta_tax".to_string(), ride.mta_tax);
        values.insert("tip_amount".to_string(), ride.tip_amount);
        values.insert("tolls_amount".to_string(), ride.tolls_amount);
        values.insert(
            "improvement_surcharge".to_string(),
            ride.improvement_surcharge,
        );
        values.insert("congestion_surcharge".to_string(), ride.congestion_surcharge);
        values.insert("trip_duration".to_string(), ride.trip_duration as f64);
        values.insert("passenger_count".to_string(), ride.passenger_count as f64);

        let code = ride.payment_type.code();
        for c in 2..=5u8 {
            values.insert(format!("payment_type_{}", c), flag(code == c));
        }
        values.insert(
            "trip_type_2".to_string(),
            flag(ride.trip_type == TripType::Dispatch),
        );
        for day in FLAGGED_WEEKDAYS {
            values.insert(format!("weekday_{}", day.name()), flag(ride.weekday == day));
        }
        values.insert(format!("hour_{}", ride.hour), 1.0);

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Project onto the model's input order. Names the record does not carry
    /// (other hours) are 0.0; record entries the model does not list are
    /// dropped.
    pub fn ordered(&self, feat_list: &[String]) -> Vec<f64> {
        let mut v = Vec::with_capacity(feat_list.len());
        for k in feat_list {
            v.push(*self.values.get(k).unwrap_or(&0.0));
        }
        v
    }
}

/// True if `name` is a column this program can ever produce.
pub fn is_known_feature(name: &str) -> bool {
    if NUMERIC_FEATURES.contains(&name) || name == "trip_type_2" {
        return true;
    }
    if let Some(code) = name.strip_prefix("payment_type_") {
        return matches!(code, "2" | "3" | "4" | "5");
    }
    if let Some(day) = name.strip_prefix("weekday_") {
        return FLAGGED_WEEKDAYS.iter().any(|d| d.name() == day);
    }
    if let Some(h) = name.strip_prefix("hour_") {
        // reject "hour_07" and friends, the encoder never emits them
        return h.parse::<u8>().map_or(false, |n| n <= 23 && n.to_string() == h);
    }
    false
}

/// A model whose columns we cannot fill must not be fed at all.
pub fn check_schema(feat_list: &[String]) -> Result<()> {
    if feat_list.is_empty() {
        return Err(FareError::SchemaMismatch("model lists no features".into()));
    }
    let mut seen = HashSet::with_capacity(feat_list.len());
    for name in feat_list {
        if !is_known_feature(name) {
            return Err(FareError::SchemaMismatch(format!(
                "unknown feature '{}'",
                name
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(FareError::SchemaMismatch(format!(
                "duplicate feature '{}'",
                name
            )));
        }
    }
    Ok(())
}

/// Every column the encoder can emit, in training-frame order.
pub fn full_feature_list() -> Vec<String> {
    let mut names: Vec<String> = NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect();
    names.extend((2..=5).map(|c| format!("payment_type_{}", c)));
    names.push("trip_type_2".to_string());
    names.extend(FLAGGED_WEEKDAYS.iter().map(|d| format!("weekday_{}", d.name())));
    names.extend((0..=23).map(|h| format!("hour_{}", h)));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentType;

    #[test]
    fn record_has_one_hot_flags() {
        let ride = RideInput {
            payment_type: PaymentType::Dispute,
            trip_type: TripType::Dispatch,
            weekday: Weekday::Saturday,
            hour: 18,
            ..RideInput::default()
        };
        let rec = FeatureRecord::from_ride(&ride);

        assert_eq!(rec.get("payment_type_2"), Some(0.0));
        assert_eq!(rec.get("payment_type_4"), Some(1.0));
        assert_eq!(rec.get("trip_type_2"), Some(1.0));
        assert_eq!(rec.get("weekday_Saturday"), Some(1.0));
        assert_eq!(rec.get("weekday_Monday"), Some(0.0));
        assert_eq!(rec.get("hour_18"), Some(1.0));
        assert_eq!(rec.get("hour_12"), None);
        // 10 numeric + 4 payment + 1 trip + 6 weekday + 1 hour
        assert_eq!(rec.values.len(), 22);
    }

    #[test]
    fn reference_categories_have_no_flag_set() {
        let ride = RideInput {
            payment_type: PaymentType::CreditCard,
            weekday: Weekday::Friday,
            ..RideInput::default()
        };
        let rec = FeatureRecord::from_ride(&ride);
        for c in 2..=5 {
            assert_eq!(rec.get(&format!("payment_type_{}", c)), Some(0.0));
        }
        for day in FLAGGED_WEEKDAYS {
            assert_eq!(rec.get(&format!("weekday_{}", day.name())), Some(0.0));
        }
        assert_eq!(rec.get("weekday_Friday"), None);
        assert_eq!(rec.get("trip_type_2"), Some(0.0));
    }

    #[test]
    fn ordered_fills_missing_with_zero() {
        let rec = FeatureRecord::from_ride(&RideInput::default());
        let feat_list: Vec<String> = ["hour_3", "trip_distance", "hour_12", "passenger_count"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(rec.ordered(&feat_list), vec![0.0, 2.5, 1.0, 1.0]);
    }

    #[test]
    fn schema_check_flags_unknown_and_duplicate_names() {
        assert!(check_schema(&full_feature_list()).is_ok());

        let unknown = vec!["trip_distance".to_string(), "pickup_zone".to_string()];
        assert!(matches!(
            check_schema(&unknown),
            Err(FareError::SchemaMismatch(_))
        ));

        let dup = vec!["extra".to_string(), "extra".to_string()];
        assert!(check_schema(&dup).is_err());

        assert!(check_schema(&[]).is_err());
    }

    #[test]
    fn known_feature_vocabulary() {
        assert!(is_known_feature("hour_0"));
        assert!(is_known_feature("hour_23"));
        assert!(!is_known_feature("hour_24"));
        assert!(!is_known_feature("hour_07"));
        assert!(!is_known_feature("payment_type_1"));
        assert!(!is_known_feature("weekday_Friday"));
        assert_eq!(full_feature_list().len(), 45);
    }
}
