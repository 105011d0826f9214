//! Data behind the three illustrative charts, plus the static rider tips.
//!
//! None of this is learned: the distance line uses the formula's per-mile
//! rate, the hourly curve is a sine around $15 and the payment mix is fixed.

use serde::Serialize;

use crate::estimate::PER_MILE_RATE;
use crate::types::{PaymentType, RideInput};

pub const DISTANCE_POINTS: usize = 100;
pub const MAX_CHART_DISTANCE: f64 = 30.0;

/// Illustrative trip counts per payment type, in `PaymentType::all()` order.
pub const PAYMENT_COUNTS: [u32; 5] = [40, 30, 5, 3, 2];

pub const TIPS: [&str; 6] = [
    "The base fare for NYC green taxis is $2.50.",
    "MTA tax of $0.50 is added to all rides.",
    "Trips between 4 PM and 8 PM on weekdays (excluding holidays) include a $1.00 rush hour surcharge.",
    "There is a NYS congestion surcharge of $2.50 for trips that start, end or pass through Manhattan below 96th Street.",
    "Always ask for a receipt as proof of your trip.",
    "You can pay with credit card, cash, or via a mobile app.",
];

pub const DISCLAIMER: &str = "Note: This is a simplified model for demonstration purposes. A real model would use a trained machine learning algorithm based on historical data.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSeries {
    /// (miles, fare) along the line
    pub points: Vec<(f64, f64)>,
    /// the rider's own trip on that line
    pub highlight: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    /// average fare for hours 0..=23
    pub fares: Vec<f64>,
    pub highlight_hour: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSlice {
    pub label: &'static str,
    pub count: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub fare_by_distance: DistanceSeries,
    pub fare_by_hour: HourlySeries,
    pub payment_types: Vec<PaymentSlice>,
}

impl ChartSet {
    pub fn for_ride(ride: &RideInput) -> Self {
        Self {
            fare_by_distance: fare_by_distance(ride),
            fare_by_hour: fare_by_hour(ride.hour),
            payment_types: payment_mix(),
        }
    }
}

/// `n` evenly spaced values over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

pub fn fare_by_distance(ride: &RideInput) -> DistanceSeries {
    let fare_at = |d: f64| ride.fare_amount + d * PER_MILE_RATE;
    let points = linspace(0.0, MAX_CHART_DISTANCE, DISTANCE_POINTS)
        .into_iter()
        .map(|d| (d, fare_at(d)))
        .collect();
    DistanceSeries {
        points,
        highlight: (ride.trip_distance, fare_at(ride.trip_distance)),
    }
}

pub fn hourly_fare(hour: u8) -> f64 {
    15.0 + 5.0 * ((hour as f64 - 8.0) * std::f64::consts::PI / 12.0).sin()
}

pub fn fare_by_hour(highlight_hour: u8) -> HourlySeries {
    HourlySeries {
        fares: (0..24u8).map(hourly_fare).collect(),
        highlight_hour,
    }
}

pub fn payment_mix() -> Vec<PaymentSlice> {
    let total: u32 = PAYMENT_COUNTS.iter().sum();
    PaymentType::all()
        .iter()
        .zip(PAYMENT_COUNTS)
        .map(|(p, count)| PaymentSlice {
            label: p.label(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(0.0, 30.0, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 0.0);
        assert!((v[99] - 30.0).abs() < 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
    }

    #[test]
    fn distance_line_starts_at_base_fare() {
        let ride = RideInput {
            fare_amount: 4.0,
            trip_distance: 10.0,
            ..RideInput::default()
        };
        let s = fare_by_distance(&ride);
        assert_eq!(s.points.len(), DISTANCE_POINTS);
        assert_eq!(s.points[0], (0.0, 4.0));
        assert!((s.points[99].1 - 79.0).abs() < 1e-9);
        assert_eq!(s.highlight, (10.0, 29.0));
    }

    #[test]
    fn hourly_curve_peaks_mid_afternoon() {
        let s = fare_by_hour(17);
        assert_eq!(s.fares.len(), 24);
        assert_eq!(s.highlight_hour, 17);
        assert!((s.fares[8] - 15.0).abs() < 1e-9);
        assert!((s.fares[14] - 20.0).abs() < 1e-9);
        assert!((s.fares[2] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn payment_mix_sums_to_hundred() {
        let mix = payment_mix();
        assert_eq!(mix.len(), 5);
        assert_eq!(mix[0].label, "Credit Card");
        assert!((mix[0].percent - 50.0).abs() < 1e-9);
        assert!((mix[4].percent - 2.5).abs() < 1e-9);
        let total: f64 = mix.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }
}
