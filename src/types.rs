use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{FareError, Result};

// Selections are spelled snake_case everywhere: JSON bodies and CLI flags
// alike (`credit_card`, `street_hail`, `monday`).

// Inclusive input ranges: (min, max).
pub const DISTANCE_RANGE: (f64, f64) = (0.1, 30.0);
pub const PASSENGER_RANGE: (u8, u8) = (1, 6);
pub const DURATION_RANGE: (u32, u32) = (1, 120);
pub const HOUR_RANGE: (u8, u8) = (0, 23);
pub const BASE_FARE_RANGE: (f64, f64) = (2.5, 20.0);
pub const EXTRA_RANGE: (f64, f64) = (0.0, 5.0);
pub const MTA_TAX_RANGE: (f64, f64) = (0.0, 1.0);
pub const TIP_RANGE: (f64, f64) = (0.0, 20.0);
pub const TOLLS_RANGE: (f64, f64) = (0.0, 20.0);
pub const IMPROVEMENT_RANGE: (f64, f64) = (0.0, 1.0);
pub const CONGESTION_RANGE: (f64, f64) = (0.0, 3.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum PaymentType {
    #[default]
    CreditCard,
    Cash,
    NoCharge,
    Dispute,
    Unknown,
}

impl PaymentType {
    /// TLC payment code (1..=5).
    pub fn code(self) -> u8 {
        match self {
            PaymentType::CreditCard => 1,
            PaymentType::Cash => 2,
            PaymentType::NoCharge => 3,
            PaymentType::Dispute => 4,
            PaymentType::Unknown => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::CreditCard => "Credit Card",
            PaymentType::Cash => "Cash",
            PaymentType::NoCharge => "No Charge",
            PaymentType::Dispute => "Dispute",
            PaymentType::Unknown => "Unknown",
        }
    }

    pub fn all() -> &'static [PaymentType] {
        &[
            PaymentType::CreditCard,
            PaymentType::Cash,
            PaymentType::NoCharge,
            PaymentType::Dispute,
            PaymentType::Unknown,
        ]
    }

    pub fn next(self) -> Self {
        match self {
            PaymentType::CreditCard => PaymentType::Cash,
            PaymentType::Cash => PaymentType::NoCharge,
            PaymentType::NoCharge => PaymentType::Dispute,
            PaymentType::Dispute => PaymentType::Unknown,
            PaymentType::Unknown => PaymentType::CreditCard,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            PaymentType::CreditCard => PaymentType::Unknown,
            PaymentType::Cash => PaymentType::CreditCard,
            PaymentType::NoCharge => PaymentType::Cash,
            PaymentType::Dispute => PaymentType::NoCharge,
            PaymentType::Unknown => PaymentType::Dispute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    StreetHail,
    Dispatch,
}

impl TripType {
    pub fn code(self) -> u8 {
        match self {
            TripType::StreetHail => 1,
            TripType::Dispatch => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripType::StreetHail => "Street-hail",
            TripType::Dispatch => "Dispatch",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            TripType::StreetHail => TripType::Dispatch,
            TripType::Dispatch => TripType::StreetHail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn all() -> &'static [Weekday] {
        &[
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|d| *d == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|d| *d == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

/// Everything the rider picked on the form for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideInput {
    pub trip_distance: f64,
    pub passenger_count: u8,
    pub trip_duration: u32,
    pub payment_type: PaymentType,
    pub trip_type: TripType,
    pub weekday: Weekday,
    pub hour: u8,
    // fee components, dollars
    pub fare_amount: f64,
    pub extra: f64,
    pub mta_tax: f64,
    pub tip_amount: f64,
    pub tolls_amount: f64,
    pub improvement_surcharge: f64,
    pub congestion_surcharge: f64,
}

impl Default for RideInput {
    fn default() -> Self {
        Self {
            trip_distance: 2.5,
            passenger_count: 1,
            trip_duration: 15,
            payment_type: PaymentType::CreditCard,
            trip_type: TripType::StreetHail,
            weekday: Weekday::Monday,
            hour: 12,
            fare_amount: 2.5,
            extra: 0.0,
            mta_tax: 0.5,
            tip_amount: 0.0,
            tolls_amount: 0.0,
            improvement_surcharge: 0.3,
            congestion_surcharge: 2.5,
        }
    }
}

impl RideInput {
    /// Reject anything a form slider could not have produced.
    pub fn validate(&self) -> Result<()> {
        check("trip_distance", self.trip_distance, DISTANCE_RANGE)?;
        check(
            "passenger_count",
            self.passenger_count as f64,
            (PASSENGER_RANGE.0 as f64, PASSENGER_RANGE.1 as f64),
        )?;
        check(
            "trip_duration",
            self.trip_duration as f64,
            (DURATION_RANGE.0 as f64, DURATION_RANGE.1 as f64),
        )?;
        check(
            "hour",
            self.hour as f64,
            (HOUR_RANGE.0 as f64, HOUR_RANGE.1 as f64),
        )?;
        check("fare_amount", self.fare_amount, BASE_FARE_RANGE)?;
        check("extra", self.extra, EXTRA_RANGE)?;
        check("mta_tax", self.mta_tax, MTA_TAX_RANGE)?;
        check("tip_amount", self.tip_amount, TIP_RANGE)?;
        check("tolls_amount", self.tolls_amount, TOLLS_RANGE)?;
        check(
            "improvement_surcharge",
            self.improvement_surcharge,
            IMPROVEMENT_RANGE,
        )?;
        check(
            "congestion_surcharge",
            self.congestion_surcharge,
            CONGESTION_RANGE,
        )?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(FareError::InvalidInput {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
