//! Form state for the interactive estimator.

use std::time::Instant;

use crate::estimate::{self, FareEstimate};
use crate::model::ModelState;
use crate::types::*;

/// Main application state.
pub struct App {
    /// Current form values
    pub ride: RideInput,
    /// Field the arrow keys adjust
    pub selected_field: Field,
    /// Visible chart
    pub current_tab: ChartTab,
    /// Loaded model, or the reason there is none
    pub model: ModelState,
    /// Estimate for the current form values
    pub estimate: FareEstimate,
    /// Status message with expiry
    pub status_message: Option<(String, Instant)>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(model: ModelState) -> Self {
        let ride = RideInput::default();
        let estimate = estimate::estimate(model.model(), &ride);
        Self {
            ride,
            selected_field: Field::Distance,
            current_tab: ChartTab::default(),
            model,
            estimate,
            status_message: None,
            should_quit: false,
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    /// Re-run the estimate; called after every input change.
    pub fn refresh(&mut self) {
        self.estimate = estimate::estimate(self.model.model(), &self.ride);
    }

    pub fn next_field(&mut self) {
        self.selected_field = self.selected_field.next();
    }

    pub fn previous_field(&mut self) {
        self.selected_field = self.selected_field.previous();
    }

    /// Nudge the selected field by `steps` slider steps (negative = down).
    pub fn adjust(&mut self, steps: i32) {
        self.selected_field.adjust(&mut self.ride, steps);
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.ride = RideInput::default();
        self.refresh();
        self.set_status("Inputs reset to defaults");
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
    }
}

/// Chart tabs under the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Distance,
    Time,
    Payment,
}

impl ChartTab {
    pub fn next(self) -> Self {
        match self {
            ChartTab::Distance => ChartTab::Time,
            ChartTab::Time => ChartTab::Payment,
            ChartTab::Payment => ChartTab::Distance,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ChartTab::Distance => ChartTab::Payment,
            ChartTab::Time => ChartTab::Distance,
            ChartTab::Payment => ChartTab::Time,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => ChartTab::Time,
            3 => ChartTab::Payment,
            _ => ChartTab::Distance,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ChartTab::Distance => 0,
            ChartTab::Time => 1,
            ChartTab::Payment => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartTab::Distance => "Fare by Distance",
            ChartTab::Time => "Fare by Time",
            ChartTab::Payment => "Payment Types",
        }
    }

    pub fn all() -> &'static [ChartTab] {
        &[ChartTab::Distance, ChartTab::Time, ChartTab::Payment]
    }
}

/// One row of the sidebar form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Passengers,
    Duration,
    Payment,
    TripKind,
    Day,
    Hour,
    BaseFare,
    Extra,
    MtaTax,
    Tip,
    Tolls,
    Improvement,
    Congestion,
}

const DOLLAR_STEP: f64 = 0.1;

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Distance,
            Field::Passengers,
            Field::Duration,
            Field::Payment,
            Field::TripKind,
            Field::Day,
            Field::Hour,
            Field::BaseFare,
            Field::Extra,
            Field::MtaTax,
            Field::Tip,
            Field::Tolls,
            Field::Improvement,
            Field::Congestion,
        ]
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Distance => "Trip Distance (miles)",
            Field::Passengers => "Number of Passengers",
            Field::Duration => "Trip Duration (minutes)",
            Field::Payment => "Payment Type",
            Field::TripKind => "Trip Type",
            Field::Day => "Day of the Week",
            Field::Hour => "Hour of the Day (24h)",
            Field::BaseFare => "Base Fare Amount ($)",
            Field::Extra => "Extra Charges ($)",
            Field::MtaTax => "MTA Tax ($)",
            Field::Tip => "Tip Amount ($)",
            Field::Tolls => "Tolls Amount ($)",
            Field::Improvement => "Improvement Surcharge ($)",
            Field::Congestion => "Congestion Surcharge ($)",
        }
    }

    /// First fee row; the sidebar puts a heading above it.
    pub fn starts_charges(self) -> bool {
        self == Field::BaseFare
    }

    pub fn display(self, ride: &RideInput) -> String {
        match self {
            Field::Distance => format!("{:.1}", ride.trip_distance),
            Field::Passengers => ride.passenger_count.to_string(),
            Field::Duration => ride.trip_duration.to_string(),
            Field::Payment => ride.payment_type.label().to_string(),
            Field::TripKind => ride.trip_type.label().to_string(),
            Field::Day => ride.weekday.name().to_string(),
            Field::Hour => ride.hour.to_string(),
            Field::BaseFare => format!("{:.2}", ride.fare_amount),
            Field::Extra => format!("{:.2}", ride.extra),
            Field::MtaTax => format!("{:.2}", ride.mta_tax),
            Field::Tip => format!("{:.2}", ride.tip_amount),
            Field::Tolls => format!("{:.2}", ride.tolls_amount),
            Field::Improvement => format!("{:.2}", ride.improvement_surcharge),
            Field::Congestion => format!("{:.2}", ride.congestion_surcharge),
        }
    }

    /// Move by `steps` slider steps, clamped to the field's range.
    /// Selections cycle instead.
    pub fn adjust(self, ride: &mut RideInput, steps: i32) {
        match self {
            Field::Distance => step_f64(&mut ride.trip_distance, steps, 0.1, DISTANCE_RANGE),
            Field::Passengers => {
                let (min, max) = PASSENGER_RANGE;
                ride.passenger_count =
                    step_int(ride.passenger_count as i64, steps, min as i64, max as i64) as u8;
            }
            Field::Duration => {
                let (min, max) = DURATION_RANGE;
                ride.trip_duration =
                    step_int(ride.trip_duration as i64, steps, min as i64, max as i64) as u32;
            }
            Field::Hour => {
                let (min, max) = HOUR_RANGE;
                ride.hour = step_int(ride.hour as i64, steps, min as i64, max as i64) as u8;
            }
            Field::Payment => {
                for _ in 0..steps.unsigned_abs() {
                    ride.payment_type = if steps > 0 {
                        ride.payment_type.next()
                    } else {
                        ride.payment_type.previous()
                    };
                }
            }
            Field::TripKind => {
                if steps % 2 != 0 {
                    ride.trip_type = ride.trip_type.toggle();
                }
            }
            Field::Day => {
                for _ in 0..steps.unsigned_abs() {
                    ride.weekday = if steps > 0 {
                        ride.weekday.next()
                    } else {
                        ride.weekday.previous()
                    };
                }
            }
            Field::BaseFare => {
                step_f64(&mut ride.fare_amount, steps, DOLLAR_STEP, BASE_FARE_RANGE)
            }
            Field::Extra => step_f64(&mut ride.extra, steps, DOLLAR_STEP, EXTRA_RANGE),
            Field::MtaTax => step_f64(&mut ride.mta_tax, steps, DOLLAR_STEP, MTA_TAX_RANGE),
            Field::Tip => step_f64(&mut ride.tip_amount, steps, DOLLAR_STEP, TIP_RANGE),
            Field::Tolls => step_f64(&mut ride.tolls_amount, steps, DOLLAR_STEP, TOLLS_RANGE),
            Field::Improvement => step_f64(
                &mut ride.improvement_surcharge,
                steps,
                DOLLAR_STEP,
                IMPROVEMENT_RANGE,
            ),
            Field::Congestion => step_f64(
                &mut ride.congestion_surcharge,
                steps,
                DOLLAR_STEP,
                CONGESTION_RANGE,
            ),
        }
    }
}

fn step_f64(value: &mut f64, steps: i32, step: f64, (min, max): (f64, f64)) {
    let next = *value + steps as f64 * step;
    // keep to cents so repeated steps do not drift
    *value = ((next * 100.0).round() / 100.0).clamp(min, max);
}

fn step_int(value: i64, steps: i32, min: i64, max: i64) -> i64 {
    (value + steps as i64).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{EstimateSource, Notice};

    fn app() -> App {
        App::new(ModelState::formula_only(Notice::warning("no model")))
    }

    #[test]
    fn starts_with_default_estimate() {
        let app = app();
        assert_eq!(app.estimate.source, EstimateSource::Formula);
        assert!((app.estimate.total - 17.30).abs() < 1e-9);
    }

    #[test]
    fn adjusting_distance_updates_estimate() {
        let mut app = app();
        app.adjust(10); // +1.0 mile
        assert!((app.ride.trip_distance - 3.5).abs() < 1e-9);
        assert!((app.estimate.total - 19.80).abs() < 1e-9);
    }

    #[test]
    fn numeric_fields_clamp_at_range_ends() {
        let mut ride = RideInput::default();
        Field::Distance.adjust(&mut ride, -1000);
        assert_eq!(ride.trip_distance, 0.1);
        Field::Distance.adjust(&mut ride, 1000);
        assert_eq!(ride.trip_distance, 30.0);
        Field::Passengers.adjust(&mut ride, 99);
        assert_eq!(ride.passenger_count, 6);
        Field::Hour.adjust(&mut ride, -99);
        assert_eq!(ride.hour, 0);
        Field::BaseFare.adjust(&mut ride, -5);
        assert_eq!(ride.fare_amount, 2.5);
        assert!(ride.validate().is_ok());
    }

    #[test]
    fn repeated_steps_do_not_drift() {
        let mut ride = RideInput::default();
        for _ in 0..7 {
            Field::Tip.adjust(&mut ride, 1);
        }
        assert_eq!(ride.tip_amount, 0.7);
    }

    #[test]
    fn selections_cycle() {
        let mut ride = RideInput::default();
        Field::Payment.adjust(&mut ride, -1);
        assert_eq!(ride.payment_type, PaymentType::Unknown);
        Field::TripKind.adjust(&mut ride, 1);
        assert_eq!(ride.trip_type, TripType::Dispatch);
        Field::Day.adjust(&mut ride, 4);
        assert_eq!(ride.weekday, Weekday::Friday);
    }

    #[test]
    fn field_navigation_wraps() {
        assert_eq!(Field::Congestion.next(), Field::Distance);
        assert_eq!(Field::Distance.previous(), Field::Congestion);
        assert_eq!(ChartTab::Payment.next(), ChartTab::Distance);
        assert_eq!(ChartTab::from_num(2), ChartTab::Time);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut app = app();
        app.selected_field = Field::Tolls;
        app.adjust(50);
        app.reset();
        assert_eq!(app.ride, RideInput::default());
        assert!(app.status_message.is_some());
    }
}
