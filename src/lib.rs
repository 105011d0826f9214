//! NYC green taxi fare estimator.
//!
//! A ride's attributes are one-hot encoded and fed to a pre-trained
//! regression model when one can be loaded; otherwise the fare comes from a
//! fixed per-mile/per-minute formula. The same path backs the terminal form,
//! the one-shot CLI and the HTTP service.

pub mod charts;
pub mod config;
pub mod error;
pub mod estimate;
pub mod features;
pub mod model;
pub mod report;
pub mod server;
pub mod tui;
pub mod types;

pub use error::{FareError, Result};
pub use estimate::{estimate, formula_total, EstimateSource, FareEstimate};
pub use features::FeatureRecord;
pub use model::{load_model, FareModel, ModelState};
pub use types::{PaymentType, RideInput, TripType, Weekday};
