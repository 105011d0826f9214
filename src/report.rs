//! One estimate plus everything shown around it, as text or JSON.

use std::fmt::Write;

use serde::Serialize;

use crate::charts::{DISCLAIMER, TIPS};
use crate::estimate::{self, dollars, BreakdownLine, EstimateSource, Notice, NoticeLevel};
use crate::model::ModelState;
use crate::types::RideInput;

pub const TITLE: &str = "NYC Green Taxi Fare Predictor";
pub const SUBTITLE: &str = "This app predicts the total fare amount for NYC green taxi rides \
                            based on a Multiple Linear Regression model";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub total: f64,
    pub label: &'static str,
    pub source: EstimateSource,
    pub notices: Vec<Notice>,
    pub breakdown: Vec<BreakdownLine>,
}

impl EstimateReport {
    /// Load notice first, then whatever the estimate itself reported.
    pub fn build(state: &ModelState, ride: &RideInput) -> Self {
        let est = estimate::estimate(state.model(), ride);
        let mut notices = vec![state.notice.clone()];
        notices.extend(est.notices.iter().cloned());
        Self {
            total: est.total,
            label: est.label(),
            source: est.source,
            notices,
            breakdown: estimate::breakdown(ride),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", TITLE);
        let _ = writeln!(out, "{}", SUBTITLE);
        let _ = writeln!(out);
        for n in &self.notices {
            let tag = match n.level {
                NoticeLevel::Success => "ok",
                NoticeLevel::Warning => "warning",
                NoticeLevel::Error => "error",
            };
            let _ = writeln!(out, "[{}] {}", tag, n.message);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}: {}", self.label, dollars(self.total));
        let _ = writeln!(out);
        let _ = writeln!(out, "Fare Breakdown");
        for line in &self.breakdown {
            let _ = writeln!(out, "  {}: {}", line.item, dollars(line.amount));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Tips for Taxi Users");
        for tip in TIPS {
            let _ = writeln!(out, "  • {}", tip);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", DISCLAIMER);
        out
    }
}
