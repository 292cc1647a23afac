pub mod error;
pub mod observation;
pub mod report;
use serde::{Deserialize, Serialize};

pub use error::{InputError, NumericError, Result, StreamError};
pub use observation::{Observation, RawObservation};

/// Token CoCoRaHS uses for a measurable-but-tiny amount ("trace").
pub const TRACE_MARKER: &str = "T";

/// Token CoCoRaHS uses for a missing measurement.
pub const MISSING_MARKER: &str = "NA";

/// Amount substituted for a trace reading.
pub const TRACE_AMOUNT: f64 = 0.1;

/// Amount substituted for a missing or unreadable reading.
pub const MISSING_AMOUNT: f64 = 0.0;

/// Represents one measure token from a CoCoRaHS report.
/// - `Trace`: below the gauge's detection threshold ("T")
/// - `Missing`: "NA", empty, or a token that does not parse as an amount
/// - `Value(f64)`: an actual measurement in inches
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Reading {
    Trace,
    Missing,
    Value(f64),
}

impl Reading {
    /// Classify a raw token. Never fails: anything unreadable is `Missing`.
    pub fn from_token(token: &str) -> Reading {
        match token.trim() {
            TRACE_MARKER => Reading::Trace,
            "" | MISSING_MARKER => Reading::Missing,
            s => match s.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Reading::Value(v),
                _ => Reading::Missing,
            },
        }
    }

    /// The cleaned amount: finite and non-negative.
    pub fn amount(&self) -> f64 {
        match self {
            Reading::Trace => TRACE_AMOUNT,
            Reading::Missing => MISSING_AMOUNT,
            Reading::Value(v) => *v,
        }
    }
}

/// Clean a raw measure token straight to its amount.
pub fn clean_token(token: &str) -> f64 {
    Reading::from_token(token).amount()
}

/// The three measures of a daily report, in stacking order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Measure {
    TotalPrecipAmt,
    NewSnowDepth,
    TotalSnowDepth,
}

impl Measure {
    /// Every measure in declared (stacking) order.
    pub const ALL: [Measure; 3] = [
        Measure::TotalPrecipAmt,
        Measure::NewSnowDepth,
        Measure::TotalSnowDepth,
    ];

    /// Column / key name in CoCoRaHS exports.
    pub fn column(&self) -> &'static str {
        match self {
            Measure::TotalPrecipAmt => "TotalPrecipAmt",
            Measure::NewSnowDepth => "NewSnowDepth",
            Measure::TotalSnowDepth => "TotalSnowDepth",
        }
    }

    /// Display label used for the rendered band.
    pub fn label(&self) -> &'static str {
        match self {
            Measure::TotalPrecipAmt => "Total Precipitation",
            Measure::NewSnowDepth => "Snow Depth",
            Measure::TotalSnowDepth => "Total Snow Depth",
        }
    }
}
