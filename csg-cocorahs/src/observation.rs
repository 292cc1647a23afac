use crate::{clean_token, error::InputError, Measure};
use chrono::NaiveDateTime;
use csg_utils::dates::parse_observation_date;
use serde::{Deserialize, Deserializer, Serialize};

/// One daily report row exactly as the source supplied it.
///
/// Every field is kept as a token; numbers and `null` in JSON reports are
/// normalized to their textual form (`null` becomes the empty token).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "ObservationDate", default, deserialize_with = "token")]
    pub observation_date: String,
    #[serde(rename = "TotalPrecipAmt", default, deserialize_with = "token")]
    pub total_precip_amt: String,
    #[serde(rename = "NewSnowDepth", default, deserialize_with = "token")]
    pub new_snow_depth: String,
    #[serde(rename = "TotalSnowDepth", default, deserialize_with = "token")]
    pub total_snow_depth: String,
}

fn token<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// A cleaned daily observation: every measure finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDateTime,
    pub total_precip_amt: f64,
    pub new_snow_depth: f64,
    pub total_snow_depth: f64,
}

impl Observation {
    /// Value of one measure for this day.
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::TotalPrecipAmt => self.total_precip_amt,
            Measure::NewSnowDepth => self.new_snow_depth,
            Measure::TotalSnowDepth => self.total_snow_depth,
        }
    }

    /// Sort observations ascending by date. Stable: same-day rows keep
    /// their input order.
    pub fn sort_by_date(observations: &mut [Observation]) {
        observations.sort_by(|a, b| a.date.cmp(&b.date));
    }
}

impl TryFrom<RawObservation> for Observation {
    type Error = InputError;

    fn try_from(value: RawObservation) -> Result<Self, Self::Error> {
        let date = parse_observation_date(&value.observation_date)
            .map_err(|_| InputError::UnparsableDate(value.observation_date.clone()))?;
        Ok(Observation {
            date,
            total_precip_amt: clean_token(&value.total_precip_amt),
            new_snow_depth: clean_token(&value.new_snow_depth),
            total_snow_depth: clean_token(&value.total_snow_depth),
        })
    }
}
