use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Kilometres per statute mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Official ACP brevet distance classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum BrevetDistance {
    Km200,
    Km300,
    Km400,
    Km600,
    Km1000,
}

impl BrevetDistance {
    pub const ALL: [BrevetDistance; 5] = [
        BrevetDistance::Km200,
        BrevetDistance::Km300,
        BrevetDistance::Km400,
        BrevetDistance::Km600,
        BrevetDistance::Km1000,
    ];

    /// Nominal length in kilometres.
    pub fn km(self) -> f64 {
        match self {
            BrevetDistance::Km200 => 200.0,
            BrevetDistance::Km300 => 300.0,
            BrevetDistance::Km400 => 400.0,
            BrevetDistance::Km600 => 600.0,
            BrevetDistance::Km1000 => 1000.0,
        }
    }

    /// Overall time limit, used as the close time of the finish control.
    pub fn final_allowance(self) -> Duration {
        let (hours, minutes) = match self {
            BrevetDistance::Km200 => (13, 30),
            BrevetDistance::Km300 => (20, 0),
            BrevetDistance::Km400 => (27, 0),
            BrevetDistance::Km600 => (40, 0),
            BrevetDistance::Km1000 => (75, 0),
        };
        Duration::hours(hours) + Duration::minutes(minutes)
    }

    /// Exact match against the nominal distances; anything else is `None`.
    pub fn from_km(km: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.km() == km)
    }
}

impl TryFrom<f64> for BrevetDistance {
    type Error = TimeError;

    fn try_from(km: f64) -> Result<Self, Self::Error> {
        Self::from_km(km).ok_or(TimeError::UnsupportedBrevetDistance(km))
    }
}

impl From<BrevetDistance> for f64 {
    fn from(value: BrevetDistance) -> Self {
        value.km()
    }
}

impl FromStr for BrevetDistance {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches("km").trim();
        let km = trimmed
            .parse::<f64>()
            .map_err(|_| TimeError::UnsupportedBrevetDistance(f64::NAN))?;
        Self::try_from(km)
    }
}

impl fmt::Display for BrevetDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km())
    }
}

/// Unit in which control distances are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    #[serde(alias = "kilometers", alias = "kilometres")]
    Km,
    #[serde(alias = "mi")]
    Miles,
}

impl DistanceUnit {
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Km => value,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Km),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(format!("unknown distance unit: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowances_match_acp_limits() {
        let hours: Vec<i64> = BrevetDistance::ALL
            .iter()
            .map(|class| class.final_allowance().num_minutes())
            .collect();
        assert_eq!(hours, vec![810, 1200, 1620, 2400, 4500]);
    }

    #[test]
    fn rejects_non_nominal_distances() {
        assert_eq!(BrevetDistance::from_km(600.0), Some(BrevetDistance::Km600));
        assert_eq!(
            BrevetDistance::try_from(250.0),
            Err(TimeError::UnsupportedBrevetDistance(250.0))
        );
        assert!("1200".parse::<BrevetDistance>().is_err());
        assert_eq!("400km".parse::<BrevetDistance>().unwrap(), BrevetDistance::Km400);
    }

    #[test]
    fn converts_miles() {
        let km = DistanceUnit::Miles.to_km(100.0);
        assert!((km - 160.9344).abs() < 1e-9);
        assert_eq!(DistanceUnit::Km.to_km(42.0), 42.0);
        assert_eq!("MI".parse::<DistanceUnit>(), Ok(DistanceUnit::Miles));
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&BrevetDistance::Km300).unwrap();
        assert_eq!(json, "300.0");
        let parsed: BrevetDistance = serde_json::from_str("1000").unwrap();
        assert_eq!(parsed, BrevetDistance::Km1000);
        assert!(serde_json::from_str::<BrevetDistance>("250").is_err());
    }
}
