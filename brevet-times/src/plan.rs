use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceUnit;
use crate::error::ScheduleError;

/// A control as entered by the organiser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Distance from the start, in the plan's unit.
    pub distance: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ControlPoint {
    pub fn at(distance: f64) -> Self {
        Self {
            distance,
            name: None,
            location: None,
        }
    }
}

/// Declarative description of a brevet: its class, start and controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrevetPlan {
    /// Nominal brevet distance in kilometres.
    pub distance_km: f64,
    pub start: DateTime<FixedOffset>,
    /// Unit of the control distances. The brevet distance is always km.
    #[serde(default)]
    pub unit: DistanceUnit,
    pub controls: Vec<ControlPoint>,
}

/// Loads a plan from a YAML or JSON file.
pub fn load_plan(path: impl AsRef<Path>) -> Result<BrevetPlan, ScheduleError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScheduleError::MissingPath(path.display().to_string()));
    }

    let raw = fs::read_to_string(path).map_err(|err| ScheduleError::from_io(path, err))?;
    parse_plan(&raw).map_err(|message| ScheduleError::parse_error(path, message))
}

/// Parses a plan document. JSON is a subset of YAML, so one parser covers both.
pub fn parse_plan(raw: &str) -> Result<BrevetPlan, String> {
    serde_yaml::from_str::<BrevetPlan>(raw).map_err(|err| err.to_string())
}
