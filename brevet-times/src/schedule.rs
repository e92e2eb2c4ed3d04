use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::control_window;
use crate::distance::BrevetDistance;
use crate::error::ScheduleError;
use crate::plan::BrevetPlan;

/// ACP rules allow a final control up to 20% beyond the nominal distance.
pub const MAX_OVERSHOOT_RATIO: f64 = 1.2;

/// Computed window for one control of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledControl {
    /// Distance as entered, in the plan's unit.
    pub distance: f64,
    pub distance_km: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub open: DateTime<FixedOffset>,
    pub close: DateTime<FixedOffset>,
}

/// Full control schedule of a brevet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSchedule {
    pub brevet: BrevetDistance,
    pub start: DateTime<FixedOffset>,
    pub controls: Vec<ScheduledControl>,
}

impl ControlSchedule {
    /// Validates a plan and computes every control window.
    pub fn build(plan: &BrevetPlan) -> Result<Self, ScheduleError> {
        let brevet = BrevetDistance::try_from(plan.distance_km)?;
        if plan.controls.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let limit_km = brevet.km() * MAX_OVERSHOOT_RATIO;
        let mut previous_km: Option<f64> = None;
        let mut controls = Vec::with_capacity(plan.controls.len());

        for (index, point) in plan.controls.iter().enumerate() {
            let distance_km = plan.unit.to_km(point.distance);

            if let Some(previous_km) = previous_km {
                if distance_km <= previous_km {
                    return Err(ScheduleError::NotAscending {
                        index,
                        distance_km,
                        previous_km,
                    });
                }
            }
            if distance_km > limit_km {
                return Err(ScheduleError::TooFarBeyondFinish {
                    index,
                    distance_km,
                    brevet_km: brevet.km(),
                });
            }

            let window = control_window(distance_km, brevet.km(), &plan.start)
                .map_err(|source| ScheduleError::Control { index, source })?;
            controls.push(ScheduledControl {
                distance: point.distance,
                distance_km,
                name: point.name.clone(),
                location: point.location.clone(),
                open: window.open,
                close: window.close,
            });
            previous_km = Some(distance_km);
        }

        debug!(brevet = %brevet, controls = controls.len(), "built control schedule");
        Ok(Self {
            brevet,
            start: plan.start,
            controls,
        })
    }

    /// Whether the last control sits at or past the nominal distance.
    pub fn has_finish(&self) -> bool {
        self.controls
            .last()
            .map(|control| control.distance_km >= self.brevet.km())
            .unwrap_or(false)
    }
}
