//! Control opening and closing times for ACP-sanctioned brevets.
//!
//! The calculator follows the published ACP speed brackets: opening times
//! assume the maximum speed of each bracket, closing times the minimum speed,
//! with special rules for the start control, controls within the first 60 km
//! and the finish. On top of the two core functions the crate offers typed
//! brevet classes, plan documents (YAML/JSON) and validated control schedules.

mod bracket;
mod calculator;
mod distance;
mod error;
mod plan;
mod schedule;

pub use bracket::{brackets, SpeedBracket};
pub use calculator::{close_time, control_window, open_time, ControlWindow};
pub use distance::{BrevetDistance, DistanceUnit, KM_PER_MILE};
pub use error::{ScheduleError, TimeError};
pub use plan::{load_plan, parse_plan, BrevetPlan, ControlPoint};
pub use schedule::{ControlSchedule, ScheduledControl, MAX_OVERSHOOT_RATIO};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn first_gate() {
        let start = Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap();
        let expected_close = Utc.with_ymd_and_hms(2021, 5, 1, 1, 0, 0).unwrap();

        assert_eq!(open_time(0.0, 200.0, &start).unwrap(), start);
        assert_eq!(close_time(0.0, 200.0, &start).unwrap(), expected_close);
    }
}
