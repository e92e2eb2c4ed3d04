//! Brevet: control opening and closing times for ACP-sanctioned brevets.
//!
//! The workspace is split into several crates:
//!
//! * `brevet-times`: the calculator, bracket tables, plans and schedules
//! * `brevet-core`: shared errors, configuration, logging and time parsing
//! * `brevet-cli`: the `brevet` command-line tool
//! * `brevet-service`: the HTTP API
//!
//! This crate re-exports the commonly used items of the first two.

pub use brevet_core::{format_time, parse_offset, parse_start_time, BrevetError, CoreConfig};
pub use brevet_times::{
    brackets, close_time, control_window, load_plan, open_time, parse_plan, BrevetDistance,
    BrevetPlan, ControlPoint, ControlSchedule, ControlWindow, DistanceUnit, ScheduleError,
    ScheduledControl, SpeedBracket, TimeError,
};

/// Computes the window of a control given as text inputs, the way web forms submit them.
pub fn window_from_input(
    control_km: f64,
    brevet_km: f64,
    begin_date: &str,
    default_offset: chrono::FixedOffset,
) -> Result<ControlWindow<chrono::FixedOffset>, BrevetError> {
    let start = parse_start_time(begin_date, default_offset)?;
    control_window(control_km, brevet_km, &start)
        .map_err(|err| BrevetError::CalculationError(err.to_string()))
}
