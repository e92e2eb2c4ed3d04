//! Opening and closing times for ACP brevet controls.
//!
//! Both functions are pure: the result depends only on the control distance,
//! the brevet distance and the start time. Elapsed time is accumulated over
//! the bracket table as a real number of minutes and rounded once, half away
//! from zero, before it is added to the start time.

use chrono::{DateTime, Duration, TimeZone};
use tracing::debug;

use crate::bracket::{elapsed_minutes, CLOSE_LEGS, OPEN_LEGS};
use crate::distance::BrevetDistance;
use crate::error::TimeError;

/// Controls up to this distance close on the short-control rule.
const SHORT_CONTROL_KM: f64 = 60.0;
/// Speed used by the short-control rule, in km/h.
const SHORT_CONTROL_SPEED: f64 = 20.0;
/// Grace period of the first control and of the short-control rule.
const GRACE_MINUTES: f64 = 60.0;

/// Earliest time a rider may be credited at a control.
pub fn open_time<Tz: TimeZone>(
    control_km: f64,
    brevet_km: f64,
    start: &DateTime<Tz>,
) -> Result<DateTime<Tz>, TimeError> {
    validate(control_km, brevet_km)?;
    if control_km == 0.0 {
        return Ok(start.clone());
    }

    let minutes = elapsed_minutes(&OPEN_LEGS, control_km);
    debug!(control_km, brevet_km, minutes, "computed open offset");
    shift(start, minutes, control_km)
}

/// Latest time a rider may be credited at a control.
pub fn close_time<Tz: TimeZone>(
    control_km: f64,
    brevet_km: f64,
    start: &DateTime<Tz>,
) -> Result<DateTime<Tz>, TimeError> {
    validate(control_km, brevet_km)?;
    if control_km == 0.0 {
        return shift(start, GRACE_MINUTES, control_km);
    }

    if control_km >= brevet_km {
        let class = BrevetDistance::try_from(brevet_km)?;
        debug!(control_km, brevet_km, "finish control uses the overall limit");
        return start
            .clone()
            .checked_add_signed(class.final_allowance())
            .ok_or(TimeError::OutOfRange(control_km));
    }

    let minutes = if control_km <= SHORT_CONTROL_KM {
        GRACE_MINUTES + control_km * 60.0 / SHORT_CONTROL_SPEED
    } else {
        elapsed_minutes(&CLOSE_LEGS, control_km)
    };
    debug!(control_km, brevet_km, minutes, "computed close offset");
    shift(start, minutes, control_km)
}

/// Opening and closing time of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlWindow<Tz: TimeZone> {
    pub open: DateTime<Tz>,
    pub close: DateTime<Tz>,
}

/// Computes both bounds of a control in one call.
pub fn control_window<Tz: TimeZone>(
    control_km: f64,
    brevet_km: f64,
    start: &DateTime<Tz>,
) -> Result<ControlWindow<Tz>, TimeError> {
    Ok(ControlWindow {
        open: open_time(control_km, brevet_km, start)?,
        close: close_time(control_km, brevet_km, start)?,
    })
}

fn validate(control_km: f64, brevet_km: f64) -> Result<(), TimeError> {
    if !(control_km.is_finite() && control_km >= 0.0) {
        return Err(TimeError::InvalidDistance(control_km));
    }
    // Non-finite brevets never reach the finish rule.
    if !brevet_km.is_finite() {
        return Err(TimeError::UnsupportedBrevetDistance(brevet_km));
    }
    Ok(())
}

fn shift<Tz: TimeZone>(
    start: &DateTime<Tz>,
    minutes: f64,
    control_km: f64,
) -> Result<DateTime<Tz>, TimeError> {
    let rounded = minutes.round();
    if !rounded.is_finite() || rounded > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(control_km));
    }
    let total = rounded as i64;
    let offset = Duration::try_hours(total / 60)
        .zip(Duration::try_minutes(total % 60))
        .map(|(hours, minutes)| hours + minutes)
        .ok_or(TimeError::OutOfRange(control_km))?;
    start
        .clone()
        .checked_add_signed(offset)
        .ok_or(TimeError::OutOfRange(control_km))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use test_case::test_case;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap()
    }

    fn offset_minutes(result: DateTime<Utc>) -> i64 {
        (result - start()).num_minutes()
    }

    #[test_case(60.0, 200.0 => 106; "first bracket")]
    #[test_case(175.0, 200.0 => 309; "late first bracket")]
    #[test_case(200.0, 200.0 => 353; "first bracket boundary")]
    #[test_case(350.0, 400.0 => 634; "second bracket")]
    #[test_case(550.0, 600.0 => 1028; "third bracket")]
    #[test_case(890.0, 1000.0 => 1749; "fourth bracket")]
    #[test_case(1000.0, 1000.0 => 1985; "full thousand")]
    #[test_case(1200.0, 1000.0 => 2447; "beyond the last boundary")]
    fn open_offsets(control_km: f64, brevet_km: f64) -> i64 {
        offset_minutes(open_time(control_km, brevet_km, &start()).unwrap())
    }

    #[test_case(30.0, 200.0 => 150; "short control")]
    #[test_case(60.0, 200.0 => 240; "short control limit")]
    #[test_case(61.0, 200.0 => 244; "first general control")]
    #[test_case(200.0, 300.0 => 800; "intermediate at 200")]
    #[test_case(550.0, 600.0 => 2200; "third bracket")]
    #[test_case(700.0, 1000.0 => 2925; "slow bracket")]
    #[test_case(890.0, 1000.0 => 3923; "deep slow bracket")]
    #[test_case(999.0, 1000.0 => 4495; "just before the finish")]
    fn close_offsets(control_km: f64, brevet_km: f64) -> i64 {
        offset_minutes(close_time(control_km, brevet_km, &start()).unwrap())
    }

    #[test_case(200.0 => 810)]
    #[test_case(300.0 => 1200)]
    #[test_case(400.0 => 1620)]
    #[test_case(600.0 => 2400)]
    #[test_case(1000.0 => 4500)]
    fn finish_control_uses_overall_limit(brevet_km: f64) -> i64 {
        offset_minutes(close_time(brevet_km, brevet_km, &start()).unwrap())
    }

    #[test]
    fn start_control_bounds() {
        assert_eq!(open_time(0.0, 200.0, &start()).unwrap(), start());
        assert_eq!(offset_minutes(close_time(0.0, 200.0, &start()).unwrap()), 60);
    }

    #[test]
    fn control_past_finish_closes_with_finish() {
        let finish = close_time(200.0, 200.0, &start()).unwrap();
        assert_eq!(close_time(240.0, 200.0, &start()).unwrap(), finish);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 60 + 1.5 * 3 = 64.5 minutes.
        assert_eq!(offset_minutes(close_time(1.5, 200.0, &start()).unwrap()), 65);
    }

    #[test]
    fn rounds_once_after_summing_brackets() {
        // 352.94 + 7.5 minutes: rounding each bracket would give 361.
        assert_eq!(offset_minutes(open_time(204.0, 300.0, &start()).unwrap()), 360);
    }

    #[test]
    fn rejects_negative_and_nan_distances() {
        assert_eq!(
            open_time(-1.0, 200.0, &start()),
            Err(TimeError::InvalidDistance(-1.0))
        );
        assert!(matches!(
            close_time(f64::NAN, 200.0, &start()),
            Err(TimeError::InvalidDistance(_))
        ));
    }

    #[test]
    fn finish_of_unknown_brevet_is_an_error() {
        assert_eq!(
            close_time(250.0, 250.0, &start()),
            Err(TimeError::UnsupportedBrevetDistance(250.0))
        );
        // Intermediate controls never need the class table.
        assert!(close_time(100.0, 250.0, &start()).is_ok());
    }

    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinite")]
    #[test_case(f64::NEG_INFINITY; "negative infinite")]
    fn non_finite_brevet_is_unsupported(brevet_km: f64) {
        assert!(matches!(
            close_time(5000.0, brevet_km, &start()),
            Err(TimeError::UnsupportedBrevetDistance(_))
        ));
        assert!(matches!(
            open_time(100.0, brevet_km, &start()),
            Err(TimeError::UnsupportedBrevetDistance(_))
        ));
    }

    #[test]
    fn preserves_time_zone() {
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let begin = pacific.with_ymd_and_hms(2021, 5, 1, 7, 0, 0).unwrap();
        let window = control_window(200.0, 200.0, &begin).unwrap();
        assert_eq!(window.open.offset(), &pacific);
        assert_eq!(window.open.to_rfc3339(), "2021-05-01T12:53:00-07:00");
        assert_eq!(window.close.to_rfc3339(), "2021-05-01T20:30:00-07:00");
    }

    #[test]
    fn out_of_range_offset_is_reported() {
        let late = DateTime::<Utc>::MAX_UTC;
        assert_eq!(
            close_time(0.0, 200.0, &late),
            Err(TimeError::OutOfRange(0.0))
        );
    }
}
