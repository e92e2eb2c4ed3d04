use serde::Serialize;

/// Distance bracket with the ACP speed limits that apply inside it.
///
/// Brackets are upper-inclusive: a control at exactly 200 km is timed
/// entirely with the 0-200 km speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedBracket {
    pub lower_km: f64,
    /// `None` for the open-ended last bracket.
    pub upper_km: Option<f64>,
    /// Maximum average speed in km/h, used for opening times.
    pub max_speed: f64,
    /// Minimum average speed in km/h, used for closing times.
    pub min_speed: f64,
}

pub(crate) struct Leg {
    pub upper_km: f64,
    pub speed: f64,
}

pub(crate) static OPEN_LEGS: [Leg; 5] = [
    Leg { upper_km: 200.0, speed: 34.0 },
    Leg { upper_km: 400.0, speed: 32.0 },
    Leg { upper_km: 600.0, speed: 30.0 },
    Leg { upper_km: 1000.0, speed: 28.0 },
    Leg { upper_km: f64::INFINITY, speed: 26.0 },
];

pub(crate) static CLOSE_LEGS: [Leg; 5] = [
    Leg { upper_km: 200.0, speed: 15.0 },
    Leg { upper_km: 400.0, speed: 15.0 },
    Leg { upper_km: 600.0, speed: 15.0 },
    Leg { upper_km: 1000.0, speed: 11.428 },
    Leg { upper_km: f64::INFINITY, speed: 13.333 },
];

/// Read-only view of the bracket table.
pub fn brackets() -> Vec<SpeedBracket> {
    let mut lower_km = 0.0;
    OPEN_LEGS
        .iter()
        .zip(CLOSE_LEGS.iter())
        .map(|(open, close)| {
            let bracket = SpeedBracket {
                lower_km,
                upper_km: open.upper_km.is_finite().then_some(open.upper_km),
                max_speed: open.speed,
                min_speed: close.speed,
            };
            lower_km = open.upper_km;
            bracket
        })
        .collect()
}

/// Elapsed minutes to ride `distance_km` when every bracket is covered at
/// its leg speed. Not rounded.
pub(crate) fn elapsed_minutes(legs: &[Leg], distance_km: f64) -> f64 {
    let mut lower_km = 0.0;
    let mut minutes = 0.0;
    for leg in legs {
        if distance_km <= lower_km {
            break;
        }
        let covered = distance_km.min(leg.upper_km) - lower_km;
        minutes += covered * 60.0 / leg.speed;
        lower_km = leg.upper_km;
    }
    minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_tables_share_bounds() {
        for (open, close) in OPEN_LEGS.iter().zip(CLOSE_LEGS.iter()) {
            assert_eq!(open.upper_km, close.upper_km);
        }
    }

    #[test]
    fn exposes_five_contiguous_brackets() {
        let table = brackets();
        assert_eq!(table.len(), 5);
        assert_eq!(table[0].lower_km, 0.0);
        assert_eq!(table[3].upper_km, Some(1000.0));
        assert_eq!(table[3].min_speed, 11.428);
        assert_eq!(table[4].lower_km, 1000.0);
        assert_eq!(table[4].upper_km, None);
    }

    #[test]
    fn walks_brackets_cumulatively() {
        // 200 km at 34 km/h, then 100 km at 32 km/h.
        let minutes = elapsed_minutes(&OPEN_LEGS, 300.0);
        let expected = 200.0 * 60.0 / 34.0 + 100.0 * 60.0 / 32.0;
        assert!((minutes - expected).abs() < 1e-9);
        assert_eq!(elapsed_minutes(&CLOSE_LEGS, 0.0), 0.0);
    }
}
