use brevet_core::format_time;
use brevet_times::{ControlSchedule, SpeedBracket};
use chrono::{DateTime, FixedOffset};
use colored::Colorize;
use serde::Serialize;

/// Machine-readable result of `brevet times`.
#[derive(Debug, Serialize)]
pub struct TimesReport {
    pub control_km: f64,
    pub brevet_km: f64,
    pub open: DateTime<FixedOffset>,
    pub close: DateTime<FixedOffset>,
}

pub fn print_times(report: &TimesReport) {
    println!(
        "{} {} km on a {} km brevet",
        "✔ Control".green().bold(),
        trim_km(report.control_km),
        trim_km(report.brevet_km)
    );
    println!("  Open:  {}", format_time(&report.open));
    println!("  Close: {}", format_time(&report.close));
}

pub fn print_schedule(schedule: &ControlSchedule) {
    println!(
        "{} {} starting {}",
        "✔ Schedule for".green().bold(),
        schedule.brevet.to_string().bold(),
        format_time(&schedule.start)
    );
    println!(
        "  {:>3}  {:>9}  {:<25}  {:<25}  {}",
        "#", "km", "open", "close", "control"
    );
    for (index, control) in schedule.controls.iter().enumerate() {
        let label = match (&control.name, &control.location) {
            (Some(name), Some(location)) => format!("{name} ({location})"),
            (Some(name), None) => name.clone(),
            (None, Some(location)) => location.clone(),
            (None, None) => String::new(),
        };
        println!(
            "  {:>3}  {:>9.1}  {:<25}  {:<25}  {}",
            index + 1,
            control.distance_km,
            format_time(&control.open),
            format_time(&control.close),
            label
        );
    }
    if !schedule.has_finish() {
        println!(
            "{}",
            "⚠ last control is short of the nominal distance".yellow()
        );
    }
}

pub fn print_brackets(brackets: &[SpeedBracket]) {
    println!("{}", "ACP speed brackets".green().bold());
    println!("  {:<14}  {:>10}  {:>10}", "range (km)", "max km/h", "min km/h");
    for bracket in brackets {
        let range = match bracket.upper_km {
            Some(upper) => format!("{}-{}", trim_km(bracket.lower_km), trim_km(upper)),
            None => format!("{}+", trim_km(bracket.lower_km)),
        };
        println!(
            "  {:<14}  {:>10}  {:>10}",
            range, bracket.max_speed, bracket.min_speed
        );
    }
}

fn trim_km(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
