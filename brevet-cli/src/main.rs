use std::path::PathBuf;

use brevet_core::config::{load_core_config, CoreConfig};
use brevet_core::serde_utils::to_pretty_json;
use brevet_core::{logging, parse_offset, parse_start_time, BrevetError};
use brevet_times::{
    brackets, control_window, load_plan, ControlSchedule, DistanceUnit, ScheduleError, TimeError,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

mod output;

use output::{print_brackets, print_schedule, print_times, TimesReport};

#[derive(Parser)]
#[command(name = "brevet")]
#[command(about = "ACP brevet control opening and closing times", long_about = None)]
struct Cli {
    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the open and close time of a single control
    Times(TimesArgs),
    /// Compute every control window of a brevet plan file (YAML or JSON)
    Schedule(ScheduleArgs),
    /// Print the ACP speed bracket table
    Brackets,
    /// Show version information
    Version,
}

#[derive(Args)]
struct TimesArgs {
    /// Control distance from the start
    #[arg(long)]
    control: f64,
    /// Nominal brevet distance in km (200, 300, 400, 600 or 1000)
    #[arg(long)]
    brevet: f64,
    /// Brevet start time, RFC 3339 or `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    start: String,
    /// UTC offset for start times given without one
    #[arg(long, env = "BREVET_DEFAULT_OFFSET")]
    offset: Option<String>,
    /// Unit of the control distance
    #[arg(long, default_value = "km")]
    unit: DistanceUnit,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Path to the plan document
    plan: PathBuf,
    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] BrevetError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = load_core_config()?;

    let level = if cli.verbose {
        Some("debug")
    } else {
        config.log_level().or(Some("warn"))
    };
    if let Err(err) = logging::init_tracing(level) {
        eprintln!("⚠️ failed to initialise tracing: {err}");
    }

    match cli.command {
        Commands::Times(args) => run_times(args, &config),
        Commands::Schedule(args) => run_schedule(args),
        Commands::Brackets => {
            print_brackets(&brackets());
            Ok(())
        }
        Commands::Version => {
            println!("brevet v{}", env!("CARGO_PKG_VERSION"));
            println!("ACP control time calculator");
            Ok(())
        }
    }
}

fn run_times(args: TimesArgs, config: &CoreConfig) -> Result<(), CliError> {
    let offset = match args.offset.as_deref() {
        Some(raw) => parse_offset(raw)?,
        None => config.default_offset,
    };
    let start = parse_start_time(&args.start, offset)?;
    let control_km = args.unit.to_km(args.control);
    debug!(control_km, brevet_km = args.brevet, %start, "computing control window");

    let window = control_window(control_km, args.brevet, &start)?;
    let report = TimesReport {
        control_km,
        brevet_km: args.brevet,
        open: window.open,
        close: window.close,
    };

    if args.json {
        println!("{}", to_pretty_json(&report)?);
    } else {
        print_times(&report);
    }
    Ok(())
}

fn run_schedule(args: ScheduleArgs) -> Result<(), CliError> {
    let plan = load_plan(&args.plan)?;
    let schedule = ControlSchedule::build(&plan)?;

    if args.json {
        println!("{}", to_pretty_json(&schedule)?);
    } else {
        print_schedule(&schedule);
    }
    Ok(())
}
