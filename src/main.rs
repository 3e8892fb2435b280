use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};

use groundpath::export::write_csv;
use groundpath::plan::{capture_plan, CaptureConstraints, TargetSite};
use groundpath::propagate::{Sgp4Propagator, TleStore};
use groundpath::sampler::sample_ground_path;

#[derive(Parser)]
#[command(name = "groundpath")]
#[command(about = "Satellite ground track computation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the satellites found in a TLE file or directory
    Validate { tle: PathBuf },
    /// Compute a ground path and write it as CSV
    Track {
        /// TLE file or directory
        #[arg(long)]
        tle: PathBuf,
        /// NORAD id, required when more than one satellite is loaded
        #[arg(long)]
        satellite: Option<u64>,
        /// Window start, RFC 3339 (e.g. 2018-08-01T00:00:00Z)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Window end, exclusive
        #[arg(long)]
        to: DateTime<Utc>,
        /// Sampling interval (e.g. 30s, 1m)
        #[arg(long, default_value = "1m")]
        step: humantime::Duration,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List capture opportunities for a ground target
    Plan {
        #[arg(long)]
        tle: PathBuf,
        #[arg(long)]
        satellite: Option<u64>,
        #[arg(long)]
        from: DateTime<Utc>,
        #[arg(long)]
        to: DateTime<Utc>,
        #[arg(long, default_value = "5s")]
        step: humantime::Duration,
        /// Target coordinates as "lat,lon" in degrees
        #[arg(long)]
        target: String,
        /// Target altitude in meters
        #[arg(long, default_value_t = 0.0)]
        altitude_m: f64,
        #[arg(long, default_value_t = 0.0)]
        min_off_nadir: f64,
        #[arg(long, default_value_t = 20.0)]
        max_off_nadir: f64,
        #[arg(long, default_value_t = 0.0)]
        min_elevation: f64,
        #[arg(long, default_value_t = 90.0)]
        max_elevation: f64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { tle } => validate(&tle),
        Commands::Track {
            tle,
            satellite,
            from,
            to,
            step,
            output,
        } => track(&tle, satellite, from, to, step, output),
        Commands::Plan {
            tle,
            satellite,
            from,
            to,
            step,
            target,
            altitude_m,
            min_off_nadir,
            max_off_nadir,
            min_elevation,
            max_elevation,
        } => plan(
            &tle,
            satellite,
            from,
            to,
            step,
            &target,
            altitude_m,
            CaptureConstraints {
                min_off_nadir_deg: min_off_nadir,
                max_off_nadir_deg: max_off_nadir,
                min_elevation_deg: min_elevation,
                max_elevation_deg: max_elevation,
                local_time_windows: Vec::new(),
            },
        ),
    }
}

fn validate(tle: &PathBuf) -> ExitCode {
    let mut store = TleStore::new(tle.clone());
    if let Err(e) = store.load() {
        eprintln!("Error loading TLEs: {}", e);
        return ExitCode::FAILURE;
    }

    println!("{} satellite(s) loaded", store.len());
    for entry in store.satellites() {
        println!("  {:>7}  {}  ({})", entry.norad_id, entry.name, entry.source);
    }
    ExitCode::SUCCESS
}

fn track(
    tle: &PathBuf,
    satellite: Option<u64>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: humantime::Duration,
    output: Option<PathBuf>,
) -> ExitCode {
    let propagator = match load_propagator(tle, satellite) {
        Ok(p) => p,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let step = match to_time_delta(step) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let ground_path = match sample_ground_path(&propagator, from, to, step) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Sampling failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} samples, {} full orbit(s)",
        ground_path.len(),
        ground_path.orbit_count()
    );

    let result = match output {
        Some(path) => File::create(&path)
            .map_err(|e| e.to_string())
            .and_then(|f| write_csv(&ground_path, f).map_err(|e| e.to_string())),
        None => write_csv(&ground_path, io::stdout().lock()).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error writing CSV: {}", message);
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn plan(
    tle: &PathBuf,
    satellite: Option<u64>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: humantime::Duration,
    target: &str,
    altitude_m: f64,
    constraints: CaptureConstraints,
) -> ExitCode {
    let site = match TargetSite::from_coordinates(target, Some(altitude_m)) {
        Some(s) => s,
        None => {
            eprintln!("Invalid target coordinates: {}", target);
            return ExitCode::FAILURE;
        }
    };

    let propagator = match load_propagator(tle, satellite) {
        Ok(p) => p,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let step = match to_time_delta(step) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let opportunities = match capture_plan(&propagator, &site, from, to, step, &constraints) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} capture opportunity(ies)", opportunities.len());
    println!("datetime              off_nadir  elevation  local_time");
    for o in &opportunities {
        println!(
            "{}  {:>9.2}  {:>9.2}  {}",
            o.datetime.format("%Y-%m-%dT%H:%M:%SZ"),
            o.off_nadir_deg,
            o.elevation_deg,
            format_time_of_day(o.local_time),
        );
    }
    ExitCode::SUCCESS
}

fn load_propagator(tle: &PathBuf, satellite: Option<u64>) -> Result<Sgp4Propagator, String> {
    let mut store = TleStore::new(tle.clone());
    store.load().map_err(|e| e.to_string())?;

    let entry = match satellite {
        Some(norad_id) => store.take(norad_id).map_err(|e| e.to_string())?,
        None => store.take_single().ok_or_else(|| {
            format!(
                "{} satellites loaded; pick one with --satellite <norad-id>",
                store.len()
            )
        })?,
    };

    log::info!("tracking {} (NORAD {})", entry.name, entry.norad_id);
    Sgp4Propagator::from_elements(entry.elements).map_err(|e| e.to_string())
}

fn to_time_delta(step: humantime::Duration) -> Result<TimeDelta, String> {
    TimeDelta::from_std(step.into()).map_err(|e| format!("Invalid step: {}", e))
}

fn format_time_of_day(t: TimeDelta) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        t.num_hours(),
        t.num_minutes() % 60,
        t.num_seconds() % 60
    )
}
