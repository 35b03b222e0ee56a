//! Command implementations for the forcing CLI.
//!
//! Each subcommand reads normalized observation CSV files, reconstructs the
//! series and writes the fixed-format forcing files the model reads.

use chrono::NaiveDate;
use clap::Subcommand;
use forcing_data::wind_gap::LARGE_GAP_HOURS;
use forcing_types::Quantity;
use forcing_utils::dates::{default_cutoff, parse_date};
use std::path::PathBuf;

pub mod config;
pub mod input;
pub mod meteo;
pub mod output;
pub mod river;
pub mod run;
pub mod verify;
pub mod wind;

#[derive(Subcommand)]
pub enum Command {
    /// Build a daily river flow forcing file from gauge readings
    Rivers {
        /// Gauge readings CSV (`timestamp,flow`), optionally gzipped
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Forcing file to write
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Which river the readings are for: major or minor
        #[arg(short = 'q', long, default_value = "major")]
        river: Quantity,

        /// Last day to include (YYYY-MM-DD); defaults to yesterday
        #[arg(long, value_parser = parse_date)]
        cutoff: Option<NaiveDate>,
    },

    /// Build an hourly wind forcing file from climate station data
    Wind {
        /// Hourly climate CSV, optionally gzipped
        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        #[arg(long, value_parser = parse_date)]
        cutoff: Option<NaiveDate>,

        /// Report patched gaps longer than this many hours
        #[arg(long, default_value_t = LARGE_GAP_HOURS)]
        large_gap_hours: usize,

        /// Counter-clockwise rotation of the component axes, in degrees
        #[arg(long, default_value_t = 0.0)]
        axis_rotation: f64,
    },

    /// Build daily records of hourly meteorological quantities
    Meteo {
        /// Hourly climate CSV, optionally gzipped
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Station id written at the start of every record
        #[arg(short = 's', long)]
        station_id: String,

        #[arg(long)]
        air_temperature: Option<PathBuf>,

        #[arg(long)]
        relative_humidity: Option<PathBuf>,

        #[arg(long)]
        cloud_fraction: Option<PathBuf>,

        /// Weather description to cloud fraction CSV; the built-in table
        /// is used when omitted
        #[arg(long)]
        mapping: Option<PathBuf>,

        #[arg(long, value_parser = parse_date)]
        cutoff: Option<NaiveDate>,
    },

    /// Build every forcing file named in a TOML run configuration
    Run {
        #[arg(short = 'c', long)]
        config: PathBuf,
    },

    /// Check that a written forcing file parses, and report its span
    Verify {
        /// Quantity the file holds (major, minor, wind, air_temperature, ...)
        #[arg(short = 'q', long)]
        quantity: Quantity,

        #[arg(short = 'p', long)]
        path: PathBuf,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Rivers {
            input,
            output,
            river,
            cutoff,
        } => {
            let cutoff = cutoff.unwrap_or_else(default_cutoff);
            river::run_river(river, &input, &output, cutoff)
        }
        Command::Wind {
            input,
            output,
            cutoff,
            large_gap_hours,
            axis_rotation,
        } => {
            let settings = wind::WindSettings {
                large_gap_hours,
                axis_rotation_deg: axis_rotation,
            };
            let cutoff = cutoff.unwrap_or_else(default_cutoff);
            wind::run_wind(&input, &output, cutoff, &settings).map(|_| ())
        }
        Command::Meteo {
            input,
            station_id,
            air_temperature,
            relative_humidity,
            cloud_fraction,
            mapping,
            cutoff,
        } => {
            let outputs = [
                (Quantity::AirTemperature, air_temperature),
                (Quantity::RelativeHumidity, relative_humidity),
                (Quantity::CloudFraction, cloud_fraction),
            ]
            .into_iter()
            .filter_map(|(quantity, path)| path.map(|p| (quantity, p)))
            .collect();
            let mapping = crate::input::load_mapping(mapping.as_deref())?;
            let cutoff = cutoff.unwrap_or_else(default_cutoff);
            meteo::run_meteo(&station_id, &input, &outputs, &mapping, cutoff)
        }
        Command::Run { config } => run::run_config(&config),
        Command::Verify { quantity, path } => verify::run_verify(quantity, &path).map(|_| ()),
    }
}
