//! Batch runner: load or synthesize a balance series, fit, evaluate,
//! forecast, and print the results.
//!
//! Usage: `forecast_inventory [input.csv]` — with no argument a seeded
//! synthetic series stands in for the input file. Errors are fatal; no
//! partial output is produced.

use forecast_inventory::config::RunConfig;
use forecast_inventory::error::Result;
use forecast_inventory::forecast::run_forecast;
use forecast_inventory::utils::{chart_series, format_value_line};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::csv_default(PathBuf::from(path)),
        None => RunConfig::synthetic_default(42),
    };

    let series = config.load_series()?;
    info!("Forecasting {} days from {} observations", config.horizon, series.len());

    let outcome = run_forecast(&series, &config.strategy, config.horizon, config.test_fraction)?;

    for observation in series.observations() {
        println!("{}", format_value_line(observation.date, observation.value));
    }

    println!("{}", outcome.metrics);

    println!("Forecast for the next {} days:\n", config.horizon);
    for point in &outcome.points {
        println!("{}", format_value_line(point.date, point.forecast));
    }

    // Point sequences for whatever chart renderer the caller wires up
    let (historical, forecasted) = chart_series(&series, &outcome.points);
    info!(
        "Chart data ready: {} historical and {} forecasted points",
        historical.len(),
        forecasted.len()
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
