//! # Forecast Inventory
//!
//! A Rust library for forecasting daily inventory-balance time series.
//!
//! ## Features
//!
//! - Observation series handling (CSV with named columns, seeded synthetic data)
//! - Lag, rolling-window and calendar feature engineering
//! - Gradient-boosted regression with day-by-day feedback forecasting
//! - Trend + weekly-seasonal decomposition as an alternative strategy
//! - Holdout evaluation with RMSE / MSE / MAE
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forecast_inventory::config::RunConfig;
//! use forecast_inventory::forecast::run_forecast;
//!
//! # fn main() -> forecast_inventory::error::Result<()> {
//! let config = RunConfig::synthetic_default(42);
//! let series = config.load_series()?;
//!
//! let outcome = run_forecast(&series, &config.strategy, config.horizon, config.test_fraction)?;
//!
//! for point in &outcome.points {
//!     println!("{}: {:.2}", point.date, point.forecast);
//! }
//! println!("{}", outcome.metrics);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{DataSource, RunConfig};
pub use crate::data::{DataLoader, Observation, ObservationSeries};
pub use crate::error::ForecastError;
pub use crate::forecast::{ForecastOutcome, ForecastPoint, ForecastStrategy};
pub use crate::metrics::EvaluationMetrics;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
