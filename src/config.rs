//! Run configuration: explicit data source, strategy and horizon
//!
//! Everything a run depends on is carried here — file paths, column names,
//! the synthetic seed — instead of ambient process state.

use crate::data::{synthetic_series, DataLoader, ObservationSeries};
use crate::error::Result;
use crate::forecast::ForecastStrategy;
use crate::models::gradient_boosting::GradientBoostingParams;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Where the observation series comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// A delimited file with a header row; columns resolved by name
    Csv {
        path: PathBuf,
        date_column: String,
        value_column: String,
    },
    /// A seeded random-walk series
    Synthetic {
        seed: u64,
        days: usize,
        start: NaiveDate,
        base: f64,
    },
}

/// Full configuration for one batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub strategy: ForecastStrategy,
    /// Number of future days to forecast
    pub horizon: usize,
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
}

impl RunConfig {
    /// Configuration matching the default batch run: 90 synthetic days,
    /// gradient-boosted regression, 5-day forecast, 80/20 split.
    pub fn synthetic_default(seed: u64) -> Self {
        Self {
            source: DataSource::Synthetic {
                seed,
                days: 90,
                start: NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date"),
                base: 500.0,
            },
            strategy: ForecastStrategy::IterativeRegression(GradientBoostingParams::default()),
            horizon: 5,
            test_fraction: 0.2,
        }
    }

    /// Same defaults, but reading `date`/`balance` columns from a CSV file
    pub fn csv_default(path: PathBuf) -> Self {
        Self {
            source: DataSource::Csv {
                path,
                date_column: "date".to_string(),
                value_column: "balance".to_string(),
            },
            ..Self::synthetic_default(0)
        }
    }

    /// Load the observation series from the configured source
    pub fn load_series(&self) -> Result<ObservationSeries> {
        match &self.source {
            DataSource::Csv {
                path,
                date_column,
                value_column,
            } => DataLoader::from_csv(path, date_column, value_column),
            DataSource::Synthetic {
                seed,
                days,
                start,
                base,
            } => synthetic_series(*seed, *days, *start, *base),
        }
    }
}
