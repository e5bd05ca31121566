//! Observation series handling: CSV loading, synthetic generation, writing

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Date format used for all CSV input and output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single (date, balance) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Balance value on that date
    pub value: f64,
}

/// An ordered sequence of observations, sorted ascending by date.
///
/// Dates are unique within a series; construction sorts the input and
/// rejects duplicates. Appends must be strictly after the last date.
#[derive(Debug, Clone)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Create a series from observations in any order.
    ///
    /// The observations are sorted ascending by date. A duplicate date is a
    /// validation error.
    pub fn new(mut observations: Vec<Observation>) -> Result<Self> {
        observations.sort_by_key(|o| o.date);

        for pair in observations.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(ForecastError::ValidationError(format!(
                    "Duplicate date in series: {}",
                    pair[0].date
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Get the observations, sorted ascending by date
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the balance values in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Get the most recent observation
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Append an observation dated strictly after the current last entry.
    ///
    /// Past entries are never mutated; this is the only way a series grows.
    pub fn push(&mut self, observation: Observation) -> Result<()> {
        if let Some(last) = self.observations.last() {
            if observation.date <= last.date {
                return Err(ForecastError::ValidationError(format!(
                    "Appended date {} is not after last date {}",
                    observation.date, last.date
                )));
            }
        }

        self.observations.push(observation);
        Ok(())
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Keep only the first `count` observations (by date order)
    pub fn head(&self, count: usize) -> Self {
        Self {
            observations: self.observations[..count.min(self.observations.len())].to_vec(),
        }
    }
}

/// Data loader for observation series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a delimited file with a header row.
    ///
    /// Columns are resolved by name, not position: the balance column may
    /// appear anywhere in the file. Dates must match [`DATE_FORMAT`] and
    /// numbers use the invariant decimal point. Any malformed row aborts the
    /// load with a [`ForecastError::Parse`] carrying the line number.
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        date_column: &str,
        value_column: &str,
    ) -> Result<ObservationSeries> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        let date_idx = Self::column_index(&headers, date_column)?;
        let value_idx = Self::column_index(&headers, value_column)?;

        let mut observations = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_field = record.get(date_idx).unwrap_or("").trim().trim_matches('"');
            let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|e| {
                ForecastError::Parse {
                    line,
                    message: format!("invalid date '{}': {}", date_field, e),
                }
            })?;

            let value_field = record.get(value_idx).unwrap_or("").trim().trim_matches('"');
            let value: f64 = value_field.parse().map_err(|e| ForecastError::Parse {
                line,
                message: format!("invalid number '{}': {}", value_field, e),
            })?;

            observations.push(Observation { date, value });
        }

        info!("Loaded {} observations from CSV", observations.len());

        ObservationSeries::new(observations)
    }

    /// Write a series back out as `date,balance` rows with a header.
    ///
    /// Writing then re-loading reproduces the same series.
    pub fn to_csv<P: AsRef<Path>>(series: &ObservationSeries, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["date", "balance"])?;
        for observation in series.observations() {
            writer.write_record([
                observation.date.format(DATE_FORMAT).to_string(),
                format!("{}", observation.value),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().trim_matches('"').eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ForecastError::DataError(format!("Column '{}' not found in header", name))
            })
    }
}

/// Generate a seeded random-walk series of daily balances.
///
/// The seed is explicit configuration; two calls with the same arguments
/// produce identical series.
pub fn synthetic_series(
    seed: u64,
    days: usize,
    start: NaiveDate,
    base: f64,
) -> Result<ObservationSeries> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 5.0)
        .map_err(|e| ForecastError::InvalidParameter(format!("Invalid noise distribution: {}", e)))?;

    let mut observations = Vec::with_capacity(days);
    let mut value = base;
    for offset in 0..days {
        value += noise.sample(&mut rng);
        observations.push(Observation {
            date: start + Duration::days(offset as i64),
            value,
        });
    }

    debug!("Generated {} synthetic observations (seed {})", days, seed);

    ObservationSeries::new(observations)
}
