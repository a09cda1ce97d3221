//! Run configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all) gives the
//! fixed Paris dataset.

use std::{fs::read_to_string, path::Path, path::PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};

static INPUT: &str = "trafic_prediction/dataset_brut/fr-en-calendrier-scolaire.csv";
static OUTPUT: &str = "trafic_prediction/dataset/vacances.csv";
static REGION: &str = "Paris";
static SCHOOL_YEARS: [&str; 3] = ["2023-2024", "2024-2025", "2025-2026"];
static EXCLUDED_POPULATION: &str = "Enseignants";
static HOLIDAY_ZONE: &str = "Zone C";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// the school calendar extract
    pub input: PathBuf,
    /// the cleaned dataset, overwritten on every run
    pub output: PathBuf,
    /// the academy kept from the school calendar
    pub region: String,
    /// the school years kept from the school calendar
    pub school_years: Vec<String>,
    /// the population removed from the school calendar
    pub excluded_population: String,
    /// the zone written on holiday rows
    pub holiday_zone: String,
    pub window: DateWindow,
}

/// Half-open range `[start, end)` applied to the start date of every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from(INPUT),
            output: PathBuf::from(OUTPUT),
            region: String::from(REGION),
            school_years: SCHOOL_YEARS.into_iter().map(String::from).collect(),
            excluded_population: String::from(EXCLUDED_POPULATION),
            holiday_zone: String::from(HOLIDAY_ZONE),
            window: DateWindow::default(),
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid window start"),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid window end"),
        }
    }
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl Config {
    /// Read a TOML configuration file. Missing keys keep their default value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read_to_string(path).map_err(|err| Error::io(path, err))?;
        let config: Config = toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.school_years.is_empty() {
            return Err(Error::Config(String::from("school_years must not be empty")));
        }
        if self.window.start >= self.window.end {
            return Err(Error::Config(format!(
                "window start {} must be before window end {}",
                self.window.start, self.window.end
            )));
        }
        Ok(())
    }
}
