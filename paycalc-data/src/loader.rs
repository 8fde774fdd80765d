use std::collections::BTreeMap;
use std::io::Read;
use std::sync::LazyLock;

use paycalc_core::calculations::progressive::validate_schedule;
use paycalc_core::{
    RegistryError, ScheduleError, TaxBracket, TaxYear, TaxYearRegistry, TaxYearUpdate,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax year schedules.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid tax year key '{0}', expected YYYY-YY")]
    InvalidYearKey(String),

    #[error("tax year {year} has conflicting {field} values across its rows")]
    InconsistentRates { year: String, field: &'static str },

    #[error("tax year {year} is not registered yet, so {field} cannot be blank")]
    MissingRate { year: String, field: &'static str },

    #[error("invalid schedule for {year}: {source}")]
    InvalidSchedule {
        year: String,
        #[source]
        source: ScheduleError,
    },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single bracket row from a schedule CSV file.
///
/// - `year`: financial year key, e.g. `2024-25`
/// - `min`: lower bound, exclusive ("over $X")
/// - `max`: upper bound, inclusive (empty for the top bracket)
/// - `base_amount`: tax payable at `min`
/// - `rate`: marginal rate as a fraction (e.g. `0.30`)
/// - `medicare_levy`, `super_rate`: year-level rates, repeated on every row.
///   Blank cells keep the registered value when upserting an existing year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub year: String,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub medicare_levy: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub super_rate: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

static YEAR_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("year key pattern is valid"));

/// Whether `key` looks like a financial year key such as `2024-25`.
pub fn is_valid_year_key(key: &str) -> bool {
    YEAR_KEY.is_match(key)
}

/// One year's rows folded together.
///
/// `medicare_levy` and `super_rate` are `None` when their cells were blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSchedule {
    pub year: String,
    pub brackets: Vec<TaxBracket>,
    pub medicare_levy: Option<Decimal>,
    pub super_rate: Option<Decimal>,
}

impl YearSchedule {
    pub fn top_bracket(&self) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.is_top())
    }

    /// First year-level rate left blank, if any.
    fn missing_rate(&self) -> Option<&'static str> {
        if self.medicare_levy.is_none() {
            Some("medicare_levy")
        } else if self.super_rate.is_none() {
            Some("super_rate")
        } else {
            None
        }
    }

    /// A complete [`TaxYear`]; fails if either rate was left blank.
    pub fn into_tax_year(self) -> Result<TaxYear, ScheduleLoaderError> {
        match (self.medicare_levy, self.super_rate) {
            (Some(medicare_levy), Some(super_rate)) => Ok(TaxYear {
                year: self.year,
                brackets: self.brackets,
                medicare_levy,
                super_rate,
            }),
            (None, _) => Err(ScheduleLoaderError::MissingRate {
                year: self.year,
                field: "medicare_levy",
            }),
            (_, None) => Err(ScheduleLoaderError::MissingRate {
                year: self.year,
                field: "super_rate",
            }),
        }
    }

    /// Replaces the brackets and whichever rates were given.
    pub fn into_update(self) -> TaxYearUpdate {
        TaxYearUpdate {
            brackets: Some(self.brackets),
            medicare_levy: self.medicare_levy,
            super_rate: self.super_rate,
        }
    }
}

impl From<TaxYear> for YearSchedule {
    fn from(year: TaxYear) -> Self {
        Self {
            year: year.year,
            brackets: year.brackets,
            medicare_levy: Some(year.medicare_levy),
            super_rate: Some(year.super_rate),
        }
    }
}

/// How [`ScheduleLoader::apply`] treats years already in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Only add new years; an existing year is an error.
    #[default]
    AddOnly,
    /// Replace existing years in place and add the rest.
    Upsert,
}

/// Year keys touched by a load, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: Vec<String>,
    pub updated: Vec<String>,
}

impl LoadSummary {
    pub fn total(&self) -> usize {
        self.added.len() + self.updated.len()
    }
}

/// Loader for tax year schedules from CSV files.
///
/// Loading is split in three so each step can be used on its own:
/// `parse` reads rows, `group` folds rows into [`YearSchedule`] values, and
/// `apply` validates them and writes them to a [`TaxYearRegistry`].
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse schedule rows from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        debug!(rows = records.len(), "parsed schedule CSV");
        Ok(records)
    }

    /// Fold rows into one [`YearSchedule`] per year key, ascending by key.
    ///
    /// Brackets within a year are sorted by `min`. The levy and super rate
    /// must be identical on every row of a year, blank included.
    pub fn group(records: &[ScheduleRecord]) -> Result<Vec<YearSchedule>, ScheduleLoaderError> {
        let mut years: BTreeMap<&str, YearSchedule> = BTreeMap::new();

        for record in records {
            if !is_valid_year_key(&record.year) {
                return Err(ScheduleLoaderError::InvalidYearKey(record.year.clone()));
            }

            let year = years.entry(record.year.as_str()).or_insert_with(|| YearSchedule {
                year: record.year.clone(),
                brackets: Vec::new(),
                medicare_levy: record.medicare_levy,
                super_rate: record.super_rate,
            });

            if year.medicare_levy != record.medicare_levy {
                return Err(ScheduleLoaderError::InconsistentRates {
                    year: record.year.clone(),
                    field: "medicare_levy",
                });
            }
            if year.super_rate != record.super_rate {
                return Err(ScheduleLoaderError::InconsistentRates {
                    year: record.year.clone(),
                    field: "super_rate",
                });
            }

            year.brackets.push(TaxBracket::new(
                record.min,
                record.max,
                record.base_amount,
                record.rate,
            ));
        }

        let mut years: Vec<YearSchedule> = years.into_values().collect();
        for year in &mut years {
            year.brackets.sort_by(|a, b| a.min.cmp(&b.min));
        }
        Ok(years)
    }

    /// Validate every year, then write them to `registry`.
    ///
    /// Nothing is written unless every schedule validates and every year
    /// that will be added has both rates. Blank rates are only allowed when
    /// upserting a year that is already registered. In [`LoadMode::AddOnly`]
    /// a year that is already registered stops the load with
    /// [`RegistryError::DuplicateYear`]; years applied before it stay.
    pub fn apply(
        registry: &mut TaxYearRegistry,
        years: Vec<YearSchedule>,
        mode: LoadMode,
    ) -> Result<LoadSummary, ScheduleLoaderError> {
        for year in &years {
            validate_schedule(&year.brackets).map_err(|source| {
                ScheduleLoaderError::InvalidSchedule {
                    year: year.year.clone(),
                    source,
                }
            })?;

            let is_update = mode == LoadMode::Upsert && registry.contains(&year.year);
            if let (false, Some(field)) = (is_update, year.missing_rate()) {
                return Err(ScheduleLoaderError::MissingRate {
                    year: year.year.clone(),
                    field,
                });
            }
        }

        let mut summary = LoadSummary::default();
        for year in years {
            let key = year.year.clone();
            if mode == LoadMode::Upsert && registry.contains(&key) {
                registry.update(&key, year.into_update())?;
                summary.updated.push(key);
            } else {
                registry.add(key.clone(), year.into_tax_year()?)?;
                summary.added.push(key);
            }
        }

        info!(
            added = summary.added.len(),
            updated = summary.updated.len(),
            "applied tax year schedules"
        );
        Ok(summary)
    }

    /// Parse, group and apply in one step.
    pub fn load<R: Read>(
        registry: &mut TaxYearRegistry,
        reader: R,
        mode: LoadMode,
    ) -> Result<LoadSummary, ScheduleLoaderError> {
        let records = Self::parse(reader)?;
        let years = Self::group(&records)?;
        Self::apply(registry, years, mode)
    }
}
