use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::info;

use crate::calculations::CalculationError;
use crate::models::{TaxYear, TaxYearUpdate};

use super::seed;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tax year {0} already exists")]
    DuplicateYear(String),

    #[error("tax year {0} not found")]
    UnknownYear(String),
}

/// A registry behind a lock, for callers that mutate it from several threads.
///
/// `update` is a read-merge-write sequence, so writers must hold the write
/// guard for the whole call.
pub type SharedRegistry = Arc<RwLock<TaxYearRegistry>>;

/// In-memory table of known financial years, keyed by "YYYY-YY".
///
/// The registry does not validate schedules; run
/// [`validate_schedule`](crate::calculations::progressive::validate_schedule)
/// before handing it new brackets. Years are never removed.
///
/// Typical lifetime:
/// 1. Create with [`TaxYearRegistry::with_builtin_years`].
/// 2. Apply any extra schedules with `add` / `update`.
/// 3. Lend it to a [`TakeHomeCalculator`](crate::calculations::TakeHomeCalculator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxYearRegistry {
    years: BTreeMap<String, TaxYear>,
}

impl TaxYearRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in years 2022-23 through 2025-26.
    pub fn with_builtin_years() -> Self {
        let mut registry = Self::new();
        for year in seed::builtin_years() {
            registry.years.insert(year.year.clone(), year);
        }
        registry
    }

    /// Wrap this registry for shared mutable access.
    pub fn shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    pub fn get(
        &self,
        year_key: &str,
    ) -> Option<&TaxYear> {
        self.years.get(year_key)
    }

    /// Like [`get`](Self::get), but a missing year is an error.
    pub fn require(
        &self,
        year_key: &str,
    ) -> Result<&TaxYear, CalculationError> {
        self.get(year_key)
            .ok_or_else(|| CalculationError::UnknownTaxYear(year_key.to_string()))
    }

    pub fn contains(
        &self,
        year_key: &str,
    ) -> bool {
        self.years.contains_key(year_key)
    }

    /// Insert a new year.
    ///
    /// # Errors
    /// * [`RegistryError::DuplicateYear`] if `year_key` is already present.
    pub fn add(
        &mut self,
        year_key: impl Into<String>,
        tax_year: TaxYear,
    ) -> Result<(), RegistryError> {
        let year_key = year_key.into();
        if self.years.contains_key(&year_key) {
            return Err(RegistryError::DuplicateYear(year_key));
        }

        info!(
            year = %year_key,
            brackets = tax_year.brackets.len(),
            "registered tax year"
        );
        self.years.insert(year_key, tax_year);
        Ok(())
    }

    /// Merge `update` into an existing year.
    ///
    /// # Errors
    /// * [`RegistryError::UnknownYear`] if `year_key` is absent.
    pub fn update(
        &mut self,
        year_key: &str,
        update: TaxYearUpdate,
    ) -> Result<(), RegistryError> {
        let existing = self
            .years
            .get_mut(year_key)
            .ok_or_else(|| RegistryError::UnknownYear(year_key.to_string()))?;

        info!(
            year = %year_key,
            brackets = update.brackets.is_some(),
            medicare_levy = update.medicare_levy.is_some(),
            super_rate = update.super_rate.is_some(),
            "updated tax year"
        );
        update.apply_to(existing);
        Ok(())
    }

    /// Every known year key, ascending.
    pub fn year_keys(&self) -> Vec<&str> {
        self.years.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxYear> {
        self.years.values()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl Default for TaxYearRegistry {
    fn default() -> Self {
        Self::with_builtin_years()
    }
}
