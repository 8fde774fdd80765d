//! Settings file for the `paycalc` CLI.
//!
//! An optional TOML file supplies defaults that command-line flags override:
//!
//! ```toml
//! default_year = "2025-26"
//! including_super = false
//! super_rate_percent = 12
//! uplift_percentage = 25
//! schedules = ["schedules/2026-27.csv"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use paycalc_core::calculations::contract::DEFAULT_UPLIFT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::input::{InputError, check_rate_percent, check_uplift_percent, parse_year_key};

/// Year used when neither a flag nor the settings file names one.
pub const DEFAULT_YEAR: &str = "2024-25";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key} in settings file '{}': {source}", path.display())]
    Value {
        path: PathBuf,
        key: &'static str,
        #[source]
        source: InputError,
    },
}

/// User settings read from the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Financial year for commands run without `--year`.
    #[serde(default)]
    pub default_year: Option<String>,

    /// Treat salaries as super-inclusive packages by default.
    #[serde(default)]
    pub including_super: bool,

    /// Custom super rate in percent, replacing the year's rate.
    #[serde(default)]
    pub super_rate_percent: Option<Decimal>,

    /// Contract uplift in percent.
    #[serde(default)]
    pub uplift_percentage: Option<Decimal>,

    /// Schedule CSV files upserted into the registry at startup.
    /// Relative paths are resolved against the settings file's directory.
    #[serde(default)]
    pub schedules: Vec<PathBuf>,
}

impl Settings {
    /// Reads settings from `path`, or returns defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        settings.check().map_err(|(key, source)| ConfigError::Value {
            path: path.to_path_buf(),
            key,
            source,
        })?;
        if let Some(base) = path.parent() {
            settings.schedules = settings
                .schedules
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies the same checks the matching command-line flags get.
    fn check(&self) -> Result<(), (&'static str, InputError)> {
        if let Some(year) = &self.default_year {
            parse_year_key(year).map_err(|e| ("default_year", e))?;
        }
        if let Some(rate) = self.super_rate_percent {
            check_rate_percent(rate).map_err(|e| ("super_rate_percent", e))?;
        }
        if let Some(uplift) = self.uplift_percentage {
            check_uplift_percent(uplift).map_err(|e| ("uplift_percentage", e))?;
        }
        Ok(())
    }

    /// Flag value, else the settings file, else [`DEFAULT_YEAR`].
    pub fn year(
        &self,
        flag: Option<&str>,
    ) -> String {
        flag.or(self.default_year.as_deref())
            .unwrap_or(DEFAULT_YEAR)
            .to_string()
    }

    /// Flags can only switch super-inclusive mode on.
    pub fn including_super(
        &self,
        flag: bool,
    ) -> bool {
        flag || self.including_super
    }

    pub fn super_rate_percent(
        &self,
        flag: Option<Decimal>,
    ) -> Option<Decimal> {
        flag.or(self.super_rate_percent)
    }

    /// Flag value, else the settings file, else 20%.
    pub fn uplift_percentage(
        &self,
        flag: Option<Decimal>,
    ) -> Decimal {
        flag.or(self.uplift_percentage).unwrap_or(DEFAULT_UPLIFT)
    }
}
