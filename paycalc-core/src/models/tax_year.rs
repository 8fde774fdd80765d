use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBracket;

/// A financial year's schedule, levy and default superannuation rate.
///
/// `year` is the "YYYY-YY" identifier and doubles as the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYear {
    pub year: String,
    pub brackets: Vec<TaxBracket>,
    /// Fraction of gross income, e.g. `0.02`.
    pub medicare_levy: Decimal,
    /// Fraction of gross income, e.g. `0.115`.
    pub super_rate: Decimal,
}

impl TaxYear {
    pub fn lowest_threshold(&self) -> Option<Decimal> {
        self.brackets.first().map(|b| b.min)
    }

    pub fn top_bracket(&self) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.is_top())
    }
}

/// Partial update for an existing [`TaxYear`].
///
/// Only the fields that are `Some` replace the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearUpdate {
    pub brackets: Option<Vec<TaxBracket>>,
    pub medicare_levy: Option<Decimal>,
    pub super_rate: Option<Decimal>,
}

impl TaxYearUpdate {
    pub fn is_empty(&self) -> bool {
        self.brackets.is_none() && self.medicare_levy.is_none() && self.super_rate.is_none()
    }

    /// Merges the supplied fields into `year`, leaving the rest untouched.
    pub fn apply_to(
        self,
        year: &mut TaxYear,
    ) {
        if let Some(brackets) = self.brackets {
            year.brackets = brackets;
        }
        if let Some(levy) = self.medicare_levy {
            year.medicare_levy = levy;
        }
        if let Some(rate) = self.super_rate {
            year.super_rate = rate;
        }
    }
}

impl From<TaxYear> for TaxYearUpdate {
    fn from(year: TaxYear) -> Self {
        Self {
            brackets: Some(year.brackets),
            medicare_levy: Some(year.medicare_levy),
            super_rate: Some(year.super_rate),
        }
    }
}
