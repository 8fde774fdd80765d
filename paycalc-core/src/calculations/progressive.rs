//! Progressive income tax over a marginal bracket schedule.
//!
//! Each bracket carries the cumulative tax owed at its lower threshold
//! (`base_amount`), so evaluating an amount needs only the single bracket it
//! lands in:
//!
//! ```text
//! tax = base_amount + (amount - min) * rate      where  min < amount <= max
//! ```
//!
//! Amounts at or below the lowest threshold owe nothing. An amount above the
//! lowest threshold that no bracket claims means the schedule has a gap; that
//! is a data error, reported by [`find_bracket`] as [`BracketMatch::Uncovered`]
//! and caught ahead of time by [`validate_schedule`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycalc_core::TaxBracket;
//! use paycalc_core::calculations::progressive::compute_tax;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(18200)), dec!(0), dec!(0)),
//!     TaxBracket::new(dec!(18200), Some(dec!(45000)), dec!(0), dec!(0.16)),
//!     TaxBracket::new(dec!(45000), Some(dec!(135000)), dec!(4294), dec!(0.30)),
//!     TaxBracket::new(dec!(135000), Some(dec!(190000)), dec!(31094), dec!(0.37)),
//!     TaxBracket::new(dec!(190000), None, dec!(51424), dec!(0.45)),
//! ];
//!
//! assert_eq!(compute_tax(dec!(100000), &brackets), dec!(20794));
//! assert_eq!(compute_tax(dec!(18200), &brackets), dec!(0));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::TaxBracket;

/// Where an amount falls within a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketMatch<'a> {
    /// At or below the lowest threshold (or the schedule is empty).
    BelowThreshold,
    Bracket(&'a TaxBracket),
    /// Above the lowest threshold, but no bracket claims it.
    Uncovered,
}

/// Finds the first bracket whose `(min, max]` range holds `amount`.
pub fn find_bracket(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> BracketMatch<'_> {
    let Some(lowest) = brackets.iter().map(|b| b.min).min() else {
        return BracketMatch::BelowThreshold;
    };
    if amount <= lowest {
        return BracketMatch::BelowThreshold;
    }

    brackets
        .iter()
        .find(|b| b.contains(amount))
        .map_or(BracketMatch::Uncovered, BracketMatch::Bracket)
}

/// Income tax owed on `amount` under `brackets`.
///
/// Returns zero at or below the lowest threshold. An uncovered amount also
/// yields zero and logs a warning; validate schedules before use to rule
/// that out.
pub fn compute_tax(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    match find_bracket(amount, brackets) {
        BracketMatch::BelowThreshold => Decimal::ZERO,
        BracketMatch::Bracket(bracket) => bracket.tax_on(amount),
        BracketMatch::Uncovered => {
            warn!(%amount, "no tax bracket covers amount; schedule has a gap");
            Decimal::ZERO
        }
    }
}

/// Marginal rate applying to the next dollar above `amount`.
///
/// `None` when the amount is uncovered. Below the lowest threshold this is
/// the rate of the first bracket.
pub fn marginal_rate(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Option<Decimal> {
    match find_bracket(amount, brackets) {
        BracketMatch::Bracket(bracket) => Some(bracket.rate),
        BracketMatch::BelowThreshold => brackets.first().map(|b| b.rate),
        BracketMatch::Uncovered => None,
    }
}

/// Structural problems in a bracket schedule.
///
/// `index` is the zero-based position of the offending bracket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no brackets")]
    Empty,

    #[error("bracket {index} has a negative threshold")]
    NegativeThreshold { index: usize },

    #[error("bracket {index} has a negative base amount")]
    NegativeBaseAmount { index: usize },

    #[error("bracket {index} rate {rate} is outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} has max not above min")]
    InvertedBracket { index: usize },

    #[error("bracket {index} starts below the previous bracket")]
    OutOfOrder { index: usize },

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedNotLast { index: usize },

    #[error("schedule has no unbounded top bracket")]
    MissingTopBracket,
}

/// Checks that `brackets` form a contiguous, ascending schedule ending in a
/// single unbounded bracket.
///
/// Contiguity means each bracket's `min` equals the previous bracket's
/// `max`, which is what makes every amount above the lowest threshold land in
/// exactly one bracket. Base amounts are not cross-checked against the rates.
///
/// # Errors
///
/// Returns the first [`ScheduleError`] found, scanning from the lowest bracket.
pub fn validate_schedule(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    if brackets.is_empty() {
        return Err(ScheduleError::Empty);
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min < Decimal::ZERO {
            return Err(ScheduleError::NegativeThreshold { index });
        }
        if bracket.base_amount < Decimal::ZERO {
            return Err(ScheduleError::NegativeBaseAmount { index });
        }
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(ScheduleError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }
        if bracket.max.is_some_and(|max| max <= bracket.min) {
            return Err(ScheduleError::InvertedBracket { index });
        }

        let Some(previous) = index.checked_sub(1).map(|i| &brackets[i]) else {
            continue;
        };
        let Some(expected) = previous.max else {
            return Err(ScheduleError::UnboundedNotLast { index: index - 1 });
        };
        if bracket.min < previous.min {
            return Err(ScheduleError::OutOfOrder { index });
        }
        if bracket.min != expected {
            return Err(ScheduleError::Gap {
                index,
                expected,
                found: bracket.min,
            });
        }
    }

    if brackets.last().is_some_and(TaxBracket::is_top) {
        Ok(())
    } else {
        Err(ScheduleError::MissingTopBracket)
    }
}
