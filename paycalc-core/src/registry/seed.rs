//! Built-in Australian resident schedules.
//!
//! Each bracket's `min` is the "over $X" threshold, so brackets chain
//! without gaps: `(0, 18200]`, `(18200, 45000]`, and so on. Base amounts,
//! rates, levy and super rates are carried as published in the calculator's
//! reference tables and are not re-derived.

use rust_decimal::Decimal;

use crate::models::{TaxBracket, TaxYear};

fn bracket(
    min: i64,
    max: Option<i64>,
    base_amount: i64,
    rate: Decimal,
) -> TaxBracket {
    TaxBracket::new(
        Decimal::from(min),
        max.map(Decimal::from),
        Decimal::from(base_amount),
        rate,
    )
}

/// 2022-23 and 2023-24 share the pre-2024 rate scale.
fn pre_stage_three_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(0, Some(18200), 0, Decimal::ZERO),
        bracket(18200, Some(45000), 0, Decimal::new(19, 2)),
        bracket(45000, Some(120000), 5092, Decimal::new(325, 3)),
        bracket(120000, Some(180000), 29467, Decimal::new(37, 2)),
        bracket(180000, None, 51667, Decimal::new(45, 2)),
    ]
}

/// 2024-25 onwards.
fn stage_three_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(0, Some(18200), 0, Decimal::ZERO),
        bracket(18200, Some(45000), 0, Decimal::new(16, 2)),
        bracket(45000, Some(135000), 4294, Decimal::new(30, 2)),
        bracket(135000, Some(190000), 31094, Decimal::new(37, 2)),
        bracket(190000, None, 51424, Decimal::new(45, 2)),
    ]
}

fn year(
    key: &str,
    brackets: Vec<TaxBracket>,
    super_rate: Decimal,
) -> TaxYear {
    TaxYear {
        year: key.to_string(),
        brackets,
        medicare_levy: Decimal::new(2, 2),
        super_rate,
    }
}

pub fn builtin_years() -> Vec<TaxYear> {
    vec![
        year("2022-23", pre_stage_three_brackets(), Decimal::new(105, 3)),
        year("2023-24", pre_stage_three_brackets(), Decimal::new(11, 2)),
        year("2024-25", stage_three_brackets(), Decimal::new(115, 3)),
        year("2025-26", stage_three_brackets(), Decimal::new(12, 2)),
    ]
}
