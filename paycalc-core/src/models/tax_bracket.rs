use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal bracket of a progressive schedule.
///
/// `base_amount` is the total tax owed at `min` under the full schedule. It is
/// precomputed and stored, never derived at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    /// `None` marks the unbounded top bracket.
    pub max: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        base_amount: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            min,
            max,
            base_amount,
            rate,
        }
    }

    /// True when `amount` lies in `(min, max]`, or above `min` for the top bracket.
    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        amount > self.min && self.max.is_none_or(|max| amount <= max)
    }

    pub fn is_top(&self) -> bool {
        self.max.is_none()
    }

    /// Tax owed on `amount` if this bracket is the one it falls in.
    pub fn tax_on(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.base_amount + (amount - self.min) * self.rate
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn contains_excludes_lower_bound() {
        let bracket = TaxBracket::new(dec!(18200), Some(dec!(45000)), dec!(0), dec!(0.16));

        assert!(!bracket.contains(dec!(18200)));
        assert!(bracket.contains(dec!(18200.01)));
    }

    #[test]
    fn contains_includes_upper_bound() {
        let bracket = TaxBracket::new(dec!(18200), Some(dec!(45000)), dec!(0), dec!(0.16));

        assert!(bracket.contains(dec!(45000)));
        assert!(!bracket.contains(dec!(45000.01)));
    }

    #[test]
    fn top_bracket_has_no_ceiling() {
        let bracket = TaxBracket::new(dec!(190000), None, dec!(51424), dec!(0.45));

        assert!(bracket.is_top());
        assert!(bracket.contains(dec!(10000000)));
    }

    #[test]
    fn tax_on_adds_marginal_portion_to_base() {
        let bracket = TaxBracket::new(dec!(45000), Some(dec!(135000)), dec!(4294), dec!(0.30));

        assert_eq!(bracket.tax_on(dec!(100000)), dec!(20794.00));
    }
}
