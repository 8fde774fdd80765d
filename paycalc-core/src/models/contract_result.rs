use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::contract::{MAX_UPLIFT, MIN_UPLIFT};

/// Contract annual rates at the advised minimum, maximum and the selected uplift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRange {
    pub min: Decimal,
    pub max: Decimal,
    pub selected: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCalculationResult {
    pub base_annual_salary: Decimal,
    pub contract_annual: ContractRange,
    pub contract_monthly: Decimal,
    pub contract_daily: Decimal,
    /// Uplift in percent, exactly as requested (never clamped).
    pub uplift_percentage: Decimal,
}

impl ContractCalculationResult {
    /// Whether the uplift falls within the advised 15–30% band.
    pub fn uplift_in_advised_range(&self) -> bool {
        (MIN_UPLIFT..=MAX_UPLIFT).contains(&self.uplift_percentage)
    }
}
