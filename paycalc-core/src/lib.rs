//! Australian take-home pay and contractor rate calculations.
//!
//! Everything here is synchronous and pure apart from
//! [`TaxYearRegistry::add`] and [`TaxYearRegistry::update`]. Calculators
//! borrow a registry instead of reading global state.

pub mod calculations;
pub mod models;
pub mod registry;

pub use calculations::{
    CalculationError, ScheduleError, TakeHomeCalculator, calculate_contract_rate,
    calculate_take_home_salary, compute_tax, validate_schedule,
};
pub use models::*;
pub use registry::{RegistryError, SharedRegistry, TaxYearRegistry};
