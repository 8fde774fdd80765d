//! Pay calculations: the progressive tax engine, take-home breakdown and
//! contractor rate conversion.

pub mod common;
pub mod contract;
pub mod progressive;
pub mod take_home;

pub use contract::calculate_contract_rate;
pub use progressive::{BracketMatch, ScheduleError, compute_tax, find_bracket, validate_schedule};
pub use take_home::{CalculationError, TakeHomeCalculator, calculate_take_home_salary};
