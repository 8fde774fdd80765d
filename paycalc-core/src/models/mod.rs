mod contract_result;
mod salary_result;
mod tax_bracket;
mod tax_year;

pub use contract_result::{ContractCalculationResult, ContractRange};
pub use salary_result::{SalaryCalculationResult, SalaryInput};
pub use tax_bracket::TaxBracket;
pub use tax_year::{TaxYear, TaxYearUpdate};
