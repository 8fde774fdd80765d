pub mod seed;
pub mod tax_years;

pub use tax_years::{RegistryError, SharedRegistry, TaxYearRegistry};
