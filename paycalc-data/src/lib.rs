//! CSV loading of financial year schedules into a [`TaxYearRegistry`](paycalc_core::TaxYearRegistry).

mod loader;

pub use loader::{
    LoadMode, LoadSummary, ScheduleLoader, ScheduleLoaderError, ScheduleRecord, YearSchedule,
    is_valid_year_key,
};
