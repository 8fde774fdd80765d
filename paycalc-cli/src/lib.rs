//! Command-line presentation of the pay calculators: argument parsing,
//! input sanitising, AUD formatting, tables and logging.

pub mod app;
pub mod commands;
pub mod config;
pub mod format;
pub mod input;
pub mod logging;
