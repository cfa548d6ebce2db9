//! Data models and configuration.

pub mod config;
pub mod timesheet;

pub use config::{ExtractionConfig, ExtractionStrategy, OutputConfig, PathsConfig, PontoConfig, TableConfig};
pub use timesheet::{ExtractionMethod, Timesheet, TimesheetRecord};
