//! Configuration loading for payroll tax parameters.
//!
//! Bracket tables, credit formulas, period factors and flat-rate presets are
//! supplied as YAML so that yearly parameter changes never touch the
//! calculation code.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/nl2025").unwrap();
//! println!("Brackets: {}", config.tables().brackets().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CreditConfig, FlatRatePreset, GeneralCreditConfig, INPUT_LIMIT_CEILING, InputDefaults,
    InputLimits, LaborCreditConfig, MULTIPLIER_CEILING, PeriodFactors, PresetConfig, TaxBracket,
    TaxTableConfig, TaxTables,
};
