//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax tables
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollPeriod;

use super::types::{FlatRatePreset, PresetConfig, TaxTableConfig, TaxTables};

/// Loads and provides access to tax tables.
///
/// # Directory Structure
///
/// ```text
/// config/nl2025/
/// ├── tax.yaml       # Period factors, brackets and credit formulas
/// └── presets.yaml   # Flat-rate presets, input defaults and limits
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
/// use payslip_engine::models::PayrollPeriod;
///
/// let loader = ConfigLoader::load("./config/nl2025").unwrap();
/// let factor = loader.tables().period_factor(PayrollPeriod::Monthly);
/// println!("Periods per year: {}", factor);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: TaxTables,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `tax.yaml` or `presets.yaml` is missing
    /// - `ConfigParseError` if a file contains invalid YAML or misses fields
    /// - `InvalidConfig` if the parsed tables are inconsistent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/nl2025")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax = Self::load_yaml::<TaxTableConfig>(&path.join("tax.yaml"))?;
        let presets = Self::load_yaml::<PresetConfig>(&path.join("presets.yaml"))?;

        let tables = TaxTables::new(tax, presets)?;
        Ok(Self { tables })
    }

    /// Loads configuration, falling back to the built-in tables on any error.
    ///
    /// The failure is logged and [`TaxTables::default`] is used instead.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(loader) => loader,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Falling back to built-in tax tables"
                );
                Self::from_tables(TaxTables::default())
            }
        }
    }

    /// Wraps already-built tables.
    pub fn from_tables(tables: TaxTables) -> Self {
        Self { tables }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded tax tables.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Gets a flat-rate preset by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/nl2025")?;
    /// let preset = loader.get_preset("rate3748")?;
    /// println!("{} = {}", preset.label, preset.rate);
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn get_preset(&self, id: &str) -> EngineResult<&FlatRatePreset> {
        self.tables
            .preset(id)
            .ok_or_else(|| EngineError::PresetNotFound { id: id.to_string() })
    }

    /// Returns the number of pay periods per year for a payroll period.
    pub fn period_factor(&self, period: PayrollPeriod) -> rust_decimal::Decimal {
        self.tables.period_factor(period)
    }
}
