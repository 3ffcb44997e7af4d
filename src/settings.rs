//! Persisted user preferences.
//!
//! Only durable preferences are stored: the standby rate, the overtime
//! multipliers and the tax settings. Hours, earnings, reimbursements and
//! deductions belong to a single pay period and are never written. Older
//! blobs that still carry them are loaded for their durable parts and
//! rewritten without them.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::TaxTables;
use crate::error::{EngineError, EngineResult};
use crate::input::{bounded, clamp};
use crate::models::{RateSelection, TaxSettings, WageDeclaration};

/// File name of the settings blob. The version suffix changes with the format.
pub const SETTINGS_FILE_NAME: &str = "paycalc-v1.json";

/// Keys of per-period state that older versions persisted.
const TRANSIENT_KEYS: [&str; 7] = [
    "workedDays",
    "worked_days",
    "salary",
    "hours",
    "earnings",
    "reimbursements",
    "deductions",
];

/// Persisted rate preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSettings {
    /// Hourly standby rate.
    pub standby: Decimal,
    /// 150% overtime multiplier.
    pub overtime150_multiplier: Decimal,
    /// 200% overtime multiplier.
    pub overtime200_multiplier: Decimal,
}

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Rate preferences.
    pub rates: RateSettings,
    /// Tax strategy preferences.
    pub tax: TaxSettings,
}

impl UserSettings {
    /// The configured defaults.
    pub fn defaults(tables: &TaxTables) -> Self {
        let defaults = tables.defaults();
        Self {
            rates: RateSettings {
                standby: defaults.standby_rate,
                overtime150_multiplier: defaults.overtime150_multiplier,
                overtime200_multiplier: defaults.overtime200_multiplier,
            },
            tax: TaxSettings::BracketCredit {
                payroll_period: defaults.payroll_period,
                apply_credits: defaults.apply_credits,
            },
        }
    }

    /// Copies the preferences into a declaration.
    pub fn apply_to(&self, declaration: &mut WageDeclaration) {
        declaration.rates.standby = self.rates.standby;
        declaration.rates.overtime150_multiplier = self.rates.overtime150_multiplier;
        declaration.rates.overtime200_multiplier = self.rates.overtime200_multiplier;
        declaration.tax = self.tax.clone();
    }
}

// Every field optional so partial and legacy blobs still load.
#[derive(Debug, Deserialize)]
struct StoredSettings {
    #[serde(default)]
    rates: Option<StoredRates>,
    #[serde(default)]
    tax: Option<TaxSettings>,
}

#[derive(Debug, Deserialize)]
struct StoredRates {
    #[serde(default)]
    standby: Option<Decimal>,
    #[serde(default, alias = "mult150")]
    overtime150_multiplier: Option<Decimal>,
    #[serde(default, alias = "mult200")]
    overtime200_multiplier: Option<Decimal>,
}

/// Reads and writes [`UserSettings`] as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    defaults: UserSettings,
    tables: TaxTables,
}

impl SettingsStore {
    /// Creates a store for `dir/paycalc-v1.json`.
    pub fn new<P: AsRef<Path>>(dir: P, tables: &TaxTables) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE_NAME),
            defaults: UserSettings::defaults(tables),
            tables: tables.clone(),
        }
    }

    /// The settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, falling back to defaults.
    ///
    /// A missing file is not an error. A corrupt file is logged and ignored.
    /// A legacy file carrying per-period state is rewritten without it.
    pub fn load(&self) -> UserSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => self.defaults.clone(),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable settings, using defaults");
                self.defaults.clone()
            }
        }
    }

    /// Loads the settings, reporting unreadable or corrupt files.
    ///
    /// Returns `Ok(None)` when no settings have been saved.
    pub fn try_load(&self) -> EngineResult<Option<UserSettings>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.error(err.to_string())),
        };

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| self.error(e.to_string()))?;
        let Some(object) = value.as_object() else {
            return Err(self.error("settings blob is not a JSON object"));
        };
        let has_transient = TRANSIENT_KEYS.iter().any(|key| object.contains_key(*key));

        let stored: StoredSettings =
            serde_json::from_value(value).map_err(|e| self.error(e.to_string()))?;
        let settings = self.merge(stored);

        if has_transient {
            info!(path = %self.path.display(), "Rewriting legacy settings without per-period state");
            self.save(&settings)?;
        }

        Ok(Some(settings))
    }

    /// Writes the settings, creating the directory if needed.
    pub fn save(&self, settings: &UserSettings) -> EngineResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|e| self.error(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| self.error(e.to_string()))
    }

    /// Deletes the saved settings. Deleting nothing is not an error.
    pub fn reset(&self) -> EngineResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.error(err.to_string())),
        }
    }

    fn merge(&self, stored: StoredSettings) -> UserSettings {
        let limits = self.tables.limits();
        let mut settings = self.defaults.clone();

        if let Some(rates) = stored.rates {
            if let Some(standby) = rates.standby {
                settings.rates.standby = bounded(standby, limits.rate_max);
            }
            if let Some(multiplier) = rates.overtime150_multiplier {
                let value = if multiplier.is_zero() {
                    self.defaults.rates.overtime150_multiplier
                } else {
                    multiplier
                };
                settings.rates.overtime150_multiplier =
                    clamp(value, limits.multiplier_min, limits.multiplier_max);
            }
            if let Some(multiplier) = rates.overtime200_multiplier {
                let value = if multiplier.is_zero() {
                    self.defaults.rates.overtime200_multiplier
                } else {
                    multiplier
                };
                settings.rates.overtime200_multiplier =
                    clamp(value, limits.multiplier_min, limits.multiplier_max);
            }
        }

        if let Some(tax) = stored.tax {
            settings.tax = match tax {
                TaxSettings::FlatRate {
                    rate: RateSelection::Custom { rate },
                    overtime_surtax,
                } => TaxSettings::FlatRate {
                    rate: RateSelection::Custom {
                        rate: clamp(rate, limits.tax_rate_min, limits.tax_rate_max),
                    },
                    overtime_surtax,
                },
                other => other,
            };
        }

        settings
    }

    fn error(&self, message: impl Into<String>) -> EngineError {
        EngineError::SettingsError {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }
}
