//! Configuration types for payroll tax estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a tax table directory, plus the
//! built-in defaults used when no valid configuration can be loaded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollPeriod;

/// Largest value accepted for the hours, rate and amount limits.
///
/// With every input capped by these limits the calculation stays far inside
/// the `Decimal` range.
pub const INPUT_LIMIT_CEILING: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest value accepted for `multiplier_max`.
pub const MULTIPLIER_CEILING: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Number of pay periods per year for each payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFactors {
    /// Periods per year for monthly payroll.
    pub monthly: Decimal,
    /// Periods per year for four-weekly payroll.
    pub four_weekly: Decimal,
}

/// A single annual marginal tax bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket in annual income. `None` is unbounded.
    pub up_to: Option<Decimal>,
    /// Marginal rate applied to income inside the bracket (e.g. 0.3693).
    pub rate: Decimal,
}

/// Parameters of the general tax credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralCreditConfig {
    /// Maximum credit.
    pub max: Decimal,
    /// Annual income above which the credit starts to phase out.
    pub phase_out_start: Decimal,
    /// Reduction per unit of income above `phase_out_start`.
    pub phase_out_rate: Decimal,
}

/// Parameters of the labor tax credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCreditConfig {
    /// End of the phase-in zone.
    pub phase_in_end: Decimal,
    /// Credit per unit of income inside the phase-in zone.
    pub phase_in_rate: Decimal,
    /// Flat credit on the plateau.
    pub max: Decimal,
    /// End of the plateau; phase-out starts here.
    pub plateau_end: Decimal,
    /// Reduction per unit of income above `plateau_end`.
    pub phase_out_rate: Decimal,
}

/// Both tax credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditConfig {
    /// General tax credit.
    pub general: GeneralCreditConfig,
    /// Labor tax credit.
    pub labor: LaborCreditConfig,
}

/// Contents of `tax.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTableConfig {
    /// Annualization factors.
    pub period_factors: PeriodFactors,
    /// Marginal brackets, lowest first.
    pub brackets: Vec<TaxBracket>,
    /// Credit formulas.
    pub credits: CreditConfig,
}

/// A named flat tax rate the user can pick instead of entering one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRatePreset {
    /// Stable preset id (e.g. "rate3582").
    pub id: String,
    /// Display label.
    pub label: String,
    /// The rate as a fraction (e.g. 0.3582).
    pub rate: Decimal,
}

/// Defaults used for fresh input and as fallbacks for invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDefaults {
    /// Standby hourly rate.
    pub standby_rate: Decimal,
    /// Overtime 150% multiplier.
    pub overtime150_multiplier: Decimal,
    /// Overtime 200% multiplier.
    pub overtime200_multiplier: Decimal,
    /// Preset used when none (or an unknown one) is selected.
    pub tax_preset_id: String,
    /// Default payroll period.
    pub payroll_period: PayrollPeriod,
    /// Whether tax credits are applied by default.
    pub apply_credits: bool,
}

/// Bounds applied at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Lowest allowed flat tax rate.
    pub tax_rate_min: Decimal,
    /// Highest allowed flat tax rate.
    pub tax_rate_max: Decimal,
    /// Lowest allowed overtime multiplier.
    pub multiplier_min: Decimal,
    /// Highest allowed overtime multiplier.
    pub multiplier_max: Decimal,
    /// Total hours above which a warning is raised.
    pub hours_soft_max: Decimal,
    /// Upper bound for any single hours value.
    pub hours_max: Decimal,
    /// Upper bound for the hourly and standby rates.
    pub rate_max: Decimal,
    /// Upper bound for any single entered amount.
    pub amount_max: Decimal,
}

/// Contents of `presets.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Available flat-rate presets.
    pub presets: Vec<FlatRatePreset>,
    /// Input defaults.
    pub defaults: InputDefaults,
    /// Input limits.
    pub limits: InputLimits,
    /// Legacy surtax rate on overtime pay under the flat-rate strategy.
    pub overtime_surtax_rate: Decimal,
}

/// The complete, validated set of tax parameters.
///
/// Every calculation reads its tax parameters from a `TaxTables` value;
/// nothing jurisdiction-specific is hard-coded in the calculation modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    tax: TaxTableConfig,
    presets: PresetConfig,
}

impl TaxTables {
    /// Creates validated tax tables from their component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the bracket table is empty,
    /// bounds are not strictly increasing, an unbounded bracket is not last,
    /// a period factor is not positive, preset ids repeat, the default
    /// preset does not exist, or an input limit is outside its ceiling.
    pub fn new(tax: TaxTableConfig, presets: PresetConfig) -> EngineResult<Self> {
        validate_brackets(&tax.brackets)?;

        if tax.period_factors.monthly <= Decimal::ZERO
            || tax.period_factors.four_weekly <= Decimal::ZERO
        {
            return Err(invalid("period_factors", "factors must be positive"));
        }

        for (i, preset) in presets.presets.iter().enumerate() {
            if presets.presets[..i].iter().any(|p| p.id == preset.id) {
                return Err(invalid(
                    "presets",
                    format!("duplicate preset id '{}'", preset.id),
                ));
            }
        }

        if !presets
            .presets
            .iter()
            .any(|p| p.id == presets.defaults.tax_preset_id)
        {
            return Err(invalid(
                "defaults.tax_preset_id",
                format!(
                    "default preset '{}' is not among the presets",
                    presets.defaults.tax_preset_id
                ),
            ));
        }

        validate_limits(&presets.limits)?;

        Ok(Self { tax, presets })
    }

    /// Returns the bracket table, lowest bracket first.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.tax.brackets
    }

    /// Returns the credit parameters.
    pub fn credits(&self) -> &CreditConfig {
        &self.tax.credits
    }

    /// Returns the number of pay periods per year for `period`.
    pub fn period_factor(&self, period: PayrollPeriod) -> Decimal {
        match period {
            PayrollPeriod::Monthly => self.tax.period_factors.monthly,
            PayrollPeriod::FourWeekly => self.tax.period_factors.four_weekly,
        }
    }

    /// Returns all flat-rate presets.
    pub fn presets(&self) -> &[FlatRatePreset] {
        &self.presets.presets
    }

    /// Looks up a preset by id.
    pub fn preset(&self, id: &str) -> Option<&FlatRatePreset> {
        self.presets.presets.iter().find(|p| p.id == id)
    }

    /// Returns the default preset. Always present after validation.
    pub fn default_preset(&self) -> &FlatRatePreset {
        self.preset(&self.presets.defaults.tax_preset_id)
            .unwrap_or(&self.presets.presets[0])
    }

    /// Returns the input defaults.
    pub fn defaults(&self) -> &InputDefaults {
        &self.presets.defaults
    }

    /// Returns the input limits.
    pub fn limits(&self) -> &InputLimits {
        &self.presets.limits
    }

    /// Returns the legacy overtime surtax rate.
    pub fn overtime_surtax_rate(&self) -> Decimal {
        self.presets.overtime_surtax_rate
    }
}

impl Default for TaxTables {
    /// The 2025 tables shipped in `config/nl2025`.
    fn default() -> Self {
        let tax = TaxTableConfig {
            period_factors: PeriodFactors {
                monthly: Decimal::from(12),
                four_weekly: Decimal::from(13),
            },
            brackets: vec![
                TaxBracket {
                    up_to: Some(Decimal::from(75518)),
                    rate: Decimal::new(3693, 4),
                },
                TaxBracket {
                    up_to: None,
                    rate: Decimal::new(495, 3),
                },
            ],
            credits: CreditConfig {
                general: GeneralCreditConfig {
                    max: Decimal::from(3362),
                    phase_out_start: Decimal::from(24812),
                    phase_out_rate: Decimal::new(663, 4),
                },
                labor: LaborCreditConfig {
                    phase_in_end: Decimal::from(11490),
                    phase_in_rate: Decimal::new(823, 4),
                    max: Decimal::from(5532),
                    plateau_end: Decimal::from(37691),
                    phase_out_rate: Decimal::new(65, 3),
                },
            },
        };

        let presets = PresetConfig {
            presets: vec![
                FlatRatePreset {
                    id: "rate3582".to_string(),
                    label: "35,82%".to_string(),
                    rate: Decimal::new(3582, 4),
                },
                FlatRatePreset {
                    id: "rate3748".to_string(),
                    label: "37,48%".to_string(),
                    rate: Decimal::new(3748, 4),
                },
                FlatRatePreset {
                    id: "rate4950".to_string(),
                    label: "49,50%".to_string(),
                    rate: Decimal::new(495, 3),
                },
            ],
            defaults: InputDefaults {
                standby_rate: Decimal::new(16, 1),
                overtime150_multiplier: Decimal::new(15, 1),
                overtime200_multiplier: Decimal::new(20, 1),
                tax_preset_id: "rate3582".to_string(),
                payroll_period: PayrollPeriod::Monthly,
                apply_credits: true,
            },
            limits: InputLimits {
                tax_rate_min: Decimal::ZERO,
                tax_rate_max: Decimal::new(6, 1),
                multiplier_min: Decimal::ONE,
                multiplier_max: Decimal::from(5),
                hours_soft_max: Decimal::from(400),
                hours_max: Decimal::from(10_000),
                rate_max: Decimal::from(1_000_000),
                amount_max: Decimal::from(1_000_000_000),
            },
            overtime_surtax_rate: Decimal::new(5033, 4),
        };

        Self { tax, presets }
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    if brackets.is_empty() {
        return Err(invalid("brackets", "at least one bracket is required"));
    }

    let mut previous = Decimal::ZERO;
    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO {
            return Err(invalid(
                "brackets",
                format!("bracket {} has a negative rate", i + 1),
            ));
        }
        match bracket.up_to {
            Some(bound) => {
                if bound <= previous {
                    return Err(invalid(
                        "brackets",
                        format!(
                            "bracket {} upper bound {} does not exceed {}",
                            i + 1,
                            bound,
                            previous
                        ),
                    ));
                }
                previous = bound;
            }
            None if i + 1 != brackets.len() => {
                return Err(invalid(
                    "brackets",
                    format!("unbounded bracket {} must be the last bracket", i + 1),
                ));
            }
            None => {}
        }
    }

    Ok(())
}

fn validate_limits(limits: &InputLimits) -> EngineResult<()> {
    for (field, value) in [
        ("limits.hours_max", limits.hours_max),
        ("limits.rate_max", limits.rate_max),
        ("limits.amount_max", limits.amount_max),
    ] {
        if value <= Decimal::ZERO || value > INPUT_LIMIT_CEILING {
            return Err(invalid(
                field,
                format!("must be positive and at most {}", INPUT_LIMIT_CEILING),
            ));
        }
    }

    if limits.multiplier_min < Decimal::ZERO
        || limits.multiplier_min > limits.multiplier_max
        || limits.multiplier_max > MULTIPLIER_CEILING
    {
        return Err(invalid(
            "limits.multiplier_max",
            format!(
                "multiplier bounds must satisfy 0 <= min <= max <= {}",
                MULTIPLIER_CEILING
            ),
        ));
    }

    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
