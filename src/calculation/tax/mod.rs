//! Tax estimation strategies.
//!
//! Two interchangeable strategies implement [`TaxStrategy`]:
//!
//! - [`ProgressiveTax`]: annualized marginal brackets with optional general
//!   and labor credits (the default).
//! - [`FlatRateTax`]: one preset or custom rate on the taxable wage, with an
//!   optional legacy surtax on overtime pay.
//!
//! [`select_strategy`] picks one from the declaration's [`TaxSettings`]; the
//! engine never branches on the tax mode itself.

mod brackets;
mod credits;
mod flat_rate;
mod progressive;

pub use brackets::{BracketSlice, bracket_tax, integrate_brackets};
pub use credits::{general_credit, labor_credit};
pub use flat_rate::FlatRateTax;
pub use progressive::{ProgressiveBreakdown, ProgressiveTax, estimate_progressive_tax};

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::TaxTables;
use crate::models::{AuditStep, AuditWarning, RateSelection, TaxSettings};

/// Amounts a strategy may tax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxBase {
    /// Taxable wage for the period.
    pub taxable_wage: Decimal,
    /// Overtime pay (150% and 200% tiers) for the period.
    pub overtime_pay: Decimal,
}

/// The estimated tax and how it was reached.
#[derive(Debug, Clone)]
pub struct TaxEstimate {
    /// Estimated tax for the period.
    pub tax: Decimal,
    /// Audit steps, numbered from the start number given to the strategy.
    pub audit_steps: Vec<AuditStep>,
}

/// A way to estimate the tax for one pay period.
pub trait TaxStrategy {
    /// Label for the estimated-tax deduction line.
    fn label(&self) -> String;

    /// Estimates the per-period tax.
    fn estimate_tax(&self, base: &TaxBase, step_number_start: u32) -> TaxEstimate;
}

/// A selected strategy plus any warnings raised while selecting it.
pub struct StrategySelection<'a> {
    /// The strategy to use.
    pub strategy: Box<dyn TaxStrategy + 'a>,
    /// Warnings such as an unknown preset fallback.
    pub warnings: Vec<AuditWarning>,
}

/// Builds the strategy described by `settings`.
///
/// An unknown preset id never fails the calculation: the default preset is
/// used and a warning is returned.
pub fn select_strategy<'a>(settings: &TaxSettings, tables: &'a TaxTables) -> StrategySelection<'a> {
    let mut warnings = Vec::new();

    let strategy: Box<dyn TaxStrategy + 'a> = match settings {
        TaxSettings::BracketCredit {
            payroll_period,
            apply_credits,
        } => Box::new(ProgressiveTax::new(tables, *payroll_period, *apply_credits)),
        TaxSettings::FlatRate {
            rate,
            overtime_surtax,
        } => {
            let flat = match rate {
                RateSelection::Custom { rate } => FlatRateTax::new(*rate),
                RateSelection::Preset { preset_id } => {
                    let preset = match tables.preset(preset_id) {
                        Some(preset) => preset,
                        None => {
                            let fallback = tables.default_preset();
                            warn!(
                                preset_id = %preset_id,
                                fallback = %fallback.id,
                                "Unknown tax preset, using default"
                            );
                            warnings.push(AuditWarning {
                                code: "UNKNOWN_TAX_PRESET".to_string(),
                                message: format!(
                                    "Tax preset '{}' not found; using '{}'",
                                    preset_id, fallback.id
                                ),
                                severity: "medium".to_string(),
                            });
                            fallback
                        }
                    };
                    FlatRateTax::new(preset.rate).with_preset_label(preset.label.clone())
                }
            };
            if *overtime_surtax {
                Box::new(flat.with_overtime_surtax(tables.overtime_surtax_rate()))
            } else {
                Box::new(flat)
            }
        }
    };

    StrategySelection { strategy, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayrollPeriod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn base(taxable: &str) -> TaxBase {
        TaxBase {
            taxable_wage: dec(taxable),
            overtime_pay: dec("100"),
        }
    }

    #[test]
    fn test_select_bracket_credit() {
        let tables = TaxTables::default();
        let settings = TaxSettings::BracketCredit {
            payroll_period: PayrollPeriod::Monthly,
            apply_credits: true,
        };
        let selection = select_strategy(&settings, &tables);
        assert!(selection.warnings.is_empty());
        assert_eq!(
            selection.strategy.estimate_tax(&base("3750"), 1).tax,
            dec("794.83745")
        );
    }

    #[test]
    fn test_select_known_preset() {
        let tables = TaxTables::default();
        let settings = TaxSettings::FlatRate {
            rate: RateSelection::Preset {
                preset_id: "rate4950".to_string(),
            },
            overtime_surtax: false,
        };
        let selection = select_strategy(&settings, &tables);
        assert!(selection.warnings.is_empty());
        assert_eq!(selection.strategy.label(), "Payroll tax 49,50%");
        assert_eq!(selection.strategy.estimate_tax(&base("1000"), 1).tax, dec("495"));
    }

    #[test]
    fn test_unknown_preset_falls_back_to_default() {
        let tables = TaxTables::default();
        let settings = TaxSettings::FlatRate {
            rate: RateSelection::Preset {
                preset_id: "rate9999".to_string(),
            },
            overtime_surtax: false,
        };
        let selection = select_strategy(&settings, &tables);
        assert_eq!(selection.warnings.len(), 1);
        assert_eq!(selection.warnings[0].code, "UNKNOWN_TAX_PRESET");
        assert_eq!(selection.strategy.estimate_tax(&base("1000"), 1).tax, dec("358.2"));
    }

    #[test]
    fn test_custom_rate_with_surtax_uses_configured_surtax() {
        let tables = TaxTables::default();
        let settings = TaxSettings::FlatRate {
            rate: RateSelection::Custom { rate: dec("0.35") },
            overtime_surtax: true,
        };
        let selection = select_strategy(&settings, &tables);
        // 1000 × 0.35 + 100 × 0.5033
        assert_eq!(
            selection.strategy.estimate_tax(&base("1000"), 1).tax,
            dec("400.33")
        );
    }
}
