//! Progressive bracket/credit tax.
//!
//! A periodic taxable wage is annualized with the payroll period factor,
//! taxed over the marginal brackets, reduced by the general and labor credits
//! (never below zero), and divided back into a per-period amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxTables;
use crate::models::{AuditStep, PayrollPeriod};

use super::brackets::{BracketSlice, integrate_brackets};
use super::credits::{general_credit, labor_credit};
use super::{TaxBase, TaxEstimate, TaxStrategy};

/// Every intermediate of the annualization round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBreakdown {
    /// Periods per year.
    pub annual_factor: Decimal,
    /// Periodic taxable wage × annual factor.
    pub annual_taxable_wage: Decimal,
    /// Per-bracket slices.
    pub slices: Vec<BracketSlice>,
    /// Sum of bracket taxes.
    pub annual_gross_tax: Decimal,
    /// General credit before the cap.
    pub general_credit: Decimal,
    /// Labor credit before the cap.
    pub labor_credit: Decimal,
    /// Credits actually applied: `min(gross tax, general + labor)`.
    pub annual_credits: Decimal,
    /// Gross tax minus applied credits.
    pub annual_net_tax: Decimal,
    /// Annual net tax ÷ annual factor.
    pub tax_per_period: Decimal,
}

/// Estimates the per-period tax for a periodic taxable wage.
///
/// Negative wages are treated as zero. With `apply_credits` false the annual
/// net tax equals the annual gross tax.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::tax::estimate_progressive_tax;
/// use payslip_engine::config::TaxTables;
/// use payslip_engine::models::PayrollPeriod;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::default();
/// let breakdown = estimate_progressive_tax(
///     Decimal::from(3750),
///     PayrollPeriod::Monthly,
///     false,
///     &tables,
/// );
/// assert_eq!(breakdown.annual_taxable_wage, Decimal::from(45000));
/// assert_eq!(breakdown.annual_gross_tax, Decimal::new(166185, 1));
/// ```
pub fn estimate_progressive_tax(
    taxable_wage_per_period: Decimal,
    period: PayrollPeriod,
    apply_credits: bool,
    tables: &TaxTables,
) -> ProgressiveBreakdown {
    let annual_factor = tables.period_factor(period);
    let annual_taxable_wage = taxable_wage_per_period.max(Decimal::ZERO) * annual_factor;

    let slices = integrate_brackets(annual_taxable_wage, tables.brackets());
    let annual_gross_tax: Decimal = slices.iter().map(|s| s.tax).sum();

    let (general, labor) = if apply_credits && annual_taxable_wage > Decimal::ZERO {
        let credits = tables.credits();
        (
            general_credit(annual_taxable_wage, &credits.general),
            labor_credit(annual_taxable_wage, &credits.labor),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let annual_credits = annual_gross_tax.min(general + labor);
    let annual_net_tax = annual_gross_tax - annual_credits;

    ProgressiveBreakdown {
        annual_factor,
        annual_taxable_wage,
        slices,
        annual_gross_tax,
        general_credit: general,
        labor_credit: labor,
        annual_credits,
        annual_net_tax,
        tax_per_period: annual_net_tax / annual_factor,
    }
}

/// The bracket/credit strategy.
#[derive(Debug, Clone)]
pub struct ProgressiveTax<'a> {
    tables: &'a TaxTables,
    period: PayrollPeriod,
    apply_credits: bool,
}

impl<'a> ProgressiveTax<'a> {
    /// Creates the strategy over the given tables.
    pub fn new(tables: &'a TaxTables, period: PayrollPeriod, apply_credits: bool) -> Self {
        Self {
            tables,
            period,
            apply_credits,
        }
    }
}

impl TaxStrategy for ProgressiveTax<'_> {
    fn label(&self) -> String {
        if self.apply_credits {
            "Estimated payroll tax (with credits)".to_string()
        } else {
            "Estimated payroll tax".to_string()
        }
    }

    fn estimate_tax(&self, base: &TaxBase, step_number_start: u32) -> TaxEstimate {
        let b = estimate_progressive_tax(
            base.taxable_wage,
            self.period,
            self.apply_credits,
            self.tables,
        );
        let period_name = match self.period {
            PayrollPeriod::Monthly => "monthly",
            PayrollPeriod::FourWeekly => "four_weekly",
        };

        let mut audit_steps = Vec::new();
        let mut step_number = step_number_start;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "tax_annualize".to_string(),
            rule_name: "Annualize Taxable Wage".to_string(),
            input: serde_json::json!({
                "taxable_wage": base.taxable_wage.normalize().to_string(),
                "payroll_period": period_name
            }),
            output: serde_json::json!({
                "annual_factor": b.annual_factor.normalize().to_string(),
                "annual_taxable_wage": b.annual_taxable_wage.normalize().to_string()
            }),
            reasoning: format!(
                "€{} × {} periods = €{} per year",
                base.taxable_wage.max(Decimal::ZERO).normalize(),
                b.annual_factor.normalize(),
                b.annual_taxable_wage.normalize()
            ),
        });
        step_number += 1;

        let slice_json: Vec<serde_json::Value> = b
            .slices
            .iter()
            .map(|s| {
                serde_json::json!({
                    "lower": s.lower.normalize().to_string(),
                    "upper": s.upper.map(|u| u.normalize().to_string()),
                    "rate": s.rate.normalize().to_string(),
                    "taxable": s.taxable.normalize().to_string(),
                    "tax": s.tax.normalize().to_string()
                })
            })
            .collect();
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "tax_brackets".to_string(),
            rule_name: "Bracket Tax".to_string(),
            input: serde_json::json!({
                "annual_taxable_wage": b.annual_taxable_wage.normalize().to_string(),
                "brackets": b.slices.len()
            }),
            output: serde_json::json!({
                "slices": slice_json,
                "annual_gross_tax": b.annual_gross_tax.normalize().to_string()
            }),
            reasoning: format!(
                "Bracket integration over {} brackets gives €{} annual gross tax",
                b.slices.len(),
                b.annual_gross_tax.normalize()
            ),
        });
        step_number += 1;

        if self.apply_credits {
            let credits = self.tables.credits();
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "tax_general_credit".to_string(),
                rule_name: "General Tax Credit".to_string(),
                input: serde_json::json!({
                    "annual_taxable_wage": b.annual_taxable_wage.normalize().to_string(),
                    "max": credits.general.max.normalize().to_string(),
                    "phase_out_start": credits.general.phase_out_start.normalize().to_string(),
                    "phase_out_rate": credits.general.phase_out_rate.normalize().to_string()
                }),
                output: serde_json::json!({
                    "general_credit": b.general_credit.normalize().to_string()
                }),
                reasoning: format!(
                    "€{} minus {} × wage above €{} gives €{}",
                    credits.general.max.normalize(),
                    credits.general.phase_out_rate.normalize(),
                    credits.general.phase_out_start.normalize(),
                    b.general_credit.normalize()
                ),
            });
            step_number += 1;

            let zone = if b.annual_taxable_wage <= credits.labor.phase_in_end {
                "phase_in"
            } else if b.annual_taxable_wage <= credits.labor.plateau_end {
                "plateau"
            } else {
                "phase_out"
            };
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "tax_labor_credit".to_string(),
                rule_name: "Labor Tax Credit".to_string(),
                input: serde_json::json!({
                    "annual_taxable_wage": b.annual_taxable_wage.normalize().to_string(),
                    "phase_in_end": credits.labor.phase_in_end.normalize().to_string(),
                    "plateau_end": credits.labor.plateau_end.normalize().to_string()
                }),
                output: serde_json::json!({
                    "zone": zone,
                    "labor_credit": b.labor_credit.normalize().to_string()
                }),
                reasoning: format!(
                    "Wage €{} is in the {} zone: €{}",
                    b.annual_taxable_wage.normalize(),
                    zone.replace('_', "-"),
                    b.labor_credit.normalize()
                ),
            });
            step_number += 1;

            audit_steps.push(AuditStep {
                step_number,
                rule_id: "tax_credit_cap".to_string(),
                rule_name: "Credit Cap".to_string(),
                input: serde_json::json!({
                    "general_credit": b.general_credit.normalize().to_string(),
                    "labor_credit": b.labor_credit.normalize().to_string(),
                    "annual_gross_tax": b.annual_gross_tax.normalize().to_string()
                }),
                output: serde_json::json!({
                    "annual_credits": b.annual_credits.normalize().to_string(),
                    "annual_net_tax": b.annual_net_tax.normalize().to_string(),
                    "capped": b.general_credit + b.labor_credit > b.annual_gross_tax
                }),
                reasoning: format!(
                    "min(€{}, €{} + €{}) = €{} applied",
                    b.annual_gross_tax.normalize(),
                    b.general_credit.normalize(),
                    b.labor_credit.normalize(),
                    b.annual_credits.normalize()
                ),
            });
            step_number += 1;
        }

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "tax_deannualize".to_string(),
            rule_name: "Per-Period Tax".to_string(),
            input: serde_json::json!({
                "annual_net_tax": b.annual_net_tax.normalize().to_string(),
                "annual_factor": b.annual_factor.normalize().to_string()
            }),
            output: serde_json::json!({
                "estimated_tax": b.tax_per_period.normalize().to_string()
            }),
            reasoning: format!(
                "€{} ÷ {} periods = €{}",
                b.annual_net_tax.normalize(),
                b.annual_factor.normalize(),
                b.tax_per_period.normalize()
            ),
        });

        TaxEstimate {
            tax: b.tax_per_period,
            audit_steps,
        }
    }
}
