//! Flat-rate tax.
//!
//! A single rate applied to the taxable wage, optionally with the legacy
//! surtax on overtime pay.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::{TaxBase, TaxEstimate, TaxStrategy};

/// The flat-rate strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRateTax {
    rate: Decimal,
    preset_label: Option<String>,
    overtime_surtax_rate: Option<Decimal>,
}

impl FlatRateTax {
    /// Creates a flat-rate strategy with no surtax.
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            preset_label: None,
            overtime_surtax_rate: None,
        }
    }

    /// Labels the rate with a preset label for display.
    pub fn with_preset_label(mut self, label: impl Into<String>) -> Self {
        self.preset_label = Some(label.into());
        self
    }

    /// Adds a surtax at `rate` on overtime pay.
    pub fn with_overtime_surtax(mut self, rate: Decimal) -> Self {
        self.overtime_surtax_rate = Some(rate);
        self
    }

    /// The flat rate.
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

fn percent(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED).normalize().to_string()
}

impl TaxStrategy for FlatRateTax {
    fn label(&self) -> String {
        let rate = self
            .preset_label
            .clone()
            .unwrap_or_else(|| format!("{}%", percent(self.rate)));
        match self.overtime_surtax_rate {
            Some(surtax) => format!("Payroll tax {} + overtime {}%", rate, percent(surtax)),
            None => format!("Payroll tax {}", rate),
        }
    }

    fn estimate_tax(&self, base: &TaxBase, step_number_start: u32) -> TaxEstimate {
        let taxable = base.taxable_wage.max(Decimal::ZERO);
        let base_tax = taxable * self.rate;
        let mut step_number = step_number_start;

        let mut audit_steps = vec![AuditStep {
            step_number,
            rule_id: "tax_flat_rate".to_string(),
            rule_name: "Flat-Rate Tax".to_string(),
            input: serde_json::json!({
                "taxable_wage": taxable.normalize().to_string(),
                "rate": self.rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "tax": base_tax.normalize().to_string()
            }),
            reasoning: format!(
                "€{} × {}% = €{}",
                taxable.normalize(),
                percent(self.rate),
                base_tax.normalize()
            ),
        }];
        step_number += 1;

        let surtax = match self.overtime_surtax_rate {
            Some(surtax_rate) => {
                let overtime = base.overtime_pay.max(Decimal::ZERO);
                let surtax = overtime * surtax_rate;
                audit_steps.push(AuditStep {
                    step_number,
                    rule_id: "tax_overtime_surtax".to_string(),
                    rule_name: "Overtime Surtax".to_string(),
                    input: serde_json::json!({
                        "overtime_pay": overtime.normalize().to_string(),
                        "rate": surtax_rate.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "surtax": surtax.normalize().to_string()
                    }),
                    reasoning: format!(
                        "€{} overtime × {}% = €{}",
                        overtime.normalize(),
                        percent(surtax_rate),
                        surtax.normalize()
                    ),
                });
                surtax
            }
            None => Decimal::ZERO,
        };

        TaxEstimate {
            tax: base_tax + surtax,
            audit_steps,
        }
    }
}
