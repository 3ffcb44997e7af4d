//! Pay result models.
//!
//! This module contains the [`PayResult`] type and its associated structures
//! that capture all outputs from a pay calculation: itemized earnings and
//! deductions, resolved deduction amounts, totals, and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labelled amount shown in the earnings or deductions section.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayLine;
/// use rust_decimal::Decimal;
///
/// let line = PayLine::new("Salary", Decimal::from(3000));
/// assert_eq!(line.label, "Salary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// Display label.
    pub label: String,
    /// Amount for this line.
    pub amount: Decimal,
}

impl PayLine {
    /// Creates a pay line.
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// The resolved amount of one user deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionDetail {
    /// The deduction id from the declaration.
    pub id: String,
    /// The amount after percent-of-basis resolution.
    pub amount: Decimal,
}

/// Summary totals of a pay calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTotals {
    /// Earnings plus reimbursements.
    pub gross_pay: Decimal,
    /// Sum of all earnings items.
    pub earnings_total: Decimal,
    /// Sum of all reimbursements.
    pub reimbursements_total: Decimal,
    /// Wage subject to income tax.
    pub taxable_wage: Decimal,
    /// Social-insurance wage.
    pub social_insurance_wage: Decimal,
    /// Health-insurance wage.
    pub health_insurance_wage: Decimal,
    /// Estimated payroll tax for the period.
    pub estimated_tax: Decimal,
    /// Sum of the resolved user deductions.
    pub other_deductions_total: Decimal,
    /// Estimated tax plus other deductions.
    pub total_deductions: Decimal,
    /// Gross pay minus all deductions. May be negative.
    pub net_pay: Decimal,
    /// Reimbursements that do not count toward the taxable wage.
    pub non_taxable_reimbursements: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings never stop a calculation; they flag input worth a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a pay calculation.
///
/// A fresh value is produced for every calculation; it carries no identity
/// or timestamp so identical declarations give identical results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    /// Earnings lines in declared order, followed by the reimbursements line.
    pub earnings_lines: Vec<PayLine>,
    /// Deduction lines; the first is always the estimated tax.
    pub deduction_lines: Vec<PayLine>,
    /// Resolved amount of every user deduction, by id.
    pub deduction_details: Vec<DeductionDetail>,
    /// Summary totals.
    pub totals: PayTotals,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayResult {
    /// Returns the resolved amount of the deduction with the given id.
    pub fn deduction_amount(&self, id: &str) -> Option<Decimal> {
        self.deduction_details
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_pay_line_serialization() {
        let line = PayLine::new("Shift allowance", dec("516.00"));
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"label\":\"Shift allowance\""));
        assert!(json.contains("\"amount\":\"516.00\""));
    }

    #[test]
    fn test_pay_totals_serialization() {
        let totals = PayTotals {
            gross_pay: dec("666"),
            net_pay: dec("-12.50"),
            ..PayTotals::default()
        };

        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.contains("\"gross_pay\":\"666\""));
        assert!(json.contains("\"net_pay\":\"-12.50\""));
        assert!(json.contains("\"non_taxable_reimbursements\":\"0\""));
    }

    #[test]
    fn test_pay_totals_deserialization() {
        let json = r#"{
            "gross_pay": "2000.50",
            "earnings_total": "1900.50",
            "reimbursements_total": "100",
            "taxable_wage": "1900.50",
            "social_insurance_wage": "1900.50",
            "health_insurance_wage": "1900.50",
            "estimated_tax": "250",
            "other_deductions_total": "0",
            "total_deductions": "250",
            "net_pay": "1750.50",
            "non_taxable_reimbursements": "100"
        }"#;

        let totals: PayTotals = serde_json::from_str(json).unwrap();
        assert_eq!(totals.gross_pay, dec("2000.50"));
        assert_eq!(totals.net_pay, dec("1750.50"));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "HOURS_ABOVE_SOFT_MAX".to_string(),
            message: "Total hours 420 exceed 400".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"HOURS_ABOVE_SOFT_MAX\""));
        assert!(json.contains("\"severity\":\"low\""));
    }

    #[test]
    fn test_deduction_amount_lookup() {
        let result = PayResult {
            earnings_lines: vec![],
            deduction_lines: vec![],
            deduction_details: vec![
                DeductionDetail {
                    id: "a".to_string(),
                    amount: dec("80"),
                },
                DeductionDetail {
                    id: "b".to_string(),
                    amount: dec("200"),
                },
            ],
            totals: PayTotals::default(),
            audit_trace: AuditTrace::default(),
        };

        assert_eq!(result.deduction_amount("b"), Some(dec("200")));
        assert_eq!(result.deduction_amount("missing"), None);
    }
}
