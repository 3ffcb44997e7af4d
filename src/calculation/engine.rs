//! The pay computation pipeline.
//!
//! [`compute`] is a total function: every declaration yields a result.
//! Degenerate input (negative net pay, zero hours) is a valid outcome, and
//! soft problems are reported as audit warnings instead of errors.

use tracing::{debug, warn};

use crate::config::TaxTables;
use crate::models::{AuditStep, AuditTrace, AuditWarning, PayResult, PayTotals, WageDeclaration};

use super::assembler::{Assembly, assemble};
use super::deductions::resolve_deductions;
use super::pay_components::calculate_pay_components;
use super::tax::{TaxBase, select_strategy};
use super::wage_bases::{calculate_wage_bases, resolve_earnings};

/// Computes the pay result for a declaration.
///
/// The pipeline prices hours, fixes the computed earnings items, sums the
/// three wage bases, resolves user deductions, runs the selected tax
/// strategy and derives the totals. The declaration is never modified.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute;
/// use payslip_engine::config::TaxTables;
/// use payslip_engine::models::WageDeclaration;
/// use rust_decimal::Decimal;
///
/// let result = compute(&WageDeclaration::default(), &TaxTables::default());
/// assert_eq!(result.totals.gross_pay, Decimal::ZERO);
/// assert_eq!(result.totals.net_pay, Decimal::ZERO);
/// ```
pub fn compute(declaration: &WageDeclaration, tables: &TaxTables) -> PayResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let total_hours = declaration.hours.total();
    let hours_soft_max = tables.limits().hours_soft_max;
    if total_hours > hours_soft_max {
        warn!(
            total_hours = %total_hours,
            hours_soft_max = %hours_soft_max,
            "Declared hours above soft maximum"
        );
        warnings.push(AuditWarning {
            code: "HOURS_ABOVE_SOFT_MAX".to_string(),
            message: format!(
                "Total hours {} exceed the expected maximum of {} per period",
                total_hours.normalize(),
                hours_soft_max.normalize()
            ),
            severity: "low".to_string(),
        });
    }

    let pay = calculate_pay_components(&declaration.hours, &declaration.rates, step_number);
    steps.push(pay.audit_step);
    step_number += 1;

    let earnings = resolve_earnings(&declaration.earnings, &pay.components);

    let wages = calculate_wage_bases(&earnings, &declaration.reimbursements, step_number);
    steps.push(wages.audit_step);
    step_number += 1;

    let deductions = resolve_deductions(&declaration.deductions, &wages.bases, step_number);
    step_number += deductions.audit_steps.len() as u32;
    steps.extend(deductions.audit_steps);

    let selection = select_strategy(&declaration.tax, tables);
    warnings.extend(selection.warnings);
    let tax_base = TaxBase {
        taxable_wage: wages.bases.taxable,
        overtime_pay: pay.components.overtime_pay(),
    };
    let estimate = selection.strategy.estimate_tax(&tax_base, step_number);
    step_number += estimate.audit_steps.len() as u32;
    steps.extend(estimate.audit_steps);

    let gross_pay = wages.earnings_total + wages.reimbursements_total;
    let total_deductions = estimate.tax + deductions.total;
    let net_pay = gross_pay - total_deductions;
    let non_taxable_reimbursements = wages.reimbursements_total - wages.taxable_reimbursements;

    steps.push(AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "earnings_total": wages.earnings_total.normalize().to_string(),
            "reimbursements_total": wages.reimbursements_total.normalize().to_string(),
            "estimated_tax": estimate.tax.normalize().to_string(),
            "other_deductions_total": deductions.total.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string(),
            "non_taxable_reimbursements": non_taxable_reimbursements.normalize().to_string()
        }),
        reasoning: format!(
            "€{} gross - €{} tax - €{} deductions = €{} net",
            gross_pay.normalize(),
            estimate.tax.normalize(),
            deductions.total.normalize(),
            net_pay.normalize()
        ),
    });

    debug!(
        gross_pay = %gross_pay,
        taxable_wage = %wages.bases.taxable,
        estimated_tax = %estimate.tax,
        net_pay = %net_pay,
        "Pay calculation complete"
    );

    let totals = PayTotals {
        gross_pay,
        earnings_total: wages.earnings_total,
        reimbursements_total: wages.reimbursements_total,
        taxable_wage: wages.bases.taxable,
        social_insurance_wage: wages.bases.social_insurance,
        health_insurance_wage: wages.bases.health_insurance,
        estimated_tax: estimate.tax,
        other_deductions_total: deductions.total,
        total_deductions,
        net_pay,
        non_taxable_reimbursements,
    };

    assemble(Assembly {
        earnings,
        reimbursements_total: wages.reimbursements_total,
        tax_label: selection.strategy.label(),
        deductions: deductions.deductions,
        totals,
        audit_trace: AuditTrace { steps, warnings },
    })
}
