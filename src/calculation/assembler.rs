//! Result assembly.
//!
//! Maps the engine's intermediate values into the [`PayResult`] shape:
//! earnings lines in declared order plus a reimbursements line, the
//! estimated-tax line ahead of the user deduction lines, and the resolved
//! amount of each user deduction.

use rust_decimal::Decimal;

use crate::models::{AuditTrace, DeductionDetail, PayLine, PayResult, PayTotals};

use super::deductions::ResolvedDeduction;
use super::wage_bases::ResolvedEarning;

/// Label of the single line carrying the reimbursements total.
pub const REIMBURSEMENTS_LINE_LABEL: &str = "Reimbursements";

/// Everything the engine hands to the assembler.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Earnings items with their amounts fixed, in declared order.
    pub earnings: Vec<ResolvedEarning>,
    /// Sum of all reimbursements.
    pub reimbursements_total: Decimal,
    /// Label of the estimated-tax line.
    pub tax_label: String,
    /// User deductions in declared order.
    pub deductions: Vec<ResolvedDeduction>,
    /// Summary totals, already computed.
    pub totals: PayTotals,
    /// Audit trace collected along the pipeline.
    pub audit_trace: AuditTrace,
}

/// Builds the [`PayResult`] for an assembly.
pub fn assemble(assembly: Assembly) -> PayResult {
    let Assembly {
        earnings,
        reimbursements_total,
        tax_label,
        deductions,
        totals,
        audit_trace,
    } = assembly;

    let mut earnings_lines: Vec<PayLine> = earnings
        .into_iter()
        .map(|item| PayLine::new(item.label, item.amount))
        .collect();
    earnings_lines.push(PayLine::new(REIMBURSEMENTS_LINE_LABEL, reimbursements_total));

    let mut deduction_lines = Vec::with_capacity(deductions.len() + 1);
    deduction_lines.push(PayLine::new(tax_label, totals.estimated_tax));

    let mut deduction_details = Vec::with_capacity(deductions.len());
    for deduction in deductions {
        deduction_details.push(DeductionDetail {
            id: deduction.id,
            amount: deduction.amount,
        });
        deduction_lines.push(PayLine::new(deduction.label, deduction.amount));
    }

    PayResult {
        earnings_lines,
        deduction_lines,
        deduction_details,
        totals,
        audit_trace,
    }
}
