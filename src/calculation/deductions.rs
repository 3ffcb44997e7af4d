//! User deduction resolution.
//!
//! Fixed deductions are taken as declared. Percent-of-basis deductions are
//! resolved against the selected wage basis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Deduction, DeductionKind};

use super::wage_bases::WageBases;

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// A deduction with its amount resolved for this calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeduction {
    /// The deduction id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Resolved amount.
    pub amount: Decimal,
}

/// All resolved deductions and their audit steps.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// Resolved deductions in declared order.
    pub deductions: Vec<ResolvedDeduction>,
    /// Sum of all resolved amounts.
    pub total: Decimal,
    /// One audit step per deduction.
    pub audit_steps: Vec<AuditStep>,
}

/// Resolves the amount of a single deduction.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{resolve_deduction_amount, WageBases};
/// use payslip_engine::models::{Deduction, DeductionKind, WageBasis};
/// use rust_decimal::Decimal;
///
/// let bases = WageBases {
///     taxable: Decimal::from(2500),
///     social_insurance: Decimal::from(2000),
///     health_insurance: Decimal::from(1800),
/// };
/// let pension = Deduction {
///     id: "pension".to_string(),
///     label: "Pension".to_string(),
///     amount: Decimal::from(10),
///     kind: DeductionKind::PercentOfBasis,
///     basis: WageBasis::SocialInsurance,
/// };
///
/// assert_eq!(resolve_deduction_amount(&pension, &bases), Decimal::from(200));
/// ```
pub fn resolve_deduction_amount(deduction: &Deduction, bases: &WageBases) -> Decimal {
    match deduction.kind {
        DeductionKind::FixedAmount => deduction.amount,
        DeductionKind::PercentOfBasis => bases.get(deduction.basis) * deduction.amount / ONE_HUNDRED,
    }
}

/// Resolves every deduction in declared order.
pub fn resolve_deductions(
    deductions: &[Deduction],
    bases: &WageBases,
    step_number_start: u32,
) -> DeductionsResult {
    let mut resolved = Vec::with_capacity(deductions.len());
    let mut audit_steps = Vec::with_capacity(deductions.len());
    let mut step_number = step_number_start;

    for deduction in deductions {
        let amount = resolve_deduction_amount(deduction, bases);

        let (input, reasoning) = match deduction.kind {
            DeductionKind::FixedAmount => (
                serde_json::json!({
                    "id": deduction.id,
                    "kind": "fixed_amount",
                    "amount": deduction.amount.normalize().to_string()
                }),
                format!("{}: fixed €{}", deduction.label, amount.normalize()),
            ),
            DeductionKind::PercentOfBasis => {
                let basis_value = bases.get(deduction.basis);
                (
                    serde_json::json!({
                        "id": deduction.id,
                        "kind": "percent_of_basis",
                        "percent": deduction.amount.normalize().to_string(),
                        "basis": deduction.basis.as_str(),
                        "basis_value": basis_value.normalize().to_string()
                    }),
                    format!(
                        "{}: {}% × €{} ({} wage) = €{}",
                        deduction.label,
                        deduction.amount.normalize(),
                        basis_value.normalize(),
                        deduction.basis.as_str(),
                        amount.normalize()
                    ),
                )
            }
        };

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "deduction".to_string(),
            rule_name: "User Deduction".to_string(),
            input,
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning,
        });
        step_number += 1;

        resolved.push(ResolvedDeduction {
            id: deduction.id.clone(),
            label: deduction.label.clone(),
            amount,
        });
    }

    let total = resolved.iter().map(|d| d.amount).sum();

    DeductionsResult {
        deductions: resolved,
        total,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WageBasis;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bases() -> WageBases {
        WageBases {
            taxable: dec("2500"),
            social_insurance: dec("2000"),
            health_insurance: dec("1800"),
        }
    }

    fn deduction(id: &str, amount: &str, kind: DeductionKind, basis: WageBasis) -> Deduction {
        Deduction {
            id: id.to_string(),
            label: id.to_string(),
            amount: dec(amount),
            kind,
            basis,
        }
    }

    #[test]
    fn test_fixed_amount_ignores_basis() {
        let d = deduction("union", "80", DeductionKind::FixedAmount, WageBasis::HealthInsurance);
        assert_eq!(resolve_deduction_amount(&d, &bases()), dec("80"));
    }

    #[test]
    fn test_percent_of_social_insurance_wage() {
        let d = deduction("pension", "10", DeductionKind::PercentOfBasis, WageBasis::SocialInsurance);
        assert_eq!(resolve_deduction_amount(&d, &bases()), dec("200"));
    }

    #[test]
    fn test_changing_basis_changes_only_that_deduction() {
        let fixed = deduction("union", "80", DeductionKind::FixedAmount, WageBasis::Taxable);
        let pension = deduction("pension", "10", DeductionKind::PercentOfBasis, WageBasis::SocialInsurance);
        let before = resolve_deductions(&[fixed.clone(), pension.clone()], &bases(), 1);

        let pension_health = Deduction {
            basis: WageBasis::HealthInsurance,
            ..pension
        };
        let after = resolve_deductions(&[fixed, pension_health], &bases(), 1);

        assert_eq!(before.deductions[0].amount, after.deductions[0].amount);
        assert_eq!(before.deductions[1].amount, dec("200"));
        assert_eq!(after.deductions[1].amount, dec("180"));
        assert_eq!(after.total, dec("260"));
    }

    #[test]
    fn test_fractional_percentage() {
        let d = deduction("fund", "2.5", DeductionKind::PercentOfBasis, WageBasis::Taxable);
        assert_eq!(resolve_deduction_amount(&d, &bases()), dec("62.5"));
    }

    #[test]
    fn test_one_audit_step_per_deduction() {
        let list = vec![
            deduction("a", "10", DeductionKind::FixedAmount, WageBasis::Taxable),
            deduction("b", "1", DeductionKind::PercentOfBasis, WageBasis::Taxable),
        ];
        let result = resolve_deductions(&list, &bases(), 5);
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].step_number, 5);
        assert_eq!(result.audit_steps[1].step_number, 6);
        assert_eq!(result.audit_steps[1].input["basis"], "taxable");
    }

    #[test]
    fn test_no_deductions() {
        let result = resolve_deductions(&[], &bases(), 1);
        assert!(result.deductions.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
    }
}
