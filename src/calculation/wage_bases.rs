//! Earnings resolution and wage-basis summation.
//!
//! Earnings items and reimbursements share one shape: an amount plus the set
//! of wage bases it counts toward. Each basis is then a single filtered sum
//! over both collections.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, EarningsItem, EarningsKind, Reimbursement, WageBasis};

use super::pay_components::PayComponents;

/// Anything with an amount that may count toward wage bases.
pub trait WageComponent {
    /// The component amount.
    fn amount(&self) -> Decimal;

    /// Whether the amount counts toward `basis`.
    fn counts_toward(&self, basis: WageBasis) -> bool;
}

impl WageComponent for Reimbursement {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn counts_toward(&self, basis: WageBasis) -> bool {
        self.counts_toward.contains(&basis)
    }
}

/// An earnings item with its amount fixed for this calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEarning {
    /// The item kind.
    pub kind: EarningsKind,
    /// Display label.
    pub label: String,
    /// Derived amount for computed kinds, declared amount otherwise.
    pub amount: Decimal,
    /// Wage bases this item counts toward.
    pub counts_toward: BTreeSet<WageBasis>,
}

impl WageComponent for ResolvedEarning {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn counts_toward(&self, basis: WageBasis) -> bool {
        self.counts_toward.contains(&basis)
    }
}

/// Fixes the amount of every earnings item, in declared order.
///
/// Salary takes the base pay and the shift allowance takes overtime plus
/// standby pay; every other item keeps its declared amount.
pub fn resolve_earnings(items: &[EarningsItem], components: &PayComponents) -> Vec<ResolvedEarning> {
    items
        .iter()
        .map(|item| {
            let amount = match item.kind {
                EarningsKind::Salary => components.base_pay,
                EarningsKind::ShiftAllowance => components.shift_allowance_total(),
                EarningsKind::HolidayAllowance | EarningsKind::OtherTaxableWork => item.amount,
            };
            ResolvedEarning {
                kind: item.kind,
                label: item.display_label().to_string(),
                amount,
                counts_toward: item.counts_toward.clone(),
            }
        })
        .collect()
}

/// Sums every component amount.
pub fn sum_amounts<T: WageComponent>(items: &[T]) -> Decimal {
    items.iter().map(WageComponent::amount).sum()
}

/// Sums the amounts of components that count toward `basis`.
pub fn sum_where<T: WageComponent>(items: &[T], basis: WageBasis) -> Decimal {
    items
        .iter()
        .filter(|item| item.counts_toward(basis))
        .map(WageComponent::amount)
        .sum()
}

/// The three wage bases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBases {
    /// Taxable wage.
    pub taxable: Decimal,
    /// Social-insurance wage.
    pub social_insurance: Decimal,
    /// Health-insurance wage.
    pub health_insurance: Decimal,
}

impl WageBases {
    /// Returns the value of one basis.
    pub fn get(&self, basis: WageBasis) -> Decimal {
        match basis {
            WageBasis::Taxable => self.taxable,
            WageBasis::SocialInsurance => self.social_insurance,
            WageBasis::HealthInsurance => self.health_insurance,
        }
    }
}

/// Totals and bases computed from earnings and reimbursements.
#[derive(Debug, Clone)]
pub struct WageBasesResult {
    /// Sum of all earnings items.
    pub earnings_total: Decimal,
    /// Sum of all reimbursements.
    pub reimbursements_total: Decimal,
    /// Reimbursements counting toward the taxable wage.
    pub taxable_reimbursements: Decimal,
    /// The three wage bases.
    pub bases: WageBases,
    /// The audit step for this calculation.
    pub audit_step: AuditStep,
}

/// Computes earnings and reimbursement totals and the three wage bases.
///
/// Each basis is the earnings counting toward it plus the reimbursements
/// counting toward it.
pub fn calculate_wage_bases(
    earnings: &[ResolvedEarning],
    reimbursements: &[Reimbursement],
    step_number: u32,
) -> WageBasesResult {
    let earnings_total = sum_amounts(earnings);
    let reimbursements_total = sum_amounts(reimbursements);

    let basis_total = |basis: WageBasis| sum_where(earnings, basis) + sum_where(reimbursements, basis);
    let bases = WageBases {
        taxable: basis_total(WageBasis::Taxable),
        social_insurance: basis_total(WageBasis::SocialInsurance),
        health_insurance: basis_total(WageBasis::HealthInsurance),
    };
    let taxable_reimbursements = sum_where(reimbursements, WageBasis::Taxable);

    let audit_step = AuditStep {
        step_number,
        rule_id: "wage_bases".to_string(),
        rule_name: "Wage Bases".to_string(),
        input: serde_json::json!({
            "earnings_items": earnings.len(),
            "reimbursements": reimbursements.len(),
            "earnings_total": earnings_total.normalize().to_string(),
            "reimbursements_total": reimbursements_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_wage": bases.taxable.normalize().to_string(),
            "social_insurance_wage": bases.social_insurance.normalize().to_string(),
            "health_insurance_wage": bases.health_insurance.normalize().to_string(),
            "taxable_reimbursements": taxable_reimbursements.normalize().to_string()
        }),
        reasoning: format!(
            "Taxable €{}, social insurance €{}, health insurance €{} from {} earnings items and {} reimbursements",
            bases.taxable.normalize(),
            bases.social_insurance.normalize(),
            bases.health_insurance.normalize(),
            earnings.len(),
            reimbursements.len()
        ),
    };

    WageBasesResult {
        earnings_total,
        reimbursements_total,
        taxable_reimbursements,
        bases,
        audit_step,
    }
}
