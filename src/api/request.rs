//! Request types for the payslip engine API.
//!
//! This module defines the JSON request body shared by the `/calculate` and
//! `/export` endpoints.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Deduction, DeductionKind, EarningsItem, Hours, Rates, Reimbursement, TaxSettings, WageBasis,
    WageDeclaration, standard_earnings,
};

/// Request body for the `/calculate` and `/export` endpoints.
///
/// Rates are required; everything else has a sensible default. When
/// `worked_days` is given it replaces the normal hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Hours worked in the period.
    #[serde(default)]
    pub hours: Hours,
    /// Worked days, converted to normal hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worked_days: Option<Decimal>,
    /// Rates and multipliers.
    pub rates: Rates,
    /// Earnings items; the four standard items when omitted.
    #[serde(default = "standard_earnings")]
    pub earnings: Vec<EarningsItem>,
    /// Reimbursements.
    #[serde(default)]
    pub reimbursements: Vec<ReimbursementRequest>,
    /// User deductions.
    #[serde(default)]
    pub deductions: Vec<DeductionRequest>,
    /// Tax strategy; bracket/credit monthly with credits when omitted.
    #[serde(default)]
    pub tax: TaxSettings,
}

/// A reimbursement in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementRequest {
    /// Identifier; generated when omitted.
    #[serde(default)]
    pub id: String,
    /// Display label; defaulted when omitted.
    #[serde(default)]
    pub label: String,
    /// Amount reimbursed.
    pub amount: Decimal,
    /// Wage bases the reimbursement counts toward.
    #[serde(default)]
    pub counts_toward: BTreeSet<WageBasis>,
}

/// A deduction in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Identifier; generated when omitted.
    #[serde(default)]
    pub id: String,
    /// Display label; defaulted when omitted.
    #[serde(default)]
    pub label: String,
    /// Fixed amount or percentage.
    pub amount: Decimal,
    /// How to interpret the amount.
    pub kind: DeductionKind,
    /// Basis for percentage deductions.
    #[serde(default = "default_basis")]
    pub basis: WageBasis,
}

fn default_basis() -> WageBasis {
    WageBasis::Taxable
}

impl From<ReimbursementRequest> for Reimbursement {
    fn from(req: ReimbursementRequest) -> Self {
        Reimbursement {
            id: req.id,
            label: req.label,
            amount: req.amount,
            counts_toward: req.counts_toward,
        }
    }
}

impl From<DeductionRequest> for Deduction {
    fn from(req: DeductionRequest) -> Self {
        Deduction {
            id: req.id,
            label: req.label,
            amount: req.amount,
            kind: req.kind,
            basis: req.basis,
        }
    }
}

impl From<CalculationRequest> for WageDeclaration {
    fn from(req: CalculationRequest) -> Self {
        let mut hours = req.hours;
        if let Some(days) = req.worked_days {
            hours.normal = Hours::from_worked_days(days).normal;
        }
        WageDeclaration {
            hours,
            rates: req.rates,
            earnings: req.earnings,
            reimbursements: req.reimbursements.into_iter().map(Into::into).collect(),
            deductions: req.deductions.into_iter().map(Into::into).collect(),
            tax: req.tax,
        }
    }
}
