//! Core data models for the payslip engine.
//!
//! This module contains the calculation input ([`WageDeclaration`]) and
//! output ([`PayResult`]) value types.

mod declaration;
mod pay_result;

pub use declaration::{
    Deduction, DeductionKind, EarningsItem, EarningsKind, Hours, PayrollPeriod, Rates,
    RateSelection, Reimbursement, TaxSettings, WageBasis, WageDeclaration, standard_earnings,
};
pub use pay_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionDetail, PayLine, PayResult, PayTotals,
};
