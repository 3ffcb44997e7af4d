//! Calculation logic for the payslip engine.
//!
//! The pipeline runs in a fixed order: pay components from hours and rates,
//! resolved earnings and wage bases, user deductions, the selected tax
//! strategy, then result assembly. [`compute`] drives all of it.

mod assembler;
mod deductions;
mod engine;
mod pay_components;
pub mod tax;
mod wage_bases;

pub use assembler::{Assembly, REIMBURSEMENTS_LINE_LABEL, assemble};
pub use deductions::{DeductionsResult, ResolvedDeduction, resolve_deduction_amount, resolve_deductions};
pub use engine::compute;
pub use pay_components::{PayComponents, PayComponentsResult, calculate_pay_components};
pub use tax::{TaxBase, TaxEstimate, TaxStrategy, select_strategy};
pub use wage_bases::{
    ResolvedEarning, WageBases, WageBasesResult, WageComponent, calculate_wage_bases,
    resolve_earnings, sum_amounts, sum_where,
};
