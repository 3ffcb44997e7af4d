//! Net pay estimation engine.
//!
//! This crate turns a wage declaration (hours, rates, earnings items,
//! reimbursements and deductions) into itemized earnings and deductions and
//! summary totals, estimating payroll tax with either annualized progressive
//! brackets and tax credits or a flat rate. Tax parameters are loaded from
//! YAML configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod settings;
