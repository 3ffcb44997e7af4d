//! Marginal bracket integration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxBracket;

/// The part of an annual income that falls inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Lower bound of the bracket (the previous bracket's upper bound).
    pub lower: Decimal,
    /// Upper bound of the bracket, `None` when unbounded.
    pub upper: Option<Decimal>,
    /// Marginal rate.
    pub rate: Decimal,
    /// Income inside the bracket, never negative.
    pub taxable: Decimal,
    /// `taxable × rate`.
    pub tax: Decimal,
}

/// Splits an annual income over the brackets, lowest first.
///
/// Each bracket taxes `min(income, upper) - lower`, clamped at zero. Brackets
/// past the income contribute empty slices. Brackets after an unbounded one
/// are never reached.
pub fn integrate_brackets(annual_income: Decimal, brackets: &[TaxBracket]) -> Vec<BracketSlice> {
    let income = annual_income.max(Decimal::ZERO);
    let mut slices = Vec::with_capacity(brackets.len());
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        let capped = match bracket.up_to {
            Some(upper) => income.min(upper),
            None => income,
        };
        let taxable = (capped - lower).max(Decimal::ZERO);

        slices.push(BracketSlice {
            lower,
            upper: bracket.up_to,
            rate: bracket.rate,
            taxable,
            tax: taxable * bracket.rate,
        });

        match bracket.up_to {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    slices
}

/// Returns the total annual tax over all brackets.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::tax::bracket_tax;
/// use payslip_engine::config::TaxTables;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::default();
/// let tax = bracket_tax(Decimal::from(45000), tables.brackets());
/// assert_eq!(tax, Decimal::new(166185, 1));
/// ```
pub fn bracket_tax(annual_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    integrate_brackets(annual_income, brackets)
        .iter()
        .map(|slice| slice.tax)
        .sum()
}
