//! General and labor tax credits.
//!
//! Both credits are functions of the annual taxable wage. The general credit
//! phases out linearly above a threshold. The labor credit has three zones:
//! phase-in, plateau, phase-out.

use rust_decimal::Decimal;

use crate::config::{GeneralCreditConfig, LaborCreditConfig};

/// Returns the general tax credit for an annual wage.
///
/// `max(0, max_credit - max(0, wage - phase_out_start) × phase_out_rate)`
pub fn general_credit(annual_wage: Decimal, config: &GeneralCreditConfig) -> Decimal {
    let wage = annual_wage.max(Decimal::ZERO);
    let excess = (wage - config.phase_out_start).max(Decimal::ZERO);
    (config.max - excess * config.phase_out_rate).max(Decimal::ZERO)
}

/// Returns the labor tax credit for an annual wage.
///
/// Up to and including `phase_in_end` the credit is `wage × phase_in_rate`;
/// up to and including `plateau_end` it is the flat maximum; above that it
/// phases out toward zero.
pub fn labor_credit(annual_wage: Decimal, config: &LaborCreditConfig) -> Decimal {
    let wage = annual_wage.max(Decimal::ZERO);
    if wage <= config.phase_in_end {
        wage * config.phase_in_rate
    } else if wage <= config.plateau_end {
        config.max
    } else {
        (config.max - (wage - config.plateau_end) * config.phase_out_rate).max(Decimal::ZERO)
    }
}
