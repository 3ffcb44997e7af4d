//! Derived pay components.
//!
//! Prices the declared hours: base pay from normal hours, the two overtime
//! tiers, and standby pay. Overtime and standby together form the shift
//! allowance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Hours, Rates};

/// Amounts derived from hours and rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Normal hours × base rate.
    pub base_pay: Decimal,
    /// Overtime 150 hours × base rate × multiplier.
    pub overtime150_pay: Decimal,
    /// Overtime 200 hours × base rate × multiplier.
    pub overtime200_pay: Decimal,
    /// Standby hours × standby rate.
    pub standby_pay: Decimal,
}

impl PayComponents {
    /// Overtime plus standby pay; the amount of the shift allowance item.
    pub fn shift_allowance_total(&self) -> Decimal {
        self.overtime150_pay + self.overtime200_pay + self.standby_pay
    }

    /// Both overtime tiers, excluding standby.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime150_pay + self.overtime200_pay
    }
}

/// The derived components and the audit step recording them.
#[derive(Debug, Clone)]
pub struct PayComponentsResult {
    /// The derived components.
    pub components: PayComponents,
    /// The audit step for this calculation.
    pub audit_step: AuditStep,
}

/// Prices hours into pay components.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_pay_components;
/// use payslip_engine::models::{Hours, Rates};
/// use rust_decimal::Decimal;
///
/// let hours = Hours {
///     normal: Decimal::ZERO,
///     overtime150: Decimal::from(10),
///     overtime200: Decimal::from(5),
///     standby: Decimal::from(8),
/// };
/// let rates = Rates {
///     base_hourly: Decimal::from(20),
///     standby: Decimal::from(2),
///     overtime150_multiplier: Decimal::new(15, 1),
///     overtime200_multiplier: Decimal::from(2),
/// };
///
/// let result = calculate_pay_components(&hours, &rates, 1);
/// assert_eq!(result.components.overtime150_pay, Decimal::from(300));
/// assert_eq!(result.components.shift_allowance_total(), Decimal::from(516));
/// ```
pub fn calculate_pay_components(hours: &Hours, rates: &Rates, step_number: u32) -> PayComponentsResult {
    let components = PayComponents {
        base_pay: hours.normal * rates.base_hourly,
        overtime150_pay: hours.overtime150 * rates.base_hourly * rates.overtime150_multiplier,
        overtime200_pay: hours.overtime200 * rates.base_hourly * rates.overtime200_multiplier,
        standby_pay: hours.standby * rates.standby,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_components".to_string(),
        rule_name: "Pay Components".to_string(),
        input: serde_json::json!({
            "normal_hours": hours.normal.normalize().to_string(),
            "overtime150_hours": hours.overtime150.normalize().to_string(),
            "overtime200_hours": hours.overtime200.normalize().to_string(),
            "standby_hours": hours.standby.normalize().to_string(),
            "base_hourly": rates.base_hourly.normalize().to_string(),
            "standby_rate": rates.standby.normalize().to_string(),
            "overtime150_multiplier": rates.overtime150_multiplier.normalize().to_string(),
            "overtime200_multiplier": rates.overtime200_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pay": components.base_pay.normalize().to_string(),
            "overtime150_pay": components.overtime150_pay.normalize().to_string(),
            "overtime200_pay": components.overtime200_pay.normalize().to_string(),
            "standby_pay": components.standby_pay.normalize().to_string(),
            "shift_allowance": components.shift_allowance_total().normalize().to_string()
        }),
        reasoning: format!(
            "Base {} h × €{} = €{}; shift allowance = €{} (150%) + €{} (200%) + €{} (standby) = €{}",
            hours.normal.normalize(),
            rates.base_hourly.normalize(),
            components.base_pay.normalize(),
            components.overtime150_pay.normalize(),
            components.overtime200_pay.normalize(),
            components.standby_pay.normalize(),
            components.shift_allowance_total().normalize()
        ),
    };

    PayComponentsResult {
        components,
        audit_step,
    }
}
