//! Wage declaration model.
//!
//! A [`WageDeclaration`] is the complete, already-sanitized input to a single
//! pay calculation: hours, rates, earnings items, reimbursements, deductions
//! and the tax settings. It is an immutable value; the engine never mutates it.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often wages are paid. Used to annualize periodic wages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollPeriod {
    /// Twelve periods per year.
    Monthly,
    /// Thirteen periods per year.
    FourWeekly,
}

/// A wage base a component can count toward, and a deduction can be
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageBasis {
    /// Wage subject to income tax.
    Taxable,
    /// Wage used for social-insurance contributions.
    SocialInsurance,
    /// Wage used for health-insurance contributions.
    HealthInsurance,
}

impl WageBasis {
    /// All bases, in reporting order.
    pub const ALL: [WageBasis; 3] = [
        WageBasis::Taxable,
        WageBasis::SocialInsurance,
        WageBasis::HealthInsurance,
    ];

    /// Returns a set containing every basis.
    pub fn all() -> BTreeSet<WageBasis> {
        Self::ALL.into_iter().collect()
    }

    /// Returns the snake_case name used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            WageBasis::Taxable => "taxable",
            WageBasis::SocialInsurance => "social_insurance",
            WageBasis::HealthInsurance => "health_insurance",
        }
    }
}

/// Hours worked in the pay period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hours {
    /// Normal hours paid at the base rate.
    pub normal: Decimal,
    /// Overtime hours paid at the 150% multiplier.
    pub overtime150: Decimal,
    /// Overtime hours paid at the 200% multiplier.
    pub overtime200: Decimal,
    /// Standby hours paid at the standby rate.
    pub standby: Decimal,
}

impl Hours {
    /// Returns the sum of all hour categories.
    pub fn total(&self) -> Decimal {
        self.normal + self.overtime150 + self.overtime200 + self.standby
    }
}

/// Rates and multipliers used to price hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Base hourly rate.
    pub base_hourly: Decimal,
    /// Hourly rate for standby hours.
    pub standby: Decimal,
    /// Multiplier for 150% overtime, within `[1, 5]`.
    pub overtime150_multiplier: Decimal,
    /// Multiplier for 200% overtime, within `[1, 5]`.
    pub overtime200_multiplier: Decimal,
}

/// The kind of an earnings item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsKind {
    /// Base salary; derived from normal hours and the base rate.
    Salary,
    /// Holiday allowance; user-entered.
    HolidayAllowance,
    /// Shift allowance; derived from overtime and standby hours.
    ShiftAllowance,
    /// Other taxable work; user-entered.
    OtherTaxableWork,
}

impl EarningsKind {
    /// Returns true when the amount is derived from hours and rates rather
    /// than entered by the user.
    pub fn is_computed(self) -> bool {
        matches!(self, EarningsKind::Salary | EarningsKind::ShiftAllowance)
    }

    /// Returns the label used when the item carries none.
    pub fn default_label(self) -> &'static str {
        match self {
            EarningsKind::Salary => "Salary",
            EarningsKind::HolidayAllowance => "Holiday allowance",
            EarningsKind::ShiftAllowance => "Shift allowance",
            EarningsKind::OtherTaxableWork => "Other taxable work",
        }
    }
}

/// A line of earnings in the declaration.
///
/// For computed kinds ([`EarningsKind::is_computed`]) the `amount` is ignored
/// and derived by the engine on every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsItem {
    /// What this item represents.
    pub kind: EarningsKind,
    /// Optional display label; defaults to the kind's label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Declared amount. Ignored for computed kinds.
    #[serde(default)]
    pub amount: Decimal,
    /// Wage bases this item counts toward.
    #[serde(default)]
    pub counts_toward: BTreeSet<WageBasis>,
}

impl EarningsItem {
    /// Creates an item counting toward every wage basis.
    pub fn new(kind: EarningsKind, amount: Decimal) -> Self {
        Self {
            kind,
            label: None,
            amount,
            counts_toward: WageBasis::all(),
        }
    }

    /// Returns the label to display for this item.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.kind.default_label())
    }
}

/// An expense reimbursement paid alongside wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    /// Stable identifier, unique within the declaration.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Amount reimbursed, never negative.
    pub amount: Decimal,
    /// Wage bases this reimbursement counts toward.
    #[serde(default)]
    pub counts_toward: BTreeSet<WageBasis>,
}

/// How a deduction amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// `amount` is the deduction itself.
    FixedAmount,
    /// `amount` is a percentage of the selected wage basis.
    PercentOfBasis,
}

/// A user-entered deduction from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Stable identifier, unique within the declaration.
    pub id: String,
    /// Display label.
    pub label: String,
    /// A fixed amount or a percentage in `[0, 100]`, depending on `kind`.
    pub amount: Decimal,
    /// How to interpret `amount`.
    pub kind: DeductionKind,
    /// The wage basis a percentage applies to. Ignored for fixed amounts.
    #[serde(default = "default_basis")]
    pub basis: WageBasis,
}

fn default_basis() -> WageBasis {
    WageBasis::Taxable
}

/// Where a flat tax rate comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RateSelection {
    /// A configured preset, looked up by id.
    Preset {
        /// The preset id.
        preset_id: String,
    },
    /// A user-entered rate, already clamped to the configured limits.
    Custom {
        /// The rate as a fraction (0.35 for 35%).
        rate: Decimal,
    },
}

/// The active tax strategy and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaxSettings {
    /// Annualized progressive brackets with optional tax credits.
    BracketCredit {
        /// Payroll period used for annualization.
        payroll_period: PayrollPeriod,
        /// Whether the general and labor credits are applied.
        apply_credits: bool,
    },
    /// A single rate applied to the taxable wage.
    FlatRate {
        /// Where the rate comes from.
        rate: RateSelection,
        /// Whether the legacy overtime surtax is added on overtime pay.
        #[serde(default)]
        overtime_surtax: bool,
    },
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings::BracketCredit {
            payroll_period: PayrollPeriod::Monthly,
            apply_credits: true,
        }
    }
}

/// The complete input to a pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageDeclaration {
    /// Hours worked.
    #[serde(default)]
    pub hours: Hours,
    /// Rates and multipliers.
    #[serde(default)]
    pub rates: Rates,
    /// Earnings items in display order.
    #[serde(default = "standard_earnings")]
    pub earnings: Vec<EarningsItem>,
    /// Reimbursements in display order.
    #[serde(default)]
    pub reimbursements: Vec<Reimbursement>,
    /// Deductions in display order.
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    /// Active tax strategy.
    #[serde(default)]
    pub tax: TaxSettings,
}

impl Default for WageDeclaration {
    fn default() -> Self {
        Self {
            hours: Hours::default(),
            rates: Rates::default(),
            earnings: standard_earnings(),
            reimbursements: Vec::new(),
            deductions: Vec::new(),
            tax: TaxSettings::default(),
        }
    }
}

/// The four standard earnings items, each counting toward every basis.
pub fn standard_earnings() -> Vec<EarningsItem> {
    [
        EarningsKind::Salary,
        EarningsKind::HolidayAllowance,
        EarningsKind::ShiftAllowance,
        EarningsKind::OtherTaxableWork,
    ]
    .into_iter()
    .map(|kind| EarningsItem::new(kind, Decimal::ZERO))
    .collect()
}
