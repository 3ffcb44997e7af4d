//! Input boundary.
//!
//! Raw form text becomes a [`WageDeclaration`] here. Parsing never fails:
//! unparseable numbers become zero, and every hours value, rate, amount,
//! multiplier and percentage is clamped to the configured limits before the
//! engine sees it. The earnings list always ends up with exactly one salary
//! and one shift allowance item.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::TaxTables;
use crate::models::{
    Deduction, DeductionKind, EarningsItem, EarningsKind, Hours, PayrollPeriod, RateSelection,
    Reimbursement, TaxSettings, WageBasis, WageDeclaration,
};

/// Normal hours credited per worked day.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Label used for a reimbursement entered without one.
pub const DEFAULT_REIMBURSEMENT_LABEL: &str = "Reimbursement";

/// Label used for a deduction entered without one.
pub const DEFAULT_DEDUCTION_LABEL: &str = "Deduction";

/// Parses user-entered number text.
///
/// Accepts `.` or `,` as the decimal separator and ignores surrounding
/// whitespace. The longest numeric prefix is used, so `"12,5 h"` reads as
/// 12.5. Anything without a numeric prefix is zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::input::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal("12,5"), Decimal::new(125, 1));
/// assert_eq!(parse_decimal(" 7.25 "), Decimal::new(725, 2));
/// assert_eq!(parse_decimal("abc"), Decimal::ZERO);
/// ```
pub fn parse_decimal(text: &str) -> Decimal {
    let normalized = text.trim().replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;
    for (i, c) in normalized.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return Decimal::ZERO;
    }
    let prefix = normalized[..end].trim_end_matches('.');
    Decimal::from_str(prefix).unwrap_or(Decimal::ZERO)
}

/// Limits `value` to `[min, max]`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// Replaces negative values with zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Limits `value` to `[0, max]`.
pub fn bounded(value: Decimal, max: Decimal) -> Decimal {
    clamp(value, Decimal::ZERO, max)
}

impl Hours {
    /// Hours for a number of worked days at [`HOURS_PER_DAY`] each.
    ///
    /// Only the normal hours are set; overtime and standby stay zero. The
    /// product saturates instead of overflowing.
    pub fn from_worked_days(days: Decimal) -> Self {
        Hours {
            normal: non_negative(days).saturating_mul(HOURS_PER_DAY),
            ..Hours::default()
        }
    }
}

/// Builds a sanitized [`WageDeclaration`] from raw form input.
///
/// Starts from the configured defaults (standby rate, overtime multipliers,
/// tax settings) and the four standard earnings items.
///
/// # Examples
///
/// ```
/// use payslip_engine::config::TaxTables;
/// use payslip_engine::input::DeclarationBuilder;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::default();
/// let declaration = DeclarationBuilder::new(&tables)
///     .worked_days("20")
///     .base_hourly_rate("18,50")
///     .overtime150_multiplier("9")
///     .build();
///
/// assert_eq!(declaration.hours.normal, Decimal::from(160));
/// assert_eq!(declaration.rates.base_hourly, Decimal::new(1850, 2));
/// assert_eq!(declaration.rates.overtime150_multiplier, Decimal::from(5));
/// ```
#[derive(Debug, Clone)]
pub struct DeclarationBuilder<'a> {
    tables: &'a TaxTables,
    declaration: WageDeclaration,
}

impl<'a> DeclarationBuilder<'a> {
    /// Creates a builder seeded with the configured defaults.
    pub fn new(tables: &'a TaxTables) -> Self {
        let defaults = tables.defaults();
        let mut declaration = WageDeclaration::default();
        declaration.rates.standby = defaults.standby_rate;
        declaration.rates.overtime150_multiplier = defaults.overtime150_multiplier;
        declaration.rates.overtime200_multiplier = defaults.overtime200_multiplier;
        declaration.tax = TaxSettings::BracketCredit {
            payroll_period: defaults.payroll_period,
            apply_credits: defaults.apply_credits,
        };
        Self {
            tables,
            declaration,
        }
    }

    /// Sets normal hours from a count of worked days.
    pub fn worked_days(mut self, text: &str) -> Self {
        let normal = Hours::from_worked_days(parse_decimal(text)).normal;
        self.declaration.hours.normal = bounded(normal, self.tables.limits().hours_max);
        self
    }

    /// Sets normal hours.
    pub fn normal_hours(mut self, text: &str) -> Self {
        self.declaration.hours.normal = self.hours(text);
        self
    }

    /// Sets 150% overtime hours.
    pub fn overtime150_hours(mut self, text: &str) -> Self {
        self.declaration.hours.overtime150 = self.hours(text);
        self
    }

    /// Sets 200% overtime hours.
    pub fn overtime200_hours(mut self, text: &str) -> Self {
        self.declaration.hours.overtime200 = self.hours(text);
        self
    }

    /// Sets standby hours.
    pub fn standby_hours(mut self, text: &str) -> Self {
        self.declaration.hours.standby = self.hours(text);
        self
    }

    /// Sets the base hourly rate.
    pub fn base_hourly_rate(mut self, text: &str) -> Self {
        self.declaration.rates.base_hourly = self.rate(text);
        self
    }

    /// Sets the standby hourly rate.
    pub fn standby_rate(mut self, text: &str) -> Self {
        self.declaration.rates.standby = self.rate(text);
        self
    }

    /// Sets the 150% overtime multiplier.
    pub fn overtime150_multiplier(mut self, text: &str) -> Self {
        let fallback = self.tables.defaults().overtime150_multiplier;
        self.declaration.rates.overtime150_multiplier = self.multiplier(text, fallback);
        self
    }

    /// Sets the 200% overtime multiplier.
    pub fn overtime200_multiplier(mut self, text: &str) -> Self {
        let fallback = self.tables.defaults().overtime200_multiplier;
        self.declaration.rates.overtime200_multiplier = self.multiplier(text, fallback);
        self
    }

    fn hours(&self, text: &str) -> Decimal {
        bounded(parse_decimal(text), self.tables.limits().hours_max)
    }

    fn rate(&self, text: &str) -> Decimal {
        bounded(parse_decimal(text), self.tables.limits().rate_max)
    }

    fn amount(&self, text: &str) -> Decimal {
        bounded(parse_decimal(text), self.tables.limits().amount_max)
    }

    // Zero or unparseable falls back to the default, then clamps.
    fn multiplier(&self, text: &str, fallback: Decimal) -> Decimal {
        let limits = self.tables.limits();
        let parsed = parse_decimal(text);
        let value = if parsed.is_zero() { fallback } else { parsed };
        clamp(value, limits.multiplier_min, limits.multiplier_max)
    }

    /// Sets the declared amount of every earnings item of `kind`.
    ///
    /// Has no effect on the amount used for computed kinds.
    pub fn earning(mut self, kind: EarningsKind, text: &str) -> Self {
        let amount = self.amount(text);
        for item in self.declaration.earnings.iter_mut().filter(|i| i.kind == kind) {
            item.amount = amount;
        }
        self
    }

    /// Sets the wage bases every earnings item of `kind` counts toward.
    pub fn earning_bases(mut self, kind: EarningsKind, bases: BTreeSet<WageBasis>) -> Self {
        for item in self.declaration.earnings.iter_mut().filter(|i| i.kind == kind) {
            item.counts_toward = bases.clone();
        }
        self
    }

    /// Appends a reimbursement. A blank id or label is filled in.
    pub fn reimbursement(
        mut self,
        id: &str,
        label: &str,
        amount: &str,
        counts_toward: BTreeSet<WageBasis>,
    ) -> Self {
        self.declaration.reimbursements.push(Reimbursement {
            id: id_or_new(id),
            label: label_or(label, DEFAULT_REIMBURSEMENT_LABEL),
            amount: self.amount(amount),
            counts_toward,
        });
        self
    }

    /// Appends a deduction. Percentages are clamped to `[0, 100]`, fixed
    /// amounts to the configured amount limit.
    pub fn deduction(
        mut self,
        id: &str,
        label: &str,
        amount: &str,
        kind: DeductionKind,
        basis: WageBasis,
    ) -> Self {
        let amount = match kind {
            DeductionKind::FixedAmount => self.amount(amount),
            DeductionKind::PercentOfBasis => bounded(parse_decimal(amount), Decimal::ONE_HUNDRED),
        };
        self.declaration.deductions.push(Deduction {
            id: id_or_new(id),
            label: label_or(label, DEFAULT_DEDUCTION_LABEL),
            amount,
            kind,
            basis,
        });
        self
    }

    /// Selects the bracket/credit strategy.
    pub fn bracket_credit(mut self, payroll_period: PayrollPeriod, apply_credits: bool) -> Self {
        self.declaration.tax = TaxSettings::BracketCredit {
            payroll_period,
            apply_credits,
        };
        self
    }

    /// Selects a flat-rate preset by id.
    pub fn flat_rate_preset(mut self, preset_id: &str, overtime_surtax: bool) -> Self {
        self.declaration.tax = TaxSettings::FlatRate {
            rate: RateSelection::Preset {
                preset_id: preset_id.to_string(),
            },
            overtime_surtax,
        };
        self
    }

    /// Selects a custom flat rate entered as a percentage (`"35"` is 35%).
    pub fn custom_flat_rate(mut self, percent_text: &str, overtime_surtax: bool) -> Self {
        let limits = self.tables.limits();
        let rate = clamp(
            parse_decimal(percent_text) / Decimal::ONE_HUNDRED,
            limits.tax_rate_min,
            limits.tax_rate_max,
        );
        self.declaration.tax = TaxSettings::FlatRate {
            rate: RateSelection::Custom { rate },
            overtime_surtax,
        };
        self
    }

    /// Returns the sanitized declaration.
    pub fn build(self) -> WageDeclaration {
        self.declaration
    }
}

/// Applies the input-boundary rules to an already structured declaration.
///
/// Same rules as [`DeclarationBuilder`]: hours, rates and amounts are clamped
/// to `[0, limit]`, multipliers fall back to the default when zero and are
/// clamped, percentages and custom flat rates are clamped, and blank ids and
/// labels are filled in. Earnings keep the first salary and shift allowance
/// item; later duplicates are dropped and missing ones are added.
pub fn sanitize(mut declaration: WageDeclaration, tables: &TaxTables) -> WageDeclaration {
    let defaults = tables.defaults();
    let limits = tables.limits();

    let hours = &mut declaration.hours;
    hours.normal = bounded(hours.normal, limits.hours_max);
    hours.overtime150 = bounded(hours.overtime150, limits.hours_max);
    hours.overtime200 = bounded(hours.overtime200, limits.hours_max);
    hours.standby = bounded(hours.standby, limits.hours_max);

    let rates = &mut declaration.rates;
    rates.base_hourly = bounded(rates.base_hourly, limits.rate_max);
    rates.standby = bounded(rates.standby, limits.rate_max);
    for (value, fallback) in [
        (&mut rates.overtime150_multiplier, defaults.overtime150_multiplier),
        (&mut rates.overtime200_multiplier, defaults.overtime200_multiplier),
    ] {
        let chosen = if value.is_zero() { fallback } else { *value };
        *value = clamp(chosen, limits.multiplier_min, limits.multiplier_max);
    }

    declaration.earnings = with_computed_items(declaration.earnings);
    for item in &mut declaration.earnings {
        item.amount = bounded(item.amount, limits.amount_max);
    }
    for reimbursement in &mut declaration.reimbursements {
        reimbursement.id = id_or_new(&reimbursement.id);
        reimbursement.label = label_or(&reimbursement.label, DEFAULT_REIMBURSEMENT_LABEL);
        reimbursement.amount = bounded(reimbursement.amount, limits.amount_max);
    }
    for deduction in &mut declaration.deductions {
        deduction.id = id_or_new(&deduction.id);
        deduction.label = label_or(&deduction.label, DEFAULT_DEDUCTION_LABEL);
        deduction.amount = match deduction.kind {
            DeductionKind::FixedAmount => bounded(deduction.amount, limits.amount_max),
            DeductionKind::PercentOfBasis => bounded(deduction.amount, Decimal::ONE_HUNDRED),
        };
    }

    if let TaxSettings::FlatRate {
        rate: RateSelection::Custom { rate },
        ..
    } = &mut declaration.tax
    {
        *rate = clamp(*rate, limits.tax_rate_min, limits.tax_rate_max);
    }

    declaration
}

// Exactly one salary and one shift allowance item. A missing salary goes
// first and a missing shift allowance right after the salary.
fn with_computed_items(earnings: Vec<EarningsItem>) -> Vec<EarningsItem> {
    let declared = earnings.len();
    let mut has_salary = false;
    let mut has_shift_allowance = false;

    let mut items: Vec<EarningsItem> = earnings
        .into_iter()
        .filter(|item| match item.kind {
            EarningsKind::Salary => !std::mem::replace(&mut has_salary, true),
            EarningsKind::ShiftAllowance => !std::mem::replace(&mut has_shift_allowance, true),
            EarningsKind::HolidayAllowance | EarningsKind::OtherTaxableWork => true,
        })
        .collect();
    let dropped = declared - items.len();

    if !has_salary {
        items.insert(0, EarningsItem::new(EarningsKind::Salary, Decimal::ZERO));
    }
    if !has_shift_allowance {
        let after_salary = items
            .iter()
            .position(|item| item.kind == EarningsKind::Salary)
            .map_or(0, |i| i + 1);
        items.insert(
            after_salary,
            EarningsItem::new(EarningsKind::ShiftAllowance, Decimal::ZERO),
        );
    }

    if dropped > 0 || !has_salary || !has_shift_allowance {
        debug!(
            dropped,
            added_salary = !has_salary,
            added_shift_allowance = !has_shift_allowance,
            "Normalized computed earnings items"
        );
    }

    items
}

fn id_or_new(id: &str) -> String {
    let id = id.trim();
    if id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}

fn label_or(label: &str, fallback: &str) -> String {
    let label = label.trim();
    if label.is_empty() {
        fallback.to_string()
    } else {
        label.to_string()
    }
}
