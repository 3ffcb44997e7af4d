//! CSV export of a pay result.
//!
//! One row per earnings and deduction line, followed by the totals, an info
//! row for non-taxable reimbursements and a closing timestamp row. Amounts
//! are rounded to two decimals here and nowhere else.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::PayResult;

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "payslip-estimate.csv";

/// The kind of a CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowType {
    /// An earnings line.
    Earning,
    /// A deduction line.
    Deduction,
    /// A summary total.
    Total,
    /// Informational amount not part of the totals.
    Info,
    /// Metadata such as the generation time.
    Meta,
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Row label.
    pub label: String,
    /// Row kind.
    #[serde(rename = "type")]
    pub row_type: RowType,
    /// Two-decimal amount, or a timestamp for meta rows.
    pub amount: String,
}

impl ExportRow {
    fn money(label: impl Into<String>, row_type: RowType, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            row_type,
            amount: format_amount(amount),
        }
    }
}

/// Rounds to two decimals, midpoint away from zero, always showing both.
///
/// # Examples
///
/// ```
/// use payslip_engine::export::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(794837, 3)), "794.84");
/// assert_eq!(format_amount(Decimal::new(12, 0)), "12.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Builds the export rows for a result.
pub fn export_rows(result: &PayResult, generated_at: DateTime<Utc>) -> Vec<ExportRow> {
    let totals = &result.totals;
    let mut rows = Vec::with_capacity(result.earnings_lines.len() + result.deduction_lines.len() + 8);

    rows.extend(
        result
            .earnings_lines
            .iter()
            .map(|line| ExportRow::money(line.label.clone(), RowType::Earning, line.amount)),
    );
    rows.extend(
        result
            .deduction_lines
            .iter()
            .map(|line| ExportRow::money(line.label.clone(), RowType::Deduction, line.amount)),
    );

    rows.push(ExportRow::money("Total earnings", RowType::Total, totals.earnings_total));
    rows.push(ExportRow::money(
        "Total reimbursements",
        RowType::Total,
        totals.reimbursements_total,
    ));
    rows.push(ExportRow::money("Total deductions", RowType::Total, totals.total_deductions));
    rows.push(ExportRow::money("Gross pay", RowType::Total, totals.gross_pay));
    rows.push(ExportRow::money("Net pay", RowType::Total, totals.net_pay));
    rows.push(ExportRow::money("Estimated tax", RowType::Total, totals.estimated_tax));
    rows.push(ExportRow::money(
        "Non-taxable reimbursements",
        RowType::Info,
        totals.non_taxable_reimbursements,
    ));
    rows.push(ExportRow {
        label: "Timestamp".to_string(),
        row_type: RowType::Meta,
        amount: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    rows
}

/// Renders a result as CSV with a `label,type,amount` header.
///
/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn to_csv(result: &PayResult, generated_at: DateTime<Utc>) -> EngineResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    for row in export_rows(result, generated_at) {
        writer.serialize(&row).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

fn export_error(err: csv::Error) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}
