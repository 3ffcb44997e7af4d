//! Integration tests for the payslip engine.
//!
//! This test suite covers:
//! - Flat-rate scenarios, with and without the overtime surtax
//! - Bracket/credit scenarios for monthly and four-weekly periods
//! - Percent-of-basis deductions
//! - Worked days and the hours soft limit
//! - CSV export and the presets endpoint
//! - Error cases
//! - Properties of the calculation over arbitrary declarations

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::calculation::compute;
use payslip_engine::config::{ConfigLoader, TaxTables};
use payslip_engine::models::{
    Deduction, DeductionKind, EarningsItem, EarningsKind, Hours, PayrollPeriod, RateSelection,
    Rates, Reimbursement, TaxSettings, WageBasis, WageDeclaration,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/nl2025").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn decimal_at(json: &Value, pointer: &str) -> Decimal {
    let value = json
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {}", pointer));
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let (status, text) = post(router, "/calculate", body).await;
    (status, serde_json::from_str(&text).unwrap())
}

/// Overtime 10h at 150%, 5h at 200%, 8h standby at 2; shift allowance
/// outside every basis; one non-taxable and one taxable reimbursement; a
/// fixed deduction of 80.
fn scenario_a_request(tax: Value) -> Value {
    json!({
        "hours": { "normal": "0", "overtime150": "10", "overtime200": "5", "standby": "8" },
        "rates": {
            "base_hourly": "20",
            "standby": "2",
            "overtime150_multiplier": "1.5",
            "overtime200_multiplier": "2"
        },
        "earnings": [
            { "kind": "salary", "counts_toward": ["taxable", "social_insurance", "health_insurance"] },
            { "kind": "shift_allowance", "counts_toward": [] }
        ],
        "reimbursements": [
            { "id": "travel", "label": "Travel", "amount": "50" },
            { "id": "bonus", "label": "Bonus", "amount": "100", "counts_toward": ["taxable"] }
        ],
        "deductions": [
            { "id": "pension", "label": "Pension", "amount": "80", "kind": "fixed_amount" }
        ],
        "tax": tax
    })
}

fn monthly_wage_request(amount: &str, tax: Value) -> Value {
    json!({
        "rates": {},
        "earnings": [
            { "kind": "other_taxable_work", "amount": amount,
              "counts_toward": ["taxable", "social_insurance", "health_insurance"] }
        ],
        "tax": tax
    })
}

// =============================================================================
// Flat-rate scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_a_flat_35_percent() {
    let tax = json!({ "mode": "flat_rate", "rate": { "source": "custom", "rate": "0.35" } });
    let (status, json) = post_calculate(create_router_for_test(), scenario_a_request(tax)).await;

    assert_eq!(status, StatusCode::OK);
    // 10×20×1.5 + 5×20×2 + 8×2 + 150
    assert_eq!(decimal_at(&json, "/result/totals/gross_pay"), decimal("666"));
    assert_eq!(decimal_at(&json, "/result/totals/taxable_wage"), decimal("100"));
    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("35"));
    assert_eq!(decimal_at(&json, "/result/totals/net_pay"), decimal("551"));
    assert_eq!(
        decimal_at(&json, "/result/totals/non_taxable_reimbursements"),
        decimal("50")
    );
}

#[tokio::test]
async fn test_scenario_a_overtime_surtax() {
    let tax = json!({
        "mode": "flat_rate",
        "rate": { "source": "custom", "rate": "0" },
        "overtime_surtax": true
    });
    let (status, json) = post_calculate(create_router_for_test(), scenario_a_request(tax)).await;

    assert_eq!(status, StatusCode::OK);
    // (300 + 200) × 0.5033
    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("251.65"));
    assert_eq!(decimal_at(&json, "/result/totals/total_deductions"), decimal("331.65"));
    assert_eq!(decimal_at(&json, "/result/totals/net_pay"), decimal("334.35"));
}

#[tokio::test]
async fn test_hourly_scenario_overtime_surtax() {
    let body = json!({
        "hours": { "normal": "150", "overtime150": "6", "overtime200": "4", "standby": "3" },
        "rates": {
            "base_hourly": "20",
            "standby": "2",
            "overtime150_multiplier": "1.5",
            "overtime200_multiplier": "2"
        },
        "earnings": [{ "kind": "shift_allowance", "counts_toward": [] }],
        "tax": { "mode": "flat_rate", "rate": { "source": "custom", "rate": "0" }, "overtime_surtax": true }
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    // The missing salary item is added: 150 h × 20 counting toward every basis.
    assert_eq!(json["result"]["earnings_lines"][0]["label"], "Salary");
    assert_eq!(decimal_at(&json, "/result/earnings_lines/0/amount"), decimal("3000"));
    assert_eq!(decimal_at(&json, "/result/earnings_lines/1/amount"), decimal("346"));
    assert_eq!(decimal_at(&json, "/result/totals/gross_pay"), decimal("3346"));
    assert_eq!(decimal_at(&json, "/result/totals/taxable_wage"), decimal("3000"));
    // Rate 0 on the taxable wage, 0.5033 on 180 + 160 overtime pay.
    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("171.122"));
    assert_eq!(decimal_at(&json, "/result/totals/net_pay"), decimal("3174.878"));
}

#[tokio::test]
async fn test_flat_rate_preset() {
    let tax = json!({ "mode": "flat_rate", "rate": { "source": "preset", "preset_id": "rate4950" } });
    let (_, json) = post_calculate(create_router_for_test(), monthly_wage_request("2000", tax)).await;

    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("990"));
    assert_eq!(json["result"]["deduction_lines"][0]["label"], "Payroll tax 49,50%");
}

// =============================================================================
// Bracket/credit scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_b_monthly_with_credits() {
    let tax = json!({ "mode": "bracket_credit", "payroll_period": "monthly", "apply_credits": true });
    let (status, json) = post_calculate(create_router_for_test(), monthly_wage_request("3750", tax)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json, "/result/totals/taxable_wage"), decimal("3750"));
    // (16618.5 - min(16618.5, 2023.5356 + 5056.915)) / 12
    assert_eq!(
        decimal_at(&json, "/result/totals/estimated_tax"),
        decimal("794.83745")
    );

    let steps = json["result"]["audit_trace"]["steps"].as_array().unwrap();
    let brackets = steps.iter().find(|s| s["rule_id"] == "tax_brackets").unwrap();
    assert_eq!(decimal_at(brackets, "/output/annual_gross_tax"), decimal("16618.5"));
    let general = steps.iter().find(|s| s["rule_id"] == "tax_general_credit").unwrap();
    assert_eq!(decimal_at(general, "/output/general_credit"), decimal("2023.5356"));
    let labor = steps.iter().find(|s| s["rule_id"] == "tax_labor_credit").unwrap();
    assert_eq!(decimal_at(labor, "/output/labor_credit"), decimal("5056.915"));
    let cap = steps.iter().find(|s| s["rule_id"] == "tax_credit_cap").unwrap();
    assert_eq!(decimal_at(cap, "/output/annual_credits"), decimal("7080.4506"));
}

#[tokio::test]
async fn test_scenario_b_without_credits() {
    let tax = json!({ "mode": "bracket_credit", "payroll_period": "monthly", "apply_credits": false });
    let (_, json) = post_calculate(create_router_for_test(), monthly_wage_request("3750", tax)).await;

    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("1384.875"));
    assert_eq!(json["result"]["deduction_lines"][0]["label"], "Estimated payroll tax");
}

#[tokio::test]
async fn test_four_weekly_period() {
    let tax = json!({ "mode": "bracket_credit", "payroll_period": "four_weekly", "apply_credits": false });
    let (_, json) = post_calculate(create_router_for_test(), monthly_wage_request("1000", tax)).await;

    // 13000 × 0.3693 / 13
    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), decimal("369.3"));
}

#[tokio::test]
async fn test_low_wage_credits_zero_the_tax() {
    let tax = json!({ "mode": "bracket_credit", "payroll_period": "monthly", "apply_credits": true });
    let (_, json) = post_calculate(create_router_for_test(), monthly_wage_request("500", tax)).await;

    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), Decimal::ZERO);
    assert_eq!(decimal_at(&json, "/result/totals/net_pay"), decimal("500"));
}

#[tokio::test]
async fn test_second_bracket_reached() {
    let tax = json!({ "mode": "bracket_credit", "payroll_period": "monthly", "apply_credits": false });
    let (_, json) = post_calculate(create_router_for_test(), monthly_wage_request("10000", tax)).await;

    // (75518 × 0.3693 + 44482 × 0.495) / 12
    let expected = (decimal("75518") * decimal("0.3693") + decimal("44482") * decimal("0.495"))
        / decimal("12");
    assert_eq!(decimal_at(&json, "/result/totals/estimated_tax"), expected);
}

// =============================================================================
// Deductions
// =============================================================================

#[tokio::test]
async fn test_percent_of_basis_deduction() {
    let body = json!({
        "rates": {},
        "earnings": [
            { "kind": "other_taxable_work", "amount": "2000", "counts_toward": ["taxable", "social_insurance"] },
            { "kind": "holiday_allowance", "amount": "1500", "counts_toward": ["health_insurance"] }
        ],
        "deductions": [
            { "id": "pension", "label": "Pension", "amount": "10", "kind": "percent_of_basis", "basis": "social_insurance" },
            { "id": "union", "label": "Union fee", "amount": "12.5", "kind": "fixed_amount" }
        ]
    });
    let (_, json) = post_calculate(create_router_for_test(), body).await;

    let details = json["result"]["deduction_details"].as_array().unwrap();
    assert_eq!(details[0]["id"], "pension");
    assert_eq!(decimal_at(&details[0], "/amount"), decimal("200"));
    assert_eq!(decimal_at(&details[1], "/amount"), decimal("12.5"));
    assert_eq!(
        decimal_at(&json, "/result/totals/other_deductions_total"),
        decimal("212.5")
    );

    let lines = json["result"]["deduction_lines"].as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["label"], "Pension");
}

#[tokio::test]
async fn test_deduction_defaults_filled_in() {
    let body = json!({
        "rates": {},
        "deductions": [{ "amount": "5", "kind": "fixed_amount" }]
    });
    let (_, json) = post_calculate(create_router_for_test(), body).await;

    let detail = &json["result"]["deduction_details"][0];
    assert!(!detail["id"].as_str().unwrap().is_empty());
    assert_eq!(json["result"]["deduction_lines"][1]["label"], "Deduction");
}

// =============================================================================
// Hours
// =============================================================================

#[tokio::test]
async fn test_worked_days_become_normal_hours() {
    let body = json!({
        "worked_days": "20",
        "rates": { "base_hourly": "15" },
        "tax": { "mode": "flat_rate", "rate": { "source": "custom", "rate": "0" } }
    });
    let (_, json) = post_calculate(create_router_for_test(), body).await;

    // 20 days × 8 h × 15
    assert_eq!(decimal_at(&json, "/result/earnings_lines/0/amount"), decimal("2400"));
    assert_eq!(decimal_at(&json, "/result/totals/gross_pay"), decimal("2400"));
}

#[tokio::test]
async fn test_hours_above_soft_max_warns_but_calculates() {
    let body = json!({
        "hours": { "normal": "390", "overtime150": "20" },
        "rates": { "base_hourly": "10" }
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["result"]["audit_trace"]["warnings"][0]["code"],
        "HOURS_ABOVE_SOFT_MAX"
    );
    assert!(decimal_at(&json, "/result/totals/gross_pay") > Decimal::ZERO);
}

#[tokio::test]
async fn test_huge_values_are_bounded_instead_of_overflowing() {
    let body = json!({
        "hours": {
            "normal": "99999999999999999",
            "overtime150": "99999999999999999",
            "overtime200": "99999999999999999",
            "standby": "99999999999999999"
        },
        "rates": {
            "base_hourly": "99999999999999999",
            "standby": "99999999999999999",
            "overtime150_multiplier": "99999999999999999",
            "overtime200_multiplier": "99999999999999999"
        },
        "reimbursements": [{ "amount": "79228162514264337593543950335", "counts_toward": ["taxable"] }],
        "deductions": [{ "amount": "79228162514264337593543950335", "kind": "fixed_amount" }]
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    // 10000 h × 1000000 base, 10000 h × 1000000 × 5 per overtime tier,
    // 10000 h × 1000000 standby, plus a 1000000000 reimbursement.
    assert_eq!(
        decimal_at(&json, "/result/earnings_lines/0/amount"),
        decimal("10000000000")
    );
    assert_eq!(
        decimal_at(&json, "/result/totals/gross_pay"),
        decimal("121000000000")
    );
    assert_eq!(
        decimal_at(&json, "/result/totals/other_deductions_total"),
        decimal("1000000000")
    );
}

#[tokio::test]
async fn test_duplicate_salary_counted_once() {
    let body = json!({
        "hours": { "normal": "100" },
        "rates": { "base_hourly": "20" },
        "earnings": [
            { "kind": "salary", "counts_toward": ["taxable"] },
            { "kind": "salary", "counts_toward": ["taxable"] },
            { "kind": "shift_allowance", "counts_toward": [] },
            { "kind": "shift_allowance", "counts_toward": [] }
        ],
        "tax": { "mode": "flat_rate", "rate": { "source": "custom", "rate": "0" } }
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json, "/result/totals/gross_pay"), decimal("2000"));
    // Salary, shift allowance, reimbursements
    assert_eq!(json["result"]["earnings_lines"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_zero_declaration_yields_zero_totals() {
    let (status, json) = post_calculate(create_router_for_test(), json!({ "rates": {} })).await;

    assert_eq!(status, StatusCode::OK);
    for field in [
        "gross_pay",
        "taxable_wage",
        "social_insurance_wage",
        "health_insurance_wage",
        "estimated_tax",
        "net_pay",
        "non_taxable_reimbursements",
    ] {
        assert_eq!(
            decimal_at(&json, &format!("/result/totals/{}", field)),
            Decimal::ZERO,
            "{} should be zero",
            field
        );
    }
}

// =============================================================================
// Export and presets
// =============================================================================

#[tokio::test]
async fn test_export_csv_rows() {
    let tax = json!({ "mode": "flat_rate", "rate": { "source": "custom", "rate": "0.35" } });
    let (status, csv) = post(create_router_for_test(), "/export", scenario_a_request(tax)).await;

    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], r#""label","type","amount""#);
    assert!(lines.contains(&r#""Shift allowance","earning","516.00""#));
    assert!(lines.contains(&r#""Reimbursements","earning","150.00""#));
    assert!(lines.contains(&r#""Payroll tax 35%","deduction","35.00""#));
    assert!(lines.contains(&r#""Gross pay","total","666.00""#));
    assert!(lines.contains(&r#""Net pay","total","551.00""#));
    assert!(lines.contains(&r#""Non-taxable reimbursements","info","50.00""#));
    assert!(lines.last().unwrap().starts_with(r#""Timestamp","meta","#));
}

#[tokio::test]
async fn test_presets_endpoint() {
    let response = create_router_for_test()
        .oneshot(Request::builder().uri("/presets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["presets"].as_array().unwrap().len(), 3);
    assert_eq!(json["presets"][1]["label"], "37,48%");
    assert_eq!(json["defaults"]["tax_preset_id"], "rate3582");
    assert_eq!(decimal_at(&json, "/overtime_surtax_rate"), decimal("0.5033"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"rates\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_reimbursement_amount() {
    let body = json!({
        "rates": {},
        "reimbursements": [{ "id": "r1", "label": "Travel" }]
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_unknown_deduction_kind() {
    let body = json!({
        "rates": {},
        "deductions": [{ "amount": "5", "kind": "per_hour" }]
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .body(Body::from("{\"rates\": {}}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Properties
// =============================================================================

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn basis_set() -> impl Strategy<Value = std::collections::BTreeSet<WageBasis>> {
    proptest::sample::subsequence(WageBasis::ALL.to_vec(), 0..=3)
        .prop_map(|bases| bases.into_iter().collect())
}

fn tax_settings() -> impl Strategy<Value = TaxSettings> {
    prop_oneof![
        (any::<bool>(), any::<bool>()).prop_map(|(four_weekly, apply_credits)| {
            TaxSettings::BracketCredit {
                payroll_period: if four_weekly {
                    PayrollPeriod::FourWeekly
                } else {
                    PayrollPeriod::Monthly
                },
                apply_credits,
            }
        }),
        (0i64..=60i64, any::<bool>()).prop_map(|(percent, overtime_surtax)| {
            TaxSettings::FlatRate {
                rate: RateSelection::Custom {
                    rate: Decimal::new(percent, 2),
                },
                overtime_surtax,
            }
        }),
    ]
}

fn declaration() -> impl Strategy<Value = WageDeclaration> {
    let hours = (money(), money(), money(), money()).prop_map(|(n, o1, o2, s)| Hours {
        normal: n / Decimal::ONE_HUNDRED,
        overtime150: o1 / Decimal::ONE_HUNDRED,
        overtime200: o2 / Decimal::ONE_HUNDRED,
        standby: s / Decimal::ONE_HUNDRED,
    });
    let rates = (money(), money(), 100i64..=500i64, 100i64..=500i64).prop_map(
        |(base, standby, m150, m200)| Rates {
            base_hourly: base / Decimal::ONE_HUNDRED,
            standby: standby / Decimal::ONE_HUNDRED,
            overtime150_multiplier: Decimal::new(m150, 2),
            overtime200_multiplier: Decimal::new(m200, 2),
        },
    );
    let earnings = proptest::collection::vec(
        (
            prop_oneof![
                Just(EarningsKind::Salary),
                Just(EarningsKind::HolidayAllowance),
                Just(EarningsKind::ShiftAllowance),
                Just(EarningsKind::OtherTaxableWork),
            ],
            money(),
            basis_set(),
        )
            .prop_map(|(kind, amount, counts_toward)| EarningsItem {
                counts_toward,
                ..EarningsItem::new(kind, amount)
            }),
        0..6,
    );
    let reimbursements = proptest::collection::vec(
        (money(), basis_set()).prop_map(|(amount, counts_toward)| Reimbursement {
            id: "r".to_string(),
            label: "Reimbursement".to_string(),
            amount,
            counts_toward,
        }),
        0..4,
    );
    let deductions = proptest::collection::vec(
        (money(), any::<bool>(), 0usize..3).prop_map(|(amount, percent, basis)| Deduction {
            id: "d".to_string(),
            label: "Deduction".to_string(),
            amount: if percent {
                amount.min(Decimal::ONE_HUNDRED)
            } else {
                amount
            },
            kind: if percent {
                DeductionKind::PercentOfBasis
            } else {
                DeductionKind::FixedAmount
            },
            basis: WageBasis::ALL[basis],
        }),
        0..4,
    );

    (hours, rates, earnings, reimbursements, deductions, tax_settings()).prop_map(
        |(hours, rates, earnings, reimbursements, deductions, tax)| WageDeclaration {
            hours,
            rates,
            earnings,
            reimbursements,
            deductions,
            tax,
        },
    )
}

proptest! {
    #[test]
    fn prop_compute_is_deterministic(d in declaration()) {
        let tables = TaxTables::default();
        prop_assert_eq!(compute(&d, &tables), compute(&d, &tables));
    }

    #[test]
    fn prop_gross_is_earnings_plus_reimbursements(d in declaration()) {
        let result = compute(&d, &TaxTables::default());
        let t = &result.totals;
        prop_assert_eq!(t.gross_pay, t.earnings_total + t.reimbursements_total);
        let lines: Decimal = result.earnings_lines.iter().map(|l| l.amount).sum();
        prop_assert_eq!(lines, t.gross_pay);
    }

    #[test]
    fn prop_bases_never_negative(d in declaration()) {
        let t = compute(&d, &TaxTables::default()).totals;
        prop_assert!(t.taxable_wage >= Decimal::ZERO);
        prop_assert!(t.social_insurance_wage >= Decimal::ZERO);
        prop_assert!(t.health_insurance_wage >= Decimal::ZERO);
        prop_assert!(t.estimated_tax >= Decimal::ZERO);
    }

    #[test]
    fn prop_net_is_gross_minus_deductions(d in declaration()) {
        let result = compute(&d, &TaxTables::default());
        let t = &result.totals;
        prop_assert_eq!(t.net_pay, t.gross_pay - t.estimated_tax - t.other_deductions_total);
        prop_assert_eq!(result.deduction_lines.len(), d.deductions.len() + 1);
    }
}
