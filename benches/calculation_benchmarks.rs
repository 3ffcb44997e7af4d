//! Performance benchmarks for the payslip engine.
//!
//! Covers the pure calculation for both tax strategies, declarations with a
//! growing number of items, and a full round trip through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payslip_engine::api::{AppState, create_router};
use payslip_engine::calculation::compute;
use payslip_engine::config::{ConfigLoader, TaxTables};
use payslip_engine::input::DeclarationBuilder;
use payslip_engine::models::{DeductionKind, PayrollPeriod, WageBasis, WageDeclaration};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/nl2025").expect("Failed to load config");
    AppState::new(config)
}

/// Builds a typical monthly declaration with `items` reimbursements and
/// deductions each.
fn create_declaration(tables: &TaxTables, items: usize, flat_rate: bool) -> WageDeclaration {
    let mut builder = DeclarationBuilder::new(tables)
        .normal_hours("150")
        .overtime150_hours("6")
        .overtime200_hours("4")
        .standby_hours("3")
        .base_hourly_rate("20")
        .standby_rate("2");

    for i in 0..items {
        builder = builder
            .reimbursement(
                &format!("r{}", i),
                "Travel",
                "42,50",
                [WageBasis::Taxable].into_iter().collect(),
            )
            .deduction(
                &format!("d{}", i),
                "Pension",
                "2.5",
                DeductionKind::PercentOfBasis,
                WageBasis::SocialInsurance,
            );
    }

    let builder = if flat_rate {
        builder.flat_rate_preset("rate3748", true)
    } else {
        builder.bracket_credit(PayrollPeriod::Monthly, true)
    };
    builder.build()
}

fn create_request_body(items: usize) -> String {
    let reimbursements: Vec<serde_json::Value> = (0..items)
        .map(|i| {
            serde_json::json!({
                "id": format!("r{}", i),
                "label": "Travel",
                "amount": "42.50",
                "counts_toward": ["taxable"]
            })
        })
        .collect();

    serde_json::json!({
        "hours": { "normal": "150", "overtime150": "6", "overtime200": "4", "standby": "3" },
        "rates": { "base_hourly": "20", "standby": "2" },
        "reimbursements": reimbursements,
        "deductions": [
            { "label": "Pension", "amount": "2.5", "kind": "percent_of_basis", "basis": "social_insurance" }
        ]
    })
    .to_string()
}

/// Benchmark: Single calculation with progressive brackets and credits.
fn bench_compute_bracket_credit(c: &mut Criterion) {
    let tables = TaxTables::default();
    let declaration = create_declaration(&tables, 1, false);

    c.bench_function("compute_bracket_credit", |b| {
        b.iter(|| black_box(compute(black_box(&declaration), &tables)))
    });
}

/// Benchmark: Single calculation with a flat-rate preset and overtime surtax.
fn bench_compute_flat_rate(c: &mut Criterion) {
    let tables = TaxTables::default();
    let declaration = create_declaration(&tables, 1, true);

    c.bench_function("compute_flat_rate", |b| {
        b.iter(|| black_box(compute(black_box(&declaration), &tables)))
    });
}

/// Benchmark: Round trip through the `/calculate` handler.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(2);

    c.bench_function("http_calculate", |b| {
        b.iter(|| {
            let router = router.clone();
            let response = rt.block_on(async {
                router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap()
            });
            black_box(response)
        })
    });
}

/// Benchmark: Item counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let tables = TaxTables::default();
    let mut group = c.benchmark_group("scaling");

    for items in [1usize, 10, 50, 200].iter() {
        let declaration = create_declaration(&tables, *items, false);

        group.throughput(Throughput::Elements(*items as u64));
        group.bench_with_input(BenchmarkId::new("items", items), items, |b, _| {
            b.iter(|| black_box(compute(black_box(&declaration), &tables)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_bracket_credit,
    bench_compute_flat_rate,
    bench_http_calculate,
    bench_scaling,
);
criterion_main!(benches);
