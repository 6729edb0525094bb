/*!
# CRUD Benchmarks

Benchmarks for the merge engine, page link building and a list request
through the router over the in-memory store.

## Usage

```bash
# Run all benchmarks
cargo bench --bench crud_benchmarks

# Run one group
cargo bench --bench crud_benchmarks -- "Patch Merge"

# Quick run with fewer samples
cargo bench --bench crud_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use axum::{
    Router,
    body::Body,
    http::{Method, Request},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crudrest::{
    CrudService, FieldTable, JsonCodec, MemoryStore, Page, PageLinkBuilder, PatchMerger,
    Resource, ResourceConfig,
};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Runtime;
use tower::ServiceExt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct BenchmarkTransaction {
    id: u64,
    amount: f64,
    memo: String,
    merchant: String,
    category: String,
    currency: String,
    settled: bool,
}

impl Resource for BenchmarkTransaction {
    type Id = u64;
    const RESOURCE_NAME_SINGULAR: &'static str = "BenchmarkTransaction";
    const RESOURCE_NAME_PLURAL: &'static str = "transactions";

    fn id(&self) -> u64 {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        crudrest::field_table!(BenchmarkTransaction {
            id, amount, memo, merchant, category, currency, settled
        })
    }
}

fn transaction(id: u64) -> BenchmarkTransaction {
    BenchmarkTransaction {
        id,
        amount: 12.5,
        memo: format!("transaction {id}"),
        merchant: "ACME".to_string(),
        category: "groceries".to_string(),
        currency: "EUR".to_string(),
        settled: id % 2 == 0,
    }
}

fn bench_patch_merge(c: &mut Criterion) {
    let merger = PatchMerger::<BenchmarkTransaction>::for_resource(&ResourceConfig::default());
    let documents = [
        ("empty", r"{}".to_string()),
        ("one_field", r#"{"memo": "updated stuff"}"#.to_string()),
        (
            "all_fields",
            r#"{"id": 9, "amount": 1.5, "memo": "m", "merchant": "x", "category": "y", "currency": "USD", "settled": true}"#
                .to_string(),
        ),
        ("unknown_fields", r#"{"foo": 1, "bar": 2, "memo": "m"}"#.to_string()),
    ];

    let mut group = c.benchmark_group("Patch Merge");
    for (name, document) in &documents {
        group.bench_with_input(BenchmarkId::new("merge", name), document, |b, document| {
            b.iter(|| {
                merger
                    .merge(&JsonCodec, black_box(document.as_bytes()), transaction(1))
                    .unwrap()
            });
        });
    }
    group.bench_function("replace", |b| {
        let replacement = transaction(2);
        b.iter(|| merger.replace(black_box(&replacement), transaction(1)));
    });
    group.finish();
}

fn bench_page_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("Page Links");
    for page_number in [0_u64, 50, 99] {
        let offset = page_number * 10;
        let page = Page::from_slice(vec![(); 10], offset, 10, 1000);
        group.bench_with_input(
            BenchmarkId::new("build", page_number),
            &page,
            |b, page| {
                b.iter(|| PageLinkBuilder::build(black_box(page), page_number, 10, "/transactions"));
            },
        );
    }
    group.finish();
}

async fn list_page(app: Router, uri: &str) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
}

fn bench_list_requests(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    for size in [100_u64, 1000] {
        let store = MemoryStore::with_entities((1..=size).map(transaction));
        let service = CrudService::new(store, ResourceConfig::default());
        let app = Router::new().nest("/transactions", service.router());

        let mut group = c.benchmark_group(format!("List Requests ({size} records)"));
        group.measurement_time(Duration::from_secs(5));
        for uri in ["/transactions?page=0&per_page=20", "/transactions?page=4&per_page=20"] {
            group.bench_with_input(BenchmarkId::new("list", uri), &uri, |b, uri| {
                b.iter(|| rt.block_on(black_box(list_page(app.clone(), uri))));
            });
        }
        group.finish();
    }
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_patch_merge, bench_page_links, bench_list_requests
}
criterion_main!(benches);
