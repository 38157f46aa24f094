//! # Debt Note Ledger Benchmarks
//!
//! | Path | Work per iteration |
//! |------|--------------------|
//! | create | decode, two lookups, vault put, anchor put |
//! | anchor read | one ledger get, hex encode |
//! | verify | one ledger get, sha256 of the claimed bytes |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use debtnote_core::prelude::*;

fn payload(id: usize) -> String {
    format!(r#"{{"id":"DN{id}","debtorOrg":"OrgA","amount":{}}}"#, id + 1)
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("debtnote-create");

    for size in [10usize, 100, 1_000] {
        let payloads: Vec<String> = (0..size).map(payload).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("create_batch", size), &payloads, |b, payloads| {
            b.iter(|| {
                let service = create_test_service("OrgA");
                for p in payloads {
                    let ctx = TransientContext::for_org("OrgA")
                        .with_transient(transient_keys::PROPERTIES, p.as_str());
                    black_box(service.create_debt_note(&ctx).is_ok());
                }
            })
        });
    }

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("debtnote-reads");

    let service = create_test_service("OrgA");
    for i in 0..1_000 {
        let ctx = TransientContext::for_org("OrgA")
            .with_transient(transient_keys::PROPERTIES, payload(i));
        let _ = service.create_debt_note(&ctx);
    }
    let anonymous = TransientContext::anonymous();
    let claimed = payload(500);

    group.bench_function("read_world_state", |b| {
        b.iter(|| black_box(service.read_world_state(&anonymous, black_box("DN500")).is_ok()))
    });

    group.bench_function("verify_anchor", |b| {
        b.iter(|| black_box(service.verify_anchor("DN500", claimed.as_bytes()).is_ok()))
    });

    group.finish();
}

criterion_group!(benches, bench_create, bench_reads);
criterion_main!(benches);
