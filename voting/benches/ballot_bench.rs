use ballot_types::AccountId;
use ballot_voting::Ballot;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn account(n: u32) -> AccountId {
    let mut bytes = [0u8; 32];
    bytes[..4].copy_from_slice(&n.to_le_bytes());
    AccountId::new(bytes)
}

/// Chairperson 0 plus `len` admitted voters chained 1 → 2 → … → len.
fn chained_ballot(len: u32) -> Ballot {
    let mut ballot = Ballot::with_text_labels(account(0), &["a", "b"]).unwrap();
    let voters: Vec<AccountId> = (1..=len).map(account).collect();
    ballot.grant_rights(&account(0), &voters).unwrap();
    for n in 1..len {
        ballot.delegate(&account(n), &account(n + 1)).unwrap();
    }
    ballot
}

fn resolve_chain_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_delegate");
    for len in [10u32, 100, 1_000] {
        let ballot = chained_ballot(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| ballot.resolve_delegate(black_box(&account(1))))
        });
    }
    group.finish();
}

fn delegate_into_chain_bench(c: &mut Criterion) {
    let base = chained_ballot(1_000);
    c.bench_function("delegate_into_1000_chain", |b| {
        b.iter_batched(
            || base.clone(),
            |mut ballot| ballot.delegate(&account(0), black_box(&account(1))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn winning_proposal_bench(c: &mut Criterion) {
    let labels: Vec<String> = (0..256).map(|i| format!("p{i}")).collect();
    let ballot = Ballot::with_text_labels(account(0), &labels).unwrap();
    c.bench_function("winning_proposal_256", |b| {
        b.iter(|| black_box(&ballot).winning_proposal())
    });
}

criterion_group!(
    benches,
    resolve_chain_bench,
    delegate_into_chain_bench,
    winning_proposal_bench
);
criterion_main!(benches);
