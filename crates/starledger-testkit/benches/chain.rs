use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use starledger::validate_blocks;
use starledger_testkit::{star, LedgerFixture, TestWallet};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn bench_claim(c: &mut Criterion) {
    let rt = runtime();
    let fixture = rt.block_on(LedgerFixture::new()).unwrap();
    let wallet = TestWallet::with_seed([0x42; 32]);

    c.bench_function("claim_round_trip", |b| {
        b.iter(|| {
            rt.block_on(wallet.claim(&fixture.ledger, star("bench")))
                .unwrap()
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("validate_chain");

    for len in [16usize, 256, 1024] {
        let fixture = rt.block_on(LedgerFixture::new()).unwrap();
        let wallet = TestWallet::with_seed([0x42; 32]);
        for i in 0..len {
            rt.block_on(wallet.claim(&fixture.ledger, star(&format!("bench {i}"))))
                .unwrap();
        }
        let blocks = rt.block_on(fixture.ledger.blocks());

        group.bench_with_input(BenchmarkId::from_parameter(len), &blocks, |b, blocks| {
            b.iter(|| validate_blocks(black_box(blocks)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_claim, bench_validate);
criterion_main!(benches);
