use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use deniable_encryption::{
    decryption::{decrypt_alice, decrypt_dictator},
    discrete_log::SearchConfig,
    encryption::encrypt,
    group::GroupContext,
    keygen::generate_keys_with_rng,
};
use num_bigint::BigInt;

type K256 = ark_secp256k1::Config;

fn bench_decrypt_dictator(c: &mut Criterion) {
    let mut rng = ark_std::test_rng();
    let ctx = GroupContext::<K256>::new();
    let keys = generate_keys_with_rng(&ctx, &mut rng);
    let ct = encrypt(&ctx, &keys.dictator.secret, &keys.alice.secret, &BigInt::from(42), 99).unwrap();

    c.bench_function("decrypt_dictator", |b| {
        b.iter(|| decrypt_dictator(&ctx, &keys.dictator.secret, &ct))
    });
}

fn bench_decrypt_alice(c: &mut Criterion) {
    let mut rng = ark_std::test_rng();
    let ctx = GroupContext::<K256>::new();
    let keys = generate_keys_with_rng(&ctx, &mut rng);
    let mut group = c.benchmark_group("decrypt_alice");
    group.sample_size(10);

    for size in [10, 14, 18, 20] {
        let bound: u64 = 1 << size;
        // worst case: the index sits at the bound
        let ct = encrypt(&ctx, &keys.dictator.secret, &keys.alice.secret, &BigInt::from(42), bound)
            .unwrap();
        let config = SearchConfig::with_bound(bound);

        group.bench_with_input(BenchmarkId::from_parameter(bound), &(ct, config), |b, inp| {
            b.iter(|| decrypt_alice(&ctx, &keys.alice.secret, &inp.0, &inp.1));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decrypt_dictator, bench_decrypt_alice);
criterion_main!(benches);
