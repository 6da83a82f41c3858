use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use putsig::{EncodingMode, KeyPair, SignOptions, SignableCodec, VALUE_MAX_SIZE};

fn bench_signable(c: &mut Criterion) {
    let codec = SignableCodec::new();
    let value = vec![0x42u8; VALUE_MAX_SIZE];
    let mut group = c.benchmark_group("signable");

    for mode in EncodingMode::ALL {
        let opts = SignOptions::new().encoding(mode).salt(vec![0xaa; 32]).seq(42);
        group.bench_with_input(BenchmarkId::from_parameter(mode), &opts, |b, opts| {
            b.iter(|| codec.signable(black_box(&value), &opts.signable))
        });
    }

    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let codec = SignableCodec::new();
    let value = vec![0x42u8; VALUE_MAX_SIZE];
    let keypair = KeyPair::from_seed(&[7; 32]);
    let mut group = c.benchmark_group("sign");

    for mode in EncodingMode::ALL {
        let opts = SignOptions::with_keypair(keypair.clone())
            .encoding(mode)
            .salt(vec![0xaa; 32])
            .seq(42);
        group.bench_with_input(BenchmarkId::from_parameter(mode), &opts, |b, opts| {
            b.iter(|| codec.sign(black_box(&value), Some(opts)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_signable, bench_sign);
criterion_main!(benches);
