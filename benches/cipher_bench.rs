use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::RngCore;

use symmetric_crypto::crypto::deal::Deal;
use symmetric_crypto::crypto::des::Des;
use symmetric_crypto::crypto::key::Key;
use symmetric_crypto::{make_mode, make_padding, BlockCipher, CipherMode, PaddingType};

fn random_buffer(len: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; len];
    rand::rng().fill_bytes(&mut buffer);
    buffer
}

fn keyed_des() -> Arc<dyn BlockCipher + Send + Sync> {
    let mut des = Des::new();
    des.set_key(&Key::from_hex("0123456789abcdef").unwrap())
        .unwrap();
    Arc::new(des)
}

fn keyed_deal() -> Arc<dyn BlockCipher + Send + Sync> {
    let mut deal = Deal::new(24).unwrap();
    deal.set_key(&Key::new(random_buffer(24))).unwrap();
    Arc::new(deal)
}

fn bench_block_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("block ops");

    let des = keyed_des();
    let block = random_buffer(8);
    let mut out = [0u8; 8];
    group.bench_function("DES encrypt_block", |b| {
        b.iter(|| des.encrypt_block(&block, &mut out).unwrap())
    });

    let deal = keyed_deal();
    let wide_block = random_buffer(16);
    let mut wide_out = [0u8; 16];
    group.bench_function("DEAL encrypt_block", |b| {
        b.iter(|| deal.encrypt_block(&wide_block, &mut wide_out).unwrap())
    });

    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode encrypt 1MiB");
    let data = random_buffer(1024 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for mode_tag in [
        CipherMode::Ecb,
        CipherMode::Cbc,
        CipherMode::Cfb,
        CipherMode::Ofb,
        CipherMode::Ctr,
        CipherMode::RandomDelta,
    ] {
        group.bench_function(BenchmarkId::from_parameter(format!("{mode_tag:?}")), |b| {
            let mut mode = make_mode(
                mode_tag,
                keyed_des(),
                Some(make_padding(PaddingType::Pkcs7)),
                None,
            )
            .unwrap();
            b.iter(|| mode.encrypt(&data).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_ops, bench_modes);
criterion_main!(benches);
