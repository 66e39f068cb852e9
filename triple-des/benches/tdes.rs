use criterion::{black_box, criterion_group, criterion_main, Criterion};
use triple_des::{des, KeySchedule, TripleDes};

fn bench_block(c: &mut Criterion) {
    let tdes = TripleDes::new();
    let three_key = KeySchedule::from_bytes(&[0x5a; 24]).unwrap();
    let two_key = KeySchedule::from_bytes(&[0xa5; 16]).unwrap();
    let block = *b"The quic";

    c.bench_function("des encrypt", |b| {
        b.iter(|| des::encrypt(black_box(0x1334_5779_9BBC_DFF1), black_box(0x0123_4567_89AB_CDEF)))
    });
    c.bench_function("tdes encrypt three-key", |b| {
        b.iter(|| tdes.encrypt_block(&three_key, black_box(&block)).unwrap())
    });
    c.bench_function("tdes decrypt two-key", |b| {
        b.iter(|| tdes.decrypt_block(&two_key, black_box(&block)).unwrap())
    });
}

criterion_group!(benches, bench_block);
criterion_main!(benches);
