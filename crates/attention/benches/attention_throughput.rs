use attention::masks::causal_mask;
use attention::{Attention, Config, ScaledDotProductAttention};
use candle_core::{DType, Device, Tensor};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_attention(c: &mut Criterion) {
    let device = Device::Cpu;
    let batch_heads = 8usize;
    let seq_lens = &[64usize, 256, 512];
    let head_dims = &[64usize, 128];

    for &head_dim in head_dims {
        let mut group = c.benchmark_group(format!("sdpa/d{head_dim}"));
        let attention =
            ScaledDotProductAttention::new(Config::for_head_dim(head_dim)).expect("attention");
        attention.set_training(false);

        for &seq_len in seq_lens {
            let shape = (batch_heads, seq_len, head_dim);
            let q = Tensor::randn(0f32, 1.0, shape, &device).expect("q");
            let k = Tensor::randn(0f32, 1.0, shape, &device).expect("k");
            let v = Tensor::randn(0f32, 1.0, shape, &device).expect("v");
            let seq = Tensor::zeros((batch_heads, seq_len), DType::U32, &device).expect("seq");
            let mask = causal_mask(&seq).expect("mask");

            group.throughput(Throughput::Elements((batch_heads * seq_len) as u64));
            group.bench_with_input(
                BenchmarkId::new("unmasked", seq_len),
                &(q.clone(), k.clone(), v.clone()),
                |b, (q, k, v)| {
                    b.iter(|| {
                        let out = attention
                            .attend(black_box(q), black_box(k), black_box(v), None)
                            .expect("attend");
                        black_box(out);
                    });
                },
            );
            group.bench_with_input(
                BenchmarkId::new("causal", seq_len),
                &(q, k, v, mask),
                |b, (q, k, v, mask)| {
                    b.iter(|| {
                        let out = attention
                            .attend(black_box(q), black_box(k), black_box(v), Some(mask))
                            .expect("attend");
                        black_box(out);
                    });
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_attention);
criterion_main!(benches);
