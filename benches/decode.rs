use criterion::{criterion_group, criterion_main, Criterion};
use griddecode::{Activation, Anchor, DecodeConfig, Decoder, GridShape};
use std::hint::black_box;

fn make_tensor(len: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(len);
    for i in 0..len {
        let byte = ((i * 13) ^ (i >> 3) ^ (i * 7)) & 0xFF;
        data.push(byte as f32 / 32.0 - 4.0);
    }
    data
}

fn bench_decode(c: &mut Criterion) {
    let shape = GridShape {
        grid_width: 13,
        grid_height: 13,
        anchor_count: 5,
        class_count: 20,
    };
    let anchors = vec![
        Anchor {
            width: 1.08,
            height: 1.19,
        },
        Anchor {
            width: 3.42,
            height: 4.41,
        },
        Anchor {
            width: 6.63,
            height: 11.38,
        },
        Anchor {
            width: 9.42,
            height: 5.11,
        },
        Anchor {
            width: 16.62,
            height: 10.52,
        },
    ];
    let labels = (0..20).map(|i| format!("class{i}")).collect();
    let decoder = Decoder::new(shape, anchors, labels)
        .unwrap()
        .with_config(DecodeConfig {
            image_width: 416.0,
            image_height: 416.0,
            confidence_threshold: 0.3,
            nms_iou_threshold: 0.5,
            nms_limit: 20,
            activation: Activation::Raw,
            parallel: false,
        });
    let data = make_tensor(shape.len());

    c.bench_function("decode_13x13x5x25_raw", |b| {
        b.iter(|| decoder.run(black_box(&data)).unwrap())
    });

    c.bench_function("candidates_13x13x5x25_raw", |b| {
        b.iter(|| decoder.candidates(black_box(&data)).unwrap())
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
