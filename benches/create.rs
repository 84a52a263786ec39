use criterion::{black_box, criterion_group, criterion_main, Criterion};

use plait::{Rope, RopeBuilder};

fn text_data() -> String {
    let mut text = String::new();
    for i in 0..5_000 {
        text.push_str("Lorem ipsum dolor sit amet, consectetur adipiscing elit.\r\n");
        text.push_str("こんにちは、みんなさん！🌍\n");
        text.push_str(&format!("line {}\n", i));
    }
    text
}

fn from_str(c: &mut Criterion) {
    let text = text_data();

    c.bench_function("from_str", |b| {
        b.iter(|| {
            black_box(Rope::from_str(&text));
        })
    });
}

fn rope_builder(c: &mut Criterion) {
    let text = text_data();
    let chunks = {
        let mut chunks = Vec::new();
        let mut rest = text.as_str();
        while !rest.is_empty() {
            let mut end = rest.len().min(97);
            while !rest.is_char_boundary(end) {
                end -= 1;
            }
            chunks.push(&rest[..end]);
            rest = &rest[end..];
        }
        chunks
    };

    c.bench_function("rope_builder", |b| {
        b.iter(|| {
            let mut builder = RopeBuilder::new();
            for chunk in &chunks {
                builder.append(chunk);
            }
            black_box(builder.finish());
        })
    });
}

fn clone(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());

    c.bench_function("clone", |b| {
        b.iter(|| {
            black_box(rope.clone());
        })
    });
}

criterion_group!(benches, from_str, rope_builder, clone);
criterion_main!(benches);
