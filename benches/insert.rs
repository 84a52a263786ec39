use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::Rng;

use plait::Rope;

fn text_data() -> String {
    let mut text = String::new();
    for i in 0..5_000 {
        text.push_str("Lorem ipsum dolor sit amet, consectetur adipiscing elit.\r\n");
        text.push_str("こんにちは、みんなさん！🌍\n");
        text.push_str(&format!("line {}\n", i));
    }
    text
}

fn insert_small(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("insert_small", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_chars() + 1);
            black_box(rope.insert(idx, "ab"));
        })
    });
}

fn insert_large(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let big = "0123456789".repeat(300);
    let mut rng = rand::thread_rng();

    c.bench_function("insert_large", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_chars() + 1);
            black_box(rope.insert(idx, &big));
        })
    });
}

fn remove(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("remove", |b| {
        b.iter(|| {
            let start = rng.gen::<usize>() % rope.len_chars();
            let end = (start + 64).min(rope.len_chars());
            black_box(rope.remove(start, end));
        })
    });
}

fn split_and_append(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("split_and_append", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_chars() + 1);
            let (left, right) = rope.split_at(idx);
            black_box(left.append(&right));
        })
    });
}

criterion_group!(benches, insert_small, insert_large, remove, split_and_append);
criterion_main!(benches);
