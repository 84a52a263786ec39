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

fn char_at(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("char_at", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % rope.len_chars();
            black_box(rope.char_at(idx));
        })
    });
}

fn char_to_utf16(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("char_to_utf16", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_chars() + 1);
            black_box(rope.char_to_utf16(idx));
        })
    });
}

fn char_to_line(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("char_to_line", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_chars() + 1);
            black_box(rope.char_to_line(idx));
        })
    });
}

fn line_to_char(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("line_to_char", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % (rope.len_lines() + 1);
            black_box(rope.line_to_char(idx));
        })
    });
}

fn line(c: &mut Criterion) {
    let rope = Rope::from_str(&text_data());
    let mut rng = rand::thread_rng();

    c.bench_function("line", |b| {
        b.iter(|| {
            let idx = rng.gen::<usize>() % rope.len_lines();
            black_box(rope.line(idx));
        })
    });
}

criterion_group!(benches, char_at, char_to_utf16, char_to_line, line_to_char, line);
criterion_main!(benches);
