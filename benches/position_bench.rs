use criterion::{criterion_group, criterion_main, Criterion};
use jotter::position::{LineEnding, Position, PositionMapper};
use std::hint::black_box;

fn generate_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!("line {} with a bit of padding text\r\n", i));
    }
    text
}

fn position_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("position");

    let text = generate_text(10_000);
    let mapper = PositionMapper::new(&text, LineEnding::CRLF);
    let len = mapper.len();

    group.bench_function("offset_to_position_mid", |b| {
        b.iter(|| black_box(mapper.offset_to_position(black_box(len / 2))))
    });

    group.bench_function("position_to_offset_mid", |b| {
        b.iter(|| black_box(mapper.position_to_offset(black_box(Position::new(5_000, 10)))))
    });

    group.bench_function("line_count_10k", |b| {
        b.iter(|| black_box(mapper.line_count()))
    });

    group.finish();
}

criterion_group!(benches, position_bench);
criterion_main!(benches);
