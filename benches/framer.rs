use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tictactoe_mqtt::core::framer::split_event;
use tictactoe_mqtt::core::{apply, BoardState, LineFramer, MovePool};

fn sample_stream() -> Vec<u8> {
    let mut stream = Vec::new();
    for i in 0..200 {
        stream.extend_from_slice(b"TTT/board XO XO XO \n");
        stream.extend_from_slice(if i % 2 == 0 { b"TTT/player O\n" } else { b"TTT/player X\n" });
        stream.extend_from_slice(b"TTT/moves X played 2,3\n");
        stream.extend_from_slice(b"TTT/status X wins\n");
    }
    stream
}

fn bench_frame_small_chunks(c: &mut Criterion) {
    let stream = sample_stream();

    c.bench_function("frame_stream_7_byte_chunks", |b| {
        b.iter(|| {
            let mut framer = LineFramer::new();
            let mut lines = 0;
            for chunk in stream.chunks(7) {
                lines += framer.feed(black_box(chunk)).len();
            }
            lines
        })
    });
}

fn bench_frame_and_route(c: &mut Criterion) {
    let stream = sample_stream();

    c.bench_function("frame_and_route_4k_chunks", |b| {
        b.iter(|| {
            let mut framer = LineFramer::new();
            let mut board = BoardState::new();
            for chunk in stream.chunks(4096) {
                for line in framer.feed(chunk) {
                    if let Some((topic, payload)) = split_event(&line) {
                        black_box(apply(&mut board, "TTT", topic, payload));
                    }
                }
            }
            board
        })
    });
}

fn bench_move_pool(c: &mut Criterion) {
    let mut pool = MovePool::new(12345);

    c.bench_function("autoplay_next_move", |b| b.iter(|| black_box(pool.next_move())));
}

criterion_group!(
    benches,
    bench_frame_small_chunks,
    bench_frame_and_route,
    bench_move_pool
);
criterion_main!(benches);
