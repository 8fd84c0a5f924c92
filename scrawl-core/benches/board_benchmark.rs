use criterion::{criterion_group, criterion_main, Criterion};
use scrawl_core::surface::RecordingSurface;
use scrawl_core::{
    Board, BoardConfig, InputEvent, LocalIdentity, NormPoint, OfflineTransport, PixelPoint, WireEvent,
};
use scrawl_core::protocol::Intent;
use std::hint::black_box;

fn board() -> Board<RecordingSurface, OfflineTransport> {
    let mut board = Board::new(
        BoardConfig::default(),
        LocalIdentity::new("bench", "black"),
        RecordingSurface::new(),
        OfflineTransport,
    );
    board.resize(1280.0);
    board
}

fn bench_event_encode(c: &mut Criterion) {
    let event = WireEvent::from_intent(&Intent::draw(NormPoint::new(0.42, 0.17)), "a1b2c3d4", "hsl(120, 70%, 60%)");

    c.bench_function("wire_event_encode", |b| {
        b.iter(|| black_box(black_box(&event).encode().unwrap()))
    });
}

fn bench_event_decode(c: &mut Criterion) {
    let payload = r#"{"type":"draw","x":0.42,"y":0.17,"id":"a1b2c3d4","color":"hsl(120, 70%, 60%)"}"#;

    c.bench_function("wire_event_decode", |b| {
        b.iter(|| black_box(WireEvent::decode(black_box(payload)).unwrap()))
    });
}

fn bench_ingest_100_peers(c: &mut Criterion) {
    let payloads: Vec<String> = (0..100)
        .map(|i| {
            format!(
                r#"{{"type":"draw","x":{},"y":0.5,"id":"peer-{}","color":"red"}}"#,
                i as f64 / 100.0,
                i
            )
        })
        .collect();

    c.bench_function("ingest_100_peers", |b| {
        let mut board = board();
        let mut now = 0u64;
        b.iter(|| {
            now += 16;
            for payload in &payloads {
                board.on_message("scrawl/board", payload, now);
            }
            board.canvas_mut().surface_mut().clear();
        })
    });
}

fn bench_tick_100_peers(c: &mut Criterion) {
    let mut board = board();
    for i in 0..100 {
        let payload = format!(
            r#"{{"type":"move","x":{},"y":0.5,"id":"peer-{}","color":"red"}}"#,
            i as f64 / 100.0,
            i
        );
        board.on_message("scrawl/board", &payload, 0);
    }

    c.bench_function("tick_100_peers", |b| {
        b.iter(|| {
            black_box(board.tick(black_box(1_000)));
            board.canvas_mut().surface_mut().clear();
        })
    });
}

fn bench_local_drag(c: &mut Criterion) {
    c.bench_function("local_drag_step", |b| {
        let mut board = board();
        board.handle_input(InputEvent::PointerDown(PixelPoint::new(10.0, 10.0)));
        let mut x = 10.0;
        b.iter(|| {
            x = if x > 1200.0 { 10.0 } else { x + 1.0 };
            board.handle_input(InputEvent::PointerMove(PixelPoint::new(black_box(x), 200.0)));
            board.canvas_mut().surface_mut().clear();
        })
    });
}

criterion_group!(
    benches,
    bench_event_encode,
    bench_event_decode,
    bench_ingest_100_peers,
    bench_tick_100_peers,
    bench_local_drag,
);
criterion_main!(benches);
