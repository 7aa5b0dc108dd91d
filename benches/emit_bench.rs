use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tap_logger::{BuildMode, ConsoleSink, Level, Logger, StartupOptions};

// Sink that does nothing - for measuring pure in-memory performance
struct NullSink;

impl ConsoleSink for NullSink {
    fn write_line(&mut self, _line: &str) {}
}

fn bench_emit(c: &mut Criterion) {
    let logger = Logger::with_sink(
        StartupOptions::default(),
        BuildMode::Release,
        Box::new(NullSink),
    );

    c.bench_function("emit_info", |b| {
        b.iter(|| {
            logger.emit(
                Level::Info,
                black_box("NET"),
                black_box("bench"),
                black_box(1),
                black_box("connected"),
            );
        })
    });

    // The discard path: release build, no debug-log flag.
    c.bench_function("discard_debug", |b| {
        b.iter(|| {
            logger.emit(
                Level::Debug,
                black_box("NET"),
                black_box("bench"),
                black_box(1),
                black_box("retrying"),
            );
        })
    });

    let flagged = Logger::with_sink(
        StartupOptions {
            debug_log: true,
            ..StartupOptions::default()
        },
        BuildMode::Release,
        Box::new(NullSink),
    );

    c.bench_function("emit_debug_prefixed", |b| {
        b.iter(|| {
            flagged.emit(
                Level::Debug,
                black_box("NET"),
                black_box("bench"),
                black_box(1),
                black_box("retrying"),
            );
        })
    });
}

criterion_group!(benches, bench_emit);
criterion_main!(benches);
