use std::sync::{Arc, Mutex};
use std::thread;

use tap_logger::{
    dlog, ilog, BuildMode, ConsoleSink, Level, Logger, StartupOptions, LINE_TERMINATOR,
};

/// Sink that collects emitted console lines for inspection.
struct CollectingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleSink for CollectingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

fn collecting_logger(mode: BuildMode, debug_log: bool) -> (Logger, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = CollectingSink {
        lines: Arc::clone(&lines),
    };
    let options = StartupOptions {
        debug_log,
        ..StartupOptions::default()
    };
    (Logger::with_sink(options, mode, Box::new(sink)), lines)
}

#[test]
fn test_release_discards_debug_without_flag() {
    let (logger, console) = collecting_logger(BuildMode::Release, false);

    logger.emit(Level::Debug, "NET", "connect", 42, "retrying");

    assert!(console.lock().unwrap().is_empty(), "Console must see nothing");
    assert!(logger.buffer().is_empty(), "Buffer must see nothing");
}

#[test]
fn test_release_emits_debug_with_flag_prefixed() {
    let (logger, console) = collecting_logger(BuildMode::Release, true);

    logger.emit(Level::Debug, "NET", "connect", 42, "retrying");

    let lines = console.lock().unwrap();
    assert_eq!(lines.as_slice(), ["connect:42 [NET]: retrying"]);
    assert_eq!(
        logger.buffer().drain_all(),
        format!("connect:42 [NET]: retrying{LINE_TERMINATOR}")
    );
}

#[test]
fn test_release_info_never_prefixed() {
    // The asymmetry: even with debug-log set, release-mode INFO records
    // carry no callsite prefix.
    let (logger, console) = collecting_logger(BuildMode::Release, true);

    logger.emit(Level::Info, "NET", "connect", 43, "connected");

    assert_eq!(console.lock().unwrap().as_slice(), ["[NET]: connected"]);
}

#[test]
fn test_debug_build_prefixes_debug_records() {
    let (logger, console) = collecting_logger(BuildMode::Debug, false);

    logger.emit(Level::Debug, "NET", "connect", 42, "retrying");
    logger.emit(Level::Info, "NET", "connect", 43, "connected");

    let lines = console.lock().unwrap();
    assert_eq!(
        lines.as_slice(),
        ["connect:42 [NET]: retrying", "[NET]: connected"]
    );
}

#[test]
fn test_debug_build_with_flag_prefixes_everything() {
    let (logger, console) = collecting_logger(BuildMode::Debug, true);

    logger.emit(Level::Info, "NET", "connect", 43, "connected");

    assert_eq!(
        console.lock().unwrap().as_slice(),
        ["connect:43 [NET]: connected"]
    );
}

#[test]
fn test_empty_message_still_tagged() {
    let (logger, console) = collecting_logger(BuildMode::Release, false);

    logger.emit(Level::Info, "NET", "connect", 1, "");

    assert_eq!(console.lock().unwrap().as_slice(), ["[NET]: "]);
    assert_eq!(
        logger.buffer().drain_all(),
        format!("[NET]: {LINE_TERMINATOR}")
    );
}

#[test]
fn test_empty_module_degrades_gracefully() {
    let (logger, console) = collecting_logger(BuildMode::Release, false);

    logger.emit(Level::Info, "", "f", 1, "message");

    assert_eq!(console.lock().unwrap().as_slice(), ["[]: message"]);
}

#[test]
fn test_release_no_debug_log_scenario() {
    // Release build, debug-log off: the DEBUG record vanishes entirely,
    // the INFO record reaches both sink and buffer.
    let (logger, console) = collecting_logger(BuildMode::Release, false);

    logger.emit(Level::Debug, "NET", "Connect", 42, "retrying");
    logger.emit(Level::Info, "NET", "Connect", 43, "connected");

    assert_eq!(
        logger.buffer().drain_all(),
        format!("[NET]: connected{LINE_TERMINATOR}")
    );
    assert_eq!(console.lock().unwrap().as_slice(), ["[NET]: connected"]);
}

#[test]
fn test_sink_and_buffer_agree() {
    let (logger, console) = collecting_logger(BuildMode::Debug, true);

    for i in 0..10 {
        let level = if i % 2 == 0 { Level::Debug } else { Level::Info };
        logger.emit(level, "MIX", "f", i, &format!("record {i}"));
    }

    let console_lines = console.lock().unwrap();
    let drained = logger.buffer().drain_all();
    let buffered: Vec<&str> = drained.lines().collect();
    assert_eq!(
        console_lines.as_slice(),
        buffered.as_slice(),
        "Every emitted record must reach both sink and buffer"
    );
}

#[test]
fn test_would_emit() {
    let (release_logger, _) = collecting_logger(BuildMode::Release, false);
    assert!(!release_logger.would_emit(Level::Debug));
    assert!(release_logger.would_emit(Level::Info));

    let (flagged, _) = collecting_logger(BuildMode::Release, true);
    assert!(flagged.would_emit(Level::Debug));

    let (debug_logger, _) = collecting_logger(BuildMode::Debug, false);
    assert!(debug_logger.would_emit(Level::Debug));
}

#[test]
fn test_macros_capture_callsite() {
    let (logger, _) = collecting_logger(BuildMode::Release, true);

    dlog!(logger, "NET", "retrying in {}ms", 250);

    let drained = logger.buffer().drain_all();
    assert!(
        drained.contains("test_macros_capture_callsite:"),
        "Callsite function missing from: {drained}"
    );
    assert!(drained.contains("[NET]: retrying in 250ms"));
}

#[test]
fn test_info_macro() {
    let (logger, console) = collecting_logger(BuildMode::Release, false);

    ilog!(logger, "UI", "window {} shown", 1);

    assert_eq!(console.lock().unwrap().as_slice(), ["[UI]: window 1 shown"]);
}

#[test]
fn test_concurrent_emit_then_drain() {
    const THREADS: usize = 8;
    const RECORDS_PER_THREAD: usize = 50;

    let (logger, _) = collecting_logger(BuildMode::Release, false);
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for t in 0..THREADS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..RECORDS_PER_THREAD {
                logger.emit(Level::Info, "WORK", "run", i as u32, &format!("t{t} r{i}"));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let drained = logger.buffer().drain_all();
    assert_eq!(drained.lines().count(), THREADS * RECORDS_PER_THREAD);
}

#[test]
fn test_drain_concurrent_with_emitters() {
    // A drainer running alongside the emitters must still observe every
    // record exactly once across its drains.
    const THREADS: usize = 4;
    const RECORDS_PER_THREAD: usize = 200;

    let (logger, _) = collecting_logger(BuildMode::Release, false);
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for t in 0..THREADS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..RECORDS_PER_THREAD {
                logger.emit(Level::Info, "WORK", "run", i as u32, &format!("t{t} r{i}"));
            }
        }));
    }

    let buffer = logger.buffer();
    let mut seen = String::new();
    for handle in handles {
        seen.push_str(&buffer.drain_all());
        handle.join().unwrap();
    }
    seen.push_str(&buffer.drain_all());

    assert_eq!(seen.lines().count(), THREADS * RECORDS_PER_THREAD);
    for t in 0..THREADS {
        for i in 0..RECORDS_PER_THREAD {
            assert_eq!(
                seen.matches(&format!("[WORK]: t{t} r{i}{LINE_TERMINATOR}"))
                    .count(),
                1,
                "t{t} r{i} must appear exactly once"
            );
        }
    }
}
