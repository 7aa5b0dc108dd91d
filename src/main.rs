use std::process::ExitCode;

use tap_logger::{dlog, help_text, ilog, parse_args, version_text, Logger, ParseOutcome};

/// Presentation shell around the core: maps parse outcomes to console
/// output and exit codes, then demonstrates the emit/drain cycle.
fn main() -> ExitCode {
    let (options, outcome) = parse_args(std::env::args().skip(1));

    match outcome {
        ParseOutcome::HelpRequested => {
            print!("{}", help_text());
            return ExitCode::SUCCESS;
        }
        ParseOutcome::VersionRequested => {
            print!("{}", version_text());
            return ExitCode::SUCCESS;
        }
        ParseOutcome::Error(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
        ParseOutcome::Ok => {}
    }

    let logger = Logger::new(options);

    ilog!(logger, "CORE", "startup options accepted");
    dlog!(
        logger,
        "CORE",
        "debug_log={} no_api={} root={} toolbar={}",
        options.debug_log,
        options.no_api,
        options.force_run_as_root,
        options.enable_toolbar_plugin
    );
    ilog!(logger, "UI", "log tap ready");

    // A real embedding hands this to its log viewer; here the byte count
    // shows how much the tap captured for this run.
    let history = logger.buffer().drain_all();
    println!("drained {} byte(s) from the log tap", history.len());

    ExitCode::SUCCESS
}
