use clap::{CommandFactory, Parser};

/// Startup configuration and command-line parsing.
///
/// The four flags below are the only external input shaping logging
/// behavior (and a few unrelated process behaviors). They are parsed once
/// at process start and never mutated afterward, so arbitrarily many
/// concurrent logging calls can read them without synchronization.

/// Process-wide configuration, set once, read many times.
///
/// `Default` leaves every flag false, which is also what a failed parse
/// hands back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupOptions {
    /// Disable the external API subsystem.
    pub no_api: bool,
    /// Explicitly run as the root user.
    pub force_run_as_root: bool,
    /// Emit DEBUG records even in a release build, and prefix every record
    /// with its callsite.
    pub debug_log: bool,
    /// Enable the network toolbar plugin.
    pub enable_toolbar_plugin: bool,
}

/// Terminal result of parsing the command line.
///
/// The caller must act on any non-`Ok` value before continuing startup:
/// print the help or version text, or print the error and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ParseOutcome {
    /// All flags understood; the returned options are valid.
    Ok,
    /// Unknown flag or malformed input. The message is ready for display;
    /// nothing has been printed yet.
    Error(String),
    /// `--version` (or `-V`) was present.
    VersionRequested,
    /// `--help` (or `-h`) was present.
    HelpRequested,
}

#[derive(Parser, Debug)]
#[command(
    name = "tap_logger",
    version,
    about = "Flag-gated console logger with a drainable in-memory record tap"
)]
struct Cli {
    /// Disable the external API subsystem
    #[arg(long)]
    disable_api: bool,

    /// Explicitly run as the root user
    #[arg(long)]
    force_run_as_root: bool,

    /// Emit DEBUG records even in a release build
    #[arg(long)]
    debug_log: bool,

    /// Enable the network toolbar plugin
    #[arg(long)]
    enable_toolbar_plugin: bool,
}

/// Parses the command line into a [`StartupOptions`] value.
///
/// `argv` iterates over the arguments *excluding* the program name. Long
/// flags match regardless of case and order. The parser prints nothing;
/// presentation of help text, version text, and error messages is the
/// caller's job (see [`help_text`] and [`version_text`]).
///
/// Help and version requests are detected before any other validation, so
/// they short-circuit even when accompanied by nonsense. Any other unknown
/// or malformed flag yields [`ParseOutcome::Error`] with the first problem
/// encountered, and the options come back at their defaults.
///
/// # Examples
///
/// ```
/// use tap_logger::{parse_args, ParseOutcome};
///
/// let (options, outcome) = parse_args(["--debug-log", "--DISABLE-API"]);
/// assert_eq!(outcome, ParseOutcome::Ok);
/// assert!(options.debug_log);
/// assert!(options.no_api);
///
/// let (_, outcome) = parse_args(["--debug-log", "--help"]);
/// assert_eq!(outcome, ParseOutcome::HelpRequested);
/// ```
pub fn parse_args<I, S>(argv: I) -> (StartupOptions, ParseOutcome)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = argv
        .into_iter()
        .map(|arg| normalize(arg.as_ref()))
        .collect();

    // Help/version win over everything else on the line, valid or not.
    for arg in &args {
        match arg.as_str() {
            "--help" | "-h" => return (StartupOptions::default(), ParseOutcome::HelpRequested),
            "--version" | "-V" => {
                return (StartupOptions::default(), ParseOutcome::VersionRequested)
            }
            _ => {}
        }
    }

    match Cli::try_parse_from(std::iter::once("tap_logger".to_string()).chain(args)) {
        Ok(cli) => (
            StartupOptions {
                no_api: cli.disable_api,
                force_run_as_root: cli.force_run_as_root,
                debug_log: cli.debug_log,
                enable_toolbar_plugin: cli.enable_toolbar_plugin,
            },
            ParseOutcome::Ok,
        ),
        Err(err) => (StartupOptions::default(), ParseOutcome::Error(err.to_string())),
    }
}

// Long flags are case-insensitive; short flags and values are not.
fn normalize(arg: &str) -> String {
    match arg.strip_prefix("--") {
        Some(rest) => format!("--{}", rest.to_ascii_lowercase()),
        None => arg.to_string(),
    }
}

/// Renders the help screen for the caller to print on
/// [`ParseOutcome::HelpRequested`].
pub fn help_text() -> String {
    let mut command = Cli::command();
    command.render_help().to_string()
}

/// Renders the version line for the caller to print on
/// [`ParseOutcome::VersionRequested`].
pub fn version_text() -> String {
    Cli::command().render_version()
}
