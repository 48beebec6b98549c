//! Smart Duplicate CLI
//!
//! Usage:
//!   smart-duplicate [OPTIONS] --select <NAMES> [FILE]
//!
//! Options:
//!   -s, --select <NAMES>        Comma-separated element names to duplicate
//!   -d, --direction <DIR>       top, bottom, left, right, top-left, ... (default: right)
//!   -g, --gap <GAP>             Spacing in pixels, or `auto`
//!       --no-push               Do not move overlapping siblings
//!   -c, --config <FILE>         Settings file (TOML format)
//!       --svg <FILE>            Also write an SVG preview
//!       --lint                  Report overlaps and section overflow afterwards
//!       --debug                 Verbose logging to stderr
//!   -h, --help                  Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smart_duplicate::{
    run, Direction, DuplicateError, DuplicateSettings, Gap, Notification, RunConfig, RunError,
    Severity, SvgConfig,
};

#[derive(Parser)]
#[command(name = "smart-duplicate")]
#[command(about = "Duplicate scene elements in a direction, pushing neighbors out of the way")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Names of the elements to duplicate
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Where the copies go
    #[arg(short, long, default_value = "right")]
    direction: Direction,

    /// Spacing between original and copy: a number or `auto`
    #[arg(short, long)]
    gap: Option<Gap>,

    /// Leave overlapping siblings where they are
    #[arg(long)]
    no_push: bool,

    /// Settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write an SVG preview of the result
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Check the result for overlaps and section overflow
    #[arg(long)]
    lint: bool,

    /// Verbose logging to stderr
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn notify(notification: &Notification) {
    match notification.severity {
        Severity::Info => eprintln!("{}", notification.message),
        Severity::Warning | Severity::Error => eprintln!("{}", notification),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let settings = match &cli.config {
        Some(path) => match DuplicateSettings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => DuplicateSettings::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let mut config = RunConfig::new().with_settings(settings);
    if let Some(gap) = cli.gap {
        config = config.with_gap(gap);
    }
    if cli.no_push {
        config = config.with_push(false);
    }

    let selection: Vec<&str> = cli
        .select
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let output = match run(&source, &selection, cli.direction, &config) {
        Ok(output) => output,
        Err(RunError::Duplicate(err @ DuplicateError::EmptySelection)) => {
            notify(&Notification::from(&err));
            return ExitCode::SUCCESS;
        }
        Err(RunError::Parse(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for notification in output.outcome.notifications() {
        notify(&notification);
    }

    if cli.lint {
        for warning in output.lint() {
            eprintln!("lint: {}", warning);
        }
    }

    if let Some(path) = &cli.svg {
        if let Err(e) = fs::write(path, output.to_svg(&SvgConfig::default())) {
            eprintln!("Error writing SVG '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    print!("{}", output.format());
    ExitCode::SUCCESS
}
