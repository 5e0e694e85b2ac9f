//! Binary entry point for `project-due-notifier`.
//!
//! This module provides the command-line interface with options for the
//! configuration file, the target repository, and logging verbosity. It
//! initializes logging, runs one notification pass, and reports a failed run
//! the way GitHub Actions expects.

use std::process::ExitCode;

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use project_due_notifier::base::{
    config::Config,
    types::{Repository, Void},
};
use tracing::error;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Project-due-notifier – comments on GitHub project issues due tomorrow.
///
/// Inputs are read from `INPUT_*` environment variables (as set by GitHub
/// Actions) and, optionally, a TOML config file.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Read inputs from this file in addition to the environment (optional).
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Repository to comment in, as `owner/name`.
    ///
    /// GitHub Actions provides this as `GITHUB_REPOSITORY`.
    #[arg(short, long, env = "GITHUB_REPOSITORY")]
    repository: String,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP (configured via the standard `OTEL_*` variables).
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the binary.
///
/// Any error fails the run: it is logged, surfaced as a workflow `::error::`
/// annotation, and turned into a non-zero exit code.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_tracing(&args) {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            println!("{}", failure_annotation(&err));

            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Void {
    let repository: Repository = args.repository.parse()?;
    let config = Config::load(args.config.as_deref())?;

    project_due_notifier::start(config, repository).await
}

fn init_tracing(args: &Args) -> Void {
    // Construct the level filter.

    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(log_level(args.verbose, runner_debug));

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // Prepare the otlp layer, if requested.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_simple_exporter(exporter)
            .build()
            .tracer("project-due-notifier");

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    Ok(())
}

/// Map the verbosity count to a level.
///
/// Re-running a workflow with debug logging enabled sets `RUNNER_DEBUG=1`,
/// which raises the floor to DEBUG.
fn log_level(verbose: u8, runner_debug: bool) -> tracing::Level {
    match verbose {
        0 if !runner_debug => tracing::Level::INFO,
        0 | 1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// The `::error::` workflow command for a failed run.
fn failure_annotation(err: &anyhow::Error) -> String {
    format!("::error::{}", escape_workflow_data(&format!("{err:#}")))
}

/// Escape a message for use as workflow command data.
fn escape_workflow_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
