//! Binary entry point for `agenda-bot`.
//!
//! Parses the command line, installs logging, loads the configuration and
//! hands over to [`agenda_bot::start`].

use agenda_bot::base::{config::Config, types::Void};
use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Agenda-bot – a Slack bot for creating, inspecting, and listing events.
///
/// Configuration can come from `config.toml` or `AGENDA_BOT_*` environment variables.
/// The Slack app and bot tokens are required.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Config file to read instead of `.hidden/config.toml`.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Log more (`-v` for DEBUG, `-vv` for TRACE).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Also export spans to an OTLP/HTTP collector.
    #[arg(long)]
    otlp: bool,
}

/// Log level for a `-v` count.
fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber: compact stdout logs, plus OTLP spans when asked for.
fn init_tracing(verbose: u8, otlp: bool) -> Void {
    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let otel = if otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build();

        Some(tracing_opentelemetry::layer().with_tracer(provider.tracer("agenda-bot")))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(otel)
        .with(LevelFilter::from_level(level_for(verbose)))
        .with(stdout)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    init_tracing(args.verbose, args.otlp)?;

    // A missing token ends the process here with a non-zero status.
    let config = Config::load(args.config.as_deref())?;

    agenda_bot::start(config).await
}
