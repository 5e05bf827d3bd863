use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Logs always go to stderr: in debug mode stdout carries the exports.
/// Set `JSON_LOG=true` for bunyan-formatted JSON lines.
pub fn init_logger() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    if !json_enabled() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return None;
    }

    // Redirect the logs from log library to tracing's subscribers.
    if LogTracer::init().is_err() {
        return None;
    }

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();

    // Non-blocking stderr writer
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(guard)
}

fn json_enabled() -> bool {
    env::var("JSON_LOG").map_or(false, |s| s.parse().unwrap_or_default())
}
