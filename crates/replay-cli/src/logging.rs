use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const FILE_FILTER: &str = "debug";

/// Install the global subscriber.
///
/// Console output goes to stderr, filtered by `RUST_LOG` or `level`. With
/// `debug`, a daily-rolling file under `~/.replay/logs` also receives debug
/// events; the returned guard must live until exit so buffered lines are
/// flushed.
pub fn init(level: &str, debug: bool) -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    if !debug {
        tracing_subscriber::registry().with(console).init();
        return None;
    }

    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok();
    let appender = tracing_appender::rolling::daily(&dir, "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new(FILE_FILTER));

    tracing_subscriber::registry().with(console).with(file).init();
    Some(guard)
}

fn log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".replay").join("logs")
}
