// Maps the host-supplied engine log level onto the tracing subscriber.
//
// `RUST_LOG` wins when set, matching the rest of the stack; repeat calls are
// no-ops because the global subscriber can only be installed once.

use tracing_subscriber::EnvFilter;

use crate::engine::LogLevel;

pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
        LogLevel::Off => "off",
    }
}
