use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Dependencies that log every request at `info`.
const QUIET_TARGETS: [&str; 2] = ["hyper", "axum_prometheus"];

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{}' is not a valid tracing filter", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// A bare level such as `debug` applies to the form engine while the HTTP
/// stack stays at `warn`. Full directive lists are used unchanged.
pub fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();
    if log_level.contains('=') || log_level.contains(',') {
        return log_level.to_string();
    }

    std::iter::once(log_level.to_string())
        .chain(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber. `RUST_LOG` wins over `APP_LOG_LEVEL`.
/// Logs go to stderr so `render` output on stdout stays valid JSON.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
