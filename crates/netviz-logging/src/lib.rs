use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::subscriber::DefaultGuard;
use tracing_log::LogTracer;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Level used when neither `RUST_LOG` nor `NETVIZ_LOG` is set
pub const DEFAULT_LEVEL: &str = "info";

/// Secondary filter variable consulted after `RUST_LOG`
pub const LOG_ENV_VAR: &str = "NETVIZ_LOG";

/// Output format of the stderr log layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format '{0}' (expected 'text' or 'json')")]
pub struct ParseLogFormatError(String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ParseLogFormatError(s.to_string())),
        }
    }
}

pub struct LoggingGuard {
    _guard: Option<DefaultGuard>,
}

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter directive used when no env filter is set, e.g. `info` or `netviz_plot=trace`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            format: LogFormat::Text,
        }
    }
}

pub fn init_logging(opts: LoggingOptions) -> LoggingGuard {
    // Install LogTracer so log:: macros flow into tracing
    let _ = LogTracer::init();

    let build_subscriber = || {
        let text_layer = (opts.format == LogFormat::Text).then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
        });
        let json_layer = (opts.format == LogFormat::Json).then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        });
        tracing_subscriber::registry()
            .with(env_filter(&opts.level))
            .with(text_layer)
            .with(json_layer)
    };

    let guard = match tracing::subscriber::set_global_default(build_subscriber()) {
        Ok(()) => None,
        Err(_) => Some(tracing::subscriber::set_default(build_subscriber())),
    };

    LoggingGuard { _guard: guard }
}

/// `RUST_LOG`, then `NETVIZ_LOG`, then `level`, then [`DEFAULT_LEVEL`]
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
