//! Setup logging subsystem.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

use super::config::{self, LogFormat};

/// Keeps the non-blocking writers flushing until dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Setup logging sub-system specifying the logging configuration, service (binary) name, and a
/// list of external crates for which a more verbose logging must be enabled. All crates within the
/// current cargo workspace are automatically considered for verbose logging.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> TelemetryGuard {
    let mut guards = Vec::new();

    let console_layer = config.console.enabled.then(|| {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        let filter = get_envfilter(
            config.console.filtering_directive.as_deref(),
            config.console.level,
            crates_to_filter.as_ref(),
        );
        match config.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_writer(writer)
                .pretty()
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        }
    });

    let file_layer = config
        .file
        .as_ref()
        .filter(|file| file.enabled)
        .map(|file| {
            let appender = tracing_appender::rolling::daily(&file.path, &file.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(get_envfilter(
                    file.filtering_directive.as_deref(),
                    file.level,
                    crates_to_filter.as_ref(),
                ))
        });

    let subscriber = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer);
    if let Err(error) = subscriber.try_init() {
        tracing::warn!(%error, "global subscriber already installed");
    }

    tracing::info!(service = service_name, "logger initialized");

    TelemetryGuard {
        _log_guards: guards,
    }
}

fn get_envfilter(
    filtering_directive: Option<&str>,
    level: config::Level,
    crates_to_filter: &[&str],
) -> EnvFilter {
    filtering_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| {
            let level = level.into_level().as_str().to_lowercase();
            let directives = crates_to_filter
                .iter()
                .map(|crate_name| format!("{}={level}", crate_name.replace('-', "_")))
                .collect::<Vec<_>>();
            EnvFilter::new(format!("warn,{}", directives.join(",")))
        })
}
