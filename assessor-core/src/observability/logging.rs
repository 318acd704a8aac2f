use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{AssessorError, Result};

static LOG_INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. Only the first call has any effect.
pub fn setup_logging(config: &LoggingConfig) -> Result<()> {
    let log_file = config.log_file.as_deref().map(file_appender).transpose()?;

    LOG_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = config.json.then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        let fmt_layer = (!config.json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        let file_layer = log_file.map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file)
                .with_filter(LevelFilter::WARN)
        });

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(fmt_layer)
            .with(file_layer)
            .try_init();
        if let Err(e) = installed {
            debug!(error = %e, "Global subscriber already set, keeping it");
        }
    });

    Ok(())
}

/// Append-only writer for the error log. The directory must already exist.
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let invalid = |reason: &str| {
        AssessorError::InvalidConfig(format!("log_file {}: {}", path.display(), reason))
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| invalid("missing file name"))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(invalid("directory does not exist"));
    }

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| invalid(&e.to_string()))
}
