//! Tracing subscriber for the visualiser binary
//!
//! Frame reports own stdout, so console logs always go to stderr. File logs
//! are appended to the dated file named by [`LogConfig::current_log_path`].

use anyhow::{Context, Result};
use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};
use visualiser_core::{LogConfig, Settings};

/// Keeps the file writer's worker thread alive until dropped
pub struct LogGuard {
    _file_worker: Option<WorkerGuard>,
}

/// An opened log file and the housekeeping done before opening it
struct LogFile {
    writer: NonBlocking,
    guard: WorkerGuard,
    path: PathBuf,
    removed: usize,
}

/// `RUST_LOG` wins; otherwise the configured level applies to every target
fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(config.parse_level().into())
        .from_env_lossy()
}

fn open_log_file(config: &LogConfig) -> Result<LogFile> {
    config
        .ensure_log_directory()
        .with_context(|| format!("Failed to create log directory {:?}", config.log_dir))?;

    let removed = config
        .cleanup_old_logs()
        .with_context(|| format!("Failed to prune old logs in {:?}", config.log_dir))?;

    let path = config.current_log_path();
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    Ok(LogFile {
        writer,
        guard,
        path,
        removed,
    })
}

/// Install the global subscriber described by `settings.log`
///
/// The returned guard must outlive the last log call.
pub fn init(settings: &Settings) -> Result<LogGuard> {
    let config = &settings.log;

    let console = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .with_filter(env_filter(config))
    });

    let log_file = if config.file_output {
        Some(open_log_file(config)?)
    } else {
        None
    };

    let (file_layer, file_worker, file_info) = match log_file {
        Some(LogFile {
            writer,
            guard,
            path,
            removed,
        }) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter(config));
            (Some(layer), Some(guard), Some((path, removed)))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Logging at level {}", config.parse_level());
    if let Some((path, removed)) = file_info {
        info!("Appending logs to {:?}", path);
        if removed > 0 {
            debug!("Removed {} old log file(s)", removed);
        }
    }

    let analysis = &settings.analysis;
    debug!(
        "Analysis: {} fps, buffer_size={}, buckets={}, usable_fraction={}, cap={}",
        settings.frame_rate,
        analysis.buffer_size,
        analysis.bucket_count,
        analysis.usable_fraction,
        analysis.max_intensity
    );

    Ok(LogGuard {
        _file_worker: file_worker,
    })
}
