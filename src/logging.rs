use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;


/// Where diagnostic events go. Progress messages always stay on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    File(PathBuf),
}

impl LogTarget {
    pub fn from_flags(console: bool, file_path: &Path) -> Self {
        if console {
            LogTarget::Console
        } else {
            LogTarget::File(file_path.to_path_buf())
        }
    }
}

/// Keeps the background log writer alive until the run finishes.
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

pub fn init_logging(target: &LogTarget, level: LevelFilter) -> Result<LoggingGuard> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(level_filter(level))
        .with_target(true);

    match target {
        LogTarget::Console => {
            subscriber.with_writer(std::io::stderr).init();
            Ok(LoggingGuard { _worker: None })
        }
        LogTarget::File(path) => {
            let (writer, guard) =
                non_blocking::NonBlockingBuilder::default().finish(open_log_file(path)?);
            subscriber.with_writer(writer).with_ansi(false).init();
            Ok(LoggingGuard {
                _worker: Some(guard),
            })
        }
    }
}

/// `RUST_LOG` wins over the level given on the command line.
fn level_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {parent:?}"))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {path:?}"))
}
