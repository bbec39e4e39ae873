// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console output is always available. With the `file-logging` feature a
//! timestamped run folder receives one rolling file per known crate plus a
//! combined file, and old run folders are cleaned up by retention policy.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;
use crate::config::ObservabilityConfig;
use crate::ObservabilityError;

/// Build the `EnvFilter` for the given flags and default level
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string(default_level);
    match EnvFilter::try_new(&filter) {
        Ok(env_filter) => Ok(env_filter),
        Err(e) => Err(ObservabilityError::InvalidFilter {
            filter,
            reason: e.to_string(),
        }
        .into()),
    }
}

/// Install a console-only subscriber
///
/// # Errors
/// Fails if the filter does not parse or a global subscriber already exists.
pub fn init_console_logging(
    debug_flags: &CrateDebugFlags,
    config: &ObservabilityConfig,
) -> Result<()> {
    let env_filter = build_filter(debug_flags, &config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.with_target)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInitialized)?;

    Ok(())
}

#[cfg(feature = "file-logging")]
pub use file::{cleanup_old_logs, init_logging, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::{NaiveDateTime, Utc};
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer, Registry};

    use super::build_filter;
    use crate::cli::CrateDebugFlags;
    use crate::config::{FileLoggingConfig, LogFormat, ObservabilityConfig};
    use crate::ObservabilityError;

    const RUN_PREFIX: &str = "run_";
    const RUN_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Keeps the non-blocking writers alive; logs are flushed on drop
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Get the log directory path of this run
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize logging with file output and console output
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── noggin-tissue.log
    ///       ├── noggin-config.log
    ///       └── noggin.log (combined)
    /// ```
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        config: &ObservabilityConfig,
    ) -> Result<LoggingGuard> {
        let file_config = config.file.clone().unwrap_or_default();

        let timestamp = Utc::now().format(RUN_FORMAT);
        let run_folder = file_config
            .directory
            .join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder).with_context(|| {
            format!("Failed to create log directory: {}", run_folder.display())
        })?;

        cleanup_old_logs(&file_config)?;

        let json = config.format == LogFormat::Json;
        let mut layers = Vec::new();
        let mut file_guards = Vec::new();

        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_file(false)
            .with_line_number(false)
            .with_filter(build_filter(debug_flags, &config.level)?)
            .boxed();
        layers.push(console_layer);

        // One file per crate, each filtered to that crate's target
        for crate_name in crate::KNOWN_CRATES {
            let appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guards.push(guard);

            let filter = EnvFilter::try_new(format!("{}=debug,off", crate_name)).map_err(|e| {
                ObservabilityError::InvalidFilter {
                    filter: crate_name.to_string(),
                    reason: e.to_string(),
                }
            })?;
            let base = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            let layer = if json {
                base.json().with_filter(filter).boxed()
            } else {
                base.with_filter(filter).boxed()
            };
            layers.push(layer);
        }

        let combined_appender = rolling::daily(&run_folder, "noggin.log");
        let (combined_writer, combined_guard) = tracing_appender::non_blocking(combined_appender);
        file_guards.push(combined_guard);

        let base = tracing_subscriber::fmt::layer()
            .with_writer(combined_writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let combined_filter = build_filter(debug_flags, &config.level)?;
        let combined_layer = if json {
            base.json().with_filter(combined_filter).boxed()
        } else {
            base.with_filter(combined_filter).boxed()
        };
        layers.push(combined_layer);

        Registry::default()
            .with(layers)
            .try_init()
            .map_err(|_| ObservabilityError::AlreadyInitialized)?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }

    /// Remove run folders older than the retention window, then trim to the
    /// most recent `retention_runs`
    pub fn cleanup_old_logs(config: &FileLoggingConfig) -> Result<()> {
        let base_log_dir = &config.directory;
        if !base_log_dir.exists() {
            return Ok(());
        }

        let cutoff = Utc::now().naive_utc() - chrono::Duration::days(config.retention_days as i64);

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let stamp = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(RUN_PREFIX))
                .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_FORMAT).ok());
            if let Some(dt) = stamp {
                runs.push((path, dt));
            }
        }

        // Oldest first
        runs.sort_by_key(|(_, dt)| *dt);

        let (expired, kept): (Vec<_>, Vec<_>) = runs.into_iter().partition(|(_, dt)| *dt < cutoff);
        let excess = kept.len().saturating_sub(config.retention_runs);

        for (path, _) in expired.iter().chain(kept.iter().take(excess)) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                tracing::warn!(
                    target: "noggin-observability",
                    "Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cleanup_keeps_most_recent_runs() {
            let dir = tempfile::tempdir().unwrap();
            let now = Utc::now();
            for hours in 1..=4 {
                let stamp = (now - chrono::Duration::hours(hours)).format(RUN_FORMAT);
                std::fs::create_dir(dir.path().join(format!("{}{}", RUN_PREFIX, stamp))).unwrap();
            }
            std::fs::create_dir(dir.path().join("not_a_run")).unwrap();

            let config = FileLoggingConfig {
                directory: dir.path().to_path_buf(),
                retention_days: 30,
                retention_runs: 2,
            };
            cleanup_old_logs(&config).unwrap();

            let remaining: Vec<_> = std::fs::read_dir(dir.path())
                .unwrap()
                .map(|e| e.unwrap().file_name().into_string().unwrap())
                .collect();
            assert_eq!(remaining.iter().filter(|n| n.starts_with(RUN_PREFIX)).count(), 2);
            assert!(remaining.contains(&"not_a_run".to_string()));
        }

        #[test]
        fn test_cleanup_drops_expired_runs() {
            let dir = tempfile::tempdir().unwrap();
            let old = (Utc::now() - chrono::Duration::days(45)).format(RUN_FORMAT);
            let path = dir.path().join(format!("{}{}", RUN_PREFIX, old));
            std::fs::create_dir(&path).unwrap();

            let config = FileLoggingConfig {
                directory: dir.path().to_path_buf(),
                retention_days: 30,
                retention_runs: 10,
            };
            cleanup_old_logs(&config).unwrap();
            assert!(!path.exists());
        }
    }
}
