// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration for a driver process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default level for everything without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Format of file output; the console is always human-readable text
    pub format: LogFormat,

    /// Include the event target (crate name) on console lines
    pub with_target: bool,

    /// Rolling file output, `None` for console only
    pub file: Option<FileLoggingConfig>,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Text,
    Json,
}

/// Where and how long per-run log folders are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfig {
    pub directory: PathBuf,
    /// Keep logs for N days
    pub retention_days: u64,
    /// Keep the N most recent runs
    pub retention_runs: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            level: "info".to_string(),
            format: LogFormat::Json,
            with_target: false,
            file: None,
        }
    }
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        FileLoggingConfig {
            directory: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
