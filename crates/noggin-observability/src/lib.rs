// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # noggin-observability
//!
//! Unified logging for noggin drivers and tools.
//!
//! The tissue crates only emit `tracing` events. They never install a
//! subscriber, so an embedding application decides whether anything is
//! printed at all. This crate is what such an application reaches for.
//!
//! ## Features
//! - `file-logging`: per-run rolling log files with retention cleanup

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known noggin crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "noggin",
    "noggin-neural",
    "noggin-tissue",
    "noggin-config",
    "noggin-observability",
];

/// Errors raised while installing a subscriber
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}
