// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `noggin_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NogginConfig {
    pub system: SystemConfig,
    pub tissue: TissueConfig,
    pub growth: GrowthConfig,
    pub placement: PlacementConfig,
    pub logging: LoggingConfig,
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub debug: bool,
    pub log_level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

/// Arena sizing for one tissue
///
/// Capacities are fixed for the lifetime of the tissue. Nothing grows
/// past them, so size them for the largest tissue you intend to develop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TissueConfig {
    pub name: String,
    pub cell_capacity: usize,
    pub neuron_capacity: usize,
    pub dendrite_capacity: usize,
    pub max_dendrites_per_neuron: usize,
}

impl Default for TissueConfig {
    fn default() -> Self {
        Self {
            name: "noggin".to_string(),
            cell_capacity: 4_096,
            neuron_capacity: 4_096,
            dendrite_capacity: 32_768,
            max_dendrites_per_neuron: 8,
        }
    }
}

/// Dendrite growth parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// How far (Manhattan) a cell's chemical potential reaches
    pub field_radius: u16,
    /// How close a tip must be to attach
    pub contact_radius: u16,
    /// Longest move (Manhattan) a tip makes per tick
    pub max_step: u16,
    /// Potential must strictly exceed this to attach
    pub attach_threshold: i16,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            field_radius: 8,
            contact_radius: 1,
            max_step: 1,
            attach_threshold: 0,
        }
    }
}

/// Grid placement defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// "corrected" (column index drives y) or "legacy" (row index drives both)
    pub grid_formula: String,
    pub spacing: i16,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_formula: "corrected".to_string(),
            spacing: 2,
        }
    }
}

/// File logging settings, used only when file logging is enabled
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
