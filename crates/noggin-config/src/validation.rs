// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges before a tissue is built from them.

use crate::{ConfigError, ConfigResult, NogginConfig};

/// Log levels understood by the tracing filter
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Grid formulas understood by the placement helper
const GRID_FORMULAS: &[&str] = &["corrected", "legacy"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required fields
/// - Arena capacities (all non-zero)
/// - Growth geometry (`max_step >= 1`, `contact_radius <= field_radius`)
/// - Known enumerated strings (log level, grid formula)
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &NogginConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_capacities(config, &mut errors);
    validate_growth(config, &mut errors);
    validate_enumerations(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &NogginConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.tissue.name.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "tissue.name".to_string(),
        });
    }
}

fn validate_capacities(config: &NogginConfig, errors: &mut Vec<ConfigValidationError>) {
    let capacities = [
        ("tissue.cell_capacity", config.tissue.cell_capacity),
        ("tissue.neuron_capacity", config.tissue.neuron_capacity),
        ("tissue.dendrite_capacity", config.tissue.dendrite_capacity),
        (
            "tissue.max_dendrites_per_neuron",
            config.tissue.max_dendrites_per_neuron,
        ),
    ];
    for (field, value) in capacities {
        if value == 0 {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
    }

    // Identifiers are u32
    for (field, value) in &capacities[..3] {
        if *value > u32::MAX as usize {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("must not exceed {}", u32::MAX),
            });
        }
    }
}

fn validate_growth(config: &NogginConfig, errors: &mut Vec<ConfigValidationError>) {
    let growth = &config.growth;

    if growth.max_step == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "growth.max_step".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if growth.contact_radius > growth.field_radius {
        errors.push(ConfigValidationError::InvalidValue {
            field: "growth.contact_radius".to_string(),
            reason: format!(
                "must not exceed growth.field_radius ({})",
                growth.field_radius
            ),
        });
    }

    if config.placement.spacing <= 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "placement.spacing".to_string(),
            reason: "must be positive".to_string(),
        });
    }
}

fn validate_enumerations(config: &NogginConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    if !GRID_FORMULAS.contains(&config.placement.grid_formula.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "placement.grid_formula".to_string(),
            reason: "must be 'corrected' or 'legacy'".to_string(),
        });
    }
}
