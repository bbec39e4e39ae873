// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NogginConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Find the noggin configuration file
///
/// Search order:
/// 1. `NOGGIN_CONFIG_PATH` environment variable
/// 2. Current working directory: `./noggin_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NOGGIN_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by NOGGIN_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "noggin configuration file '{}' not found in any of these locations:\n{}\n\nSet NOGGIN_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is a separate step, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NogginConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NogginConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_into<T: FromStr>(value: &str, slot: &mut T) {
    if let Ok(parsed) = value.parse::<T>() {
        *slot = parsed;
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NOGGIN_LOG_LEVEL` -> `system.log_level`
/// - `NOGGIN_CELL_CAPACITY` -> `tissue.cell_capacity`
/// - `NOGGIN_NEURON_CAPACITY` -> `tissue.neuron_capacity`
/// - `NOGGIN_DENDRITE_CAPACITY` -> `tissue.dendrite_capacity`
/// - `NOGGIN_FIELD_RADIUS` -> `growth.field_radius`
/// - `NOGGIN_CONTACT_RADIUS` -> `growth.contact_radius`
/// - `NOGGIN_MAX_STEP` -> `growth.max_step`
/// - `NOGGIN_GRID_FORMULA` -> `placement.grid_formula`
///
/// Values that fail to parse are ignored and the file value is kept.
pub fn apply_environment_overrides(config: &mut NogginConfig) {
    if let Ok(value) = env::var("NOGGIN_LOG_LEVEL") {
        config.system.log_level = value;
    }

    if let Ok(value) = env::var("NOGGIN_CELL_CAPACITY") {
        parse_into(&value, &mut config.tissue.cell_capacity);
    }
    if let Ok(value) = env::var("NOGGIN_NEURON_CAPACITY") {
        parse_into(&value, &mut config.tissue.neuron_capacity);
    }
    if let Ok(value) = env::var("NOGGIN_DENDRITE_CAPACITY") {
        parse_into(&value, &mut config.tissue.dendrite_capacity);
    }

    if let Ok(value) = env::var("NOGGIN_FIELD_RADIUS") {
        parse_into(&value, &mut config.growth.field_radius);
    }
    if let Ok(value) = env::var("NOGGIN_CONTACT_RADIUS") {
        parse_into(&value, &mut config.growth.contact_radius);
    }
    if let Ok(value) = env::var("NOGGIN_MAX_STEP") {
        parse_into(&value, &mut config.growth.max_step);
    }

    if let Ok(value) = env::var("NOGGIN_GRID_FORMULA") {
        config.placement.grid_formula = value.to_lowercase();
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"cell_capacity": "100", "debug": "true"}`)
pub fn apply_cli_overrides(config: &mut NogginConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("debug") {
        config.system.debug = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }

    if let Some(value) = cli_args.get("name") {
        config.tissue.name = value.clone();
    }
    if let Some(value) = cli_args.get("cell_capacity") {
        parse_into(value, &mut config.tissue.cell_capacity);
    }
    if let Some(value) = cli_args.get("neuron_capacity") {
        parse_into(value, &mut config.tissue.neuron_capacity);
    }
    if let Some(value) = cli_args.get("dendrite_capacity") {
        parse_into(value, &mut config.tissue.dendrite_capacity);
    }
    if let Some(value) = cli_args.get("max_dendrites_per_neuron") {
        parse_into(value, &mut config.tissue.max_dendrites_per_neuron);
    }

    if let Some(value) = cli_args.get("field_radius") {
        parse_into(value, &mut config.growth.field_radius);
    }
    if let Some(value) = cli_args.get("contact_radius") {
        parse_into(value, &mut config.growth.contact_radius);
    }
    if let Some(value) = cli_args.get("max_step") {
        parse_into(value, &mut config.growth.max_step);
    }
    if let Some(value) = cli_args.get("attach_threshold") {
        parse_into(value, &mut config.growth.attach_threshold);
    }

    if let Some(value) = cli_args.get("grid_formula") {
        config.placement.grid_formula = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("spacing") {
        parse_into(value, &mut config.placement.spacing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("NOGGIN_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("NOGGIN_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("NOGGIN_CONFIG_PATH", "/definitely/not/here.toml");
        let result = find_config_file();
        env::remove_var("NOGGIN_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[tissue]").unwrap();
        writeln!(file, "cell_capacity = 50").unwrap();
        writeln!(file, "[growth]").unwrap();
        writeln!(file, "field_radius = 4").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.tissue.cell_capacity, 50);
        assert_eq!(config.growth.field_radius, 4);
        // Untouched sections keep their defaults
        assert_eq!(config.growth.max_step, 1);
        assert_eq!(config.placement.grid_formula, "corrected");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[tissue\ncell_capacity = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NogginConfig::default();

        env::set_var("NOGGIN_NEURON_CAPACITY", "123");
        env::set_var("NOGGIN_MAX_STEP", "not-a-number");
        env::set_var("NOGGIN_GRID_FORMULA", "LEGACY");

        apply_environment_overrides(&mut config);

        env::remove_var("NOGGIN_NEURON_CAPACITY");
        env::remove_var("NOGGIN_MAX_STEP");
        env::remove_var("NOGGIN_GRID_FORMULA");

        assert_eq!(config.tissue.neuron_capacity, 123);
        assert_eq!(config.growth.max_step, 1);
        assert_eq!(config.placement.grid_formula, "legacy");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NogginConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("contact_radius".to_string(), "3".to_string());
        cli_args.insert("name".to_string(), "retina".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.growth.contact_radius, 3);
        assert_eq!(config.tissue.name, "retina");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[tissue]").unwrap();
        writeln!(file, "cell_capacity = 10").unwrap();
        writeln!(file, "dendrite_capacity = 20").unwrap();

        env::set_var("NOGGIN_CELL_CAPACITY", "100");
        env::set_var("NOGGIN_DENDRITE_CAPACITY", "200");

        let mut cli_args = HashMap::new();
        cli_args.insert("cell_capacity".to_string(), "1000".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("NOGGIN_CELL_CAPACITY");
        env::remove_var("NOGGIN_DENDRITE_CAPACITY");

        // CLI wins for cells, env wins for dendrites (no CLI override)
        assert_eq!(config.tissue.cell_capacity, 1000);
        assert_eq!(config.tissue.dendrite_capacity, 200);
    }
}
