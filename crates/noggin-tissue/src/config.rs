// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Conversion from a loaded noggin configuration

use noggin_config::NogginConfig;
use noggin_neural::{PotWeight, Result};

use crate::growth::GrowthConfig;
use crate::organoid::OrganoidConfig;

impl From<&noggin_config::GrowthConfig> for GrowthConfig {
    fn from(config: &noggin_config::GrowthConfig) -> Self {
        Self {
            field_radius: config.field_radius,
            contact_radius: config.contact_radius,
            max_step: config.max_step,
            attach_threshold: PotWeight(config.attach_threshold),
        }
    }
}

impl OrganoidConfig {
    /// Organoid sizing from the `[tissue]`, `[growth]` and `[placement]` sections
    ///
    /// # Errors
    /// `InvalidParameter` for an unknown grid formula or invalid growth settings
    pub fn from_config(config: &NogginConfig) -> Result<Self> {
        let organoid = Self {
            cell_capacity: config.tissue.cell_capacity,
            neuron_capacity: config.tissue.neuron_capacity,
            dendrite_capacity: config.tissue.dendrite_capacity,
            max_dendrites_per_neuron: config.tissue.max_dendrites_per_neuron,
            grid_formula: config.placement.grid_formula.parse()?,
            growth: GrowthConfig::from(&config.growth),
        };
        organoid.growth.validate()?;
        Ok(organoid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::GridFormula;
    use noggin_neural::NogginError;

    #[test]
    fn test_defaults_agree() {
        let config = OrganoidConfig::from_config(&NogginConfig::default()).unwrap();
        assert_eq!(config, OrganoidConfig::default());
    }

    #[test]
    fn test_sections_are_carried_over() {
        let mut config = NogginConfig::default();
        config.tissue.cell_capacity = 12;
        config.growth.field_radius = 3;
        config.growth.attach_threshold = 25;
        config.placement.grid_formula = "legacy".to_string();

        let organoid = OrganoidConfig::from_config(&config).unwrap();
        assert_eq!(organoid.cell_capacity, 12);
        assert_eq!(organoid.grid_formula, GridFormula::Legacy);
        assert_eq!(organoid.growth.field_radius, 3);
        assert_eq!(organoid.growth.attach_threshold, PotWeight(25));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut config = NogginConfig::default();
        config.placement.grid_formula = "spiral".to_string();
        assert!(matches!(
            OrganoidConfig::from_config(&config),
            Err(NogginError::InvalidParameter(_))
        ));

        let mut config = NogginConfig::default();
        config.growth.max_step = 0;
        assert!(OrganoidConfig::from_config(&config).is_err());
    }
}
