// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Noggin
//!
//! A spatially organised neural tissue that keeps learning by growing. Layers
//! of cells and neurons are stacked by depth; neurons sprout dendrites that
//! follow a chemical potential gradient through space and attach to nearby
//! active cells.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noggin::prelude::*;
//!
//! let mut organoid = Organoid::new("demo", 64, 16, 64);
//!
//! let mut retina = Layer::cells("retina", 0, 64);
//! let mut cortex = Layer::neurons("cortex", 1, 16).growing_toward(0);
//! organoid.cell_grid(&mut retina, 8, 8, 2)?;
//! organoid.neuron_grid(&mut cortex, 4, 4, 4)?;
//! organoid.add_layer(retina, 0)?;
//! organoid.add_layer(cortex, 1)?;
//!
//! organoid.set_activation(Target::Cell(CellId(27)), 80)?;
//! organoid.sprout_layer(1, 2)?;
//!
//! let progress = organoid.develop(100)?;
//! println!("{:?} after {} rounds", progress.stage, progress.rounds);
//! # Ok::<(), NogginError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: noggin-neural                              │
//! │  (Ids, Position, Activation, NogginError)               │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: noggin-tissue                                    │
//! │  (Arenas, PotentialField, GrowthEngine, Organoid)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Drivers: noggin-config, noggin-observability           │
//! │  (TOML configuration, logging setup)                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feature Flags
//!
//! - **`parallel`** (default): [`tissue::tick_tissues`] drives several
//!   independent tissues with rayon
//!
//! ## License
//!
//! Apache-2.0

use anyhow::Context;

// Re-export foundation
pub use noggin_neural as neural;

// Re-export the core
pub use noggin_tissue as tissue;

// Re-export drivers
pub use noggin_config as config;
pub use noggin_observability as observability;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::neural::{
        ActWeight, Activation, CellId, CellKind, DendriteId, DendriteIs, Depth, NeuronId,
        NogginError, PotWeight, Position, Target,
    };
    pub use crate::tissue::{
        Cell, Dendrite, DevelopmentProgress, DevelopmentStage, GridFormula, GrowthConfig,
        GrowthReport, Layer, Neuron, Organoid, OrganoidConfig, TissueStats,
    };

    #[cfg(feature = "parallel")]
    pub use crate::tissue::tick_tissues;

    pub use crate::build_organoid;
}

/// Build an empty organoid sized and tuned by a loaded configuration
///
/// The configuration is validated first, so every problem in it is reported
/// at once.
///
/// # Errors
/// Validation failures, or settings the tissue itself rejects
pub fn build_organoid(config: &config::NogginConfig) -> anyhow::Result<tissue::Organoid> {
    config::validate_config(config).context("invalid noggin configuration")?;

    let organoid_config = tissue::OrganoidConfig::from_config(config)?;
    let organoid = tissue::Organoid::with_config(config.tissue.name.clone(), organoid_config)?;

    tracing::info!(
        target: "noggin",
        "Built organoid '{}' ({} cells, {} neurons, {} dendrites capacity)",
        organoid.name(),
        organoid_config.cell_capacity,
        organoid_config.neuron_capacity,
        organoid_config.dendrite_capacity
    );
    Ok(organoid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let _neuron_id = NeuronId(0);
        let _formula = GridFormula::default();
    }

    #[test]
    fn test_build_from_default_config() {
        let organoid = build_organoid(&config::NogginConfig::default()).unwrap();
        assert_eq!(organoid.name(), "noggin");
        assert_eq!(organoid.stats().cell_capacity, 4096);
    }
}
