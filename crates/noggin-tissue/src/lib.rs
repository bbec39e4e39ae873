// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Noggin Tissue

The core of noggin: a spatial neural tissue whose neurons grow dendrites
through space and wire themselves to nearby cells.

- Arenas of cells, neurons and dendrites addressed by dense identifiers
- A chemical potential field snapshotted once per growth round
- A growth engine moving each dendrite tip along the potential gradient
  until it attaches
- Layers (flat sheets at one depth) and grid placement
- The organoid, which owns all of the above

## Determinism

A growth round snapshots the field, then ticks dendrites in identifier
order against that snapshot. Dendrites never exert potential, so the
outcome of a round does not depend on the tick order and identical tissues
always develop identically.

## Logging

The crate emits `tracing` events under the `noggin-tissue` target and never
installs a subscriber itself.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod arena;
#[cfg(feature = "config")]
mod config;
pub mod development;
pub mod field;
pub mod growth;
pub mod models;
pub mod organoid;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod placement;
pub mod store;

pub use arena::{Arena, ArenaId};
pub use development::{DevelopmentProgress, DevelopmentStage};
pub use field::{Candidate, Gradient, PotentialField};
pub use growth::{bounded_step, GrowthConfig, GrowthEngine, GrowthReport, TickOutcome};
pub use models::{Cell, Dendrite, Layer, Neuron};
pub use organoid::{Organoid, OrganoidConfig, TissueStats};
#[cfg(feature = "parallel")]
pub use parallel::tick_tissues;
pub use placement::{grid_positions, place_grid, GridFormula};
pub use store::{CellStore, DendriteStore, NeuronStore, TissueStores};

// Re-export the foundation types for convenience
pub use noggin_neural::{
    ActWeight, Activation, CellId, CellKind, DendriteId, DendriteIs, Depth, NeuronId, NogginError,
    PotWeight, Position, Result, Size, Target, XY,
};
