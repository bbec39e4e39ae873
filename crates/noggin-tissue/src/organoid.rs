// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
The organoid: top-level owner of a tissue.

An organoid owns the three arenas and a map from depth to [`Layer`]. Layers
only hold identifiers into the arenas; a layer's growth target is another
depth key resolved through this map. All mutation goes through the
organoid, which is what keeps layers and arenas consistent.
*/

use std::collections::BTreeMap;

use serde::Serialize;

use noggin_neural::{
    Activation, CellId, CellKind, DendriteId, Depth, NeuronId, NogginError, Result, Size, Target,
    XY,
};

use crate::field::PotentialField;
use crate::growth::{GrowthConfig, GrowthEngine, GrowthReport};
use crate::models::{Cell, Dendrite, Layer, Neuron};
use crate::placement::{self, GridFormula};
use crate::store::TissueStores;

/// Sizing and behaviour of one organoid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrganoidConfig {
    pub cell_capacity: usize,
    pub neuron_capacity: usize,
    pub dendrite_capacity: usize,
    pub max_dendrites_per_neuron: usize,
    pub grid_formula: GridFormula,
    pub growth: GrowthConfig,
}

impl Default for OrganoidConfig {
    fn default() -> Self {
        Self {
            cell_capacity: 4096,
            neuron_capacity: 4096,
            dendrite_capacity: 32768,
            max_dendrites_per_neuron: 8,
            grid_formula: GridFormula::Corrected,
            growth: GrowthConfig::default(),
        }
    }
}

/// Point-in-time counts of a tissue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TissueStats {
    pub layers: usize,
    pub cells: usize,
    pub cell_capacity: usize,
    pub neurons: usize,
    pub neuron_capacity: usize,
    pub dendrites: usize,
    pub dendrite_capacity: usize,
    pub growing_dendrites: usize,
    pub attached_dendrites: usize,
    /// Growth rounds run so far
    pub rounds: u64,
}

/// A named stack of layers over shared cell, neuron and dendrite arenas
#[derive(Debug, Clone)]
pub struct Organoid {
    name: String,
    layers: BTreeMap<Depth, Layer>,
    stores: TissueStores,
    config: OrganoidConfig,
    engine: GrowthEngine,
    rounds: u64,
}

impl Organoid {
    /// A tissue with the given arena capacities and default growth settings
    pub fn new(
        name: impl Into<String>,
        cell_capacity: usize,
        neuron_capacity: usize,
        dendrite_capacity: usize,
    ) -> Self {
        let config = OrganoidConfig {
            cell_capacity,
            neuron_capacity,
            dendrite_capacity,
            ..Default::default()
        };
        Self::build(name.into(), config, GrowthEngine::default())
    }

    /// # Errors
    /// `InvalidParameter` if the growth settings do not validate
    pub fn with_config(name: impl Into<String>, config: OrganoidConfig) -> Result<Self> {
        let engine = GrowthEngine::new(config.growth)?;
        Ok(Self::build(name.into(), config, engine))
    }

    fn build(name: String, config: OrganoidConfig, engine: GrowthEngine) -> Self {
        tracing::debug!(
            target: "noggin-tissue",
            "Creating organoid '{}' (cells: {}, neurons: {}, dendrites: {})",
            name,
            config.cell_capacity,
            config.neuron_capacity,
            config.dendrite_capacity
        );
        Self {
            name,
            layers: BTreeMap::new(),
            stores: TissueStores::with_capacities(
                config.cell_capacity,
                config.neuron_capacity,
                config.dendrite_capacity,
            ),
            config,
            engine,
            rounds: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &OrganoidConfig {
        &self.config
    }

    pub fn stores(&self) -> &TissueStores {
        &self.stores
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Insert `layer` at `depth`, returning whatever layer it replaced
    ///
    /// # Errors
    /// - `InvalidParameter` if `depth` differs from the layer's own depth
    /// - `InvalidIdentifier` if the layer lists members this organoid never allocated
    /// - `InvalidParameter` if a member does not sit at `depth`, which is the
    ///   case for layers populated by another organoid
    pub fn add_layer(&mut self, layer: Layer, depth: Depth) -> Result<Option<Layer>> {
        if layer.depth() != depth {
            return Err(NogginError::InvalidParameter(format!(
                "layer '{}' lives at depth {} but was added at depth {}",
                layer.name(),
                layer.depth(),
                depth
            )));
        }
        for target in layer.targets() {
            let (position, _) = self.stores.sample(target)?;
            if position.z != depth {
                return Err(NogginError::InvalidParameter(format!(
                    "layer '{}' at depth {} lists {} which sits at depth {}",
                    layer.name(),
                    depth,
                    target,
                    position.z
                )));
            }
        }

        tracing::debug!(
            target: "noggin-tissue",
            "Adding {} layer '{}' at depth {} with {} members",
            layer.kind(),
            layer.name(),
            depth,
            layer.len()
        );
        let replaced = self.layers.insert(depth, layer);
        if let Some(old) = &replaced {
            tracing::debug!(target: "noggin-tissue", "Replaced layer '{}' at depth {}", old.name(), depth);
        }
        Ok(replaced)
    }

    /// # Errors
    /// `NoSuchDepth` if no layer lives at `depth`
    pub fn layer_at(&self, depth: Depth) -> Result<&Layer> {
        self.layers.get(&depth).ok_or(NogginError::NoSuchDepth(depth))
    }

    /// Layers in depth order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn depths(&self) -> impl Iterator<Item = Depth> + '_ {
        self.layers.keys().copied()
    }

    /// Populate a layer that is not yet part of this organoid
    ///
    /// See [`placement::place_grid`] for the layout and failure modes.
    pub fn place_grid(&mut self, layer: &mut Layer, rows: Size, cols: Size, spacing: XY) -> Result<()> {
        placement::place_grid(&mut self.stores, layer, rows, cols, spacing, self.config.grid_formula)
    }

    /// Populate the layer already stored at `depth`
    ///
    /// # Errors
    /// `NoSuchDepth` plus everything [`placement::place_grid`] reports
    pub fn place_grid_at(&mut self, depth: Depth, rows: Size, cols: Size, spacing: XY) -> Result<()> {
        let layer = self.layers.get_mut(&depth).ok_or(NogginError::NoSuchDepth(depth))?;
        placement::place_grid(&mut self.stores, layer, rows, cols, spacing, self.config.grid_formula)
    }

    /// [`place_grid`](Self::place_grid) for a layer that must hold simple cells
    ///
    /// # Errors
    /// `KindMismatch` for a neural layer
    pub fn cell_grid(&mut self, layer: &mut Layer, rows: Size, cols: Size, spacing: XY) -> Result<()> {
        layer.expect_kind(CellKind::Simple)?;
        self.place_grid(layer, rows, cols, spacing)
    }

    /// [`place_grid`](Self::place_grid) for a layer that must hold neurons
    ///
    /// # Errors
    /// `KindMismatch` for a cell layer
    pub fn neuron_grid(&mut self, layer: &mut Layer, rows: Size, cols: Size, spacing: XY) -> Result<()> {
        layer.expect_kind(CellKind::Neuron)?;
        self.place_grid(layer, rows, cols, spacing)
    }

    // ========================================================================
    // Entities
    // ========================================================================

    pub fn cell_at(&self, id: CellId) -> Result<&Cell> {
        self.stores.cells.get(id)
    }

    pub fn neuron_at(&self, id: NeuronId) -> Result<&Neuron> {
        self.stores.neurons.get(id)
    }

    pub fn dendrite_at(&self, id: DendriteId) -> Result<&Dendrite> {
        self.stores.dendrites.get(id)
    }

    /// Dendrites of a neuron in sprouting order
    ///
    /// # Errors
    /// `InvalidIdentifier` if the neuron does not exist
    pub fn dendrites_of(&self, neuron: NeuronId) -> Result<Vec<(DendriteId, Dendrite)>> {
        self.stores
            .neurons
            .get(neuron)?
            .dendrites()
            .iter()
            .map(|&id| Ok((id, *self.stores.dendrites.get(id)?)))
            .collect()
    }

    /// Set the activation of a cell or a neuron's soma, clamped to range
    pub fn set_activation(&mut self, target: Target, value: i32) -> Result<Activation> {
        let cell = self.stores.cell_mut(target)?;
        cell.activation = Activation::new(value);
        Ok(cell.activation)
    }

    /// Set a neuron's axon input, clamped to the activation range
    pub fn set_axon_input(&mut self, neuron: NeuronId, value: i32) -> Result<Activation> {
        let neuron = self.stores.neurons.get_mut(neuron)?;
        neuron.axon = Activation::new(value);
        Ok(neuron.axon)
    }

    /// Start a growing dendrite at `neuron`'s soma, reaching toward the layer at `toward`
    ///
    /// # Errors
    /// - `InvalidIdentifier` if the neuron does not exist
    /// - `CapacityExceeded` if the neuron or the dendrite arena is full
    pub fn sprout_dendrite(&mut self, neuron: NeuronId, toward: Depth) -> Result<DendriteId> {
        let max = self.config.max_dendrites_per_neuron;
        let soma = {
            let parent = self.stores.neurons.get(neuron)?;
            if !parent.has_room_for_dendrite(max) {
                return Err(NogginError::capacity(CellKind::Dendrite, max));
            }
            parent.position()
        };
        let id = self.stores.dendrites.allocate(Dendrite::sprout(neuron, soma, toward))?;
        self.stores.neurons.get_mut(neuron)?.push_dendrite(id, max)?;
        tracing::trace!(target: "noggin-tissue", "Sprouted {} from {} toward depth {}", id, neuron, toward);
        Ok(id)
    }

    /// Sprout `per_neuron` dendrites from every neuron of the layer at `depth`
    ///
    /// Dendrites reach toward the layer's growth target, or its own depth if
    /// it has none. Either every dendrite is sprouted or none is.
    ///
    /// # Errors
    /// `NoSuchDepth`, `KindMismatch` for a cell layer, `CapacityExceeded`
    pub fn sprout_layer(&mut self, depth: Depth, per_neuron: usize) -> Result<Vec<DendriteId>> {
        let layer = self.layer_at(depth)?;
        let neurons: Vec<NeuronId> = layer.neuron_ids()?.collect();
        let toward = layer.grows_toward().unwrap_or(depth);

        let max = self.config.max_dendrites_per_neuron;
        let needed = neurons.len() * per_neuron;
        if needed > self.stores.dendrites.remaining() {
            return Err(NogginError::capacity(
                CellKind::Dendrite,
                self.stores.dendrites.capacity(),
            ));
        }
        for &neuron in &neurons {
            if self.stores.neurons.get(neuron)?.dendrites().len() + per_neuron > max {
                return Err(NogginError::capacity(CellKind::Dendrite, max));
            }
        }

        let mut sprouted = Vec::with_capacity(needed);
        for &neuron in &neurons {
            for _ in 0..per_neuron {
                sprouted.push(self.sprout_dendrite(neuron, toward)?);
            }
        }
        tracing::debug!(
            target: "noggin-tissue",
            "Sprouted {} dendrites from layer at depth {} toward depth {}",
            sprouted.len(),
            depth,
            toward
        );
        Ok(sprouted)
    }

    // ========================================================================
    // Growth
    // ========================================================================

    /// Snapshot of the potential exerted by every layer member right now
    pub fn snapshot_field(&self) -> Result<PotentialField> {
        PotentialField::snapshot(self.config.growth.field_radius, &self.stores, self.layers.values())
    }

    /// Run one growth round: snapshot the field once, then tick every dendrite
    /// in identifier order against that snapshot
    ///
    /// # Errors
    /// `InvalidIdentifier` if a dendrite's parent or a layer member is missing
    pub fn tick_all(&mut self) -> Result<GrowthReport> {
        let field = self.snapshot_field()?;
        self.rounds += 1;
        let mut report = GrowthReport {
            round: self.rounds,
            ..Default::default()
        };

        for index in 0..self.stores.dendrites.len() {
            let outcome = self.engine.advance(DendriteId(index as u32), &field, &mut self.stores)?;
            report.record(outcome);
        }

        tracing::debug!(
            target: "noggin-tissue",
            "Organoid '{}' round {}: {} grown, {} attached, {} stalled ({} sources)",
            self.name,
            report.round,
            report.num_grown,
            report.num_attached,
            report.num_stalled,
            field.source_count()
        );
        Ok(report)
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn stats(&self) -> TissueStats {
        let attached = self
            .stores
            .dendrites
            .iter()
            .filter(|(_, dendrite)| dendrite.is_attached())
            .count();
        TissueStats {
            layers: self.layers.len(),
            cells: self.stores.cells.len(),
            cell_capacity: self.stores.cells.capacity(),
            neurons: self.stores.neurons.len(),
            neuron_capacity: self.stores.neurons.capacity(),
            dendrites: self.stores.dendrites.len(),
            dendrite_capacity: self.stores.dendrites.capacity(),
            growing_dendrites: self.stores.dendrites.len() - attached,
            attached_dendrites: attached,
            rounds: self.rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noggin_neural::{ActWeight, Position};

    fn two_layers() -> Organoid {
        let mut organoid = Organoid::new("test", 16, 16, 32);
        let mut retina = Layer::cells("retina", 0, 16);
        let mut cortex = Layer::neurons("cortex", 1, 16).growing_toward(0);
        organoid.cell_grid(&mut retina, 3, 3, 2).unwrap();
        organoid.neuron_grid(&mut cortex, 2, 2, 2).unwrap();
        organoid.add_layer(retina, 0).unwrap();
        organoid.add_layer(cortex, 1).unwrap();
        organoid
    }

    #[test]
    fn test_add_layer_depth_must_match() {
        let mut organoid = Organoid::new("test", 4, 4, 4);
        assert!(matches!(
            organoid.add_layer(Layer::cells("retina", 0, 4), 3),
            Err(NogginError::InvalidParameter(_))
        ));
        assert_eq!(organoid.layer_at(3), Err(NogginError::NoSuchDepth(3)));
    }

    #[test]
    fn test_foreign_layer_is_rejected() {
        let mut other = Organoid::new("other", 8, 0, 0);
        let mut layer = Layer::cells("retina", 0, 8);
        other.place_grid(&mut layer, 2, 2, 1).unwrap();

        let mut organoid = Organoid::new("test", 2, 0, 0);
        assert!(matches!(
            organoid.add_layer(layer, 0),
            Err(NogginError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_foreign_layer_with_in_range_ids_is_rejected() {
        let mut organoid = Organoid::new("test", 8, 0, 0);
        let mut retina = Layer::cells("retina", 0, 4);
        organoid.place_grid(&mut retina, 2, 2, 1).unwrap();
        organoid.add_layer(retina, 0).unwrap();

        // Same indices 0..4, but populated elsewhere for depth 5
        let mut other = Organoid::new("other", 8, 0, 0);
        let mut foreign = Layer::cells("foreign", 5, 4);
        other.place_grid(&mut foreign, 2, 2, 1).unwrap();

        assert!(matches!(
            organoid.add_layer(foreign, 5),
            Err(NogginError::InvalidParameter(_))
        ));
        assert_eq!(organoid.layer_at(5), Err(NogginError::NoSuchDepth(5)));
        assert_eq!(organoid.snapshot_field().unwrap().source_count(), 0);
    }

    #[test]
    fn test_grid_helpers_check_kind() {
        let mut organoid = Organoid::new("test", 4, 4, 4);
        let mut cells = Layer::cells("retina", 0, 4);
        assert_eq!(
            organoid.neuron_grid(&mut cells, 1, 1, 1),
            Err(NogginError::KindMismatch {
                expected: CellKind::Neuron,
                actual: CellKind::Simple
            })
        );
        assert!(cells.is_empty());
    }

    #[test]
    fn test_place_grid_at_stored_layer() {
        let mut organoid = Organoid::new("test", 8, 8, 8);
        organoid.add_layer(Layer::neurons("cortex", 2, 8), 2).unwrap();
        organoid.place_grid_at(2, 2, 2, 1).unwrap();
        assert_eq!(organoid.layer_at(2).unwrap().len(), 4);
        assert_eq!(organoid.place_grid_at(5, 1, 1, 1), Err(NogginError::NoSuchDepth(5)));
    }

    #[test]
    fn test_activation_updates_clamp() {
        let mut organoid = two_layers();
        assert_eq!(
            organoid.set_activation(Target::Cell(CellId(0)), 250).unwrap(),
            Activation::new(100)
        );
        assert_eq!(
            organoid.set_axon_input(NeuronId(1), -300).unwrap(),
            Activation::new(-100)
        );
        assert_eq!(organoid.neuron_at(NeuronId(1)).unwrap().axon.value(), -100);
        assert!(organoid.set_activation(Target::Cell(CellId(99)), 1).is_err());
    }

    #[test]
    fn test_sprout_respects_per_neuron_limit() {
        let mut organoid = Organoid::with_config(
            "test",
            OrganoidConfig {
                max_dendrites_per_neuron: 2,
                ..Default::default()
            },
        )
        .unwrap();
        let mut cortex = Layer::neurons("cortex", 0, 1);
        organoid.place_grid(&mut cortex, 1, 1, 1).unwrap();
        organoid.add_layer(cortex, 0).unwrap();

        organoid.sprout_dendrite(NeuronId(0), 0).unwrap();
        organoid.sprout_dendrite(NeuronId(0), 0).unwrap();
        assert!(matches!(
            organoid.sprout_dendrite(NeuronId(0), 0),
            Err(NogginError::CapacityExceeded { .. })
        ));
        // All or nothing: one more per neuron no longer fits
        assert!(organoid.sprout_layer(0, 1).is_err());
        assert_eq!(organoid.stats().dendrites, 2);
    }

    #[test]
    fn test_sprout_layer_targets_grows_toward() {
        let mut organoid = two_layers();
        let sprouted = organoid.sprout_layer(1, 2).unwrap();
        assert_eq!(sprouted.len(), 8);
        assert!(organoid
            .dendrites_of(NeuronId(3))
            .unwrap()
            .iter()
            .all(|(_, dendrite)| dendrite.toward == 0 && dendrite.is_growing()));
        assert!(matches!(
            organoid.sprout_layer(0, 1),
            Err(NogginError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_round_attaches_neighbouring_cell() {
        let mut organoid = two_layers();
        // Retina cell 4 sits at the centre (0, 0)
        organoid.set_activation(Target::Cell(CellId(4)), 90).unwrap();
        // Cortex neuron 0 sits at (-1, -1)
        let dendrite = organoid.sprout_dendrite(NeuronId(0), 0).unwrap();

        let first = organoid.tick_all().unwrap();
        assert_eq!((first.round, first.num_grown, first.num_attached), (1, 1, 0));
        let second = organoid.tick_all().unwrap();
        assert_eq!((second.num_grown, second.num_attached), (0, 1));

        let attached = organoid.dendrite_at(dendrite).unwrap();
        assert_eq!(attached.tip, Position::new(0, -1, 1));
        // 90 * (8 + 1 - 1) / 9
        assert_eq!(
            attached.synapse(),
            Some((Target::Cell(CellId(4)), ActWeight::new(80)))
        );

        let stats = organoid.stats();
        assert_eq!(stats.attached_dendrites, 1);
        assert_eq!(stats.growing_dendrites, 0);
        assert_eq!(stats.rounds, 2);
    }
}
