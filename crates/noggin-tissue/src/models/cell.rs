// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Cells and neurons

use serde::Serialize;

use noggin_neural::{Activation, CellKind, DendriteId, NogginError, Position, Result};

/// Cell has a chemical potential, possibly other things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cell {
    /// Current activation level
    pub activation: Activation,
    pub position: Position,
}

impl Cell {
    pub fn at(position: Position) -> Self {
        Self {
            activation: Activation::ZERO,
            position,
        }
    }
}

/// A neuron is a cell plus an axon input and the dendrites it has sprouted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Neuron {
    pub cell: Cell,
    /// Current input from the axon (used during training)
    pub axon: Activation,
    dendrites: Vec<DendriteId>,
}

impl Neuron {
    pub fn at(position: Position) -> Self {
        Self {
            cell: Cell::at(position),
            axon: Activation::ZERO,
            dendrites: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.cell.position
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.cell.activation
    }

    /// Dendrites beginning at this neuron, in sprouting order
    pub fn dendrites(&self) -> &[DendriteId] {
        &self.dendrites
    }

    pub fn has_room_for_dendrite(&self, max_dendrites: usize) -> bool {
        self.dendrites.len() < max_dendrites
    }

    /// # Errors
    /// `CapacityExceeded` when the neuron already holds `max_dendrites`
    pub(crate) fn push_dendrite(&mut self, id: DendriteId, max_dendrites: usize) -> Result<()> {
        if !self.has_room_for_dendrite(max_dendrites) {
            return Err(NogginError::capacity(CellKind::Dendrite, max_dendrites));
        }
        self.dendrites.push(id);
        Ok(())
    }
}
