// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The three arenas of a tissue, kept together so engines can borrow them as one

use noggin_neural::{Activation, CellId, DendriteId, NeuronId, Position, Result, Target};

use crate::arena::Arena;
use crate::models::{Cell, Dendrite, Neuron};

pub type CellStore = Arena<CellId, Cell>;
pub type NeuronStore = Arena<NeuronId, Neuron>;
pub type DendriteStore = Arena<DendriteId, Dendrite>;

/// Cell, neuron and dendrite arenas of one tissue
#[derive(Debug, Clone, PartialEq)]
pub struct TissueStores {
    pub cells: CellStore,
    pub neurons: NeuronStore,
    pub dendrites: DendriteStore,
}

impl TissueStores {
    pub fn with_capacities(cells: usize, neurons: usize, dendrites: usize) -> Self {
        Self {
            cells: Arena::with_capacity(cells),
            neurons: Arena::with_capacity(neurons),
            dendrites: Arena::with_capacity(dendrites),
        }
    }

    /// Position and activation of whatever `target` names
    pub fn sample(&self, target: Target) -> Result<(Position, Activation)> {
        match target {
            Target::Cell(id) => {
                let cell = self.cells.get(id)?;
                Ok((cell.position, cell.activation))
            }
            Target::Neuron(id) => {
                let neuron = self.neurons.get(id)?;
                Ok((neuron.position(), neuron.activation()))
            }
        }
    }

    /// Mutable cell state of either a cell or a neuron's soma
    pub fn cell_mut(&mut self, target: Target) -> Result<&mut Cell> {
        match target {
            Target::Cell(id) => self.cells.get_mut(id),
            Target::Neuron(id) => Ok(&mut self.neurons.get_mut(id)?.cell),
        }
    }
}
