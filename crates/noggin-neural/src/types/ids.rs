// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for cells, neurons and dendrites
//!
//! Identifiers are dense, zero-based indices into the arena that owns the
//! entity. They carry no pointer semantics and are never reused.

use core::fmt;

use super::kind::CellKind;

/// Cell ID (index into the cell arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Neuron ID (index into the neuron arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeuronId(pub u32);

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neuron({})", self.0)
    }
}

/// Dendrite ID (index into the dendrite arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DendriteId(pub u32);

impl fmt::Display for DendriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dendrite({})", self.0)
    }
}

/// Something a dendrite can grow toward and attach to.
///
/// Ordering is by kind first, then by identifier, which gives the
/// "lowest identifier wins" tie-break a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Cell(CellId),
    Neuron(NeuronId),
}

impl Target {
    pub fn kind(&self) -> CellKind {
        match self {
            Target::Cell(_) => CellKind::Simple,
            Target::Neuron(_) => CellKind::Neuron,
        }
    }

    /// Raw arena index, meaningful only together with `kind()`
    pub fn index(&self) -> u32 {
        match self {
            Target::Cell(id) => id.0,
            Target::Neuron(id) => id.0,
        }
    }
}

impl From<CellId> for Target {
    fn from(id: CellId) -> Self {
        Target::Cell(id)
    }
}

impl From<NeuronId> for Target {
    fn from(id: NeuronId) -> Self {
        Target::Neuron(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cell(id) => id.fmt(f),
            Target::Neuron(id) => id.fmt(f),
        }
    }
}
