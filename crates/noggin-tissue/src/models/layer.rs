// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layers: flat sheets of cells or neurons at one depth

use serde::Serialize;

use noggin_neural::{CellId, CellKind, Depth, NeuronId, NogginError, Result, Target};

/// A flat sheet of cells or neurons
///
/// A layer never owns cell storage. It records which identifiers of the
/// organoid's arenas belong to it, plus (for neural layers) the depth its
/// dendrites reach toward. The reference to that other layer is a depth key,
/// resolved through the organoid when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// For display purposes
    name: String,
    depth: Depth,
    /// What type of cells live in this layer
    kind: CellKind,
    capacity: usize,
    /// Raw arena indices, interpreted through `kind`
    members: Vec<u32>,
    grows_toward: Option<Depth>,
}

impl Layer {
    /// An empty layer of simple cells
    pub fn cells(name: impl Into<String>, depth: Depth, capacity: usize) -> Self {
        Self::empty(name.into(), depth, CellKind::Simple, capacity)
    }

    /// An empty layer of neurons
    pub fn neurons(name: impl Into<String>, depth: Depth, capacity: usize) -> Self {
        Self::empty(name.into(), depth, CellKind::Neuron, capacity)
    }

    fn empty(name: String, depth: Depth, kind: CellKind, capacity: usize) -> Self {
        Self {
            name,
            depth,
            kind,
            capacity,
            members: Vec::new(),
            grows_toward: None,
        }
    }

    /// Builder: dendrites sprouted from this layer reach toward `depth`
    pub fn growing_toward(mut self, depth: Depth) -> Self {
        self.grows_toward = Some(depth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn grows_toward(&self) -> Option<Depth> {
        self.grows_toward
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members as targets a dendrite could attach to
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        let kind = self.kind;
        self.members.iter().map(move |&index| match kind {
            CellKind::Neuron => Target::Neuron(NeuronId(index)),
            _ => Target::Cell(CellId(index)),
        })
    }

    /// # Errors
    /// `KindMismatch` if this is not a cell layer
    pub fn cell_ids(&self) -> Result<impl Iterator<Item = CellId> + '_> {
        self.expect_kind(CellKind::Simple)?;
        Ok(self.members.iter().map(|&index| CellId(index)))
    }

    /// # Errors
    /// `KindMismatch` if this is not a neural layer
    pub fn neuron_ids(&self) -> Result<impl Iterator<Item = NeuronId> + '_> {
        self.expect_kind(CellKind::Neuron)?;
        Ok(self.members.iter().map(|&index| NeuronId(index)))
    }

    pub fn contains(&self, target: Target) -> bool {
        target.kind() == self.kind && self.members.contains(&target.index())
    }

    pub(crate) fn expect_kind(&self, expected: CellKind) -> Result<()> {
        if self.kind != expected {
            return Err(NogginError::KindMismatch {
                expected,
                actual: self.kind,
            });
        }
        Ok(())
    }

    /// Record a freshly allocated batch of members
    ///
    /// The caller guarantees the batch fits and the indices are new, which is
    /// what keeps the membership list free of duplicates.
    pub(crate) fn commit_members(&mut self, indices: Vec<u32>) {
        debug_assert!(self.members.is_empty());
        debug_assert!(indices.len() <= self.capacity);
        self.members = indices;
    }
}
