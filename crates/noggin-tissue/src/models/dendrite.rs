// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dendrites and their one-way growing → attached state machine

use serde::Serialize;

use noggin_neural::{ActWeight, Depth, DendriteIs, NeuronId, Position, Target};

/// A connection growing from a neuron toward another cell
///
/// While `Growing`, `target` is the best candidate seen on the last tick
/// (or `None` if nothing exerted potential). Once `Attached`, `target` and
/// `weight` are fixed for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dendrite {
    pub parent: NeuronId,
    pub doing: DendriteIs,
    /// Current growth tip; always at the parent's depth
    pub tip: Position,
    /// Depth of the layer this dendrite reaches toward
    pub toward: Depth,
    pub target: Option<Target>,
    pub weight: ActWeight,
}

impl Dendrite {
    /// A fresh growing dendrite with its tip at the parent's soma
    pub fn sprout(parent: NeuronId, soma: Position, toward: Depth) -> Self {
        Self {
            parent,
            doing: DendriteIs::Growing,
            tip: soma,
            toward,
            target: None,
            weight: ActWeight::ZERO,
        }
    }

    #[inline]
    pub fn is_growing(&self) -> bool {
        self.doing.is_growing()
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.doing.is_attached()
    }

    /// Committed synapse target, only once attached
    pub fn synapse(&self) -> Option<(Target, ActWeight)> {
        match (self.doing, self.target) {
            (DendriteIs::Attached, Some(target)) => Some((target, self.weight)),
            _ => None,
        }
    }
}
