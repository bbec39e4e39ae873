// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Entity kinds and the dendrite state machine states

use core::fmt;

/// What kind of entity an arena, layer or identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// A humble cell, e.g. a photoreceptor
    Simple,
    /// A full-fledged neuron
    Neuron,
    /// A dendrite (not really a separate cell)
    Dendrite,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Simple => write!(f, "cell"),
            CellKind::Neuron => write!(f, "neuron"),
            CellKind::Dendrite => write!(f, "dendrite"),
        }
    }
}

/// What a dendrite is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DendriteIs {
    /// Looking for something to attach to
    #[default]
    Growing,
    /// Found a target and linked to it. Terminal.
    Attached,
}

impl DendriteIs {
    #[inline]
    pub fn is_growing(self) -> bool {
        matches!(self, DendriteIs::Growing)
    }

    #[inline]
    pub fn is_attached(self) -> bool {
        matches!(self, DendriteIs::Attached)
    }
}
