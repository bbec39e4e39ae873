// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for tissue operations
//!
//! Every variant is a local, recoverable condition. Nothing here is fatal
//! and no operation substitutes a default value in place of one of these.

use super::kind::CellKind;
use super::spatial::Depth;

/// Error types for noggin operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NogginError {
    /// Arena or per-neuron dendrite list is full
    #[error("Capacity exceeded: {kind} store holds at most {capacity}")]
    CapacityExceeded { kind: CellKind, capacity: usize },

    /// Lookup of an identifier that was never allocated
    #[error("Invalid {kind} identifier: {id}")]
    InvalidIdentifier { kind: CellKind, id: u32 },

    #[error("No layer at depth {0}")]
    NoSuchDepth(Depth),

    /// Layers are populated by exactly one placement call
    #[error("Layer at depth {0} is already populated")]
    LayerAlreadyPopulated(Depth),

    #[error("Kind mismatch: expected {expected}, got {actual}")]
    KindMismatch { expected: CellKind, actual: CellKind },

    /// Placement arithmetic left the narrow coordinate range
    #[error("Position out of range on {axis} axis: {value}")]
    PositionOutOfRange { axis: char, value: i32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl NogginError {
    pub fn capacity(kind: CellKind, capacity: usize) -> Self {
        NogginError::CapacityExceeded { kind, capacity }
    }

    pub fn invalid_id(kind: CellKind, id: u32) -> Self {
        NogginError::InvalidIdentifier { kind, id }
    }
}

pub type Result<T> = core::result::Result<T, NogginError>;
pub type Error = NogginError;
