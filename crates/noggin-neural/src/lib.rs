// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Noggin Neural Foundation Types
//!
//! Everything the tissue crates agree on, with no behaviour of their own:
//! - **Identifiers**: `CellId`, `NeuronId`, `DendriteId`, and the `Target` a dendrite points at
//! - **Spatial**: narrow `XY`/`Depth` coordinates and `Position`
//! - **Numerics**: clamped `Activation`, `ActWeight` and saturating `PotWeight`
//! - **Errors**: the `NogginError` taxonomy shared by every store and engine
//!
//! All numeric types are deliberately small. A tissue is expected to hold
//! millions of cells, so every byte per entity counts.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub use types::{
    ActWeight, Activation, CellId, CellKind, Depth, DendriteId, DendriteIs, Error, NeuronId,
    NogginError, PotWeight, Position, Result, Size, Target, XY,
};
