// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core data models of a tissue.

- `Cell`: a point entity with a position and an activation level
- `Neuron`: a cell plus an axon input slot and a bounded list of dendrites
- `Dendrite`: a growth process from a neuron toward a target
- `Layer`: a flat, single-depth membership list of cells or neurons

Models hold values and identifiers only. Every relation between them is an
identifier looked up in the arena that owns the other side.
*/

pub mod cell;
pub mod dendrite;
pub mod layer;

pub use cell::{Cell, Neuron};
pub use dendrite::Dendrite;
pub use layer::Layer;
