// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Types Module
//!
//! Core type definitions for noggin tissues.

pub mod error;
pub mod ids;
pub mod kind;
pub mod numeric;
pub mod spatial;

// Re-export commonly used types
pub use error::{Error, NogginError, Result};
pub use ids::{CellId, DendriteId, NeuronId, Target};
pub use kind::{CellKind, DendriteIs};
pub use numeric::{ActWeight, Activation, PotWeight};
pub use spatial::{Depth, Position, Size, XY};
