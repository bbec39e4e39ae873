// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spatial types for tissue coordinates
//!
//! `x`/`y` span the two large dimensions of a layer. `z` is the layer depth,
//! orthogonal to the plane. Distances are Manhattan and planar: depth never
//! contributes, since a dendrite reaching toward another layer measures how
//! far it is from a target's projection onto its own plane.

use core::fmt;

use super::error::{NogginError, Result};

/// Coordinate along one of the two large spatial dimensions
pub type XY = i16;

/// Layer position, orthogonal to XY
pub type Depth = i16;

/// Number of cells in one direction (rows or columns of a grid)
pub type Size = u16;

/// 3D position in tissue space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: XY,
    pub y: XY,
    pub z: Depth,
}

impl Position {
    pub const fn new(x: XY, y: XY, z: Depth) -> Self {
        Self { x, y, z }
    }

    /// Position on the depth-0 plane
    pub const fn planar(x: XY, y: XY) -> Self {
        Self { x, y, z: 0 }
    }

    /// Same (x, y) moved to another depth
    pub const fn at_depth(self, z: Depth) -> Self {
        Self { x: self.x, y: self.y, z }
    }

    /// Planar offset `(dx, dy)` from `self` to `other`
    #[inline]
    pub fn delta_to(&self, other: &Position) -> (i32, i32) {
        (
            other.x as i32 - self.x as i32,
            other.y as i32 - self.y as i32,
        )
    }

    /// Manhattan distance in the plane, ignoring depth
    #[inline]
    pub fn planar_distance(&self, other: &Position) -> u32 {
        let (dx, dy) = self.delta_to(other);
        dx.unsigned_abs() + dy.unsigned_abs()
    }

    /// Move by `(dx, dy)` within the same depth
    ///
    /// # Errors
    /// `PositionOutOfRange` naming the axis that leaves the `XY` range
    pub fn offset(&self, dx: i32, dy: i32) -> Result<Position> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        let x = XY::try_from(x).map_err(|_| NogginError::PositionOutOfRange { axis: 'x', value: x })?;
        let y = XY::try_from(y).map_err(|_| NogginError::PositionOutOfRange { axis: 'y', value: y })?;
        Ok(Position { x, y, z: self.z })
    }
}

impl From<(XY, XY, Depth)> for Position {
    fn from((x, y, z): (XY, XY, Depth)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
