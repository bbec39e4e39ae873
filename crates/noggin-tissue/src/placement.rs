// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Grid placement: populate an empty layer with a centred `rows × cols` sheet.

Entity `(row, col)` is placed at

```text
x = row * spacing - row_offset
y = col * spacing - col_offset          (GridFormula::Corrected)
y = row * spacing - col_offset          (GridFormula::Legacy)
```

with `offset(n) = ((n - 1) * spacing) >> 1`. The legacy formula reuses the
row index for `y` and so folds every row onto a diagonal; it is only kept so
older layouts can be reproduced.

Placement is all-or-nothing. The layer's capacity, the arena's remaining
slots and every coordinate are checked before the first allocation.
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use noggin_neural::{CellKind, Depth, NogginError, Position, Result, Size, XY};

use crate::models::{Cell, Layer, Neuron};
use crate::store::TissueStores;

/// Which coordinate formula a grid uses for `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridFormula {
    /// `y` follows the column index
    #[default]
    Corrected,
    /// `y` follows the row index (compatibility mode)
    Legacy,
}

impl fmt::Display for GridFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridFormula::Corrected => write!(f, "corrected"),
            GridFormula::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for GridFormula {
    type Err = NogginError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "corrected" => Ok(GridFormula::Corrected),
            "legacy" => Ok(GridFormula::Legacy),
            other => Err(NogginError::InvalidParameter(format!(
                "unknown grid formula '{}'",
                other
            ))),
        }
    }
}

#[inline]
fn centre_offset(n: Size, spacing: XY) -> i32 {
    ((n as i32 - 1).max(0) * spacing as i32) >> 1
}

fn narrow(axis: char, value: i32) -> Result<XY> {
    XY::try_from(value).map_err(|_| NogginError::PositionOutOfRange { axis, value })
}

/// Positions of a centred grid, row-major
///
/// # Errors
/// - `InvalidParameter` for a spacing below 1
/// - `PositionOutOfRange` if a coordinate leaves the `XY` range
pub fn grid_positions(
    rows: Size,
    cols: Size,
    spacing: XY,
    depth: Depth,
    formula: GridFormula,
) -> Result<Vec<Position>> {
    if spacing < 1 {
        return Err(NogginError::InvalidParameter(format!(
            "grid spacing must be at least 1, got {}",
            spacing
        )));
    }

    let row_offset = centre_offset(rows, spacing);
    let col_offset = centre_offset(cols, spacing);
    let spacing = spacing as i32;

    let mut positions = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            let x = row * spacing - row_offset;
            let y = match formula {
                GridFormula::Corrected => col * spacing - col_offset,
                GridFormula::Legacy => row * spacing - col_offset,
            };
            positions.push(Position::new(narrow('x', x)?, narrow('y', y)?, depth));
        }
    }
    Ok(positions)
}

/// Populate `layer` with a grid of fresh cells or neurons from `stores`
///
/// The entity kind follows the layer's kind. On error nothing is allocated
/// and the layer stays empty.
///
/// # Errors
/// - `LayerAlreadyPopulated` if the layer already has members
/// - `CapacityExceeded` if the layer or the arena cannot hold the whole grid
/// - `KindMismatch` for a layer of a kind that cannot be placed
/// - whatever [`grid_positions`] reports
pub fn place_grid(
    stores: &mut TissueStores,
    layer: &mut Layer,
    rows: Size,
    cols: Size,
    spacing: XY,
    formula: GridFormula,
) -> Result<()> {
    if !layer.is_empty() {
        return Err(NogginError::LayerAlreadyPopulated(layer.depth()));
    }

    let count = rows as usize * cols as usize;
    if count > layer.capacity() {
        return Err(NogginError::capacity(layer.kind(), layer.capacity()));
    }
    let (remaining, capacity) = match layer.kind() {
        CellKind::Simple => (stores.cells.remaining(), stores.cells.capacity()),
        CellKind::Neuron => (stores.neurons.remaining(), stores.neurons.capacity()),
        CellKind::Dendrite => {
            return Err(NogginError::KindMismatch {
                expected: CellKind::Simple,
                actual: CellKind::Dendrite,
            })
        }
    };
    if count > remaining {
        return Err(NogginError::capacity(layer.kind(), capacity));
    }

    let positions = grid_positions(rows, cols, spacing, layer.depth(), formula)?;

    let mut members = Vec::with_capacity(count);
    for position in positions {
        let index = match layer.kind() {
            CellKind::Neuron => stores.neurons.allocate(Neuron::at(position))?.0,
            _ => stores.cells.allocate(Cell::at(position))?.0,
        };
        members.push(index);
    }
    layer.commit_members(members);

    tracing::debug!(
        target: "noggin-tissue",
        "Placed {}x{} {} grid in layer '{}' at depth {} ({} formula)",
        rows,
        cols,
        layer.kind(),
        layer.name(),
        layer.depth(),
        formula
    );
    Ok(())
}
