// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Chemical potential field.

Every positively activated cell or neuron exerts a potential that falls off
linearly with Manhattan distance and vanishes beyond the field radius:

```text
potential(c, p) = activation(c) * (radius + 1 - |p - c|₁)     for |p - c|₁ <= radius
```

The field is a read-only snapshot. It is built once per growth round from
the arenas and the layer memberships, so every dendrite in that round sees
the same potentials regardless of the order in which dendrites are ticked.

## Spatial index

Entries are bucketed by `(depth, x / radius, y / radius)`. Anything within
`radius` of a query point lies in the 3×3 block of buckets around it, so a
query touches at most nine buckets however large the tissue is.

## Tie-breaking

Candidates are ranked by potential (highest first), then distance (nearest
first), then identifier (lowest first). The ranking is a total order, which
makes gradient following independent of hash iteration order.
*/

use std::cmp::Ordering;

use ahash::AHashMap;
use serde::Serialize;

use noggin_neural::{Activation, Depth, PotWeight, Position, Result, Target};

use crate::models::Layer;
use crate::store::TissueStores;

type BucketKey = (Depth, i32, i32);

/// One source of potential captured in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldEntry {
    target: Target,
    position: Position,
    activation: Activation,
}

/// The strongest source seen from a query point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub target: Target,
    pub position: Position,
    /// Manhattan distance from the query point
    pub distance: u32,
}

/// Result of following the gradient from one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    /// Exact potential of the best candidate, zero if there is none
    pub potential: i32,
    /// `potential` narrowed for reporting
    pub weight: PotWeight,
    /// Full planar displacement to the best candidate; `(0, 0)` if there is none.
    /// Callers bound it to their own step length.
    pub step: (i32, i32),
    pub candidate: Option<Candidate>,
}

impl Gradient {
    pub const FLAT: Gradient = Gradient {
        potential: 0,
        weight: PotWeight::ZERO,
        step: (0, 0),
        candidate: None,
    };

    pub fn is_flat(&self) -> bool {
        self.candidate.is_none()
    }
}

/// Snapshot of all potential sources, bucketed for radius queries
#[derive(Debug, Clone)]
pub struct PotentialField {
    radius: u16,
    bucket_size: i32,
    buckets: AHashMap<BucketKey, Vec<FieldEntry>>,
    sources: usize,
}

impl PotentialField {
    pub fn new(radius: u16) -> Self {
        Self {
            radius,
            bucket_size: (radius as i32).max(1),
            buckets: AHashMap::new(),
            sources: 0,
        }
    }

    /// Capture the current positions and activations of every layer member
    ///
    /// # Errors
    /// `InvalidIdentifier` if a layer lists an identifier its arena never allocated
    pub fn snapshot<'a>(
        radius: u16,
        stores: &TissueStores,
        layers: impl IntoIterator<Item = &'a Layer>,
    ) -> Result<Self> {
        let mut field = Self::new(radius);
        for layer in layers {
            for target in layer.targets() {
                let (position, activation) = stores.sample(target)?;
                field.insert(target, position, activation);
            }
        }
        Ok(field)
    }

    /// Add one source. Sources without positive activation exert no potential
    /// and are not stored.
    pub fn insert(&mut self, target: Target, position: Position, activation: Activation) {
        if !activation.is_positive() {
            return;
        }
        let key = self.bucket_of(&position);
        self.buckets
            .entry(key)
            .or_default()
            .push(FieldEntry {
                target,
                position,
                activation,
            });
        self.sources += 1;
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// Number of sources exerting positive potential
    pub fn source_count(&self) -> usize {
        self.sources
    }

    #[inline]
    fn bucket_of(&self, position: &Position) -> BucketKey {
        (
            position.z,
            (position.x as i32).div_euclid(self.bucket_size),
            (position.y as i32).div_euclid(self.bucket_size),
        )
    }

    /// Potential a source at `source` with `activation` exerts at `from`
    ///
    /// `None` outside the radius or for non-positive activation. The value
    /// is exact; ranking never sees a saturated potential.
    pub fn potential(&self, activation: Activation, source: &Position, from: &Position) -> Option<i32> {
        if !activation.is_positive() {
            return None;
        }
        let distance = from.planar_distance(source);
        if distance > self.radius as u32 {
            return None;
        }
        let falloff = self.radius as i32 + 1 - distance as i32;
        Some(activation.value() as i32 * falloff)
    }

    /// Find the strongest source on the layer at `depth` as seen from `from`
    ///
    /// `exclude` is never a candidate (a neuron does not grow onto itself).
    /// Returns [`Gradient::FLAT`] when nothing within the radius exerts
    /// positive potential.
    pub fn follow_gradient(&self, from: Position, depth: Depth, exclude: Option<Target>) -> Gradient {
        let probe = from.at_depth(depth);
        let (_, bx, by) = self.bucket_of(&probe);

        let mut best: Option<(i32, Candidate)> = None;
        for nx in bx - 1..=bx + 1 {
            for ny in by - 1..=by + 1 {
                let Some(entries) = self.buckets.get(&(depth, nx, ny)) else {
                    continue;
                };
                for entry in entries {
                    if Some(entry.target) == exclude {
                        continue;
                    }
                    let Some(potential) = self.potential(entry.activation, &entry.position, &probe) else {
                        continue;
                    };
                    let candidate = Candidate {
                        target: entry.target,
                        position: entry.position,
                        distance: probe.planar_distance(&entry.position),
                    };
                    let better = match &best {
                        None => true,
                        Some((best_potential, best_candidate)) => {
                            rank(potential, &candidate, *best_potential, best_candidate) == Ordering::Less
                        }
                    };
                    if better {
                        best = Some((potential, candidate));
                    }
                }
            }
        }

        match best {
            Some((potential, candidate)) => Gradient {
                potential,
                weight: PotWeight::saturating(potential),
                step: probe.delta_to(&candidate.position),
                candidate: Some(candidate),
            },
            None => Gradient::FLAT,
        }
    }
}

/// `Less` means `a` is the better candidate
fn rank(a_potential: i32, a: &Candidate, b_potential: i32, b: &Candidate) -> Ordering {
    b_potential
        .cmp(&a_potential)
        .then(a.distance.cmp(&b.distance))
        .then(a.target.cmp(&b.target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noggin_neural::{CellId, NeuronId};

    fn cell(id: u32) -> Target {
        Target::Cell(CellId(id))
    }

    #[test]
    fn test_flat_when_nothing_active() {
        let mut field = PotentialField::new(4);
        field.insert(cell(0), Position::new(1, 0, 0), Activation::ZERO);
        field.insert(cell(1), Position::new(2, 0, 0), Activation::new(-30));

        assert_eq!(field.source_count(), 0);
        assert_eq!(field.follow_gradient(Position::planar(0, 0), 0, None), Gradient::FLAT);
    }

    #[test]
    fn test_flat_beyond_radius() {
        let mut field = PotentialField::new(3);
        field.insert(cell(0), Position::new(2, 2, 0), Activation::new(50));

        // distance 4 > radius 3
        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert!(gradient.is_flat());
        assert_eq!(gradient.step, (0, 0));
    }

    #[test]
    fn test_points_at_strongest_source() {
        let mut field = PotentialField::new(5);
        field.insert(cell(0), Position::new(2, 0, 0), Activation::new(10));
        field.insert(cell(1), Position::new(0, -3, 0), Activation::new(90));

        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        let candidate = gradient.candidate.unwrap();
        assert_eq!(candidate.target, cell(1));
        assert_eq!(candidate.distance, 3);
        assert_eq!(gradient.step, (0, -3));
        // 90 * (5 + 1 - 3)
        assert_eq!(gradient.weight, PotWeight(270));
    }

    #[test]
    fn test_tie_prefers_nearer_then_lowest_id() {
        let mut field = PotentialField::new(3);
        // Both exert 40 * 3 = 120 and 60 * 2 = 120 at the origin
        field.insert(cell(7), Position::new(1, 0, 0), Activation::new(40));
        field.insert(cell(2), Position::new(0, 2, 0), Activation::new(60));
        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert_eq!(gradient.candidate.unwrap().target, cell(7));

        // Same potential, same distance: lowest identifier wins
        let mut field = PotentialField::new(3);
        field.insert(cell(9), Position::new(1, 0, 0), Activation::new(40));
        field.insert(cell(4), Position::new(-1, 0, 0), Activation::new(40));
        field.insert(cell(6), Position::new(0, 1, 0), Activation::new(40));
        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert_eq!(gradient.candidate.unwrap().target, cell(4));
    }

    #[test]
    fn test_depths_are_separate() {
        let mut field = PotentialField::new(4);
        field.insert(cell(0), Position::new(1, 1, 2), Activation::new(50));

        assert!(field.follow_gradient(Position::new(0, 0, 0), 0, None).is_flat());
        // The query depth is the layer looked at, not the tip's own depth
        let gradient = field.follow_gradient(Position::new(0, 0, 0), 2, None);
        assert_eq!(gradient.candidate.unwrap().target, cell(0));
    }

    #[test]
    fn test_excluded_target_is_skipped() {
        let mut field = PotentialField::new(4);
        let own = Target::Neuron(NeuronId(0));
        field.insert(own, Position::new(0, 0, 1), Activation::new(100));
        field.insert(Target::Neuron(NeuronId(1)), Position::new(3, 0, 1), Activation::new(10));

        let gradient = field.follow_gradient(Position::new(0, 0, 1), 1, Some(own));
        assert_eq!(gradient.candidate.unwrap().target, Target::Neuron(NeuronId(1)));
    }

    #[test]
    fn test_query_across_negative_bucket_boundary() {
        let mut field = PotentialField::new(2);
        field.insert(cell(0), Position::new(-2, 0, 0), Activation::new(10));
        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert_eq!(gradient.step, (-2, 0));
    }

    #[test]
    fn test_zero_radius_sees_only_exact_position() {
        let mut field = PotentialField::new(0);
        field.insert(cell(0), Position::new(0, 0, 0), Activation::new(10));
        field.insert(cell(1), Position::new(1, 0, 0), Activation::new(100));
        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert_eq!(gradient.candidate.unwrap().target, cell(0));
        assert_eq!(gradient.weight, PotWeight(10));
    }

    #[test]
    fn test_wide_radius_ranks_exact_potentials() {
        let mut field = PotentialField::new(1000);
        // 50 * 1001 = 50050 and 100 * 996 = 99600, both beyond i16
        field.insert(cell(0), Position::new(0, 0, 0), Activation::new(50));
        field.insert(cell(1), Position::new(5, 0, 0), Activation::new(100));

        let gradient = field.follow_gradient(Position::planar(0, 0), 0, None);
        assert_eq!(gradient.candidate.unwrap().target, cell(1));
        assert_eq!(gradient.potential, 99600);
        assert_eq!(gradient.weight, PotWeight(i16::MAX));
    }
}
