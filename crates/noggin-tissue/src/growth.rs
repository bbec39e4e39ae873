// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Dendrite growth engine.

Each growing dendrite is advanced one tick at a time. A tick asks the
potential field for the strongest source on the layer the dendrite reaches
toward, as seen from the dendrite's tip, and then does exactly one of:

1. **Attach** when the source's potential exceeds the attachment threshold
   and it lies within the contact radius. Target and weight become fixed.
2. **Move** the tip toward the source by at most `max_step` (Manhattan),
   along the dominant axis first, never past the source.
3. **Stall** when nothing in range exerts potential.

Attached dendrites are terminal: ticking them changes nothing.

The tip never changes depth. Distances are measured in the plane between the
tip and the target layer's sheet.
*/

use serde::Serialize;

use noggin_neural::{
    ActWeight, DendriteId, DendriteIs, NogginError, PotWeight, Result, Target,
};

use crate::field::{Gradient, PotentialField};
use crate::store::TissueStores;

/// Parameters of the growth engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthConfig {
    /// Potentials vanish beyond this Manhattan distance
    pub field_radius: u16,
    /// Attach once the candidate is at most this far from the tip
    pub contact_radius: u16,
    /// Maximum Manhattan length of one move
    pub max_step: u16,
    /// Attach only to potentials strictly above this
    pub attach_threshold: PotWeight,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            field_radius: 8,
            contact_radius: 1,
            max_step: 1,
            attach_threshold: PotWeight::ZERO,
        }
    }
}

impl GrowthConfig {
    /// # Errors
    /// `InvalidParameter` for a zero step or a contact radius beyond the field
    pub fn validate(&self) -> Result<()> {
        if self.max_step == 0 {
            return Err(NogginError::InvalidParameter(
                "max_step must be at least 1".to_string(),
            ));
        }
        if self.contact_radius > self.field_radius {
            return Err(NogginError::InvalidParameter(format!(
                "contact_radius {} exceeds field_radius {}",
                self.contact_radius, self.field_radius
            )));
        }
        Ok(())
    }
}

/// What one tick did to one dendrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Committed to a target this tick
    Attached,
    /// Tip moved toward the best candidate
    Moved,
    /// Nothing to follow, tip unchanged
    Stalled,
    /// Already attached before the tick; nothing changed
    AlreadyAttached,
}

impl TickOutcome {
    pub fn state(self) -> DendriteIs {
        match self {
            TickOutcome::Attached | TickOutcome::AlreadyAttached => DendriteIs::Attached,
            TickOutcome::Moved | TickOutcome::Stalled => DendriteIs::Growing,
        }
    }
}

/// Summary of one growth round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GrowthReport {
    /// Round number within the organoid, starting at 1
    pub round: u64,
    /// Dendrites whose tip moved
    pub num_grown: usize,
    /// Dendrites that attached this round
    pub num_attached: usize,
    /// Growing dendrites with nothing in range
    pub num_stalled: usize,
}

impl GrowthReport {
    /// Whether the round changed any dendrite
    pub fn made_progress(&self) -> bool {
        self.num_grown > 0 || self.num_attached > 0
    }

    pub(crate) fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Attached => self.num_attached += 1,
            TickOutcome::Moved => self.num_grown += 1,
            TickOutcome::Stalled => self.num_stalled += 1,
            TickOutcome::AlreadyAttached => {}
        }
    }
}

/// Applies growth ticks with one fixed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrowthEngine {
    config: GrowthConfig,
}

impl GrowthEngine {
    /// # Errors
    /// `InvalidParameter` if the configuration does not validate
    pub fn new(config: GrowthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Advance one dendrite by one tick and return its resulting state
    ///
    /// # Errors
    /// `InvalidIdentifier` if the dendrite or its parent neuron does not exist
    pub fn tick(
        &self,
        dendrite: DendriteId,
        field: &PotentialField,
        stores: &mut TissueStores,
    ) -> Result<DendriteIs> {
        self.advance(dendrite, field, stores).map(TickOutcome::state)
    }

    /// Same as [`tick`](Self::tick) but reports what happened
    pub fn advance(
        &self,
        id: DendriteId,
        field: &PotentialField,
        stores: &mut TissueStores,
    ) -> Result<TickOutcome> {
        let current = *stores.dendrites.get(id)?;
        stores.neurons.get(current.parent)?;

        if current.is_attached() {
            return Ok(TickOutcome::AlreadyAttached);
        }

        let gradient = field.follow_gradient(current.tip, current.toward, Some(Target::Neuron(current.parent)));
        let dendrite = stores.dendrites.get_mut(id)?;

        let Gradient {
            potential,
            step,
            candidate: Some(candidate),
            ..
        } = gradient
        else {
            dendrite.target = None;
            return Ok(TickOutcome::Stalled);
        };

        dendrite.target = Some(candidate.target);

        if potential > self.config.attach_threshold.value() as i32
            && candidate.distance <= self.config.contact_radius as u32
        {
            dendrite.doing = DendriteIs::Attached;
            dendrite.weight = self.weight_of(potential);
            tracing::trace!(
                target: "noggin-tissue",
                "{} of {} attached to {} with weight {}",
                id,
                current.parent,
                candidate.target,
                dendrite.weight
            );
            return Ok(TickOutcome::Attached);
        }

        let (dx, dy) = bounded_step(step, self.config.max_step);
        if (dx, dy) == (0, 0) {
            return Ok(TickOutcome::Stalled);
        }
        dendrite.tip = dendrite.tip.offset(dx, dy)?;
        Ok(TickOutcome::Moved)
    }

    /// Synapse weight: potential scaled back to the activation range
    fn weight_of(&self, potential: i32) -> ActWeight {
        ActWeight::new(potential / (self.config.field_radius as i32 + 1))
    }
}
