// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Development driver.

Repeats growth rounds on an organoid until its wiring stops changing:

1. **Settled** - no dendrite is growing any more
2. **Stalled** - a round neither moved nor attached anything
3. **Exhausted** - the round budget ran out while growth was still progressing
*/

use std::time::Instant;

use serde::Serialize;

use noggin_neural::Result;

use crate::organoid::Organoid;

/// Where development stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DevelopmentStage {
    /// Not run yet, or run with a budget of zero rounds while dendrites are growing
    #[default]
    Growing,
    /// Every dendrite is attached
    Settled,
    /// Dendrites are still growing but nothing changes between rounds
    Stalled,
    /// Round budget used up while still making progress
    Exhausted,
}

/// Development progress information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DevelopmentProgress {
    pub stage: DevelopmentStage,
    /// Rounds run by this call
    pub rounds: u64,
    /// Tip moves across all rounds
    pub moves: usize,
    /// Attachments made by this call
    pub attached: usize,
    /// Dendrites still growing at the end
    pub growing: usize,
    /// Duration of development in milliseconds
    pub duration_ms: u64,
}

impl Organoid {
    /// Run growth rounds until the tissue settles, stalls, or `max_rounds` is reached
    ///
    /// # Errors
    /// Whatever [`Organoid::tick_all`] reports; rounds already run are kept
    pub fn develop(&mut self, max_rounds: u64) -> Result<DevelopmentProgress> {
        let started = Instant::now();
        let mut progress = DevelopmentProgress::default();

        tracing::debug!(
            target: "noggin-tissue",
            "Developing organoid '{}' for up to {} rounds",
            self.name(),
            max_rounds
        );

        progress.stage = loop {
            if self.stats().growing_dendrites == 0 {
                break DevelopmentStage::Settled;
            }
            if progress.rounds >= max_rounds {
                break if progress.rounds == 0 {
                    DevelopmentStage::Growing
                } else {
                    DevelopmentStage::Exhausted
                };
            }

            let report = self.tick_all()?;
            progress.rounds += 1;
            progress.moves += report.num_grown;
            progress.attached += report.num_attached;
            if !report.made_progress() {
                break DevelopmentStage::Stalled;
            }
        };

        progress.growing = self.stats().growing_dendrites;
        progress.duration_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            target: "noggin-tissue",
            "Organoid '{}' development {:?} after {} rounds: {} attached, {} still growing",
            self.name(),
            progress.stage,
            progress.rounds,
            progress.attached,
            progress.growing
        );
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noggin_neural::{CellId, NeuronId, Target};

    use crate::models::Layer;

    /// One active cell at the origin and a neuron `distance` away along y
    fn single_pair(distance: i16) -> Organoid {
        let mut organoid = Organoid::new("pair", 1, 2, 4);
        let mut retina = Layer::cells("retina", 0, 1);
        let mut cortex = Layer::neurons("cortex", 1, 2).growing_toward(0);
        organoid.cell_grid(&mut retina, 1, 1, 1).unwrap();
        // Two columns centred on the origin sit at y = -distance and y = +distance
        organoid.neuron_grid(&mut cortex, 1, 2, 2 * distance).unwrap();
        organoid.add_layer(retina, 0).unwrap();
        organoid.add_layer(cortex, 1).unwrap();
        organoid.set_activation(Target::Cell(CellId(0)), 60).unwrap();
        organoid.sprout_dendrite(NeuronId(0), 0).unwrap();
        organoid
    }

    #[test]
    fn test_settles_when_everything_attaches() {
        let mut organoid = single_pair(4);
        let progress = organoid.develop(100).unwrap();
        assert_eq!(progress.stage, DevelopmentStage::Settled);
        // Three moves bring the tip within contact, the fourth round attaches
        assert_eq!(progress.rounds, 4);
        assert_eq!(progress.moves, 3);
        assert_eq!(progress.attached, 1);
        assert_eq!(progress.growing, 0);
    }

    #[test]
    fn test_exhausts_round_budget() {
        let mut organoid = single_pair(4);
        let progress = organoid.develop(2).unwrap();
        assert_eq!(progress.stage, DevelopmentStage::Exhausted);
        assert_eq!(progress.rounds, 2);
        assert_eq!(progress.growing, 1);

        let rest = organoid.develop(10).unwrap();
        assert_eq!(rest.stage, DevelopmentStage::Settled);
        assert_eq!(organoid.rounds(), 4);
    }

    #[test]
    fn test_stalls_out_of_range() {
        let mut organoid = single_pair(20);
        let progress = organoid.develop(50).unwrap();
        assert_eq!(progress.stage, DevelopmentStage::Stalled);
        assert_eq!(progress.rounds, 1);
        assert_eq!(progress.growing, 1);
    }

    #[test]
    fn test_zero_budget_and_empty_tissue() {
        let mut organoid = single_pair(4);
        assert_eq!(organoid.develop(0).unwrap().stage, DevelopmentStage::Growing);

        let mut empty = Organoid::new("empty", 0, 0, 0);
        let progress = empty.develop(10).unwrap();
        assert_eq!(progress.stage, DevelopmentStage::Settled);
        assert_eq!(progress.rounds, 0);
    }
}
