// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Driving several independent tissues at once

use rayon::prelude::*;

use noggin_neural::Result;

use crate::growth::GrowthReport;
use crate::organoid::Organoid;

/// Run one growth round on every organoid in parallel
///
/// Organoids share nothing, so each result is the same as calling
/// [`Organoid::tick_all`] on it alone. Results keep the input order.
pub fn tick_tissues(organoids: &mut [Organoid]) -> Vec<Result<GrowthReport>> {
    tracing::trace!(target: "noggin-tissue", "Ticking {} organoids in parallel", organoids.len());
    organoids.par_iter_mut().map(Organoid::tick_all).collect()
}
