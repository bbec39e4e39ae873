// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Organoid Integration Tests

Covers the organoid's external surface:
- Layer insertion and lookup by depth
- Entity lookup at the edge of allocation
- Dendrite listing and statistics
*/

use noggin_tissue::{
    CellId, DendriteId, Layer, NeuronId, NogginError, Organoid, Target, TissueStats,
};

#[test]
fn test_add_layer_then_layer_at_returns_it() {
    let mut organoid = Organoid::new("stack", 16, 0, 0);
    let mut retina = Layer::cells("retina", 0, 16);
    organoid.place_grid(&mut retina, 4, 4, 1).unwrap();
    let expected = retina.clone();

    assert_eq!(organoid.add_layer(retina, 0).unwrap(), None);
    assert_eq!(organoid.layer_at(0).unwrap(), &expected);
}

#[test]
fn test_second_add_at_same_depth_replaces() {
    let mut organoid = Organoid::new("stack", 0, 0, 0);
    let first = Layer::cells("first", 2, 4);
    let second = Layer::neurons("second", 2, 8);

    organoid.add_layer(first.clone(), 2).unwrap();
    let replaced = organoid.add_layer(second.clone(), 2).unwrap();

    assert_eq!(replaced, Some(first));
    assert_eq!(organoid.layer_at(2).unwrap(), &second);
    assert_eq!(organoid.layers().count(), 1);
}

#[test]
fn test_missing_depth() {
    let mut organoid = Organoid::new("stack", 0, 0, 0);
    organoid.add_layer(Layer::cells("retina", 0, 0), 0).unwrap();
    assert_eq!(organoid.layer_at(1), Err(NogginError::NoSuchDepth(1)));
    assert_eq!(organoid.layer_at(-1), Err(NogginError::NoSuchDepth(-1)));
}

#[test]
fn test_layers_iterate_in_depth_order() {
    let mut organoid = Organoid::new("stack", 0, 0, 0);
    for depth in [3, -2, 0] {
        organoid
            .add_layer(Layer::cells(format!("layer{}", depth), depth, 0), depth)
            .unwrap();
    }
    assert_eq!(organoid.depths().collect::<Vec<_>>(), vec![-2, 0, 3]);
}

#[test]
fn test_lookup_one_past_the_end() {
    let mut organoid = Organoid::new("edge", 4, 4, 4);
    assert!(organoid.cell_at(CellId(0)).is_err());

    let mut retina = Layer::cells("retina", 0, 1);
    organoid.place_grid(&mut retina, 1, 1, 1).unwrap();
    assert!(organoid.cell_at(CellId(0)).is_ok());
    assert!(matches!(
        organoid.cell_at(CellId(1)),
        Err(NogginError::InvalidIdentifier { id: 1, .. })
    ));
    assert!(organoid.neuron_at(NeuronId(0)).is_err());
    assert!(organoid.dendrite_at(DendriteId(0)).is_err());
    assert!(organoid.dendrites_of(NeuronId(0)).is_err());
}

#[test]
fn test_dendrites_of_lists_in_sprouting_order() {
    let mut organoid = Organoid::new("edge", 0, 2, 8);
    let mut cortex = Layer::neurons("cortex", 0, 2);
    organoid.place_grid(&mut cortex, 1, 2, 2).unwrap();
    organoid.add_layer(cortex, 0).unwrap();

    let a = organoid.sprout_dendrite(NeuronId(1), 0).unwrap();
    let other = organoid.sprout_dendrite(NeuronId(0), 0).unwrap();
    let b = organoid.sprout_dendrite(NeuronId(1), 0).unwrap();

    let ids: Vec<DendriteId> = organoid
        .dendrites_of(NeuronId(1))
        .unwrap()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(organoid.dendrites_of(NeuronId(0)).unwrap()[0].0, other);
    assert!(organoid.dendrites_of(NeuronId(0)).unwrap()[0].1.is_growing());
}

#[test]
fn test_dendrite_arena_capacity() {
    let mut organoid = Organoid::new("tight", 0, 1, 1);
    let mut cortex = Layer::neurons("cortex", 0, 1);
    organoid.place_grid(&mut cortex, 1, 1, 1).unwrap();
    organoid.add_layer(cortex, 0).unwrap();

    organoid.sprout_dendrite(NeuronId(0), 0).unwrap();
    assert!(matches!(
        organoid.sprout_dendrite(NeuronId(0), 0),
        Err(NogginError::CapacityExceeded { .. })
    ));
    assert_eq!(organoid.dendrites_of(NeuronId(0)).unwrap().len(), 1);
}

#[test]
fn test_stats_track_allocation_and_growth() {
    let mut organoid = Organoid::new("stats", 9, 4, 16);
    let mut retina = Layer::cells("retina", 0, 9);
    let mut cortex = Layer::neurons("cortex", 1, 4).growing_toward(0);
    organoid.cell_grid(&mut retina, 3, 3, 1).unwrap();
    organoid.neuron_grid(&mut cortex, 2, 2, 1).unwrap();
    organoid.add_layer(retina, 0).unwrap();
    organoid.add_layer(cortex, 1).unwrap();
    organoid.sprout_layer(1, 1).unwrap();

    assert_eq!(
        organoid.stats(),
        TissueStats {
            layers: 2,
            cells: 9,
            cell_capacity: 9,
            neurons: 4,
            neuron_capacity: 4,
            dendrites: 4,
            dendrite_capacity: 16,
            growing_dendrites: 4,
            attached_dendrites: 0,
            rounds: 0,
        }
    );

    for id in 0..9 {
        organoid.set_activation(Target::Cell(CellId(id)), 40).unwrap();
    }
    organoid.develop(20).unwrap();
    let stats = organoid.stats();
    assert_eq!(stats.attached_dendrites, 4);
    assert_eq!(stats.growing_dendrites, 0);
}
