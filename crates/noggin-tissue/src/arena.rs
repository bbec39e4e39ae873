// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Pre-sized, append-only arenas addressed by dense integer identifiers.

An arena is allocated once at its full capacity and never grows past it.
Allocation hands out the next free slot, lookups are a bounds check and an
index. There is no deallocation: an identifier, once handed out, refers to
the same entity for the lifetime of the tissue.
*/

use core::fmt;
use core::marker::PhantomData;

use noggin_neural::{CellId, CellKind, DendriteId, NeuronId, NogginError, Result};

/// An identifier type that indexes one kind of arena
pub trait ArenaId: Copy + Eq + fmt::Debug {
    /// Kind reported in errors raised by this arena
    const KIND: CellKind;

    fn from_index(index: u32) -> Self;

    fn index(self) -> u32;
}

impl ArenaId for CellId {
    const KIND: CellKind = CellKind::Simple;

    #[inline(always)]
    fn from_index(index: u32) -> Self {
        CellId(index)
    }

    #[inline(always)]
    fn index(self) -> u32 {
        self.0
    }
}

impl ArenaId for NeuronId {
    const KIND: CellKind = CellKind::Neuron;

    #[inline(always)]
    fn from_index(index: u32) -> Self {
        NeuronId(index)
    }

    #[inline(always)]
    fn index(self) -> u32 {
        self.0
    }
}

impl ArenaId for DendriteId {
    const KIND: CellKind = CellKind::Dendrite;

    #[inline(always)]
    fn from_index(index: u32) -> Self {
        DendriteId(index)
    }

    #[inline(always)]
    fn index(self) -> u32 {
        self.0
    }
}

/// Fixed-capacity store of `T` addressed by `I`
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<I: ArenaId, T> {
    slots: Vec<T>,
    capacity: usize,
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Reserve the full capacity up front
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            _id: PhantomData,
        }
    }

    /// Store `value` in the next free slot
    ///
    /// # Errors
    /// `CapacityExceeded` once every slot is taken
    pub fn allocate(&mut self, value: T) -> Result<I> {
        let next = self.slots.len();
        if next >= self.capacity {
            return Err(NogginError::capacity(I::KIND, self.capacity));
        }
        let index =
            u32::try_from(next).map_err(|_| NogginError::capacity(I::KIND, self.capacity))?;
        self.slots.push(value);
        Ok(I::from_index(index))
    }

    /// # Errors
    /// `InvalidIdentifier` if `id` was never allocated
    #[inline]
    pub fn get(&self, id: I) -> Result<&T> {
        self.slots
            .get(id.index() as usize)
            .ok_or_else(|| NogginError::invalid_id(I::KIND, id.index()))
    }

    /// # Errors
    /// `InvalidIdentifier` if `id` was never allocated
    #[inline]
    pub fn get_mut(&mut self, id: I) -> Result<&mut T> {
        self.slots
            .get_mut(id.index() as usize)
            .ok_or_else(|| NogginError::invalid_id(I::KIND, id.index()))
    }

    pub fn contains(&self, id: I) -> bool {
        (id.index() as usize) < self.slots.len()
    }

    /// Number of allocated slots; also the next identifier to be handed out
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.slots.len()
    }

    /// Allocated entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, value)| (I::from_index(index as u32), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_hands_out_dense_ids() {
        let mut arena: Arena<CellId, u8> = Arena::with_capacity(3);
        assert_eq!(arena.allocate(10).unwrap(), CellId(0));
        assert_eq!(arena.allocate(11).unwrap(), CellId(1));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.remaining(), 1);
        assert_eq!(*arena.get(CellId(1)).unwrap(), 11);
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mut arena: Arena<NeuronId, ()> = Arena::with_capacity(1);
        arena.allocate(()).unwrap();
        assert_eq!(
            arena.allocate(()),
            Err(NogginError::CapacityExceeded {
                kind: CellKind::Neuron,
                capacity: 1
            })
        );
        // A failed allocation does not move the counter
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_lookup_past_end_is_invalid() {
        let mut arena: Arena<DendriteId, u8> = Arena::with_capacity(4);
        assert!(arena.get(DendriteId(0)).is_err());
        arena.allocate(7).unwrap();
        assert!(arena.get(DendriteId(0)).is_ok());
        assert_eq!(
            arena.get(DendriteId(1)).unwrap_err(),
            NogginError::InvalidIdentifier {
                kind: CellKind::Dendrite,
                id: 1
            }
        );
    }

    #[test]
    fn test_zero_capacity_arena() {
        let mut arena: Arena<CellId, u8> = Arena::with_capacity(0);
        assert!(arena.allocate(1).is_err());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut arena: Arena<CellId, u8> = Arena::with_capacity(2);
        let id = arena.allocate(1).unwrap();
        *arena.get_mut(id).unwrap() = 9;
        assert_eq!(arena.iter().collect::<Vec<_>>(), vec![(id, &9)]);
    }
}
