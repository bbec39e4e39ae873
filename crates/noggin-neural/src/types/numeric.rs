// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Small clamped numeric types
//!
//! Every value here fits in one or two bytes. Constructors clamp rather than
//! wrap, so arithmetic done in a wider type can always be narrowed back.

use core::fmt;

/// Activation level of a cell or the input arriving on a neuron's axon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation(i8);

impl Activation {
    pub const MIN: i8 = -100;
    pub const MAX: i8 = 100;
    pub const ZERO: Activation = Activation(0);

    /// Clamp any integer into `[MIN, MAX]`
    #[inline]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as i8)
    }

    #[inline(always)]
    pub fn value(self) -> i8 {
        self.0
    }

    #[inline(always)]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl From<i8> for Activation {
    fn from(value: i8) -> Self {
        Self::new(value as i32)
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Importance of an attached dendrite, `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActWeight(i8);

impl ActWeight {
    pub const MIN: i8 = 0;
    pub const MAX: i8 = 100;
    pub const ZERO: ActWeight = ActWeight(0);

    #[inline]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as i8)
    }

    #[inline(always)]
    pub fn value(self) -> i8 {
        self.0
    }
}

impl fmt::Display for ActWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strength of the chemical potential at a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotWeight(pub i16);

impl PotWeight {
    pub const ZERO: PotWeight = PotWeight(0);

    /// Narrow a wide intermediate, saturating at the `i16` bounds
    #[inline]
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(i16::MIN as i32, i16::MAX as i32) as i16)
    }

    #[inline(always)]
    pub fn value(self) -> i16 {
        self.0
    }
}

impl fmt::Display for PotWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_clamps() {
        assert_eq!(Activation::new(250).value(), Activation::MAX);
        assert_eq!(Activation::new(-250).value(), Activation::MIN);
        assert_eq!(Activation::new(42).value(), 42);
        assert_eq!(Activation::from(i8::MIN).value(), Activation::MIN);
    }

    #[test]
    fn test_act_weight_is_never_negative() {
        assert_eq!(ActWeight::new(-5).value(), 0);
        assert_eq!(ActWeight::new(1_000).value(), ActWeight::MAX);
    }

    #[test]
    fn test_pot_weight_saturates() {
        assert_eq!(PotWeight::saturating(100_000).value(), i16::MAX);
        assert_eq!(PotWeight::saturating(-100_000).value(), i16::MIN);
        assert_eq!(PotWeight::saturating(300).value(), 300);
    }
}
