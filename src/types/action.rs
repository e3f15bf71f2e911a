//! Group actions on enumerable objects.
//!
//! An action is an invertible, composable transformation. The engine never
//! owns actions; it borrows them from a caller-supplied slice. Tie-breaking
//! during canonical selection follows slice order, so the slice order must
//! be deterministic.

use serde::{Deserialize, Serialize};

/// An invertible, composable transformation acting on objects of type `T`.
///
/// Laws the engine relies on:
///
/// - `a.inverse().apply(&a.apply(&o))` equals `o` under the comparator
/// - `a.compose(&b).apply(&o)` equals `a.apply(&b.apply(&o))`
///
/// Applying an action always produces a new object; nothing is mutated in
/// place.
pub trait GroupAction<T>: Clone + PartialEq {
    /// Apply this action, producing a new object.
    fn apply(&self, object: &T) -> T;

    /// The action undoing this one.
    fn inverse(&self) -> Self;

    /// Composition `self . other` (`other` acts first).
    fn compose(&self, other: &Self) -> Self;
}

/// Dihedral site permutation of a ring of `volume` sites.
///
/// Site `j` of the input lands on site `(shift + j) % volume` of the output,
/// or `(shift - j) % volume` when reflected. The full range of a cell
/// enumerates identity first, then the remaining rotations by increasing
/// shift, then all reflections by increasing shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SitePermutation {
    volume: usize,
    shift: usize,
    reflected: bool,
}

impl SitePermutation {
    /// Create a permutation. `shift` is reduced modulo `volume`.
    ///
    /// # Panics
    ///
    /// Panics when `volume` is zero; a permutation needs at least one site.
    pub fn new(volume: usize, shift: usize, reflected: bool) -> Self {
        assert!(volume > 0, "a site permutation needs at least one site");
        Self {
            volume,
            shift: shift % volume,
            reflected,
        }
    }

    /// The identity permutation on `volume` sites.
    pub fn identity(volume: usize) -> Self {
        Self::new(volume, 0, false)
    }

    /// Number of sites this permutation acts on.
    pub fn volume(&self) -> usize {
        self.volume
    }

    /// Rotation offset.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Whether the permutation includes the reflection.
    pub fn is_reflected(&self) -> bool {
        self.reflected
    }

    /// Whether this is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.shift == 0 && !self.reflected
    }

    /// Output site for input site `j`.
    pub fn map_site(&self, j: usize) -> usize {
        debug_assert!(j < self.volume);
        if self.reflected {
            (self.shift + self.volume - j) % self.volume
        } else {
            (self.shift + j) % self.volume
        }
    }

    /// The permutation undoing this one.
    ///
    /// Reflections are involutions; a rotation by `s` inverts to a rotation
    /// by `volume - s`.
    pub fn inverse(&self) -> Self {
        if self.reflected {
            *self
        } else {
            Self::new(self.volume, (self.volume - self.shift) % self.volume, false)
        }
    }

    /// Composition `self . other` (`other` acts first).
    ///
    /// With `f(j) = (shift + e * j) mod volume` and `e = -1` for reflected
    /// permutations, the composite shift is `shift_a + e_a * shift_b` and
    /// the composite reflection is the exclusive-or.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.volume, other.volume);
        let shift = if self.reflected {
            (self.shift + self.volume - other.shift) % self.volume
        } else {
            (self.shift + other.shift) % self.volume
        };
        Self::new(self.volume, shift, self.reflected ^ other.reflected)
    }

    /// The full dihedral range for a cell of `volume` sites, identity first.
    ///
    /// The order is deterministic: rotations by shift `0..volume`, then
    /// reflections by shift `0..volume`.
    pub fn full_range(volume: usize) -> Vec<SitePermutation> {
        let mut range = Vec::with_capacity(2 * volume);
        for shift in 0..volume {
            range.push(Self::new(volume, shift, false));
        }
        for shift in 0..volume {
            range.push(Self::new(volume, shift, true));
        }
        range
    }
}

impl std::fmt::Display for SitePermutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.reflected {
            write!(f, "s{}", self.shift)
        } else {
            write!(f, "r{}", self.shift)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_sites_to_themselves() {
        let id = SitePermutation::identity(4);
        for j in 0..4 {
            assert_eq!(id.map_site(j), j);
        }
        assert!(id.is_identity());
    }

    #[test]
    fn test_rotation_map() {
        let r1 = SitePermutation::new(4, 1, false);
        assert_eq!(r1.map_site(0), 1);
        assert_eq!(r1.map_site(3), 0);
    }

    #[test]
    fn test_reflection_is_involution() {
        for shift in 0..5 {
            let s = SitePermutation::new(5, shift, true);
            for j in 0..5 {
                assert_eq!(s.map_site(s.map_site(j)), j);
            }
        }
    }

    #[test]
    fn test_full_range_starts_with_identity() {
        let range = SitePermutation::full_range(3);
        assert_eq!(range.len(), 6);
        assert!(range[0].is_identity());
    }

    #[test]
    fn test_shift_reduced_modulo_volume() {
        let r = SitePermutation::new(4, 6, false);
        assert_eq!(r.shift(), 2);
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        for shift in 0..6 {
            for reflected in [false, true] {
                let p = SitePermutation::new(6, shift, reflected);
                assert!(p.compose(&p.inverse()).is_identity());
                assert!(p.inverse().compose(&p).is_identity());
            }
        }
    }

    #[test]
    fn test_compose_matches_site_maps() {
        let a = SitePermutation::new(5, 2, true);
        let b = SitePermutation::new(5, 3, false);
        let c = a.compose(&b);
        for j in 0..5 {
            assert_eq!(c.map_site(j), a.map_site(b.map_site(j)));
        }
    }
}
