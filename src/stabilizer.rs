//! Stabilizer and orbit computation.
//!
//! Thin specialization of the canonical-form engine for consumers that
//! need orbit sizes or the fixing subgroup without a full canonicalization
//! pass. No state of its own; everything is computed from a borrowed
//! engine.

use crate::engine::{CanonicalEngine, SymCompare};
use crate::types::action::GroupAction;

/// The subgroup of actions leaving one object unchanged.
///
/// Actions appear in the order the engine's range enumerates them. For a
/// finite group range the orbit-stabilizer relation holds:
/// `group_order == orbit_size * stabilizer.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stabilizer<A> {
    actions: Vec<A>,
}

impl<A> Stabilizer<A> {
    /// Number of fixing actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True iff no action fixes the object. Never the case for a range
    /// containing the identity.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The fixing actions, in range order.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Iterate over the fixing actions.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.actions.iter()
    }
}

impl<A> IntoIterator for Stabilizer<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

/// The subgroup of the engine's range fixing `object` exactly.
pub fn stabilizer_of<T, A, C>(engine: &CanonicalEngine<'_, A, C>, object: &T) -> Stabilizer<A>
where
    A: GroupAction<T>,
    C: SymCompare<T>,
{
    Stabilizer {
        actions: engine.invariant_subgroup(object),
    }
}

/// All distinct images of `object` under the engine's range, in first-seen
/// order. Distinctness is judged by the engine's comparator.
pub fn orbit_of<T, A, C>(engine: &CanonicalEngine<'_, A, C>, object: &T) -> Vec<T>
where
    A: GroupAction<T>,
    C: SymCompare<T>,
{
    let mut orbit: Vec<T> = Vec::new();
    for action in engine.actions() {
        let image = action.apply(object);
        if !orbit.iter().any(|seen| engine.compare().equal(seen, &image)) {
            orbit.push(image);
        }
    }
    orbit
}

/// Number of distinct images of `object` under the engine's range.
pub fn orbit_size<T, A, C>(engine: &CanonicalEngine<'_, A, C>, object: &T) -> usize
where
    A: GroupAction<T>,
    C: SymCompare<T>,
{
    orbit_of(engine, object).len()
}
