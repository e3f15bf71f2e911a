//! Generic canonical-form reduction over a finite action range.
//!
//! The canonical form of an object is the maximal element of its orbit
//! under a caller-supplied total order, found by a single linear scan over
//! `{a.apply(o) : a in actions}`. Ties are broken by action slice order
//! (the first maximal image wins), so the slice order must be deterministic
//! for reproducible selection.
//!
//! ## Operating Modes
//!
//! Two modes share this one engine; each is an instantiation, not a
//! subclass:
//!
//! - **global**: abstract symmetry-group actions plus a comparator able to
//!   order objects of different cells (e.g. [`PointOp`] on [`Cell`] with
//!   [`BasisOrder`])
//! - **local**: the permutation range of one fixed cell plus a within-cell
//!   comparator (e.g. [`SitePermutation`] on [`Config`] with
//!   [`WithinCellOrder`])
//!
//! ## Preconditions
//!
//! The comparator must be a strict total order; this is not runtime-checked.
//! An empty action range is rejected at construction: the identity action
//! must always be present, and "no symmetry" must never be represented as
//! an empty range.
//!
//! [`PointOp`]: crate::types::PointOp
//! [`Cell`]: crate::types::Cell
//! [`BasisOrder`]: crate::types::BasisOrder
//! [`SitePermutation`]: crate::types::SitePermutation
//! [`Config`]: crate::types::Config
//! [`WithinCellOrder`]: crate::types::WithinCellOrder

use std::cmp::Ordering;

use crate::types::action::GroupAction;

/// Error type for canonical-form reduction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The supplied action range has no elements. The identity action must
    /// always be present, so this is an invariant violation by the caller,
    /// not an empty-orbit condition.
    #[error("empty action range: the identity action must always be present")]
    EmptyActionRange,
}

/// Total-order comparator used for canonical selection.
///
/// Implementations are small value-like types (the analogue of a comparison
/// policy), so an engine can be instantiated per mode without duplicating
/// the scan logic.
pub trait SymCompare<T> {
    /// Strict total order over objects.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// `a` strictly below `b`.
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Equality under the order. Used for stabilizer membership: the image
    /// must equal the unmodified object, not merely be isomorphic to it.
    fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Result of reducing one object to its canonical representative.
///
/// Invariants: `to_canonical.apply(original)` equals `representative`, and
/// `from_canonical` equals `to_canonical.inverse()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalOutcome<T, A> {
    /// The orbit's maximal element.
    pub representative: T,
    /// The action mapping the original object onto the representative.
    pub to_canonical: A,
    /// The inverse action, mapping the representative back.
    pub from_canonical: A,
}

/// Canonical-form engine over a borrowed action range.
///
/// The engine holds no mutable state and performs no I/O; every method is a
/// pure function of the object, the action slice, and the comparator.
#[derive(Debug, Clone)]
pub struct CanonicalEngine<'a, A, C> {
    actions: &'a [A],
    compare: C,
}

impl<'a, A, C> CanonicalEngine<'a, A, C> {
    /// Create an engine over `actions` with the given comparator.
    ///
    /// Fails with [`EngineError::EmptyActionRange`] when `actions` is
    /// empty.
    pub fn new(actions: &'a [A], compare: C) -> Result<Self, EngineError> {
        if actions.is_empty() {
            return Err(EngineError::EmptyActionRange);
        }
        Ok(Self { actions, compare })
    }

    /// The borrowed action range.
    pub fn actions(&self) -> &'a [A] {
        self.actions
    }

    /// Number of actions in the range (the group order when the range is a
    /// finite group).
    pub fn group_order(&self) -> usize {
        self.actions.len()
    }

    /// The comparator.
    pub fn compare(&self) -> &C {
        &self.compare
    }
}

impl<'a, A, C> CanonicalEngine<'a, A, C> {
    /// True iff no action yields a strictly greater image; i.e. `object` is
    /// a maximal element of its own orbit.
    pub fn is_canonical<T>(&self, object: &T) -> bool
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        !self
            .actions
            .iter()
            .any(|a| self.compare.less(object, &a.apply(object)))
    }

    /// The action whose image of `object` is maximal. Ties are broken by
    /// slice order: the first maximal image wins.
    pub fn to_canonical<T>(&self, object: &T) -> &'a A
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        self.scan(object).1
    }

    /// The inverse of [`Self::to_canonical`].
    pub fn from_canonical<T>(&self, object: &T) -> A
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        self.to_canonical(object).inverse()
    }

    /// The orbit's maximal element.
    pub fn canonical_form<T>(&self, object: &T) -> T
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        self.scan(object).0
    }

    /// Representative plus both mapping actions, from a single scan.
    pub fn reduce<T>(&self, object: &T) -> CanonicalOutcome<T, A>
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        let (representative, winner) = self.scan(object);
        CanonicalOutcome {
            representative,
            to_canonical: winner.clone(),
            from_canonical: winner.inverse(),
        }
    }

    /// True iff both objects reduce to equal canonical forms. Both must
    /// share this engine's acting range; comparability across different
    /// ranges is the caller's responsibility.
    pub fn is_equivalent<T>(&self, a: &T, b: &T) -> bool
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        self.compare
            .equal(&self.canonical_form(a), &self.canonical_form(b))
    }

    /// The subgroup of actions whose image equals `object` itself.
    ///
    /// Actions are returned in range order. For a finite group range the
    /// orbit-stabilizer relation holds: range length equals orbit size
    /// times stabilizer size.
    pub fn invariant_subgroup<T>(&self, object: &T) -> Vec<A>
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        self.actions
            .iter()
            .filter(|a| self.compare.equal(&a.apply(object), object))
            .cloned()
            .collect()
    }

    /// Linear scan keeping the first maximal image and the action producing
    /// it.
    fn scan<T>(&self, object: &T) -> (T, &'a A)
    where
        A: GroupAction<T>,
        C: SymCompare<T>,
    {
        let mut winner = &self.actions[0];
        let mut best = winner.apply(object);
        for action in &self.actions[1..] {
            let image = action.apply(object);
            if self.compare.less(&best, &image) {
                best = image;
                winner = action;
            }
        }
        (best, winner)
    }
}
