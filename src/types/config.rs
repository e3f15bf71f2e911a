//! Occupation configurations on periodic cells.
//!
//! A configuration is value-like: applying an action produces a new
//! configuration, nothing is mutated in place. Canonicalization happens in
//! two steps, each through the generic engine:
//!
//! 1. global mode maps the configuration into its canonical cell (the point
//!    group acting uniformly across cells, ordered by [`CrossCellOrder`])
//! 2. local mode selects the maximal occupation under the cell's full
//!    permutation range, ordered by [`WithinCellOrder`]
//!
//! The composed result is the database-ready canonical record.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::action::{GroupAction, SitePermutation};
use super::cell::{Cell, PointOp};
use crate::engine::{CanonicalEngine, CanonicalOutcome, EngineError, SymCompare};

/// Occupation values on the sites of a periodic cell.
///
/// The derived `Ord` is `(cell, occupation)` lexicographic; it is the
/// strict total order that store deduplication relies on.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Config {
    cell: Cell,
    occupation: Vec<u8>,
}

impl Config {
    /// Create a configuration.
    ///
    /// # Panics
    ///
    /// Panics when the occupation length does not match the cell volume.
    pub fn new(cell: Cell, occupation: Vec<u8>) -> Self {
        assert_eq!(
            occupation.len(),
            cell.volume(),
            "occupation length must match cell volume"
        );
        Self { cell, occupation }
    }

    /// The cell this configuration is defined on.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Occupation value per site.
    pub fn occupation(&self) -> &[u8] {
        &self.occupation
    }

    /// Number of sites.
    pub fn volume(&self) -> usize {
        self.cell.volume()
    }

    /// Smallest `d` dividing the volume such that the occupation repeats
    /// with period `d`.
    pub fn period(&self) -> usize {
        let n = self.volume();
        for d in 1..n {
            if n % d != 0 {
                continue;
            }
            if (d..n).all(|i| self.occupation[i] == self.occupation[i - d]) {
                return d;
            }
        }
        n
    }

    /// True iff no smaller cell describes this configuration.
    pub fn is_primitive(&self) -> bool {
        self.period() == self.volume()
    }

    /// Re-express on the smallest-period cell.
    pub fn primitive(&self) -> Config {
        let d = self.period();
        Config::new(Cell::of_volume(d), self.occupation[..d].to_vec())
    }

    /// The full permutation range of this configuration's cell, identity
    /// first.
    pub fn permutation_range(&self) -> Vec<SitePermutation> {
        SitePermutation::full_range(self.volume())
    }

    /// Map into the canonical cell (global mode). A basis flip reverses
    /// site order.
    pub fn in_canonical_cell(&self) -> Result<Config, EngineError> {
        let engine = CanonicalEngine::new(&super::cell::LATTICE_POINT_GROUP, CrossCellOrder)?;
        Ok(engine.canonical_form(self))
    }

    /// True iff no permutation of this cell yields a strictly greater
    /// occupation.
    pub fn is_canonical(&self) -> Result<bool, EngineError> {
        let range = self.permutation_range();
        Ok(CanonicalEngine::new(&range, WithinCellOrder)?.is_canonical(self))
    }

    /// Canonical form within this configuration's own cell (local mode).
    pub fn canonical_form(&self) -> Result<Config, EngineError> {
        let range = self.permutation_range();
        Ok(CanonicalEngine::new(&range, WithinCellOrder)?.canonical_form(self))
    }

    /// Reduction outcome within this configuration's own cell.
    pub fn reduce(&self) -> Result<CanonicalOutcome<Config, SitePermutation>, EngineError> {
        let range = self.permutation_range();
        Ok(CanonicalEngine::new(&range, WithinCellOrder)?.reduce(self))
    }

    /// The permutations of this cell fixing the configuration exactly.
    pub fn invariant_subgroup(&self) -> Result<Vec<SitePermutation>, EngineError> {
        let range = self.permutation_range();
        Ok(CanonicalEngine::new(&range, WithinCellOrder)?.invariant_subgroup(self))
    }

    /// Database-ready record: canonical cell, then canonical occupation.
    pub fn canonical_record(&self) -> Result<Config, EngineError> {
        self.in_canonical_cell()?.canonical_form()
    }
}

impl crate::pipeline::DatabaseReady for Config {
    type Cell = Cell;

    fn cell(&self) -> Cell {
        Config::cell(self)
    }

    fn primitive(&self) -> Config {
        Config::primitive(self)
    }

    fn canonical_record(&self) -> Result<Config, EngineError> {
        Config::canonical_record(self)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.cell)?;
        for value in &self.occupation {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl GroupAction<Config> for SitePermutation {
    fn apply(&self, object: &Config) -> Config {
        debug_assert_eq!(self.volume(), object.volume());
        let mut occupation = vec![0u8; object.volume()];
        for (j, &value) in object.occupation.iter().enumerate() {
            occupation[self.map_site(j)] = value;
        }
        Config::new(object.cell, occupation)
    }

    fn inverse(&self) -> Self {
        SitePermutation::inverse(self)
    }

    fn compose(&self, other: &Self) -> Self {
        SitePermutation::compose(self, other)
    }
}

impl GroupAction<Config> for PointOp {
    fn apply(&self, object: &Config) -> Config {
        match self {
            PointOp::Identity => object.clone(),
            PointOp::Flip => {
                let mut occupation = object.occupation.clone();
                occupation.reverse();
                Config::new(GroupAction::<Cell>::apply(self, &object.cell), occupation)
            }
        }
    }

    fn inverse(&self) -> Self {
        *self
    }

    fn compose(&self, other: &Self) -> Self {
        GroupAction::<Cell>::compose(self, other)
    }
}

/// Orders configurations of one fixed cell by occupation alone (local
/// mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct WithinCellOrder;

impl SymCompare<Config> for WithinCellOrder {
    fn compare(&self, a: &Config, b: &Config) -> Ordering {
        debug_assert_eq!(a.volume(), b.volume());
        a.occupation.cmp(&b.occupation)
    }
}

/// Orders configurations across cells: volume first, then signed basis,
/// then occupation (global mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossCellOrder;

impl SymCompare<Config> for CrossCellOrder {
    fn compare(&self, a: &Config, b: &Config) -> Ordering {
        (a.volume(), a.cell.basis(), &a.occupation).cmp(&(
            b.volume(),
            b.cell.basis(),
            &b.occupation,
        ))
    }
}
