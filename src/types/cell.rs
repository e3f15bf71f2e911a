//! Periodic cell descriptors and their point group.
//!
//! A cell's canonical form is computed through the generic engine in global
//! mode: the lattice point group acting on cell descriptors, ordered by
//! basis value. The canonical cell is the maximal image (positive basis).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::action::GroupAction;
use crate::engine::{CanonicalEngine, EngineError, SymCompare};

/// The point group of the one-dimensional lattice, identity first.
pub static LATTICE_POINT_GROUP: [PointOp; 2] = [PointOp::Identity, PointOp::Flip];

/// Descriptor of a one-dimensional periodic cell.
///
/// The basis is signed; negating it describes the same lattice with
/// reversed site order. Volume is `|basis|`. A cell in canonical form has a
/// positive basis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    basis: i64,
}

impl Cell {
    /// Create a cell from a signed basis length.
    ///
    /// # Panics
    ///
    /// Panics on a zero basis; a zero-volume cell has no sites.
    pub fn new(basis: i64) -> Self {
        assert!(basis != 0, "a cell needs a nonzero basis");
        Self { basis }
    }

    /// The canonical cell of the given volume.
    pub fn of_volume(volume: usize) -> Self {
        Self::new(volume as i64)
    }

    /// Signed basis length.
    pub fn basis(&self) -> i64 {
        self.basis
    }

    /// Number of sites.
    pub fn volume(&self) -> usize {
        self.basis.unsigned_abs() as usize
    }

    /// True iff this cell is the maximal image under the point group.
    pub fn is_canonical(&self) -> Result<bool, EngineError> {
        Ok(Self::lattice_engine()?.is_canonical(self))
    }

    /// The canonical cell describing the same lattice.
    pub fn canonical(&self) -> Result<Cell, EngineError> {
        Ok(Self::lattice_engine()?.canonical_form(self))
    }

    /// The point-group operation mapping this cell onto its canonical form.
    pub fn to_canonical(&self) -> Result<PointOp, EngineError> {
        Ok(*Self::lattice_engine()?.to_canonical(self))
    }

    /// Global-mode engine instance: point group plus basis order.
    fn lattice_engine() -> Result<CanonicalEngine<'static, PointOp, BasisOrder>, EngineError> {
        CanonicalEngine::new(&LATTICE_POINT_GROUP, BasisOrder)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell({})", self.basis)
    }
}

/// Point-group operation of the one-dimensional lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointOp {
    /// Leave the basis as is.
    Identity,
    /// Negate the basis, reversing site order.
    Flip,
}

impl GroupAction<Cell> for PointOp {
    fn apply(&self, cell: &Cell) -> Cell {
        match self {
            PointOp::Identity => *cell,
            PointOp::Flip => Cell::new(-cell.basis),
        }
    }

    fn inverse(&self) -> Self {
        *self
    }

    fn compose(&self, other: &Self) -> Self {
        if self == other {
            PointOp::Identity
        } else {
            PointOp::Flip
        }
    }
}

/// Orders cells by signed basis value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasisOrder;

impl SymCompare<Cell> for BasisOrder {
    fn compare(&self, a: &Cell, b: &Cell) -> Ordering {
        a.basis.cmp(&b.basis)
    }
}
