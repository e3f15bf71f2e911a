//! Core types for the orbit kernel.

pub mod action;
pub mod cell;
pub mod config;

pub use action::{GroupAction, SitePermutation};
pub use cell::{BasisOrder, Cell, PointOp, LATTICE_POINT_GROUP};
pub use config::{Config, CrossCellOrder, WithinCellOrder};
