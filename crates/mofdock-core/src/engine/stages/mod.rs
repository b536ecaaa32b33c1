//! The per-site placement pipeline.
//!
//! Each site runs through the stages in order: [`site_geometry`] finds the
//! approach direction, [`bond_position`] solves where the coordinating atom
//! goes, [`coordinating_atom`] and [`alignment`] put the cluster there,
//! [`rotation`] orients it, [`validation`] rejects clashes and
//! [`assembly`] commits the result. The objectives are free functions so
//! they can be evaluated and tested on their own.

pub mod alignment;
pub mod assembly;
pub mod bond_position;
pub mod coordinating_atom;
pub mod rotation;
pub mod site_geometry;
pub mod validation;
