//! # Core Models Module
//!
//! Data structures shared by every docking stage.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom: element label and Cartesian position
//! - [`structure`] - Ordered, concatenable collections of atoms (ligands, clusters, results)
//! - [`site`] - Bonding sites, i.e. index lists into a ligand
//!
//! ## Usage
//!
//! ```ignore
//! use mofdock::core::models::{atom::Atom, structure::AtomicStructure};
//!
//! let mut ligand = AtomicStructure::new();
//! ligand.push(Atom::new("O", Point3::new(0.0, 0.0, 0.0)));
//! ```

pub mod atom;
pub mod site;
pub mod structure;
