//! # Core Module
//!
//! Stateless building blocks shared by the docking engine and its callers.
//!
//! - **Structural Representation** ([`models`]) - Atoms, rigid structures and bonding sites
//! - **File I/O** ([`io`]) - The [`io::traits::StructureFile`] trait and the XYZ format
//! - **Numerics** ([`utils`]) - Geometry helpers, convex-hull vertices and the BFGS minimizer
//! - **Element Data** ([`elements`]) - Atomic numbers and valence-electron counts
//! - **Electron Bookkeeping** ([`electrons`]) - Per-atom electron records from a
//!   population analysis

pub mod electrons;
pub mod elements;
pub mod io;
pub mod models;
pub mod utils;
