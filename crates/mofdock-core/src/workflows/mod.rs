//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] data model and the
//! [`crate::engine`] stages into complete procedures.
//!
//! - **Docking Workflow** ([`dock`]) - Places one metal-cluster copy at each
//!   bonding site of a ligand, in order, rejecting any placement that clashes.

pub mod dock;
