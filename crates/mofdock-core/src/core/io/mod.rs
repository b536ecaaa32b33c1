//! Provides input/output functionality for structure file formats.
//!
//! Docking itself works on in-memory structures only; this module reads the
//! ligand and metal-cluster templates from disk and writes combined results
//! back out through a unified trait-based interface.

pub mod traits;
pub mod xyz;
