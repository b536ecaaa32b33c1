//! # mofdock Core Library
//!
//! Sequential rigid docking of metal clusters onto the bonding sites of an
//! organic ligand, the assembly step used when building metal-organic
//! framework fragments.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomicStructure`,
//!   `BondingSite`), structure file I/O, geometry and the numerical minimizer.
//!
//! - **[`engine`]: The Logic Core.** The per-site placement stages, each built
//!   around a pure objective or check, plus configuration, errors and progress
//!   events.
//!
//! - **[`workflows`]: The Public API.** [`workflows::dock::run`] drives the
//!   stages over an ordered list of sites and returns the combined structure.

pub mod core;
pub mod engine;
pub mod workflows;
