//! # Engine Module
//!
//! The docking engine: the placement stages that take one bonding site from
//! raw ligand coordinates to a committed, clash-checked cluster, together
//! with the configuration, errors and progress events they share.
//!
//! - **Configuration** ([`config`]) - Bond distance and minimizer settings
//! - **Stages** ([`stages`]) - Site geometry, bond-length solve, coordinating-atom
//!   selection, alignment, rotation, clash validation and assembly
//! - **Progress Monitoring** ([`progress`]) - Events for callers that display progress
//! - **Error Handling** ([`error`]) - Input, configuration and steric-clash failures

pub mod config;
pub mod error;
pub mod progress;
pub mod stages;
