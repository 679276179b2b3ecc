//! Project lifecycle management for Groundwork.
//!
//! This module implements the construction-project workflow: the state
//! model and its display phase mapping, explicit transition commands
//! (start, finish, pause, resume, cancel) with compensating undo
//! counterparts, passive status inference from contract evidence, and
//! the legal-record documents emitted as transition side effects. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
