//! Groundwork: construction-administration workflow core.
//!
//! This crate implements the project lifecycle engine of a construction
//! company's administrative system: the enumerated project states, the
//! explicit transition commands and their compensating undo counterparts,
//! the contract-evidence inference that keeps pre-construction status in
//! step with the CRM, and the legal-record side effects each transition
//! emits.
//!
//! # Architecture
//!
//! Groundwork follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, session,
//!   status dictionary, view cache)
//!
//! # Modules
//!
//! - [`project`]: Project lifecycle states, transitions, and legal records

pub mod project;
