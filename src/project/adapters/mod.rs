//! Adapter implementations of the project workflow ports.

pub mod memory;
pub mod postgres;
