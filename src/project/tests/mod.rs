//! Unit and service tests for the project workflow.

mod domain_tests;
mod support;
mod undo_tests;
