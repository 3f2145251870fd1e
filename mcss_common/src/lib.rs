//! Common configuration and shared types for the MCSS workspace.
//!
//! This crate provides the matching policy, job selection and run
//! configuration used by every other crate, plus the reduction scenarios
//! shared by the workspace's tests.

mod config;
pub mod test_cases;

pub use crate::config::*;
pub use crate::test_cases::*;
