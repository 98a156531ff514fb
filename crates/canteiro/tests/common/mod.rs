//! Shared test utilities for canteiro integration tests.
//!
//! This module provides:
//! - `TestHarness` for sessions backed by a database in a temp directory
//! - Builder patterns for creating project documents programmatically

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
