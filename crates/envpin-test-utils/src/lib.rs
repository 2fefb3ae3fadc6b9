//! Shared test utilities for the envpin workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`index`] — [`StaticIndex`], an in-memory package index that records lookups
//! - [`workspace`] — [`TestWorkspace`], a scratch directory with manifest helpers

pub mod index;
pub mod workspace;

pub use index::{StaticIndex, timestamp_ms};
pub use workspace::TestWorkspace;
