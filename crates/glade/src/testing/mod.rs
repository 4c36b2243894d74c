//! # Test Support
//!
//! Utilities for cross-checking the parser against first principles,
//! used by the crate's own property suite and available to downstream
//! test code.

pub mod derivations;

pub use derivations::sentences;
