//! # Earley Chart Engine
//!
//! Chart-based recognition for arbitrary context-free grammars, including
//! ambiguous, left-recursive and ε-heavy ones. The engine fills one item
//! set per input position with a scanner/predictor/completer worklist;
//! the filled [`Chart`] is what the forest builder reads completed items
//! from.
//!
//! Recognition never fails with an error: an input outside the language
//! simply yields `false`.

mod chart;
mod recognize;

pub use chart::{Chart, Item, ItemSet};
pub use recognize::recognize;
