//! Incremental, diagonally-banded Damerau-Levenshtein edit-distance engine.
//!
//! Ranks candidate match strings against a growing input prefix cheaply: an
//! [`Snapshot`] reuses prior work when either sequence grows by one symbol,
//! confines computation to a narrow band around the main diagonal, and
//! widens that band on demand when a threshold query needs it.

mod cost;
mod engine;
mod matrix;
mod query;
mod recurrence;
mod sequence;

pub use cost::Cost;
pub use engine::Snapshot;
pub use sequence::Symbol;

pub mod prelude {
    pub use crate::{Cost, Snapshot, Symbol};
}

#[cfg(test)]
mod oracle;
