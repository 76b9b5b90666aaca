//! The query surface: deriving a heuristic cost, the exact final cost, and a
//! threshold predicate from a snapshot, widening as needed without ever
//! mutating the snapshot the caller holds.

use crate::cost::Cost;
use crate::engine::Snapshot;
use crate::sequence::Symbol;

impl<S: Symbol> Snapshot<S> {
    /// The cost read at `(m-1, n-1)`. An upper bound on the true distance,
    /// exact iff the optimal alignment never leaves the band. Empty-sequence
    /// cases fall out of the virtual boundary in [`crate::matrix::Matrix::read`]
    /// without any special-casing here.
    pub fn heuristic_final_cost(&self) -> Cost {
        self.matrix()
            .read(self.input().len() as isize - 1, self.pattern().len() as isize - 1)
    }

    /// The exact Damerau-Levenshtein distance, widening internally until the
    /// heuristic is no longer an overestimate.
    ///
    /// Termination: once `w >= max(m, n)` the band covers the whole matrix,
    /// so the heuristic is exact; and no Damerau-Levenshtein distance ever
    /// exceeds `max(m, n)`, so `heuristic <= w` is guaranteed to hold by
    /// then at the latest.
    pub fn final_cost(&self) -> u32 {
        let mut snapshot = self.clone();
        loop {
            if let Cost::Finite(v) = snapshot.heuristic_final_cost() {
                if v <= snapshot.w() as u32 {
                    return v;
                }
            }
            snapshot = snapshot.widen();
        }
    }

    /// Whether the true distance is at most `t`, widening internally as
    /// needed. Exact for the predicate, even though `heuristic_final_cost`
    /// alone may only be an upper bound.
    pub fn within_threshold(&self, t: u32) -> bool {
        let mut snapshot = self.clone();
        loop {
            match snapshot.heuristic_final_cost() {
                Cost::Finite(v) if v <= t => return true,
                _ if snapshot.w() as u32 >= t => return false,
                _ => snapshot = snapshot.widen(),
            }
        }
    }
}
