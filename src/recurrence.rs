//! The per-cell cost recurrence and the previous/next occurrence lookups it
//! needs to find transposition partners.
//!
//! Each symbol's occurrence list is indexed by a fast non-cryptographic hash
//! map rather than a linear scan, since a large match alphabet would
//! otherwise make every cell's transposition lookup O(position).

use std::rc::Rc;

use rustc_hash::FxHashMap as HashMap;

use crate::cost::Cost;
use crate::matrix::{Idx, Matrix};
use crate::sequence::Symbol;

/// For each symbol, the sorted list of positions at which it occurs in a
/// sequence. Sequences only grow by appending, so each per-symbol list only
/// ever grows at its tail and stays sorted for free.
///
/// Individual per-symbol lists are themselves reference-counted so that
/// appending a new occurrence only clones the one list it touches; every
/// other symbol's list is shared with the previous snapshot.
pub type OccurrenceIndex<S> = Rc<HashMap<S, Rc<Vec<Idx>>>>;

pub fn empty_occurrence_index<S: Symbol>() -> OccurrenceIndex<S> {
    Rc::new(HashMap::default())
}

/// Returns a new index with one more occurrence of `sym` recorded at `pos`.
/// `pos` must be greater than every position already recorded for `sym`.
pub fn record_occurrence<S: Symbol>(
    index: &OccurrenceIndex<S>,
    sym: S,
    pos: Idx,
) -> OccurrenceIndex<S> {
    let mut next = (**index).clone();
    let list = next.entry(sym).or_insert_with(|| Rc::new(Vec::new()));
    let mut owned = (**list).clone();
    debug_assert!(owned.last().map_or(true, |&last| last < pos));
    owned.push(pos);
    *list = Rc::new(owned);
    Rc::new(next)
}

/// The greatest index `< before` at which `sym` occurs, or `-1` if none.
pub fn prev_occurrence<S: Symbol>(index: &OccurrenceIndex<S>, sym: S, before: Idx) -> Idx {
    let Some(list) = index.get(&sym) else {
        return -1;
    };
    let at = list.partition_point(|&p| p < before);
    if at == 0 {
        -1
    } else {
        list[at - 1]
    }
}

/// The smallest index `> after` at which `sym` occurs, or `None` if none.
pub fn next_occurrence<S: Symbol>(index: &OccurrenceIndex<S>, sym: S, after: Idx) -> Option<Idx> {
    let list = index.get(&sym)?;
    let at = list.partition_point(|&p| p <= after);
    list.get(at).copied()
}

/// Computes the cost recurrence for cell `(r, c)`: the minimum of
/// substitution, insertion, deletion, and (for `r > 0 && c > 0`)
/// transposition.
///
/// All four candidates are expressed purely as `matrix.read(..)` lookups, so
/// the usual band-boundary and virtual-cell rules in [`Matrix::read`] already
/// encode which predecessors are legal: a farther, not-yet-resolved diagonal
/// reads as `Infinite` and a true boundary cell reads as its virtual value.
/// That lets the same function serve both ordinary appends and the
/// widen-band direct computation (phase 1) without a separate "is this
/// predecessor allowed" flag.
pub fn candidate_cost<S: Symbol>(
    matrix: &Matrix,
    input: &[S],
    pattern: &[S],
    input_occ: &OccurrenceIndex<S>,
    pattern_occ: &OccurrenceIndex<S>,
    r: Idx,
    c: Idx,
) -> Cost {
    let x = input[r as usize];
    let y = pattern[c as usize];

    let sub = if x == y { Cost::ZERO } else { Cost::ONE };
    let mut best = matrix.read(r - 1, c - 1) + sub;
    best = best.min(matrix.read(r, c - 1) + Cost::ONE);
    best = best.min(matrix.read(r - 1, c) + Cost::ONE);

    if r > 0 && c > 0 {
        let rp = prev_occurrence(input_occ, y, r);
        let cp = prev_occurrence(pattern_occ, x, c);
        let hop = Cost::Finite((r - rp - 1) as u32) + Cost::ONE + Cost::Finite((c - cp - 1) as u32);
        best = best.min(matrix.read(rp - 1, cp - 1) + hop);
    }

    best
}

/// The single forward transposition edge out of a newly-improved cell `(r,
/// c)`, via the next occurrence of the partner characters that would form a
/// transposition.
///
/// `(r, c)` is the transposition predecessor of a target `(r', c')` exactly
/// when `r' > r+1` is the closest input occurrence of `pattern[c+1]` *and*
/// `c' > c+1` is the closest match occurrence of `input[r+1]`, provided
/// nothing closer would make a different row/column the real predecessor
/// instead (checked below by comparing against the next occurrence of the
/// *other* character).
pub fn transposition_target<S: Symbol>(
    input: &[S],
    pattern: &[S],
    input_occ: &OccurrenceIndex<S>,
    pattern_occ: &OccurrenceIndex<S>,
    r: Idx,
    c: Idx,
) -> Option<(Idx, Idx, Cost)> {
    let m = input.len() as Idx;
    let n = pattern.len() as Idx;
    if r + 1 >= m || c + 1 >= n {
        return None;
    }
    let x = input[(r + 1) as usize];
    let y = pattern[(c + 1) as usize];

    // Candidate target row: next place `y` recurs in `input` after r+1.
    let target_r = next_occurrence(input_occ, y, r + 1)?;
    // `r+1` must still be the greatest occurrence of `x` before `target_r`,
    // i.e. `x` may not recur strictly between `r+2` and `target_r - 1`.
    if let Some(next_x) = next_occurrence(input_occ, x, r + 1) {
        if next_x < target_r {
            return None;
        }
    }

    let target_c = next_occurrence(pattern_occ, x, c + 1)?;
    if let Some(next_y) = next_occurrence(pattern_occ, y, c + 1) {
        if next_y < target_c {
            return None;
        }
    }

    let delta = Cost::Finite((target_r - r - 2) as u32) + Cost::ONE + Cost::Finite((target_c - c - 2) as u32);
    Some((target_r, target_c, delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrence_lookup() {
        let idx: OccurrenceIndex<char> = empty_occurrence_index();
        let idx = record_occurrence(&idx, 'a', 0);
        let idx = record_occurrence(&idx, 'b', 1);
        let idx = record_occurrence(&idx, 'a', 3);
        assert_eq!(prev_occurrence(&idx, 'a', 3), 0);
        assert_eq!(prev_occurrence(&idx, 'a', 4), 3);
        assert_eq!(prev_occurrence(&idx, 'c', 10), -1);
        assert_eq!(next_occurrence(&idx, 'a', 0), Some(3));
        assert_eq!(next_occurrence(&idx, 'a', 3), None);
    }
}
