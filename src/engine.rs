//! The distance engine: an immutable `Snapshot` plus the online builder
//! (append-input, append-match) and band-widening operations.
//!
//! Every operation here returns a new `Snapshot`; `self` is never mutated.
//! Rows are shared via `Rc` and only cloned-on-write where an operation
//! actually touches them (`Matrix::write` calls `Rc::make_mut`), so an append
//! or widen only pays for the cells it actually changes plus one `Rc`-clone
//! per untouched row.

use std::collections::VecDeque;

use crate::cost::Cost;
use crate::matrix::{Idx, Matrix};
use crate::recurrence::{
    candidate_cost, empty_occurrence_index, record_occurrence, transposition_target,
    OccurrenceIndex,
};
use crate::sequence::{Sequence, Symbol};

/// An immutable snapshot of the banded incremental Damerau-Levenshtein
/// calculation: the two sequences, the band half-width, and the banded costs.
#[derive(Clone)]
pub struct Snapshot<S> {
    input: Sequence<S>,
    pattern: Sequence<S>,
    matrix: Matrix,
    input_occ: OccurrenceIndex<S>,
    pattern_occ: OccurrenceIndex<S>,
}

impl<S: Symbol> Snapshot<S> {
    /// An empty snapshot with the default band half-width of 1.
    pub fn new() -> Self {
        Self::with_band(1)
    }

    /// An empty snapshot with the given band half-width.
    pub fn with_band(w: usize) -> Self {
        Snapshot {
            input: Sequence::new(),
            pattern: Sequence::new(),
            matrix: Matrix::empty(w),
            input_occ: empty_occurrence_index(),
            pattern_occ: empty_occurrence_index(),
        }
    }

    pub fn input(&self) -> &[S] {
        self.input.as_slice()
    }

    pub fn pattern(&self) -> &[S] {
        self.pattern.as_slice()
    }

    pub fn w(&self) -> usize {
        self.matrix.w()
    }

    pub(crate) fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    fn m(&self) -> Idx {
        self.input.len() as Idx
    }

    fn n(&self) -> Idx {
        self.pattern.len() as Idx
    }

    /// Appends `x` to the input sequence: adds one new row, populated only
    /// for the columns the current band reaches.
    pub fn append_input(&self, x: S) -> Self {
        let input = self.input.appended(x);
        let r = self.m(); // the new row's index, i.e. the old length
        let input_occ = record_occurrence(&self.input_occ, x, r);

        let mut matrix = self.matrix.clone();
        matrix.push_row();

        let w = matrix.w() as Idx;
        let c_lo = (r - w).max(0);
        let c_hi = (r + w).min(self.n() - 1);
        let mut c = c_lo;
        while c <= c_hi {
            let v = candidate_cost(
                &matrix,
                input.as_slice(),
                self.pattern.as_slice(),
                &input_occ,
                &self.pattern_occ,
                r,
                c,
            );
            matrix.write(r, c, v);
            c += 1;
        }

        Snapshot {
            input,
            pattern: self.pattern.clone(),
            matrix,
            input_occ,
            pattern_occ: self.pattern_occ.clone(),
        }
    }

    /// Appends `y` to the match sequence. Symmetric to [`Self::append_input`]:
    /// writes into already-allocated row slots, no row is added since `m`
    /// does not change.
    pub fn append_match(&self, y: S) -> Self {
        let pattern = self.pattern.appended(y);
        let c = self.n(); // the new column's index, i.e. the old length
        let pattern_occ = record_occurrence(&self.pattern_occ, y, c);

        let mut matrix = self.matrix.clone();
        let w = matrix.w() as Idx;
        let r_lo = (c - w).max(0);
        let r_hi = (c + w).min(self.m() - 1);
        let mut r = r_lo;
        while r <= r_hi {
            let v = candidate_cost(
                &matrix,
                self.input.as_slice(),
                pattern.as_slice(),
                &self.input_occ,
                &pattern_occ,
                r,
                c,
            );
            matrix.write(r, c, v);
            r += 1;
        }

        Snapshot {
            input: self.input.clone(),
            pattern,
            matrix,
            input_occ: self.input_occ.clone(),
            pattern_occ,
        }
    }

    /// Produces a snapshot at half-width `w + 1` without recomputing any cell
    /// already resolved.
    ///
    /// Phase 1 computes the two new outer diagonals row by row, in
    /// increasing row order: each row's new cells read their substitution
    /// predecessor at the previous row's new cells, so earlier rows must
    /// already be in place (this falls out of the offset arithmetic — see
    /// `DESIGN.md` — rather than needing a special case). Phase 2 then
    /// relaxes outward from every newly-written cell with a worklist, so
    /// deep call stacks are avoided even for long sequences.
    pub fn widen(&self) -> Self {
        let mut matrix = self.matrix.widened();
        let new_w = matrix.w() as Idx;
        let m = self.m();
        let n = self.n();

        let mut dirty: VecDeque<(Idx, Idx)> = VecDeque::new();

        let mut r = 0;
        while r < m {
            for c in [r - new_w, r + new_w] {
                if c < 0 || c >= n {
                    continue;
                }
                let v = candidate_cost(
                    &matrix,
                    self.input.as_slice(),
                    self.pattern.as_slice(),
                    &self.input_occ,
                    &self.pattern_occ,
                    r,
                    c,
                );
                matrix.write(r, c, v);
                if v.is_finite() {
                    dirty.push_back((r, c));
                }
            }
            r += 1;
        }

        self.propagate(&mut matrix, dirty);

        Snapshot {
            input: self.input.clone(),
            pattern: self.pattern.clone(),
            matrix,
            input_occ: self.input_occ.clone(),
            pattern_occ: self.pattern_occ.clone(),
        }
    }

    /// Phase 2 of widening: min-relaxation driven by a worklist of cells that
    /// just improved. A neighbor is only ever pushed back when its value
    /// strictly decreases, which — since costs are bounded below by zero —
    /// guarantees termination.
    fn propagate(&self, matrix: &mut Matrix, mut dirty: VecDeque<(Idx, Idx)>) {
        let m = self.m();
        let n = self.n();
        let w = matrix.w() as Idx;
        let input = self.input.as_slice();
        let pattern = self.pattern.as_slice();
        let in_band = |r: Idx, c: Idx| r >= 0 && r < m && c >= 0 && c < n && (r - c).abs() <= w;

        while let Some((r, c)) = dirty.pop_front() {
            let v = matrix.read(r, c);

            // Insertion target: (r, c+1).
            relax(matrix, &mut dirty, in_band, r, c + 1, v + Cost::ONE);
            // Deletion target: (r+1, c).
            relax(matrix, &mut dirty, in_band, r + 1, c, v + Cost::ONE);
            // Substitution target: (r+1, c+1).
            if r + 1 < m && c + 1 < n {
                let sub = if input[(r + 1) as usize] == pattern[(c + 1) as usize] {
                    Cost::ZERO
                } else {
                    Cost::ONE
                };
                relax(matrix, &mut dirty, in_band, r + 1, c + 1, v + sub);
            }
            // Transposition target: the next occurrence of the partner characters.
            if let Some((tr, tc, delta)) =
                transposition_target(input, pattern, &self.input_occ, &self.pattern_occ, r, c)
            {
                relax(matrix, &mut dirty, in_band, tr, tc, v + delta);
            }
        }
    }
}

impl<S: Symbol> Default for Snapshot<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `cand` to `(r, c)` and re-queues it, but only when `(r, c)` is
/// still inside the band and `cand` is a strict improvement.
fn relax(
    matrix: &mut Matrix,
    dirty: &mut VecDeque<(Idx, Idx)>,
    in_band: impl Fn(Idx, Idx) -> bool,
    r: Idx,
    c: Idx,
    cand: Cost,
) {
    if in_band(r, c) && cand < matrix.read(r, c) {
        matrix.write(r, c, cand);
        dirty.push_back((r, c));
    }
}
