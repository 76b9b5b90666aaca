//! The banded sparse cost matrix.
//!
//! A dense `Vec` per row plus an offset turns a logical column into an array
//! index, rather than a `HashMap`-backed diagonal map — the band here is a
//! fixed width per row, so a plain offset is simpler and faster than hashing,
//! which only earns its keep for genuinely sparse storage.

use std::rc::Rc;

use crate::cost::Cost;

/// Index type for rows/columns, signed so the virtual boundary (`-1`) is a
/// plain value rather than a special case bolted on top of `usize`.
pub type Idx = isize;

/// Banded storage for cost values of positions `(r, c)` with `0 <= r < m`,
/// `0 <= c < n`, `|r - c| <= w`. Virtual boundary cells and out-of-band reads
/// are not stored; see [`Matrix::read`].
#[derive(Clone)]
pub struct Matrix {
    w: usize,
    /// One dense row per input index, each of length `2w + 1`. Logical column
    /// `c` lives at offset `c - r + w`. Rows are reference-counted so that
    /// `append_match`/widen only clone the rows they actually touch.
    rows: Vec<Rc<Vec<Cost>>>,
}

impl Matrix {
    pub fn empty(w: usize) -> Self {
        Matrix {
            w,
            rows: Vec::new(),
        }
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn offset(&self, r: Idx, c: Idx) -> Option<usize> {
        let off = c - r + self.w as Idx;
        if off < 0 || off > 2 * self.w as Idx {
            None
        } else {
            Some(off as usize)
        }
    }

    /// Reads `cost(r, c)`, including the virtual boundary frame. Always
    /// legal: out-of-range indices simply read as `+inf`.
    pub fn read(&self, r: Idx, c: Idx) -> Cost {
        if r == -1 && c >= -1 {
            return Cost::Finite((c + 1) as u32);
        }
        if c == -1 && r >= -1 {
            return Cost::Finite((r + 1) as u32);
        }
        if r < -1 || c < -1 {
            return Cost::Infinite;
        }
        let Some(off) = self.offset(r, c) else {
            return Cost::Infinite;
        };
        match self.rows.get(r as usize) {
            Some(row) => row.get(off).copied().unwrap_or(Cost::Infinite),
            None => Cost::Infinite,
        }
    }

    /// Overwrites `cost(r, c)`. Precondition: `|r - c| <= w`, `0 <= r <
    /// row_count()`, and the column fits the row's band. Violating this is a
    /// programmer error and panics.
    pub fn write(&mut self, r: Idx, c: Idx, v: Cost) {
        let off = self
            .offset(r, c)
            .unwrap_or_else(|| panic!("matrix write: ({r}, {c}) outside band of width {}", self.w));
        let row = self
            .rows
            .get_mut(r as usize)
            .unwrap_or_else(|| panic!("matrix write: row {r} out of range ({} rows)", self.rows.len()));
        Rc::make_mut(row)[off] = v;
    }

    /// Appends a new, fully-unresolved row (used by `append_input`).
    pub fn push_row(&mut self) {
        self.rows.push(Rc::new(vec![Cost::Infinite; 2 * self.w + 1]));
    }

    /// Returns a new matrix at half-width `w + 1`: every row gets one new slot
    /// on each end, both initialized to `Infinite`. Existing cells are copied,
    /// never recomputed, satisfying the "monotone under widening" invariant
    /// (copies can only be improved afterwards, never degraded).
    pub fn widened(&self) -> Matrix {
        let new_w = self.w + 1;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut new_row = Vec::with_capacity(2 * new_w + 1);
                new_row.push(Cost::Infinite);
                new_row.extend_from_slice(row);
                new_row.push(Cost::Infinite);
                Rc::new(new_row)
            })
            .collect();
        Matrix { w: new_w, rows }
    }
}
