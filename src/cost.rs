//! The sentinel cost type used throughout the banded matrix.
//!
//! A plain integer with a `Cost::MAX / 2` sentinel for infinity works but
//! leaves the "saturate, never wrap" discipline implicit. An explicit sum
//! type makes it a compile-time distinction instead.

use std::fmt;
use std::ops::Add;

/// A banded-matrix cell cost: either a finite unsigned count of edits, or the
/// sentinel "unresolved / unreachable" value.
///
/// `Finite` is declared before `Infinite` so the derived `Ord` places every
/// finite cost below `Infinite`, which is the point of the sentinel: larger
/// than any achievable finite cost.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Cost {
    Finite(u32),
    Infinite,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0);
    pub const ONE: Cost = Cost::Finite(1);

    pub fn finite(v: u32) -> Cost {
        Cost::Finite(v)
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// The finite value, or `None` if this cost is the infinite sentinel.
    pub fn value(self) -> Option<u32> {
        match self {
            Cost::Finite(v) => Some(v),
            Cost::Infinite => None,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(v) => write!(f, "{v}"),
            Cost::Infinite => write!(f, "inf"),
        }
    }
}

/// Saturating add: `Infinite + k` is `Infinite` for any `k`, and never wraps.
impl Add for Cost {
    type Output = Cost;
    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a.saturating_add(b)),
            _ => Cost::Infinite,
        }
    }
}

impl PartialEq<u32> for Cost {
    fn eq(&self, other: &u32) -> bool {
        matches!(self, Cost::Finite(v) if v == other)
    }
}

impl PartialOrd<u32> for Cost {
    fn partial_cmp(&self, other: &u32) -> Option<std::cmp::Ordering> {
        match self {
            Cost::Finite(v) => v.partial_cmp(other),
            Cost::Infinite => Some(std::cmp::Ordering::Greater),
        }
    }
}
