//! Nimber is the value of an impartial game, the size of the equivalent Nim heap.

use crate::value::GameValue;
use auto_ops::impl_op_ex;
use std::fmt::Display;

/// Value of an impartial game position, written `*n`.
///
/// Addition is overloaded to Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying nimber value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Compute the minimum excluded value from a vector of nimbers.
    /// See <https://en.wikipedia.org/wiki/Mex_(mathematics)>
    pub fn mex(mut nimbers: Vec<Self>) -> Self {
        nimbers.sort();
        let mut smallest_missing = 0;
        for n in nimbers {
            if n.0 == smallest_missing {
                smallest_missing += 1;
            } else if n.0 > smallest_missing {
                break;
            }
        }
        Self(smallest_missing)
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// Nim sum is xor
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

// Every nimber is its own negative, so subtraction is addition
impl_op_ex!(-|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(-=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

impl_op_ex!(-|lhs: &Nimber| -> Nimber { *lhs });

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

/// Sprague-Grundy backend: valid for impartial games only, where the value of
/// a position is the mex of its options' values and sums are Nim sums.
impl GameValue for Nimber {
    fn zero() -> Self {
        Self::new(0)
    }

    fn star() -> Self {
        Self::new(1)
    }

    fn new_from_options(options: Vec<Self>) -> Self {
        Self::mex(options)
    }

    fn new_sum(&self, other: &Self) -> Self {
        self + other
    }
}
