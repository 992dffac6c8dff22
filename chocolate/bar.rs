//! Chocolate bar splitting game
//!
//! The game is played on a rectangular bar of chocolate. On their turn a
//! player picks any piece on the table and breaks it along a grid line into
//! two smaller rectangular pieces; both stay in play. A player with no legal
//! break loses. Breaking one piece leaves the rest of the table untouched, so
//! a move in an `n`x`m` piece is worth the disjunctive sum of the two halves
//! it produces.

use crate::{transposition_table::TranspositionTable, value::GameValue};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// Rectangular piece of chocolate
///
/// Invariant: both dimensions are at least 1, enforced by [`Bar::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    rows: u32,
    cols: u32,
}

/// Error of constructing a bar with a zero dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidPosition {
    /// Offending row count
    pub rows: u32,

    /// Offending column count
    pub cols: u32,
}

impl Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid chocolate bar {}x{}: dimensions must be positive",
            self.rows, self.cols
        )
    }
}

impl Error for InvalidPosition {}

/// Verdict of a position under optimal play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The game value is star: whoever moves first wins
    FirstPlayerWins,

    /// The game value is zero: the player forced to move first loses
    SecondPlayerWins,

    /// The game value is neither zero nor star
    Indeterminate,
}

impl Bar {
    /// Create a new bar, rejecting zero dimensions
    #[allow(clippy::missing_errors_doc)]
    pub const fn new(rows: u32, cols: u32) -> Result<Self, InvalidPosition> {
        if rows < 1 || cols < 1 {
            return Err(InvalidPosition { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Get number of rows
    #[inline]
    pub const fn rows(self) -> u32 {
        self.rows
    }

    /// Get number of columns
    #[inline]
    pub const fn cols(self) -> u32 {
        self.cols
    }

    /// List every way to break the bar in two with a single straight cut,
    /// along either axis. A 1x1 piece has no cuts
    pub fn cuts(self) -> Vec<(Self, Self)> {
        let mut cuts = Vec::with_capacity((self.rows + self.cols - 2) as usize);

        for i in 1..self.cols {
            cuts.push((
                Self {
                    rows: self.rows,
                    cols: i,
                },
                Self {
                    rows: self.rows,
                    cols: self.cols - i,
                },
            ));
        }
        for i in 1..self.rows {
            cuts.push((
                Self {
                    rows: i,
                    cols: self.cols,
                },
                Self {
                    rows: self.rows - i,
                    cols: self.cols,
                },
            ));
        }

        cuts
    }

    /// Get the game value of the bar
    ///
    /// Each option is the sum of the two halves of one cut, evaluated
    /// recursively. Sub-bars are looked up in the transposition table first
    /// and every computed value is stored there, so each distinct position is
    /// evaluated at most once per table.
    pub fn game_value<V, TT>(self, transposition_table: &TT) -> V
    where
        V: GameValue,
        TT: TranspositionTable<Self, V>,
    {
        if let Some(value) = transposition_table.lookup_position(&self) {
            return value;
        }

        let cuts = self.cuts();
        let mut options = Vec::with_capacity(cuts.len());
        for (piece, rest) in cuts {
            let piece_value: V = piece.game_value(transposition_table);
            let rest_value: V = rest.game_value(transposition_table);
            options.push(piece_value.new_sum(&rest_value));
        }

        let value = V::new_from_options(options);
        transposition_table.insert_position(self, value.clone());
        value
    }

    /// Classify the bar by its game value: zero means the second player wins,
    /// star means the first player wins, anything else is reported as
    /// [`Outcome::Indeterminate`]
    pub fn outcome<V, TT>(self, transposition_table: &TT) -> Outcome
    where
        V: GameValue,
        TT: TranspositionTable<Self, V>,
    {
        let value: V = self.game_value(transposition_table);
        if value == V::zero() {
            Outcome::SecondPlayerWins
        } else if value == V::star() {
            Outcome::FirstPlayerWins
        } else {
            Outcome::Indeterminate
        }
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Bar {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;
        let rows = u32::arbitrary(g) % 5 + 1;
        let cols = u32::arbitrary(g) % 5 + 1;
        Self { rows, cols }
    }
}
