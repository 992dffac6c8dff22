//! Canonical form of a short game
//!
//! A game is stored as its left and right option lists with duplicate,
//! dominated, and reversible options eliminated at construction. Canonical
//! forms are unique, so structural equality coincides with game equality and
//! the derived `Eq`/`Hash` are the game-theoretic ones.

use crate::{display, numeric::nimber::Nimber, value::GameValue};
use auto_ops::impl_op_ex;
use std::{
    cmp::Ordering,
    collections::VecDeque,
    fmt::{self, Display},
    iter::Sum,
};

/// Left and Right options of a position
///
/// Invariant: both lists are sorted by structural order and hold canonical
/// forms, but the position itself need not be canonical yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Moves {
    left: Vec<CanonicalForm>,
    right: Vec<CanonicalForm>,
}

impl Moves {
    fn sort(&mut self) {
        self.left.sort_by(|lhs, rhs| lhs.structural_cmp(rhs));
        self.right.sort_by(|lhs, rhs| lhs.structural_cmp(rhs));
    }

    fn eliminate_duplicates(&mut self) {
        self.sort();
        self.left.dedup();
        self.right.dedup();
    }

    /// `game <= {self.left | self.right}`, without requiring the position
    /// described by `self` to be canonical
    fn leq_moves(game: &CanonicalForm, moves: &Self) -> bool {
        moves
            .right
            .iter()
            .all(|m_r| !CanonicalForm::leq(m_r, game))
            && game
                .moves
                .left
                .iter()
                .all(|g_l| !Self::moves_leq(moves, g_l))
    }

    /// `{self.left | self.right} <= game`
    fn moves_leq(moves: &Self, game: &CanonicalForm) -> bool {
        moves
            .left
            .iter()
            .all(|m_l| !CanonicalForm::leq(game, m_l))
            && game
                .moves
                .right
                .iter()
                .all(|g_r| !Self::leq_moves(g_r, moves))
    }

    /// Replace every reversible left option `GL` (one with `GLR <= G` for some
    /// right option `GLR` of `GL`) by the left options of that `GLR`,
    /// repeatedly, until no reversible left option remains.
    fn bypass_reversible_moves_l(&self) -> Vec<CanonicalForm> {
        let mut pending: VecDeque<CanonicalForm> = self.left.iter().cloned().collect();
        let mut left = Vec::with_capacity(pending.len());

        while let Some(g_l) = pending.pop_front() {
            match g_l
                .moves
                .right
                .iter()
                .position(|g_lr| Self::leq_moves(g_lr, self))
            {
                Some(idx) => pending.extend(g_l.moves.right[idx].moves.left.iter().cloned()),
                None => left.push(g_l),
            }
        }

        left
    }

    fn bypass_reversible_moves_r(&self) -> Vec<CanonicalForm> {
        let mut pending: VecDeque<CanonicalForm> = self.right.iter().cloned().collect();
        let mut right = Vec::with_capacity(pending.len());

        while let Some(g_r) = pending.pop_front() {
            match g_r
                .moves
                .left
                .iter()
                .position(|g_rl| Self::moves_leq(self, g_rl))
            {
                Some(idx) => pending.extend(g_r.moves.left[idx].moves.right.iter().cloned()),
                None => right.push(g_r),
            }
        }

        right
    }

    /// Drop options another option dominates. Left keeps maximal options,
    /// Right keeps minimal ones. Equal options collapse to one.
    fn eliminate_dominated_moves(
        moves: Vec<CanonicalForm>,
        eliminate_smaller_moves: bool,
    ) -> Vec<CanonicalForm> {
        let dominated = |lhs: &CanonicalForm, rhs: &CanonicalForm| {
            if eliminate_smaller_moves {
                CanonicalForm::leq(lhs, rhs)
            } else {
                CanonicalForm::leq(rhs, lhs)
            }
        };

        let mut kept: Vec<CanonicalForm> = Vec::with_capacity(moves.len());
        for candidate in moves {
            if kept.iter().any(|k| dominated(&candidate, k)) {
                continue;
            }
            kept.retain(|k| !dominated(k, &candidate));
            kept.push(candidate);
        }
        kept
    }

    fn canonicalize(mut self) -> Self {
        self.eliminate_duplicates();

        let left = Self::eliminate_dominated_moves(self.bypass_reversible_moves_l(), true);
        let right = Self::eliminate_dominated_moves(self.bypass_reversible_moves_r(), false);

        let mut canonical = Self { left, right };
        canonical.sort();
        canonical
    }
}

impl Display for Moves {
    /// Print moves using `{GL,...|GR,...}` notation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::braces(f, |f| {
            display::commas(f, &self.left)?;
            write!(f, "|")?;
            display::commas(f, &self.right)
        })
    }
}

/// Canonical game form
///
/// Note that the derived ordering-free comparisons are structural. For the
/// game-theoretic partial order see the [`PartialOrd`] instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalForm {
    moves: Moves,
}

impl CanonicalForm {
    /// The zero game `{|}`, a second player win
    pub const fn zero() -> Self {
        Self {
            moves: Moves {
                left: Vec::new(),
                right: Vec::new(),
            },
        }
    }

    /// The star game `{0|0}`, a first player win
    pub fn star() -> Self {
        Self::new_nimber(Nimber::new(1))
    }

    /// Construct the nimber `*n`, whose options for both players are
    /// `*0, ..., *(n-1)`
    pub fn new_nimber(nimber: Nimber) -> Self {
        let mut options = Vec::with_capacity(nimber.value() as usize);
        for i in 0..nimber.value() {
            options.push(Self::new_nimber(Nimber::new(i)));
        }
        // Already canonical and sorted, no need to run canonicalization
        Self {
            moves: Moves {
                left: options.clone(),
                right: options,
            },
        }
    }

    /// Safe function to construct a game from arbitrary left and right options
    pub fn new_from_moves(left: Vec<Self>, right: Vec<Self>) -> Self {
        Self {
            moves: Moves { left, right }.canonicalize(),
        }
    }

    /// Construct an impartial game, where both players share the option set
    pub fn new_from_options(options: Vec<Self>) -> Self {
        Self::new_from_moves(options.clone(), options)
    }

    /// Left player's options
    pub fn left_moves(&self) -> &[Self] {
        &self.moves.left
    }

    /// Right player's options
    pub fn right_moves(&self) -> &[Self] {
        &self.moves.right
    }

    /// Check if the game is the zero game
    pub fn is_zero(&self) -> bool {
        self.moves.left.is_empty() && self.moves.right.is_empty()
    }

    /// Convert to a nimber if the game is one
    pub fn to_nimber(&self) -> Option<Nimber> {
        if self.moves.left != self.moves.right {
            return None;
        }
        for (i, option) in self.moves.left.iter().enumerate() {
            if option.to_nimber() != Some(Nimber::new(i as u32)) {
                return None;
            }
        }
        Some(Nimber::new(self.moves.left.len() as u32))
    }

    /// Construct a sum of two games `{GL+H, G+HL | GR+H, G+HR}`.
    /// Alias for the `+` operator
    pub fn construct_sum(g: &Self, h: &Self) -> Self {
        if g.is_zero() {
            return h.clone();
        }
        if h.is_zero() {
            return g.clone();
        }

        let mut left = Vec::with_capacity(g.moves.left.len() + h.moves.left.len());
        let mut right = Vec::with_capacity(g.moves.right.len() + h.moves.right.len());

        for g_l in &g.moves.left {
            left.push(Self::construct_sum(g_l, h));
        }
        for h_l in &h.moves.left {
            left.push(Self::construct_sum(g, h_l));
        }
        for g_r in &g.moves.right {
            right.push(Self::construct_sum(g_r, h));
        }
        for h_r in &h.moves.right {
            right.push(Self::construct_sum(g, h_r));
        }

        Self::new_from_moves(left, right)
    }

    /// Construct the negative of a game by swapping and negating the option
    /// lists. Alias for the unary `-` operator
    pub fn construct_negative(&self) -> Self {
        // Negation of a canonical form is canonical, only the sort order of
        // the option lists has to be restored
        let left = self
            .moves
            .right
            .iter()
            .map(Self::construct_negative)
            .collect();
        let right = self
            .moves
            .left
            .iter()
            .map(Self::construct_negative)
            .collect();

        let mut moves = Moves { left, right };
        moves.sort();
        Self { moves }
    }

    /// Less than or equals comparison of two games: `G <= H` iff no left
    /// option of `G` is `>= H` and no right option of `H` is `<= G`
    pub fn leq(lhs_game: &Self, rhs_game: &Self) -> bool {
        // Canonical forms are unique, so identical games are equal
        if lhs_game == rhs_game {
            return true;
        }

        lhs_game
            .moves
            .left
            .iter()
            .all(|lhs_l| !Self::leq(rhs_game, lhs_l))
            && rhs_game
                .moves
                .right
                .iter()
                .all(|rhs_r| !Self::leq(rhs_r, lhs_game))
    }

    /// Total order on the structure of the form, unrelated to the
    /// game-theoretic order. Used to keep option lists in a unique order
    fn structural_cmp(&self, other: &Self) -> Ordering {
        fn cmp_lists(lhs: &[CanonicalForm], rhs: &[CanonicalForm]) -> Ordering {
            for (l, r) in lhs.iter().zip(rhs.iter()) {
                match l.structural_cmp(r) {
                    Ordering::Equal => {}
                    not_equal => return not_equal,
                }
            }
            lhs.len().cmp(&rhs.len())
        }

        cmp_lists(&self.moves.left, &other.moves.left)
            .then_with(|| cmp_lists(&self.moves.right, &other.moves.right))
    }
}

impl PartialOrd for CanonicalForm {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if Self::leq(self, other) {
            Some(Ordering::Less)
        } else if Self::leq(other, self) {
            Some(Ordering::Greater)
        } else {
            // Confused games are incomparable
            None
        }
    }

    fn le(&self, other: &Self) -> bool {
        Self::leq(self, other)
    }

    fn ge(&self, other: &Self) -> bool {
        Self::leq(other, self)
    }
}

impl_op_ex!(+|g: &CanonicalForm, h: &CanonicalForm| -> CanonicalForm { CanonicalForm::construct_sum(g, h) });
impl_op_ex!(+=|g: &mut CanonicalForm, h: &CanonicalForm| { *g = CanonicalForm::construct_sum(g, h) });
impl_op_ex!(-|g: &CanonicalForm| -> CanonicalForm { CanonicalForm::construct_negative(g) });
impl_op_ex!(-|g: &CanonicalForm, h: &CanonicalForm| -> CanonicalForm {
    CanonicalForm::construct_sum(g, &CanonicalForm::construct_negative(h))
});
impl_op_ex!(-=|g: &mut CanonicalForm, h: &CanonicalForm| {
    *g = CanonicalForm::construct_sum(g, &CanonicalForm::construct_negative(h));
});

impl Sum for CanonicalForm {
    fn sum<I: Iterator<Item = CanonicalForm>>(iter: I) -> CanonicalForm {
        iter.fold(CanonicalForm::zero(), |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a CanonicalForm> for CanonicalForm {
    fn sum<I: Iterator<Item = &'a CanonicalForm>>(iter: I) -> CanonicalForm {
        iter.fold(CanonicalForm::zero(), |acc, v| acc + v)
    }
}

impl Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_nimber() {
            Some(nimber) => nimber.fmt(f),
            None => self.moves.fmt(f),
        }
    }
}

impl GameValue for CanonicalForm {
    fn zero() -> Self {
        CanonicalForm::zero()
    }

    fn star() -> Self {
        CanonicalForm::star()
    }

    fn new_from_options(options: Vec<Self>) -> Self {
        CanonicalForm::new_from_options(options)
    }

    fn new_sum(&self, other: &Self) -> Self {
        Self::construct_sum(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> CanonicalForm {
        CanonicalForm::new_from_moves(vec![CanonicalForm::zero()], vec![CanonicalForm::star()])
    }

    fn down() -> CanonicalForm {
        CanonicalForm::new_from_moves(vec![CanonicalForm::star()], vec![CanonicalForm::zero()])
    }

    #[test]
    fn constructs_constants() {
        assert_eq!(CanonicalForm::zero().to_string(), "0");
        assert_eq!(CanonicalForm::star().to_string(), "*");
        assert_eq!(CanonicalForm::new_nimber(Nimber::new(3)).to_string(), "*3");
        assert!(CanonicalForm::zero().is_zero());
        assert!(!CanonicalForm::star().is_zero());
    }

    #[test]
    fn impartial_construction_is_mex() {
        assert_eq!(CanonicalForm::new_from_options(vec![]), CanonicalForm::zero());
        assert_eq!(
            CanonicalForm::new_from_options(vec![CanonicalForm::zero()]),
            CanonicalForm::star()
        );
        // A lone move to star reverses out entirely
        assert_eq!(
            CanonicalForm::new_from_options(vec![CanonicalForm::star()]),
            CanonicalForm::zero()
        );
        assert_eq!(
            CanonicalForm::new_from_options(vec![
                CanonicalForm::zero(),
                CanonicalForm::star(),
            ]),
            CanonicalForm::new_nimber(Nimber::new(2))
        );
    }

    #[test]
    fn nimber_arithmetic() {
        let star = CanonicalForm::star();
        let star_two = CanonicalForm::new_nimber(Nimber::new(2));
        let star_three = CanonicalForm::new_nimber(Nimber::new(3));

        assert_eq!(&star + &star, CanonicalForm::zero());
        assert_eq!(&star_two + &star, star_three);
        assert_eq!(
            (&star_two + &star_two).to_nimber(),
            Some(Nimber::new(0))
        );
    }

    #[test]
    fn sums_cancel() {
        for g in [
            CanonicalForm::star(),
            CanonicalForm::new_nimber(Nimber::new(2)),
            up(),
        ] {
            assert_eq!(&g - &g, CanonicalForm::zero());
        }
    }

    #[test]
    fn negation() {
        assert_eq!(-CanonicalForm::zero(), CanonicalForm::zero());
        assert_eq!(-CanonicalForm::star(), CanonicalForm::star());
        assert_eq!(-up(), down());
        assert_eq!(up() + down(), CanonicalForm::zero());
    }

    #[test]
    fn partial_order() {
        let zero = CanonicalForm::zero();
        let star = CanonicalForm::star();

        assert_eq!(zero.partial_cmp(&zero), Some(Ordering::Equal));
        // Star is confused with zero
        assert_eq!(zero.partial_cmp(&star), None);
        assert_eq!(zero.partial_cmp(&up()), Some(Ordering::Less));
        assert_eq!(down().partial_cmp(&zero), Some(Ordering::Less));
        // Up is confused with star but exceeds zero
        assert_eq!(up().partial_cmp(&star), None);
        assert!(zero <= up());
        assert!(!(star <= zero));
    }

    #[test]
    fn dominated_options_are_removed() {
        // For Left a move to zero dominates a move to down
        let g = CanonicalForm::new_from_moves(
            vec![CanonicalForm::zero(), down()],
            vec![CanonicalForm::zero()],
        );
        assert_eq!(g, CanonicalForm::star());
    }

    #[test]
    fn displays_general_forms_with_braces() {
        assert_eq!(up().to_string(), "{0|*}");
        assert_eq!(down().to_string(), "{*|0}");
    }

    #[test]
    fn sum_via_iterator() {
        let total: CanonicalForm = [
            CanonicalForm::star(),
            CanonicalForm::star(),
            CanonicalForm::new_nimber(Nimber::new(2)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, CanonicalForm::new_nimber(Nimber::new(2)));
    }
}
