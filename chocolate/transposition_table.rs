//! Thread safe transposition table for game values

use append_only_vec::AppendOnlyVec;
use dashmap::DashMap;
use std::{fmt::Debug, hash::Hash};

/// Interface of a transposition table
///
/// Tables are insert-only. Inserting the same position twice must be harmless:
/// values are derived deterministically from positions, so last-writer-wins
/// keeps the table correct.
pub trait TranspositionTable<G, V> {
    /// Lookup a position value if exists
    fn lookup_position(&self, position: &G) -> Option<V>;

    /// Save position and its game value
    fn insert_position(&self, position: G, value: V);
}

/// Transposition table (cache) of game positions and their values.
///
/// Equal values are stored once and shared between positions.
pub struct ParallelTranspositionTable<G, V> {
    values: AppendOnlyVec<V>,
    positions: DashMap<G, usize, ahash::RandomState>,
    known_values: DashMap<V, usize, ahash::RandomState>,
}

impl<G, V> ParallelTranspositionTable<G, V>
where
    G: Eq + Hash,
    V: Eq + Hash,
{
    /// Create new empty transposition table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<G, V> Debug for ParallelTranspositionTable<G, V>
where
    G: Debug + Hash + Eq,
    V: Debug + Hash + Eq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ParallelTranspositionTable {
            values,
            positions,
            known_values,
        } = self;

        f.debug_struct("ParallelTranspositionTable")
            .field("values", values)
            .field("positions", positions)
            .field("known_values", known_values)
            .finish()
    }
}

impl<G, V> Default for ParallelTranspositionTable<G, V>
where
    G: Hash + Eq,
    V: Hash + Eq,
{
    #[inline]
    fn default() -> Self {
        Self {
            values: AppendOnlyVec::new(),
            positions: DashMap::default(),
            known_values: DashMap::default(),
        }
    }
}

impl<G, V> TranspositionTable<G, V> for ParallelTranspositionTable<G, V>
where
    G: Eq + Hash,
    V: Clone + Eq + Hash,
{
    #[inline]
    fn lookup_position(&self, position: &G) -> Option<V> {
        self.positions
            .get(position)
            .map(|id| self.values[*id].clone())
    }

    #[inline]
    fn insert_position(&self, position: G, value: V) {
        if let Some(known) = self.known_values.get(&value) {
            self.positions.insert(position, *known);
        } else {
            let inserted = self.values.push(value.clone());
            self.known_values.insert(value, inserted);
            self.positions.insert(position, inserted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::nimber::Nimber;

    #[test]
    fn lookup_returns_inserted_value() {
        let table = ParallelTranspositionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.lookup_position(&(1u32, 1u32)), None);

        table.insert_position((1, 1), Nimber::new(0));
        table.insert_position((1, 2), Nimber::new(1));
        assert_eq!(table.lookup_position(&(1, 1)), Some(Nimber::new(0)));
        assert_eq!(table.lookup_position(&(1, 2)), Some(Nimber::new(1)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn reinsert_keeps_table_size() {
        let table = ParallelTranspositionTable::new();
        table.insert_position((2u32, 2u32), Nimber::new(1));
        table.insert_position((2, 2), Nimber::new(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn equal_values_are_shared() {
        let table = ParallelTranspositionTable::new();
        for cols in 1..=8u32 {
            table.insert_position((1u32, cols), Nimber::new((cols - 1) % 2));
        }
        assert_eq!(table.len(), 8);
        // Two distinct values backing eight positions
        assert_eq!(table.values.len(), 2);
    }
}
