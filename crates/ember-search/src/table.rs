//! Transposition table keyed by the Zobrist hash.

use std::collections::HashMap;

use ember_core::Move;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact.
    Exact,
    /// The search failed high; the true value is at least `score`.
    Lower,
    /// The search failed low; the true value is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub key: u64,
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Maps position hashes to previously computed search results.
///
/// On a hash collision within a bucket the newest entry wins; a stale shallow
/// entry is never worth keeping over a fresh one from the current search.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TableEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: TableEntry) {
        self.entries.insert(entry.key, entry);
    }

    pub fn find(&self, key: u64) -> Option<&TableEntry> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Square;

    fn entry(key: u64, depth: u32, score: i32) -> TableEntry {
        TableEntry {
            key,
            depth,
            score,
            bound: Bound::Exact,
            best_move: Some(Move::quiet(Square::A1, Square::H8)),
        }
    }

    #[test]
    fn insert_then_find() {
        let mut table = TranspositionTable::new();
        assert!(table.is_empty());

        table.insert(entry(42, 3, 100));
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(42), Some(&entry(42, 3, 100)));
        assert_eq!(table.find(7), None);
    }

    #[test]
    fn newest_entry_wins() {
        let mut table = TranspositionTable::new();
        table.insert(entry(42, 5, 100));
        table.insert(entry(42, 1, -30));

        assert_eq!(table.len(), 1);
        assert_eq!(table.find(42).unwrap().score, -30);
        assert_eq!(table.find(42).unwrap().depth, 1);
    }

    #[test]
    fn clear_empties_the_table() {
        let mut table = TranspositionTable::new();
        table.insert(entry(1, 1, 0));
        table.insert(entry(2, 1, 0));
        table.clear();
        assert!(table.is_empty());
    }
}
