//! Negamax alpha-beta search.

use ember_core::{Color, Move};
use ember_engine::Position;
use log::debug;

use crate::evaluator::Evaluator;
use crate::table::{Bound, TableEntry, TranspositionTable};

/// Score bound well beyond any reachable material total.
pub const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Leaf positions evaluated.
    pub nodes: u64,
}

/// Fixed-depth alpha-beta searcher over a pluggable [`Evaluator`].
///
/// The transposition table persists across calls to [`search`](Self::search)
/// so repeated probes of the same game benefit from earlier work; call
/// [`reset`](Self::reset) between unrelated games.
#[derive(Debug)]
pub struct Searcher<E: Evaluator> {
    evaluator: E,
    table: TranspositionTable,
    nodes: u64,
}

impl<E: Evaluator> Searcher<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            table: TranspositionTable::new(),
            nodes: 0,
        }
    }

    /// Searches `depth` plies and returns the best root move with its score
    /// from the point of view of the side to move.
    pub fn search(&mut self, position: &mut Position, depth: u32) -> SearchResult {
        self.nodes = 0;
        let mut best_move = None;
        let mut best_score = -INFINITY;

        for &mov in position.pseudolegal_moves().as_slice() {
            if !position.is_legal_given_pseudolegal(mov) {
                continue;
            }
            position.make_move(mov);
            let score = -self.alpha_beta(position, -INFINITY, INFINITY, depth.saturating_sub(1));
            position.unmake_move();

            debug!("root {mov} scores {score}");
            if score > best_score || best_move.is_none() {
                best_score = score;
                best_move = Some(mov);
            }
        }

        debug!(
            "depth {depth}: best {:?} score {best_score} nodes {}",
            best_move.map(|m| m.to_uci()),
            self.nodes
        );
        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Drops all accumulated table entries.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    fn alpha_beta(&mut self, position: &mut Position, alpha: i32, beta: i32, depth: u32) -> i32 {
        let key = position.zobrist_hash();
        if let Some(entry) = self.table.find(key) {
            if entry.key == key && entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower if entry.score >= beta => return beta,
                    Bound::Upper if entry.score <= alpha => return alpha,
                    _ => {}
                }
            }
        }

        if depth == 0 {
            return self.quiesce(position);
        }

        let mut alpha = alpha;
        let mut bound = Bound::Upper;
        let mut best_move = None;

        for &mov in position.pseudolegal_moves().as_slice() {
            if !position.is_legal_given_pseudolegal(mov) {
                continue;
            }
            position.make_move(mov);
            let score = -self.alpha_beta(position, -beta, -alpha, depth - 1);
            position.unmake_move();

            if score >= beta {
                self.table.insert(TableEntry {
                    key,
                    depth,
                    score: beta,
                    bound: Bound::Lower,
                    best_move: Some(mov),
                });
                return beta;
            }
            if score > alpha {
                alpha = score;
                bound = Bound::Exact;
                best_move = Some(mov);
            }
        }

        self.table.insert(TableEntry {
            key,
            depth,
            score: alpha,
            bound,
            best_move,
        });
        alpha
    }

    /// Stand-pat leaf evaluation, oriented toward the side to move.
    fn quiesce(&mut self, position: &Position) -> i32 {
        self.nodes += 1;
        let score = self.evaluator.evaluate(position);
        match position.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ShannonEvaluator;

    fn searcher() -> Searcher<ShannonEvaluator> {
        Searcher::new(ShannonEvaluator)
    }

    #[test]
    fn captures_a_hanging_queen() {
        let mut position =
            Position::from_fen("7k/8/8/3q4/4P3/8/8/7K w - - 0 1").unwrap();
        for depth in 1..=2 {
            let result = searcher().search(&mut position, depth);
            assert_eq!(result.best_move.unwrap().to_uci(), "e4d5");
            assert!(result.nodes > 0);
        }
    }

    #[test]
    fn black_captures_toward_negative_scores() {
        let mut position =
            Position::from_fen("7k/8/4p3/3Q4/8/8/8/7K b - - 0 1").unwrap();
        let result = searcher().search(&mut position, 1);
        assert_eq!(result.best_move.unwrap().to_uci(), "e6d5");
    }

    #[test]
    fn avoids_losing_the_queen_back() {
        // The pawn on d5 is defended; taking it loses the queen for a pawn.
        let mut position =
            Position::from_fen("7k/8/4p3/3p4/8/8/3Q4/7K w - - 0 1").unwrap();
        let result = searcher().search(&mut position, 2);
        assert_ne!(result.best_move.unwrap().to_uci(), "d2d5");
    }

    #[test]
    fn search_leaves_the_position_untouched() {
        let mut position = Position::startpos();
        let fen = position.to_fen();
        let hash = position.zobrist_hash();
        searcher().search(&mut position, 3);
        assert_eq!(position.to_fen(), fen);
        assert_eq!(position.zobrist_hash(), hash);
        assert_eq!(position.ply(), 0);
    }

    #[test]
    fn deeper_search_reuses_table_entries() {
        let mut position = Position::startpos();
        let mut searcher = searcher();
        let shallow = searcher.search(&mut position, 2);
        let again = searcher.search(&mut position, 2);
        assert_eq!(shallow.score, again.score);
        assert!(again.nodes <= shallow.nodes);
    }

    #[test]
    fn reset_clears_accumulated_state() {
        let mut position = Position::startpos();
        let mut searcher = searcher();
        searcher.search(&mut position, 2);
        searcher.reset();
        let fresh = searcher.search(&mut position, 2);
        assert!(fresh.nodes > 0);
    }
}
