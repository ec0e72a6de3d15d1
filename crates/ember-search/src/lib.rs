//! Search: board evaluation, transposition table, and alpha-beta.

mod evaluator;
mod searcher;
mod table;

pub use evaluator::{Evaluator, ShannonEvaluator};
pub use searcher::{SearchResult, Searcher, INFINITY};
pub use table::{Bound, TableEntry, TranspositionTable};
