use crate::logic::board::Board;
use crate::logic::moves::Move;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod minimax;
pub mod ordering;
pub mod progress;
pub mod search;


/// Scores a position from White's perspective: positive favors White,
/// negative favors Black. `depth` is the remaining search depth, used to
/// prefer faster mates. Implementations must be pure: equal boards and
/// depths always produce equal scores.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32;
}

/// A move-selection strategy. Returns [`Move::Null`] when the side to
/// move has no legal move; callers branch to their game-over handling.
pub trait MoveStrategy {
    fn execute(&mut self, board: &Board, depth: u32) -> Move;

    /// Leaf evaluations performed by the last `execute` call.
    fn boards_evaluated(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u32,
    pub boards_evaluated: u64,
    pub time_ms: u64,
}
