use crate::engine::config::EngineConfig;
use crate::engine::eval::StandardEvaluator;
use crate::engine::ordering;
use crate::engine::{Evaluator, MoveStrategy, SearchStats};
use crate::logic::board::Board;
use crate::logic::moves::Move;
use std::sync::Arc;
use std::time::Instant;

/// Exhaustive depth-bounded minimax: no pruning, no extensions. Far too
/// slow to play with, but it visits every node, which makes it the
/// reference the pruned search is checked against — for a fixed position
/// and depth the two must select the same move.
pub struct MiniMax {
    evaluator: StandardEvaluator,
    boards_evaluated: u64,
    stats: SearchStats,
}

impl MiniMax {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: StandardEvaluator::new(config),
            boards_evaluated: 0,
            stats: SearchStats::default(),
        }
    }

    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    fn leaf(&mut self, board: &Board, depth: u32) -> i32 {
        self.boards_evaluated += 1;
        self.evaluator.evaluate(board, depth)
    }

    fn is_end_game(board: &Board) -> bool {
        let player = board.current_player();
        player.is_in_checkmate() || player.is_in_stalemate()
    }

    fn max(&mut self, board: &Board, depth: u32) -> i32 {
        if depth == 0 || Self::is_end_game(board) {
            return self.leaf(board, depth);
        }
        let player = board.current_player();
        let mut moves = player.legal_moves().to_vec();
        ordering::sort_standard(&mut moves);

        let mut highest = i32::MIN;
        for mv in moves {
            let transition = player.make_move(mv);
            if transition.status().is_done() {
                highest = highest.max(self.min(transition.to_board(), depth - 1));
            }
        }
        highest
    }

    fn min(&mut self, board: &Board, depth: u32) -> i32 {
        if depth == 0 || Self::is_end_game(board) {
            return self.leaf(board, depth);
        }
        let player = board.current_player();
        let mut moves = player.legal_moves().to_vec();
        ordering::sort_standard(&mut moves);

        let mut lowest = i32::MAX;
        for mv in moves {
            let transition = player.make_move(mv);
            if transition.status().is_done() {
                lowest = lowest.min(self.max(transition.to_board(), depth - 1));
            }
        }
        lowest
    }
}

impl MoveStrategy for MiniMax {
    fn execute(&mut self, board: &Board, depth: u32) -> Move {
        let start = Instant::now();
        self.boards_evaluated = 0;

        let current = board.current_player();
        let mut moves = current.legal_moves().to_vec();
        ordering::sort_expensive(board, &mut moves);

        let mut best_move = Move::Null;
        let mut highest_seen = i32::MIN;
        let mut lowest_seen = i32::MAX;
        let child_depth = depth.saturating_sub(1);

        for mv in moves {
            let transition = current.make_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            if current.alliance().is_white() {
                let value = self.min(transition.to_board(), child_depth);
                if value > highest_seen {
                    highest_seen = value;
                    best_move = mv;
                }
            } else {
                let value = self.max(transition.to_board(), child_depth);
                if value < lowest_seen {
                    lowest_seen = value;
                    best_move = mv;
                }
            }
        }

        self.stats = SearchStats {
            depth,
            boards_evaluated: self.boards_evaluated,
            time_ms: start.elapsed().as_millis() as u64,
        };
        best_move
    }

    fn boards_evaluated(&self) -> u64 {
        self.boards_evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::square_index;

    #[test]
    fn test_minimax_takes_hanging_queen() {
        let board = Board::from_fen("4k3/q7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut minimax = MiniMax::new(Arc::new(EngineConfig::default()));
        let best = minimax.execute(&board, 2);
        assert_eq!(best.origin(), square_index(7, 0));
        assert_eq!(best.destination(), square_index(1, 0));
    }

    #[test]
    fn test_minimax_null_on_moveless_root() {
        let board = Board::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut minimax = MiniMax::new(Arc::new(EngineConfig::default()));
        assert!(minimax.execute(&board, 2).is_null());
    }
}
