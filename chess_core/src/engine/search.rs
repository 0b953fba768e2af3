use crate::engine::config::EngineConfig;
use crate::engine::eval::StandardEvaluator;
use crate::engine::ordering;
use crate::engine::progress::{ProgressSink, SearchProgress};
use crate::engine::{Evaluator, MoveStrategy, SearchStats};
use crate::logic::board::{Alliance, Board};
use crate::logic::moves::Move;
use crate::logic::notation;
use crate::logic::rules;
use std::sync::Arc;
use std::time::Instant;

/// Depth-bounded minimax with alpha-beta pruning, move ordering and a
/// capped quiescence extension at the horizon. White is always the
/// maximizing side and Black the minimizing side, over the whole tree.
///
/// The search itself is single-threaded synchronous recursion; the only
/// state outside the recursion frames is diagnostic (leaf counter,
/// quiescence extension counter, progress sink).
pub struct AlphaBetaSearch {
    config: Arc<EngineConfig>,
    evaluator: StandardEvaluator,
    boards_evaluated: u64,
    quiescence_count: u32,
    sink: Option<Box<dyn ProgressSink>>,
    stats: SearchStats,
}

impl AlphaBetaSearch {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: StandardEvaluator::new(config.clone()),
            config,
            boards_evaluated: 0,
            quiescence_count: 0,
            sink: None,
            stats: SearchStats::default(),
        }
    }

    /// Registers the destination for per-candidate progress records.
    /// Must be called before `execute`; records go nowhere otherwise.
    pub fn set_progress_sink(&mut self, sink: Box<dyn ProgressSink>) {
        self.sink = Some(sink);
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

    /// One extra ply at the horizon when the position is tactically
    /// unstable: the mover is in check, or either of the last two plies
    /// was a capture. Bounded per root candidate by the config cap;
    /// hitting the cap just ends the extension, never the search.
    fn quiescence_depth(&mut self, to_board: &Board, depth: u32, recent: [bool; 2]) -> u32 {
        if depth == 1 && self.quiescence_count < self.config.max_quiescence {
            let active = recent[0]
                || recent[1]
                || rules::is_in_check(to_board, to_board.side_to_move());
            if active {
                self.quiescence_count += 1;
                return 1;
            }
        }
        depth - 1
    }

    /// `recent` carries whether each of the last two plies on the current
    /// line was a capture, most recent last.
    fn max(
        &mut self,
        board: &Board,
        depth: u32,
        highest: i32,
        lowest: i32,
        recent: [bool; 2],
    ) -> i32 {
        if depth == 0 || Self::is_end_game(board) {
            return self.leaf(board, depth);
        }
        let player = board.current_player();
        let mut moves = player.legal_moves().to_vec();
        ordering::sort_standard(&mut moves);

        let mut current_highest = highest;
        for mv in moves {
            let transition = player.make_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            let to_board = transition.to_board();
            let line = [recent[1], mv.is_attack()];
            let next_depth = self.quiescence_depth(to_board, depth, line);
            let value = self.min(to_board, next_depth, current_highest, lowest, line);
            current_highest = current_highest.max(value);
            if current_highest >= lowest {
                // Beta cutoff: the minimizer above already has better.
                return lowest;
            }
        }
        current_highest
    }

    fn min(
        &mut self,
        board: &Board,
        depth: u32,
        highest: i32,
        lowest: i32,
        recent: [bool; 2],
    ) -> i32 {
        if depth == 0 || Self::is_end_game(board) {
            return self.leaf(board, depth);
        }
        let player = board.current_player();
        let mut moves = player.legal_moves().to_vec();
        ordering::sort_standard(&mut moves);

        let mut current_lowest = lowest;
        for mv in moves {
            let transition = player.make_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            let to_board = transition.to_board();
            let line = [recent[1], mv.is_attack()];
            let next_depth = self.quiescence_depth(to_board, depth, line);
            let value = self.max(to_board, next_depth, highest, current_lowest, line);
            current_lowest = current_lowest.min(value);
            if current_lowest <= highest {
                // Alpha cutoff.
                return highest;
            }
        }
        current_lowest
    }
}

impl MoveStrategy for AlphaBetaSearch {
    fn execute(&mut self, board: &Board, depth: u32) -> Move {
        let start = Instant::now();
        self.boards_evaluated = 0;

        let current = board.current_player();
        let alliance = current.alliance();
        let mut moves = current.legal_moves().to_vec();
        ordering::sort_expensive(board, &mut moves);
        let total_moves = moves.len();

        log::info!("{alliance} thinking with depth {depth}, {total_moves} candidate moves");

        let mut best_move = Move::Null;
        let mut highest_seen = i32::MIN;
        let mut lowest_seen = i32::MAX;
        let child_depth = depth.saturating_sub(1);

        for (index, mv) in moves.into_iter().enumerate() {
            let transition = current.make_move(mv);
            self.quiescence_count = 0;
            if !transition.status().is_done() {
                continue;
            }
            let to_board = transition.to_board();
            let line = [false, mv.is_attack()];

            let mut mates = false;
            if alliance.is_white() {
                let value = self.min(to_board, child_depth, highest_seen, lowest_seen, line);
                if value > highest_seen {
                    highest_seen = value;
                    best_move = mv;
                    mates = to_board.player(Alliance::Black).is_in_checkmate();
                }
            } else {
                let value = self.max(to_board, child_depth, highest_seen, lowest_seen, line);
                if value < lowest_seen {
                    lowest_seen = value;
                    best_move = mv;
                    mates = to_board.player(Alliance::White).is_in_checkmate();
                }
            }

            let record = SearchProgress {
                move_number: index + 1,
                total_moves,
                move_text: notation::render(board, &mv),
                best_text: notation::render(board, &best_move),
                score: if alliance.is_white() {
                    highest_seen
                } else {
                    lowest_seen
                },
                boards_evaluated: self.boards_evaluated,
            };
            log::debug!(
                "({}/{}) {} best {} score {} boards {}",
                record.move_number,
                record.total_moves,
                record.move_text,
                record.best_text,
                record.score,
                record.boards_evaluated
            );
            if let Some(sink) = self.sink.as_mut() {
                sink.publish(&record);
            }

            if mates {
                // Nothing beats an immediate checkmate.
                break;
            }
        }

        self.stats = SearchStats {
            depth,
            boards_evaluated: self.boards_evaluated,
            time_ms: start.elapsed().as_millis() as u64,
        };
        log::info!(
            "{alliance} selects {} [boards evaluated {}, {} ms]",
            notation::render(board, &best_move),
            self.stats.boards_evaluated,
            self.stats.time_ms
        );

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
    use std::sync::mpsc;

    #[test]
    fn test_no_legal_moves_returns_null() {
        // Stalemate: Black to move, no legal moves.
        let board = Board::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut search = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
        assert!(search.execute(&board, 3).is_null());
        assert_eq!(search.boards_evaluated(), 0);
    }

    #[test]
    fn test_search_takes_hanging_queen() {
        // White rook a1 can take the undefended queen on a7.
        let board = Board::from_fen("4k3/q7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut search = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
        let best = search.execute(&board, 2);
        assert_eq!(best.origin(), square_index(7, 0));
        assert_eq!(best.destination(), square_index(1, 0));
        assert!(best.is_attack());
        assert!(search.boards_evaluated() > 0);
    }

    #[test]
    fn test_progress_stream_reports_each_candidate() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let legal = board.current_player().legal_moves().len();

        let (tx, rx) = mpsc::sync_channel(256);
        let mut search = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
        search.set_progress_sink(Box::new(tx));
        let best = search.execute(&board, 2);

        let records: Vec<SearchProgress> = rx.try_iter().collect();
        assert_eq!(records.len(), legal);
        assert!(records
            .iter()
            .enumerate()
            .all(|(i, r)| r.move_number == i + 1 && r.total_moves == legal));
        let last = records.last().unwrap();
        assert_eq!(last.best_text, notation::render(&board, &best));
        assert_eq!(last.boards_evaluated, search.boards_evaluated());
    }

    #[test]
    fn test_stats_recorded() {
        let board = Board::standard();
        let mut search = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
        let _ = search.execute(&board, 2);
        let stats = search.stats();
        assert_eq!(stats.depth, 2);
        assert_eq!(stats.boards_evaluated, search.boards_evaluated());
        assert!(stats.boards_evaluated > 0);
    }
}
