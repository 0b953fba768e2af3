use chess_core::engine::config::EngineConfig;
use chess_core::engine::search::AlphaBetaSearch;
use chess_core::engine::MoveStrategy;
use chess_core::logic::board::{square_index, Board};
use std::sync::Arc;

fn solve_mate(fen: &str, depth: u32, from: (usize, usize), to: (usize, usize)) {
    let board = Board::from_fen(fen).expect("test FEN must parse");
    let mut engine = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
    let best = engine.execute(&board, depth);

    assert_eq!(best.origin(), square_index(from.0, from.1), "{fen}");
    assert_eq!(best.destination(), square_index(to.0, to.1), "{fen}");

    let transition = board.current_player().make_move(best);
    assert!(transition.status().is_done());
    assert!(
        transition.to_board().current_player().is_in_checkmate(),
        "{fen}: chosen move does not mate"
    );
}

#[test]
fn test_back_rank_mate_in_one_as_white() {
    // Ra8#: the king's escape row is walled off by its own pawns.
    solve_mate("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", 2, (7, 0), (0, 0));
}

#[test]
fn test_ladder_mate_in_one_as_black() {
    // Rb1#: the a2 rook seals the second row.
    solve_mate("4k3/1r6/8/8/8/8/r7/4K3 b - - 0 1", 2, (1, 1), (7, 1));
}

#[test]
fn test_queen_back_rank_mate_in_one() {
    // Qe8#: the retreat square h8 stays covered once the king leaves g8.
    solve_mate("6k1/5ppp/8/8/8/8/8/4Q1K1 w - - 0 1", 2, (7, 4), (0, 4));
}

#[test]
fn test_ladder_mate_in_two_forced() {
    // Two rooks ladder the bare king: after the cutoff move, every black
    // reply allows an immediate mate.
    let board = Board::from_fen("4k3/8/R7/1R6/8/8/8/4K3 w - - 0 1").unwrap();
    let mut engine = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));

    let first = engine.execute(&board, 3);
    let after_first = board.current_player().make_move(first);
    assert!(after_first.status().is_done());
    let cutoff_board = after_first.to_board();
    assert!(!cutoff_board.current_player().is_in_checkmate());

    let replies: Vec<_> = cutoff_board.current_player().legal_moves().to_vec();
    assert!(!replies.is_empty());
    for reply in replies {
        let after_reply = cutoff_board.current_player().make_move(reply);
        assert!(after_reply.status().is_done());

        let mut finisher = AlphaBetaSearch::new(Arc::new(EngineConfig::default()));
        let mate = finisher.execute(after_reply.to_board(), 2);
        let end = after_reply.to_board().current_player().make_move(mate);
        assert!(end.status().is_done());
        assert!(
            end.to_board().current_player().is_in_checkmate(),
            "no mate after reply {reply:?}"
        );
    }
}
