use crate::logic::board::{Board, PieceKind};
use crate::logic::moves::Move;
use crate::logic::rules;

/// MVV-LVA approximation: captured value minus mover value, offset so any
/// capture outranks any quiet move. Quiet moves order cheapest mover
/// first.
pub fn exchange_score(mv: &Move) -> i32 {
    match mv.attacked_piece() {
        Some(victim) => {
            (victim.value() - mv.moved_piece().value() + PieceKind::King.value()) * 100
        }
        None => PieceKind::King.value() - mv.moved_piece().value(),
    }
}

/// Whether the move puts the opposing king in check. Applies the move, so
/// callers should reserve it for root ordering.
pub fn gives_check(board: &Board, mv: &Move) -> bool {
    let next = mv.apply(board);
    rules::is_in_check(&next, mv.alliance().opposite())
}

/// Interior-node order: castles first, then highest exchange value. Only
/// pruning efficiency depends on this, never the search result.
pub fn sort_standard(moves: &mut [Move]) {
    moves.sort_by(|a, b| {
        b.is_castle()
            .cmp(&a.is_castle())
            .then_with(|| exchange_score(b).cmp(&exchange_score(a)))
    });
}

/// Root order: checking moves first, then castles, then exchange value.
/// The check probe costs one board application per move, so this runs once
/// per search, not per node.
pub fn sort_expensive(board: &Board, moves: &mut Vec<Move>) {
    let mut keyed: Vec<(bool, bool, i32, Move)> = moves
        .iter()
        .map(|&mv| (gives_check(board, &mv), mv.is_castle(), exchange_score(&mv), mv))
        .collect();
    keyed.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| b.2.cmp(&a.2))
    });
    moves.clear();
    moves.extend(keyed.into_iter().map(|(_, _, _, mv)| mv));
}
