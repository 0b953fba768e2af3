use crate::logic::board::{offset_square, Alliance, Board, PieceKind};
use crate::logic::lookup::{StepTables, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// True when any piece of `by` attacks `square`, probing outward from the
/// target instead of generating the attacker's move list. A pawn's forward
/// diagonals count even when the square is empty, which is what castling
/// path checks need.
pub fn is_attacked(board: &Board, square: usize, by: Alliance) -> bool {
    let tables = StepTables::get();

    for &from in tables.knight_steps(square) {
        if matches!(
            board.piece_at(from),
            Some(piece) if piece.alliance == by && piece.kind == PieceKind::Knight
        ) {
            return true;
        }
    }

    for &from in tables.king_steps(square) {
        if matches!(
            board.piece_at(from),
            Some(piece) if piece.alliance == by && piece.kind == PieceKind::King
        ) {
            return true;
        }
    }

    for &direction in &BISHOP_DIRECTIONS {
        if ray_hits(board, square, direction, by, PieceKind::Bishop) {
            return true;
        }
    }
    for &direction in &ROOK_DIRECTIONS {
        if ray_hits(board, square, direction, by, PieceKind::Rook) {
            return true;
        }
    }

    // A pawn of `by` attacks diagonally forward, so it sits one row behind
    // the target along its own direction of travel.
    for d_col in [-1, 1] {
        if let Some(from) = offset_square(square, -by.direction(), d_col) {
            if matches!(
                board.piece_at(from),
                Some(piece) if piece.alliance == by && piece.kind == PieceKind::Pawn
            ) {
                return true;
            }
        }
    }

    false
}

fn ray_hits(board: &Board, square: usize, direction: usize, by: Alliance, slider: PieceKind) -> bool {
    for &from in StepTables::get().ray(direction, square) {
        if let Some(piece) = board.piece_at(from) {
            return piece.alliance == by
                && (piece.kind == slider || piece.kind == PieceKind::Queen);
        }
    }
    false
}

/// Whether `alliance`'s king is currently attacked. A board with no king
/// for that side is malformed; it reports check rather than masking the
/// state (the fatal path for kingless boards is `Player` construction).
pub fn is_in_check(board: &Board, alliance: Alliance) -> bool {
    board.king_square(alliance).map_or(true, |king_square| {
        is_attacked(board, king_square, alliance.opposite())
    })
}
