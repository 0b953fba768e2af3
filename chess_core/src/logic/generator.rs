use crate::logic::board::{offset_square, square_row, Alliance, Board, Piece, PieceKind};
use crate::logic::lookup::{StepTables, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::logic::moves::Move;

/// Pseudo-legal move generation: obeys piece movement rules but ignores
/// whether the mover's own king ends up attacked. That filter, and castle
/// moves, belong to [`crate::logic::player::Player`].
pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    pub fn pseudo_legal_moves(&self, board: &Board, alliance: Alliance) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for piece in board.pieces(alliance) {
            self.piece_moves(board, piece, &mut moves);
        }
        moves
    }

    pub fn piece_moves(&self, board: &Board, piece: Piece, moves: &mut Vec<Move>) {
        let tables = StepTables::get();
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(board, piece, moves),
            PieceKind::Knight => {
                Self::step_moves(board, piece, tables.knight_steps(piece.square), moves);
            }
            PieceKind::King => {
                Self::step_moves(board, piece, tables.king_steps(piece.square), moves);
            }
            PieceKind::Bishop => Self::sliding_moves(board, piece, &BISHOP_DIRECTIONS, moves),
            PieceKind::Rook => Self::sliding_moves(board, piece, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => {
                Self::sliding_moves(board, piece, &BISHOP_DIRECTIONS, moves);
                Self::sliding_moves(board, piece, &ROOK_DIRECTIONS, moves);
            }
        }
    }

    fn step_moves(board: &Board, piece: Piece, steps: &[usize], moves: &mut Vec<Move>) {
        for &to in steps {
            match board.piece_at(to) {
                None => moves.push(Move::Quiet { piece, to }),
                Some(occupant) if occupant.alliance != piece.alliance => {
                    moves.push(Move::Capture {
                        piece,
                        to,
                        captured: occupant,
                    });
                }
                Some(_) => {}
            }
        }
    }

    /// Walks each ray outward, stopping at the first occupied tile and
    /// including it only as a capture of the opposing side.
    fn sliding_moves(board: &Board, piece: Piece, directions: &[usize], moves: &mut Vec<Move>) {
        let tables = StepTables::get();
        for &direction in directions {
            for &to in tables.ray(direction, piece.square) {
                match board.piece_at(to) {
                    None => moves.push(Move::Quiet { piece, to }),
                    Some(occupant) => {
                        if occupant.alliance != piece.alliance {
                            moves.push(Move::Capture {
                                piece,
                                to,
                                captured: occupant,
                            });
                        }
                        break;
                    }
                }
            }
        }
    }

    fn pawn_moves(&self, board: &Board, piece: Piece, moves: &mut Vec<Move>) {
        let direction = piece.alliance.direction();
        let promotion_row = piece.alliance.promotion_row();

        if let Some(push) = offset_square(piece.square, direction, 0) {
            if board.piece_at(push).is_none() {
                if square_row(push) == promotion_row {
                    Self::promotions(piece, push, None, moves);
                } else {
                    moves.push(Move::Quiet { piece, to: push });
                    // Double step: first move, from the start rank, through
                    // two empty tiles.
                    if !piece.has_moved
                        && square_row(piece.square) == piece.alliance.pawn_start_row()
                    {
                        if let Some(jump) = offset_square(piece.square, 2 * direction, 0) {
                            if board.piece_at(jump).is_none() {
                                moves.push(Move::PawnJump { piece, to: jump });
                            }
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            let Some(to) = offset_square(piece.square, direction, d_col) else {
                continue;
            };
            match board.piece_at(to) {
                Some(target) if target.alliance != piece.alliance => {
                    if square_row(to) == promotion_row {
                        Self::promotions(piece, to, Some(target), moves);
                    } else {
                        moves.push(Move::Capture {
                            piece,
                            to,
                            captured: target,
                        });
                    }
                }
                Some(_) => {}
                None => {
                    // The diagonal is empty; it is still a capture if the
                    // adjacent enemy pawn just double-stepped past us.
                    if let Some(marked) = board.en_passant_pawn() {
                        if marked.alliance != piece.alliance
                            && Some(marked.square) == offset_square(piece.square, 0, d_col)
                        {
                            moves.push(Move::EnPassant {
                                piece,
                                to,
                                captured: marked,
                            });
                        }
                    }
                }
            }
        }
    }

    fn promotions(piece: Piece, to: usize, captured: Option<Piece>, moves: &mut Vec<Move>) {
        for promote_to in PieceKind::PROMOTION_KINDS {
            moves.push(Move::Promotion {
                piece,
                to,
                captured,
                promote_to,
            });
        }
    }
}
