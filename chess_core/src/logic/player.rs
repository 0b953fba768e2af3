use crate::logic::board::{square_index, Alliance, Board, Piece, PieceKind};
use crate::logic::generator::MoveGenerator;
use crate::logic::moves::Move;
use crate::logic::rules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveStatus {
    Done,
    Illegal,
    LeavesInCheck,
}

impl MoveStatus {
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Outcome of attempting a move. On rejection the resulting board is the
/// unchanged pre-move board.
#[derive(Debug, Clone)]
pub struct MoveTransition {
    from_board: Board,
    to_board: Board,
    attempted: Move,
    status: MoveStatus,
}

impl MoveTransition {
    pub const fn status(&self) -> MoveStatus {
        self.status
    }

    pub const fn from_board(&self) -> &Board {
        &self.from_board
    }

    pub const fn to_board(&self) -> &Board {
        &self.to_board
    }

    pub const fn attempted_move(&self) -> Move {
        self.attempted
    }
}

/// A side's view of one position: its king, its move sets and its check
/// state, all computed at construction. Players are transient values
/// rebuilt per position; the opponent view is derived from the same board
/// on demand rather than stored.
pub struct Player<'a> {
    board: &'a Board,
    alliance: Alliance,
    king: Piece,
    /// Generator output plus castle moves, before the self-check filter.
    pseudo_moves: Vec<Move>,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl<'a> Player<'a> {
    /// Panics if the board has no king for this side; such a board is
    /// structurally broken and no play is possible on it.
    #[must_use]
    pub fn new(board: &'a Board, alliance: Alliance) -> Self {
        let king = board
            .pieces(alliance)
            .find(|piece| piece.kind == PieceKind::King)
            .unwrap_or_else(|| panic!("invalid board: no {alliance} king"));
        let in_check = rules::is_attacked(board, king.square, alliance.opposite());

        let mut pseudo_moves = MoveGenerator::new().pseudo_legal_moves(board, alliance);
        pseudo_moves.extend(Self::castle_moves(board, alliance, in_check));

        let legal_moves = pseudo_moves
            .iter()
            .copied()
            .filter(|mv| !rules::is_in_check(&mv.apply(board), alliance))
            .collect();

        Self {
            board,
            alliance,
            king,
            pseudo_moves,
            legal_moves,
            in_check,
        }
    }

    pub const fn board(&self) -> &Board {
        self.board
    }

    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub const fn king(&self) -> Piece {
        self.king
    }

    /// Every move of this side that does not leave its own king attacked.
    /// Set semantics; callers must not rely on the iteration order.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.board, self.alliance.opposite())
    }

    pub const fn is_in_check(&self) -> bool {
        self.in_check
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && self.legal_moves.is_empty()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && self.legal_moves.is_empty()
    }

    pub fn is_castled(&self) -> bool {
        self.board.has_castled(self.alliance)
    }

    /// Attempts a move. Moves outside this side's pseudo-legal set are
    /// rejected as `Illegal`; pseudo-legal moves that would expose the
    /// king are rejected as `LeavesInCheck`; everything else completes
    /// with the successor board.
    #[must_use]
    pub fn make_move(&self, mv: Move) -> MoveTransition {
        if mv.is_null() || !self.pseudo_moves.contains(&mv) {
            return MoveTransition {
                from_board: self.board.clone(),
                to_board: self.board.clone(),
                attempted: mv,
                status: MoveStatus::Illegal,
            };
        }

        let to_board = mv.apply(self.board);
        if rules::is_in_check(&to_board, self.alliance) {
            return MoveTransition {
                from_board: self.board.clone(),
                to_board: self.board.clone(),
                attempted: mv,
                status: MoveStatus::LeavesInCheck,
            };
        }

        MoveTransition {
            from_board: self.board.clone(),
            to_board,
            attempted: mv,
            status: MoveStatus::Done,
        }
    }

    /// Castle moves for this side: king and rook unmoved, the tiles
    /// between them empty, and no tile on the king's path (start, transit,
    /// destination) attacked. A player in check gets none, so castling out
    /// of, through or into check is impossible by construction.
    fn castle_moves(board: &Board, alliance: Alliance, in_check: bool) -> Vec<Move> {
        let mut castles = Vec::new();
        if in_check {
            return castles;
        }
        let back = alliance.back_row();
        let king = match board.piece_at(square_index(back, 4)) {
            Some(king)
                if king.kind == PieceKind::King
                    && king.alliance == alliance
                    && !king.has_moved =>
            {
                king
            }
            _ => return castles,
        };
        let enemy = alliance.opposite();
        let rook_ready = |col: usize| match board.piece_at(square_index(back, col)) {
            Some(rook)
                if rook.kind == PieceKind::Rook
                    && rook.alliance == alliance
                    && !rook.has_moved =>
            {
                Some(rook)
            }
            _ => None,
        };

        if let Some(rook) = rook_ready(7) {
            let transit = square_index(back, 5);
            let destination = square_index(back, 6);
            if board.piece_at(transit).is_none()
                && board.piece_at(destination).is_none()
                && !rules::is_attacked(board, transit, enemy)
                && !rules::is_attacked(board, destination, enemy)
            {
                castles.push(Move::CastleKingSide {
                    king,
                    to: destination,
                    rook,
                    rook_to: transit,
                });
            }
        }

        if let Some(rook) = rook_ready(0) {
            let knight_tile = square_index(back, 1);
            let destination = square_index(back, 2);
            let transit = square_index(back, 3);
            if board.piece_at(knight_tile).is_none()
                && board.piece_at(destination).is_none()
                && board.piece_at(transit).is_none()
                && !rules::is_attacked(board, transit, enemy)
                && !rules::is_attacked(board, destination, enemy)
            {
                castles.push(Move::CastleQueenSide {
                    king,
                    to: destination,
                    rook,
                    rook_to: transit,
                });
            }
        }

        castles
    }
}
