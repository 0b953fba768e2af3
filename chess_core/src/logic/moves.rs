use crate::logic::board::{Alliance, Board, Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// One transition between positions. Every variant carries the moved piece
/// (whose `square` is the origin) and enough data to derive the successor
/// board without consulting anything else.
///
/// `Null` is the "no move" sentinel used at search and parsing boundaries;
/// it is never a legal move and applying it is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Quiet {
        piece: Piece,
        to: usize,
    },
    Capture {
        piece: Piece,
        to: usize,
        captured: Piece,
    },
    /// Pawn double step; marks the pawn capturable en passant for one ply.
    PawnJump {
        piece: Piece,
        to: usize,
    },
    Promotion {
        piece: Piece,
        to: usize,
        captured: Option<Piece>,
        promote_to: PieceKind,
    },
    /// The captured pawn sits beside the mover, not on the destination.
    EnPassant {
        piece: Piece,
        to: usize,
        captured: Piece,
    },
    CastleKingSide {
        king: Piece,
        to: usize,
        rook: Piece,
        rook_to: usize,
    },
    CastleQueenSide {
        king: Piece,
        to: usize,
        rook: Piece,
        rook_to: usize,
    },
    Null,
}

impl Move {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::CastleKingSide { .. } | Self::CastleQueenSide { .. })
    }

    pub const fn is_attack(&self) -> bool {
        matches!(
            self,
            Self::Capture { .. }
                | Self::EnPassant { .. }
                | Self::Promotion {
                    captured: Some(_),
                    ..
                }
        )
    }

    pub fn moved_piece(&self) -> Piece {
        match *self {
            Self::Quiet { piece, .. }
            | Self::Capture { piece, .. }
            | Self::PawnJump { piece, .. }
            | Self::Promotion { piece, .. }
            | Self::EnPassant { piece, .. } => piece,
            Self::CastleKingSide { king, .. } | Self::CastleQueenSide { king, .. } => king,
            Self::Null => panic!("the null move has no moved piece"),
        }
    }

    pub fn attacked_piece(&self) -> Option<Piece> {
        match *self {
            Self::Capture { captured, .. } | Self::EnPassant { captured, .. } => Some(captured),
            Self::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    pub fn origin(&self) -> usize {
        self.moved_piece().square
    }

    pub fn destination(&self) -> usize {
        match *self {
            Self::Quiet { to, .. }
            | Self::Capture { to, .. }
            | Self::PawnJump { to, .. }
            | Self::Promotion { to, .. }
            | Self::EnPassant { to, .. }
            | Self::CastleKingSide { to, .. }
            | Self::CastleQueenSide { to, .. } => to,
            Self::Null => panic!("the null move has no destination"),
        }
    }

    pub fn alliance(&self) -> Alliance {
        self.moved_piece().alliance
    }

    /// Derives the successor position. Neither the move nor the source
    /// board is touched; the result is a fresh, fully rebuilt board with
    /// the side to move flipped.
    #[must_use]
    pub fn apply(&self, board: &Board) -> Board {
        let mover = self.moved_piece();
        let captured = self.attacked_piece();

        let mut builder = Board::builder()
            .set_side_to_move(mover.alliance.opposite())
            .set_castled(Alliance::White, board.has_castled(Alliance::White))
            .set_castled(Alliance::Black, board.has_castled(Alliance::Black));

        for piece in board.all_pieces() {
            if piece == mover || Some(piece) == captured {
                continue;
            }
            builder = builder.set_piece(piece);
        }

        match *self {
            Self::Quiet { piece, to }
            | Self::Capture { piece, to, .. }
            | Self::EnPassant { piece, to, .. } => {
                builder = builder.set_piece(piece.moved_to(to));
            }
            Self::PawnJump { piece, to } => {
                let jumped = piece.moved_to(to);
                builder = builder.set_piece(jumped).set_en_passant_pawn(Some(jumped));
            }
            Self::Promotion {
                piece,
                to,
                promote_to,
                ..
            } => {
                builder = builder.set_piece(Piece {
                    kind: promote_to,
                    alliance: piece.alliance,
                    square: to,
                    has_moved: true,
                });
            }
            Self::CastleKingSide {
                king,
                to,
                rook,
                rook_to,
            }
            | Self::CastleQueenSide {
                king,
                to,
                rook,
                rook_to,
            } => {
                builder = builder
                    .set_piece(king.moved_to(to))
                    .set_piece(rook.moved_to(rook_to))
                    .set_castled(king.alliance, true);
            }
            Self::Null => panic!("the null move cannot be applied"),
        }

        builder.build()
    }
}

pub struct MoveFactory;

impl MoveFactory {
    /// Resolves a (origin, destination) tile pair against the side to
    /// move's legal moves. Returns [`Move::Null`] when no legal move
    /// matches or more than one does (promotions need an explicit choice).
    #[must_use]
    pub fn create_move(board: &Board, from: usize, to: usize) -> Move {
        let player = board.current_player();
        let mut candidates = player
            .legal_moves()
            .iter()
            .filter(|mv| mv.origin() == from && mv.destination() == to);
        match (candidates.next(), candidates.next()) {
            (Some(&mv), None) => mv,
            _ => Move::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::square_index;

    fn pawn(alliance: Alliance, square: usize) -> Piece {
        Piece::new(PieceKind::Pawn, alliance, square)
    }

    #[test]
    fn test_apply_quiet_move() {
        let board = Board::standard();
        let knight = board.piece_at(square_index(7, 6)).unwrap();
        let mv = Move::Quiet {
            piece: knight,
            to: square_index(5, 5),
        };

        let next = mv.apply(&board);
        assert!(next.piece_at(square_index(7, 6)).is_none());
        let moved = next.piece_at(square_index(5, 5)).unwrap();
        assert_eq!(moved.kind, PieceKind::Knight);
        assert!(moved.has_moved);
        assert_eq!(next.side_to_move(), Alliance::Black);
        // Source board untouched.
        assert!(board.piece_at(square_index(7, 6)).is_some());
    }

    #[test]
    fn test_pawn_jump_sets_en_passant_pawn() {
        let board = Board::standard();
        let e2_pawn = board.piece_at(square_index(6, 4)).unwrap();
        let next = Move::PawnJump {
            piece: e2_pawn,
            to: square_index(4, 4),
        }
        .apply(&board);

        let marked = next.en_passant_pawn().unwrap();
        assert_eq!(marked.square, square_index(4, 4));

        // The marker lasts one ply: any reply clears it.
        let reply = next.piece_at(square_index(1, 0)).unwrap();
        let after_reply = Move::Quiet {
            piece: reply,
            to: square_index(2, 0),
        }
        .apply(&next);
        assert!(after_reply.en_passant_pawn().is_none());
    }

    #[test]
    fn test_en_passant_capture_removes_pawn_beside() {
        // White pawn e5, black pawn just jumped d7-d5.
        let white = pawn(Alliance::White, square_index(3, 4)).moved_to(square_index(3, 4));
        let black = pawn(Alliance::Black, square_index(3, 3)).moved_to(square_index(3, 3));
        let board = Board::builder()
            .set_piece(Piece::new(PieceKind::King, Alliance::White, square_index(7, 4)))
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, square_index(0, 4)))
            .set_piece(white)
            .set_piece(black)
            .set_en_passant_pawn(Some(black))
            .set_side_to_move(Alliance::White)
            .build();

        let next = Move::EnPassant {
            piece: white,
            to: square_index(2, 3),
            captured: black,
        }
        .apply(&board);

        assert!(next.piece_at(square_index(3, 3)).is_none());
        assert!(next.piece_at(square_index(3, 4)).is_none());
        let capturer = next.piece_at(square_index(2, 3)).unwrap();
        assert_eq!(capturer.alliance, Alliance::White);
        assert_eq!(next.pieces(Alliance::Black).count(), 1);
    }

    #[test]
    fn test_castle_moves_both_pieces() {
        let king = Piece::new(PieceKind::King, Alliance::White, square_index(7, 4));
        let rook = Piece::new(PieceKind::Rook, Alliance::White, square_index(7, 7));
        let board = Board::builder()
            .set_piece(king)
            .set_piece(rook)
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, square_index(0, 4)))
            .build();

        let next = Move::CastleKingSide {
            king,
            to: square_index(7, 6),
            rook,
            rook_to: square_index(7, 5),
        }
        .apply(&board);

        assert_eq!(
            next.piece_at(square_index(7, 6)).unwrap().kind,
            PieceKind::King
        );
        assert_eq!(
            next.piece_at(square_index(7, 5)).unwrap().kind,
            PieceKind::Rook
        );
        assert!(next.piece_at(square_index(7, 4)).is_none());
        assert!(next.piece_at(square_index(7, 7)).is_none());
        assert!(next.has_castled(Alliance::White));
        assert!(!next.has_castled(Alliance::Black));
    }

    #[test]
    fn test_promotion_replaces_pawn() {
        let white = pawn(Alliance::White, square_index(1, 0)).moved_to(square_index(1, 0));
        let board = Board::builder()
            .set_piece(white)
            .set_piece(Piece::new(PieceKind::King, Alliance::White, square_index(7, 4)))
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, square_index(0, 4)))
            .build();

        let next = Move::Promotion {
            piece: white,
            to: square_index(0, 0),
            captured: None,
            promote_to: PieceKind::Queen,
        }
        .apply(&board);

        let queen = next.piece_at(square_index(0, 0)).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.alliance, Alliance::White);
        assert!(next.pieces(Alliance::White).all(|p| p.kind != PieceKind::Pawn));
    }

    #[test]
    fn test_factory_resolves_unique_move() {
        let board = Board::standard();
        let mv = MoveFactory::create_move(&board, square_index(6, 4), square_index(4, 4));
        assert!(matches!(mv, Move::PawnJump { .. }));

        // No white piece can reach e5 from the start.
        let none = MoveFactory::create_move(&board, square_index(6, 4), square_index(3, 4));
        assert!(none.is_null());
    }

    #[test]
    #[should_panic(expected = "null move")]
    fn test_null_move_apply_panics() {
        let board = Board::standard();
        let _ = Move::Null.apply(&board);
    }
}
