use crate::logic::board::{square_col, square_index, square_row, Board, PieceKind};
use crate::logic::moves::Move;

pub fn square_name(square: usize) -> String {
    let file = (b'a' + square_col(square) as u8) as char;
    let rank = 8 - square_row(square);
    format!("{file}{rank}")
}

pub fn parse_square(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let col = (file as i32) - ('a' as i32);
    let rank = rank.to_digit(10)?;
    if !(0..8).contains(&col) || !(1..=8).contains(&rank) {
        return None;
    }
    Some(square_index(8 - rank as usize, col as usize))
}

/// Canonical short-form rendering of a move in the position it is played
/// from: piece letter plus destination, a file letter when another piece
/// of the same kind could reach the same tile, `x` for captures,
/// `O-O`/`O-O-O` for castles and `=K` suffixes for promotions.
pub fn render(board: &Board, mv: &Move) -> String {
    match *mv {
        Move::Null => "--".to_string(),
        Move::CastleKingSide { .. } => "O-O".to_string(),
        Move::CastleQueenSide { .. } => "O-O-O".to_string(),
        Move::Quiet { piece, to } | Move::PawnJump { piece, to } => {
            if piece.kind == PieceKind::Pawn {
                square_name(to)
            } else {
                format!(
                    "{}{}{}",
                    piece.kind.letter(),
                    disambiguation_file(board, mv),
                    square_name(to)
                )
            }
        }
        Move::Capture { piece, to, .. } => {
            if piece.kind == PieceKind::Pawn {
                format!("{}x{}", file_char(piece.square), square_name(to))
            } else {
                format!(
                    "{}{}x{}",
                    piece.kind.letter(),
                    disambiguation_file(board, mv),
                    square_name(to)
                )
            }
        }
        Move::EnPassant { piece, to, .. } => {
            format!("{}x{}", file_char(piece.square), square_name(to))
        }
        Move::Promotion {
            piece,
            to,
            captured,
            promote_to,
        } => {
            let body = if captured.is_some() {
                format!("{}x{}", file_char(piece.square), square_name(to))
            } else {
                square_name(to)
            };
            format!("{body}={}", promote_to.letter())
        }
    }
}

fn file_char(square: usize) -> char {
    (b'a' + square_col(square) as u8) as char
}

/// The origin file, when a second piece of the same kind also has a legal
/// move to the same destination.
fn disambiguation_file(board: &Board, mv: &Move) -> String {
    let player = board.player(mv.alliance());
    let ambiguous = player.legal_moves().iter().any(|other| {
        other.origin() != mv.origin()
            && other.destination() == mv.destination()
            && other.moved_piece().kind == mv.moved_piece().kind
    });
    if ambiguous {
        file_char(mv.origin()).to_string()
    } else {
        String::new()
    }
}
