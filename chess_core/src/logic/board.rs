use crate::logic::player::Player;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const NUM_TILES: usize = 64;
pub const TILES_PER_ROW: usize = 8;

/// Tile 0 is a8 (top-left from White's seat), tile 63 is h1.
/// Rows run down the board, so White advances toward lower indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }

    /// Row delta of a forward pawn step.
    pub const fn direction(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub const fn promotion_row(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    pub const fn pawn_start_row(self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub const fn back_row(self) -> usize {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in the order promotion moves are generated.
    pub const PROMOTION_KINDS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    pub const fn value(self) -> i32 {
        match self {
            Self::Pawn => 100,
            Self::Knight | Self::Bishop => 300,
            Self::Rook => 500,
            Self::Queen => 900,
            Self::King => 10_000,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// A piece is a plain value; equality is structural over all four fields,
/// so a piece that has moved never compares equal to its unmoved twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub alliance: Alliance,
    pub square: usize,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, alliance: Alliance, square: usize) -> Self {
        Self {
            kind,
            alliance,
            square,
            has_moved: false,
        }
    }

    /// The same piece after relocating; the first-move flag never reverts.
    #[must_use]
    pub const fn moved_to(self, square: usize) -> Self {
        Self {
            kind: self.kind,
            alliance: self.alliance,
            square,
            has_moved: true,
        }
    }

    pub const fn value(self) -> i32 {
        self.kind.value()
    }
}

pub const fn square_row(square: usize) -> usize {
    square / TILES_PER_ROW
}

pub const fn square_col(square: usize) -> usize {
    square % TILES_PER_ROW
}

pub const fn square_index(row: usize, col: usize) -> usize {
    row * TILES_PER_ROW + col
}

/// Step from a square by a (row, col) delta, `None` when that leaves the board.
pub fn offset_square(square: usize, d_row: isize, d_col: isize) -> Option<usize> {
    let row = isize::try_from(square_row(square)).ok()? + d_row;
    let col = isize::try_from(square_col(square)).ok()? + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some(square_index(row as usize, col as usize))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenError {
    BadPlacement,
    BadSideToMove,
    BadCastlingField,
    BadEnPassantField,
}

/// An immutable snapshot of a game position. Boards are only created by
/// [`BoardBuilder::build`] or by applying a [`crate::logic::moves::Move`];
/// every successor is a fresh value and never aliases its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; NUM_TILES],
    side_to_move: Alliance,
    /// The pawn that just made a double step, capturable en passant.
    en_passant_pawn: Option<Piece>,
    castled: [bool; 2],
}

impl Board {
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// The canonical starting arrangement, White to move.
    #[must_use]
    pub fn standard() -> Self {
        let mut builder = Self::builder().set_side_to_move(Alliance::White);
        builder = Self::setup_side(builder, Alliance::White);
        builder = Self::setup_side(builder, Alliance::Black);
        builder.build()
    }

    fn setup_side(mut builder: BoardBuilder, alliance: Alliance) -> BoardBuilder {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let back = alliance.back_row();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            builder = builder.set_piece(Piece::new(kind, alliance, square_index(back, col)));
        }
        let pawn_row = alliance.pawn_start_row();
        for col in 0..TILES_PER_ROW {
            builder = builder.set_piece(Piece::new(
                PieceKind::Pawn,
                alliance,
                square_index(pawn_row, col),
            ));
        }
        builder
    }

    /// Occupant of a tile. Panics on an out-of-range index; in-range
    /// lookups never fail.
    #[must_use]
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.grid[square]
    }

    pub const fn side_to_move(&self) -> Alliance {
        self.side_to_move
    }

    pub const fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    pub fn has_castled(&self, alliance: Alliance) -> bool {
        self.castled[alliance.index()]
    }

    pub fn pieces(&self, alliance: Alliance) -> impl Iterator<Item = Piece> + '_ {
        self.grid
            .iter()
            .flatten()
            .copied()
            .filter(move |piece| piece.alliance == alliance)
    }

    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().copied()
    }

    pub fn king_square(&self, alliance: Alliance) -> Option<usize> {
        self.pieces(alliance)
            .find(|piece| piece.kind == PieceKind::King)
            .map(|king| king.square)
    }

    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, alliance)
    }

    pub fn current_player(&self) -> Player<'_> {
        Player::new(self, self.side_to_move)
    }

    fn castle_rights(&self, alliance: Alliance) -> (bool, bool) {
        let back = alliance.back_row();
        let king_ready = matches!(
            self.piece_at(square_index(back, 4)),
            Some(king) if king.kind == PieceKind::King
                && king.alliance == alliance
                && !king.has_moved
        );
        let rook_ready = |col: usize| {
            matches!(
                self.piece_at(square_index(back, col)),
                Some(rook) if rook.kind == PieceKind::Rook
                    && rook.alliance == alliance
                    && !rook.has_moved
            )
        };
        (king_ready && rook_ready(7), king_ready && rook_ready(0))
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..TILES_PER_ROW {
            let mut empty_count = 0;
            for col in 0..TILES_PER_ROW {
                if let Some(piece) = self.piece_at(square_index(row, col)) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let letter = piece.kind.letter();
                    fen.push(if piece.alliance.is_white() {
                        letter
                    } else {
                        letter.to_ascii_lowercase()
                    });
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < TILES_PER_ROW - 1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move.is_white() { 'w' } else { 'b' });

        fen.push(' ');
        let (white_ks, white_qs) = self.castle_rights(Alliance::White);
        let (black_ks, black_qs) = self.castle_rights(Alliance::Black);
        if white_ks || white_qs || black_ks || black_qs {
            if white_ks {
                fen.push('K');
            }
            if white_qs {
                fen.push('Q');
            }
            if black_ks {
                fen.push('k');
            }
            if black_qs {
                fen.push('q');
            }
        } else {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_pawn {
            Some(pawn) => {
                let skipped_row = (square_row(pawn.square) as isize - pawn.alliance.direction())
                    as usize;
                fen.push_str(&crate::logic::notation::square_name(square_index(
                    skipped_row,
                    square_col(pawn.square),
                )));
            }
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }

    /// Parses the placement, side, castling and en-passant fields; the move
    /// counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::BadPlacement)?;
        let side = fields.next().ok_or(FenError::BadSideToMove)?;
        let castling = fields.next().unwrap_or("-");
        let en_passant = fields.next().unwrap_or("-");

        let side_to_move = match side {
            "w" => Alliance::White,
            "b" => Alliance::Black,
            _ => return Err(FenError::BadSideToMove),
        };

        let mut grid: [Option<Piece>; NUM_TILES] = [None; NUM_TILES];
        let mut square = 0usize;
        for c in placement.chars() {
            match c {
                '/' => {
                    if square % TILES_PER_ROW != 0 {
                        return Err(FenError::BadPlacement);
                    }
                }
                '1'..='8' => square += c as usize - '0' as usize,
                _ => {
                    let kind = match c.to_ascii_uppercase() {
                        'P' => PieceKind::Pawn,
                        'N' => PieceKind::Knight,
                        'B' => PieceKind::Bishop,
                        'R' => PieceKind::Rook,
                        'Q' => PieceKind::Queen,
                        'K' => PieceKind::King,
                        _ => return Err(FenError::BadPlacement),
                    };
                    let alliance = if c.is_ascii_uppercase() {
                        Alliance::White
                    } else {
                        Alliance::Black
                    };
                    if square >= NUM_TILES {
                        return Err(FenError::BadPlacement);
                    }
                    let mut piece = Piece::new(kind, alliance, square);
                    if kind == PieceKind::Pawn {
                        piece.has_moved = square_row(square) != alliance.pawn_start_row();
                    }
                    grid[square] = Some(piece);
                    square += 1;
                }
            }
        }
        if square != NUM_TILES {
            return Err(FenError::BadPlacement);
        }

        if castling != "-" {
            if castling.chars().any(|c| !"KQkq".contains(c)) {
                return Err(FenError::BadCastlingField);
            }
        }
        // Castling rights are carried on the has-moved flags: a side keeps a
        // right only when the FEN grants it and the king/rook sit at home.
        for (alliance, ks, qs) in [
            (Alliance::White, castling.contains('K'), castling.contains('Q')),
            (Alliance::Black, castling.contains('k'), castling.contains('q')),
        ] {
            let back = alliance.back_row();
            if !ks {
                if let Some(rook) = grid[square_index(back, 7)].as_mut() {
                    rook.has_moved = true;
                }
            }
            if !qs {
                if let Some(rook) = grid[square_index(back, 0)].as_mut() {
                    rook.has_moved = true;
                }
            }
            if !ks && !qs {
                if let Some(king) = grid[square_index(back, 4)].as_mut() {
                    if king.kind == PieceKind::King {
                        king.has_moved = true;
                    }
                }
            }
        }

        let en_passant_pawn = if en_passant == "-" {
            None
        } else {
            let target = crate::logic::notation::parse_square(en_passant)
                .ok_or(FenError::BadEnPassantField)?;
            // The pawn sits one step past the skipped square, from the
            // perspective of the side that just moved.
            let mover = side_to_move.opposite();
            let pawn_square = offset_square(target, mover.direction(), 0)
                .ok_or(FenError::BadEnPassantField)?;
            match grid[pawn_square] {
                Some(pawn) if pawn.kind == PieceKind::Pawn && pawn.alliance == mover => Some(pawn),
                _ => return Err(FenError::BadEnPassantField),
            }
        };

        let mut builder = Self::builder()
            .set_side_to_move(side_to_move)
            .set_en_passant_pawn(en_passant_pawn);
        for piece in grid.iter().flatten() {
            builder = builder.set_piece(*piece);
        }
        Ok(builder.build())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..TILES_PER_ROW {
            for col in 0..TILES_PER_ROW {
                let text = match self.piece_at(square_index(row, col)) {
                    Some(piece) if piece.alliance.is_white() => piece.kind.letter(),
                    Some(piece) => piece.kind.letter().to_ascii_lowercase(),
                    None => '-',
                };
                write!(f, "{text}")?;
                if col < TILES_PER_ROW - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BoardBuilder {
    config: [Option<Piece>; NUM_TILES],
    side_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    castled: [bool; 2],
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: [None; NUM_TILES],
            side_to_move: Alliance::White,
            en_passant_pawn: None,
            castled: [false; 2],
        }
    }

    /// Places a piece on its own square, replacing any previous occupant.
    #[must_use]
    pub fn set_piece(mut self, piece: Piece) -> Self {
        self.config[piece.square] = Some(piece);
        self
    }

    #[must_use]
    pub fn set_side_to_move(mut self, alliance: Alliance) -> Self {
        self.side_to_move = alliance;
        self
    }

    #[must_use]
    pub fn set_en_passant_pawn(mut self, pawn: Option<Piece>) -> Self {
        self.en_passant_pawn = pawn;
        self
    }

    #[must_use]
    pub fn set_castled(mut self, alliance: Alliance, castled: bool) -> Self {
        self.castled[alliance.index()] = castled;
        self
    }

    #[must_use]
    pub fn build(self) -> Board {
        Board {
            grid: self.config,
            side_to_move: self.side_to_move,
            en_passant_pawn: self.en_passant_pawn,
            castled: self.castled,
        }
    }
}
