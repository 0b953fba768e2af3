use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{square_col, square_row, Alliance, Board, PieceKind, TILES_PER_ROW};
use crate::logic::eval_constants::location_bonus;
use crate::logic::player::Player;
use std::sync::Arc;

/// The standard heuristic: `score(White) - score(Black)`, each side summing
/// material, position, mobility, king threats, attack pressure, castle
/// status and pawn/rook structure. Stateless apart from its constants, so
/// equal boards and depths always evaluate identically.
pub struct StandardEvaluator {
    config: Arc<EngineConfig>,
}

impl StandardEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn score(&self, player: &Player<'_>, opponent: &Player<'_>, depth: u32) -> i32 {
        let mut total = self.piece_evaluations(player)
            + self.mobility(player, opponent)
            + self.king_threats(opponent, depth)
            + self.attacks(player)
            + self.castled(player)
            + self.pawn_structure(player)
            + self.rook_structure(player);
        if self.config.king_tropism_weight != 0 {
            total += self.config.king_tropism_weight * king_tropism(player);
        }
        total
    }

    fn piece_evaluations(&self, player: &Player<'_>) -> i32 {
        let mut score = 0;
        let mut bishops = 0;
        for piece in player.board().pieces(player.alliance()) {
            score += piece.value() + location_bonus(piece);
            if piece.kind == PieceKind::Bishop {
                bishops += 1;
            }
        }
        score
            + if bishops == 2 {
                self.config.two_bishops_bonus
            } else {
                0
            }
    }

    /// Legal-move ratio against the opponent, in percent. The divisor is
    /// clamped so terminal positions stay finite.
    fn mobility(&self, player: &Player<'_>, opponent: &Player<'_>) -> i32 {
        let own = player.legal_moves().len() as i32;
        let opp = opponent.legal_moves().len().max(1) as i32;
        self.config.mobility_multiplier * (own * 100 / opp)
    }

    fn king_threats(&self, opponent: &Player<'_>, depth: u32) -> i32 {
        if opponent.is_in_checkmate() {
            self.config.checkmate_bonus * self.depth_bonus(depth)
        } else if opponent.is_in_check() {
            self.config.check_bonus
        } else {
            0
        }
    }

    fn depth_bonus(&self, depth: u32) -> i32 {
        if depth == 0 {
            1
        } else {
            self.config.depth_bonus * depth as i32
        }
    }

    /// Counts available captures that win material or trade evenly.
    fn attacks(&self, player: &Player<'_>) -> i32 {
        let count = player
            .legal_moves()
            .iter()
            .filter(|mv| {
                mv.attacked_piece()
                    .is_some_and(|victim| mv.moved_piece().value() <= victim.value())
            })
            .count() as i32;
        count * self.config.attack_multiplier
    }

    fn castled(&self, player: &Player<'_>) -> i32 {
        if player.is_castled() {
            self.config.castle_bonus
        } else {
            0
        }
    }

    fn pawn_structure(&self, player: &Player<'_>) -> i32 {
        let mut files = [0i32; TILES_PER_ROW];
        for piece in player.board().pieces(player.alliance()) {
            if piece.kind == PieceKind::Pawn {
                files[square_col(piece.square)] += 1;
            }
        }

        let mut doubled = 0;
        let mut isolated = 0;
        for (file, &count) in files.iter().enumerate() {
            if count > 1 {
                doubled += count;
            }
            if count > 0 {
                let left = if file == 0 { 0 } else { files[file - 1] };
                let right = if file == TILES_PER_ROW - 1 {
                    0
                } else {
                    files[file + 1]
                };
                if left == 0 && right == 0 {
                    isolated += count;
                }
            }
        }

        doubled * self.config.doubled_pawn_penalty
            + isolated * self.config.isolated_pawn_penalty
    }

    /// Bonus for each of the player's rooks alone on its file.
    fn rook_structure(&self, player: &Player<'_>) -> i32 {
        let mut files = [0i32; TILES_PER_ROW];
        for piece in player.board().all_pieces() {
            files[square_col(piece.square)] += 1;
        }
        player
            .board()
            .pieces(player.alliance())
            .filter(|piece| {
                piece.kind == PieceKind::Rook && files[square_col(piece.square)] == 1
            })
            .map(|_| self.config.open_file_rook_bonus)
            .sum()
    }
}

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32 {
        let white = board.player(Alliance::White);
        let black = board.player(Alliance::Black);
        self.score(&white, &black, depth) - self.score(&black, &white, depth)
    }
}

/// King tropism: how close the nearest enemy piece stands to this side's
/// king, weighted by that piece's value. Kept out of the standard sum
/// unless [`EngineConfig::king_tropism_weight`] is non-zero.
pub fn king_tropism(player: &Player<'_>) -> i32 {
    let king = player.king();
    player
        .board()
        .pieces(player.alliance().opposite())
        .filter(|piece| piece.kind != PieceKind::King)
        .map(|piece| {
            let distance = square_row(king.square).abs_diff(square_row(piece.square))
                + square_col(king.square).abs_diff(square_col(piece.square));
            (piece.value() / 100) * distance as i32
        })
        .min()
        .unwrap_or(0)
}
