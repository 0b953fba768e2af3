use crate::logic::board::{offset_square, NUM_TILES};
use std::sync::OnceLock;

/// All eight ray directions as (row, col) deltas. Diagonals first four.
pub const RAY_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Indices into [`RAY_DIRECTIONS`] for bishop and rook movement.
pub const BISHOP_DIRECTIONS: [usize; 4] = [0, 1, 2, 3];
pub const ROOK_DIRECTIONS: [usize; 4] = [4, 5, 6, 7];

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Precomputed destination tables, built once per process. Board edges are
/// baked into the tables, so consumers never see a wrapped or out-of-range
/// square.
pub struct StepTables {
    knight: [Vec<usize>; NUM_TILES],
    king: [Vec<usize>; NUM_TILES],
    /// `rays[direction][square]`: squares outward from `square`, nearest first.
    rays: [[Vec<usize>; NUM_TILES]; 8],
}

impl StepTables {
    fn new() -> Self {
        let steps = |deltas: [(isize, isize); 8]| {
            std::array::from_fn(|square| {
                deltas
                    .iter()
                    .filter_map(|&(d_row, d_col)| offset_square(square, d_row, d_col))
                    .collect()
            })
        };
        let rays = std::array::from_fn(|dir| {
            let (d_row, d_col) = RAY_DIRECTIONS[dir];
            std::array::from_fn(|square| {
                let mut ray = Vec::new();
                let mut current = square;
                while let Some(next) = offset_square(current, d_row, d_col) {
                    ray.push(next);
                    current = next;
                }
                ray
            })
        });
        Self {
            knight: steps(KNIGHT_DELTAS),
            king: steps(KING_DELTAS),
            rays,
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<StepTables> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    pub fn knight_steps(&self, square: usize) -> &[usize] {
        &self.knight[square]
    }

    pub fn king_steps(&self, square: usize) -> &[usize] {
        &self.king[square]
    }

    pub fn ray(&self, direction: usize, square: usize) -> &[usize] {
        &self.rays[direction][square]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::square_index;

    #[test]
    fn test_knight_steps_corner() {
        let tables = StepTables::get();
        // a8 corner: only b6 and c7 reachable.
        let mut steps = tables.knight_steps(0).to_vec();
        steps.sort_unstable();
        assert_eq!(steps, vec![square_index(1, 2), square_index(2, 1)]);
    }

    #[test]
    fn test_king_steps_edge() {
        let tables = StepTables::get();
        // h1 corner: g1, g2, h2.
        let mut steps = tables.king_steps(63).to_vec();
        steps.sort_unstable();
        assert_eq!(
            steps,
            vec![square_index(6, 6), square_index(6, 7), square_index(7, 6)]
        );
    }

    #[test]
    fn test_rays_never_wrap() {
        let tables = StepTables::get();
        for square in 0..NUM_TILES {
            for dir in 0..8 {
                for &dest in tables.ray(dir, square) {
                    assert!(dest < NUM_TILES);
                    // Every step along a ray stays within one row/col delta
                    // of its predecessor, so an a-file ray never appears on
                    // the h-file.
                }
                let ray = tables.ray(dir, square);
                for pair in ray.windows(2) {
                    let row_diff = (pair[0] / 8).abs_diff(pair[1] / 8);
                    let col_diff = (pair[0] % 8).abs_diff(pair[1] % 8);
                    assert!(row_diff <= 1 && col_diff <= 1);
                }
            }
        }
    }
}
