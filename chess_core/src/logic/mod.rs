pub mod board;
pub mod eval_constants;
pub mod generator;
pub mod lookup;
pub mod moves;
pub mod notation;
pub mod player;
pub mod rules;
