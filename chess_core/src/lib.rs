//! Chess engine core: immutable board model, legal move generation and
//! an alpha-beta move search with a tunable heuristic evaluator.
//!
//! The crate is split the same way the engine itself is layered:
//! [`logic`] owns the rules of the game (board, pieces, move generation,
//! legality, notation) and [`engine`] owns playing strength (evaluation,
//! search, configuration). Presentation, transcripts and game-session
//! bookkeeping are deliberately absent; callers drive the engine through
//! [`logic::board::Board`], [`logic::player::Player`] and
//! [`engine::search::AlphaBetaSearch`].

pub mod engine;
pub mod logic;
