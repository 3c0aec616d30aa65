//! Engine module: the 4x4 board, slide/merge moves, tile spawning and the
//! terminal check.
//!
//! - `Board` is an immutable value with the operations as methods.
//! - Free functions mirror the methods when convenient (e.g., `apply_move`).
//! - Every direction is computed as a left move under a [`Transform`].
//! - Randomness only enters through a caller-supplied [`RandomSource`].

mod ops;
pub mod random;
pub mod state;
pub mod transform;

pub use random::{RandomSource, ScriptedSource};
pub use state::{Board, Direction, MoveOutcome, Tile, MAX_TILE, SIZE};
pub use transform::Transform;

pub use ops::{
    apply_move, compress_row, count_empty, highest_tile, initialize, is_terminal, merge_row, slide,
    slide_row_left, spawn_tile, tile_sum, TWO_PROBABILITY,
};
