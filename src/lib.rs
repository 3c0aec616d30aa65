//! board-2048: the rules engine of the 2048 sliding-tile game
//!
//! This crate provides:
//! - An immutable 4x4 `Board` with the four core operations
//!   (`initialize`, `apply_move`, `spawn_tile`, `is_terminal`)
//! - A `RandomSource` seam so spawns are reproducible with a seeded RNG or a scripted stub
//! - A `session::Game` that runs the Playing/Over state machine for a front end
//!
//! Rendering and input wiring are left to the caller; `Board` implements
//! `Display` and `serde::Serialize` for that purpose.
//!
//! Quick start:
//! ```
//! use board_2048::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::initialize(&mut rng);
//! let b1 = b0.apply_move(Direction::Left);
//! assert_eq!(b1.tile_sum(), b0.tile_sum());
//! ```
//!
//! Full loop (move, spawn if changed, stop on a terminal board)
//! ```
//! use board_2048::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut b = Board::initialize(&mut rng);
//! let mut moves = 0u32;
//!
//! while !b.is_terminal() && moves < 16 {
//!     let dir = Direction::ALL[(moves % 4) as usize];
//!     let out = b.play(dir, &mut rng);
//!     if out.changed {
//!         b = out.board;
//!     }
//!     moves += 1;
//! }
//! assert!(b.count_empty() < 16);
//! ```
//!
pub mod engine;
pub mod error;
pub mod session;

pub use engine::{Board, Direction, MoveOutcome, RandomSource};
pub use error::EngineError;
pub use session::{Game, Status};
