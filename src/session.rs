//! A single game session: the current board, its random source, and the
//! Playing/Over state machine a front end drives with direction input.
//!
//! ```
//! use board_2048::engine::Direction;
//! use board_2048::session::{Game, Status};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(StdRng::seed_from_u64(7));
//! while game.status() == Status::Playing && game.moves() < 8 {
//!     for dir in Direction::ALL {
//!         if game.step(dir).unwrap().changed {
//!             break;
//!         }
//!     }
//! }
//! assert!(game.board().count_empty() < 16);
//! ```

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Direction, RandomSource};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Over,
}

/// What one accepted direction did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub direction: Direction,
    /// The slide moved or merged something (and a tile was spawned).
    pub changed: bool,
    pub merges: u32,
    /// Status after the step.
    pub status: Status,
}

/// Owns the current board and the spawn RNG for one game.
#[derive(Debug, Clone)]
pub struct Game<R> {
    board: Board,
    status: Status,
    moves: u32,
    rng: R,
}

impl<R: RandomSource> Game<R> {
    /// Start a new game on a freshly initialized board.
    pub fn new(mut rng: R) -> Self {
        let board = Board::initialize(&mut rng);
        Self::with_board(board, rng)
    }

    /// Resume from an existing board; the status is derived from it.
    pub fn with_board(board: Board, rng: R) -> Self {
        let status = status_of(board);
        Self { board, status, moves: 0, rng }
    }

    /// Apply `direction`: slide, spawn if anything changed, then re-check
    /// for a terminal board.
    ///
    /// Returns [`EngineError::GameOver`] once the session is over. A blocked
    /// direction is not an error; it yields `changed == false`.
    pub fn step(&mut self, direction: Direction) -> Result<Step, EngineError> {
        if self.status == Status::Over {
            return Err(EngineError::GameOver);
        }
        let outcome = self.board.play(direction, &mut self.rng);
        if outcome.changed {
            self.board = outcome.board;
            self.moves += 1;
            debug!("move {} {direction}: {} merge(s), {} empty", self.moves, outcome.merges, self.board.count_empty());
        } else {
            trace!("{direction} is blocked");
        }
        self.status = status_of(self.board);
        if self.status == Status::Over {
            info!("game over after {} moves, highest tile {}", self.moves, self.board.highest_tile());
        }
        Ok(Step { direction, changed: outcome.changed, merges: outcome.merges, status: self.status })
    }

    /// Discard the current board and start over with the same RNG stream.
    pub fn restart(&mut self) {
        self.board = Board::initialize(&mut self.rng);
        self.status = status_of(self.board);
        self.moves = 0;
        debug!("restarted");
    }
}

impl<R> Game<R> {
    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status == Status::Over
    }

    /// Number of accepted (board-changing) moves.
    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

fn status_of(board: Board) -> Status {
    if board.is_terminal() {
        Status::Over
    } else {
        Status::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedSource;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(rows: [[u32; 4]; 4]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn new_game_has_two_tiles_and_is_playing() {
        let game = Game::new(StdRng::seed_from_u64(3));
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn changing_move_spawns_and_counts() {
        let start = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        // Spawn into the first empty cell after the move, as a 2.
        let mut game = Game::with_board(start, ScriptedSource::new(vec![0], vec![true]));
        let step = game.step(Direction::Left).unwrap();
        assert!(step.changed);
        assert_eq!(step.merges, 1);
        assert_eq!(step.status, Status::Playing);
        assert_eq!(game.board(), board([[4, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        assert_eq!(game.moves(), 1);
        assert_eq!(game.into_rng().draws(), 2);
    }

    #[test]
    fn blocked_move_does_not_spawn() {
        let start = board([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::with_board(start, ScriptedSource::default());
        let step = game.step(Direction::Left).unwrap();
        assert!(!step.changed);
        assert_eq!(game.board(), start);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.into_rng().draws(), 0);
    }

    #[test]
    fn move_that_leaves_equal_pairs_keeps_playing() {
        // Moving right frees (0, 0), which receives the spawn.
        let start = board([[4, 2, 2, 8], [2, 4, 8, 2], [4, 8, 2, 4], [8, 2, 4, 8]]);
        let mut game = Game::with_board(start, ScriptedSource::new(vec![0], vec![true]));
        assert_eq!(game.status(), Status::Playing);
        let step = game.step(Direction::Right).unwrap();
        assert!(step.changed);
        assert_eq!(game.board(), board([[2, 4, 4, 8], [2, 4, 8, 2], [4, 8, 2, 4], [8, 2, 4, 8]]));
        // Still playable: (0, 1)/(0, 2) and the left column pair are equal.
        assert_eq!(step.status, Status::Playing);
    }

    #[test]
    fn over_rejects_further_moves() {
        let terminal = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut game = Game::with_board(terminal, ScriptedSource::default());
        assert!(game.is_over());
        for dir in Direction::ALL {
            assert_eq!(game.step(dir), Err(EngineError::GameOver));
        }
        assert_eq!(game.board(), terminal);
    }

    #[test]
    fn last_spawn_can_end_the_game() {
        // Left merges the 2s in row 0; the spawned 4 lands in the gap at (0, 3).
        let start = board([[8, 2, 2, 16], [4, 8, 2, 8], [8, 2, 4, 2], [2, 4, 8, 4]]);
        let mut game = Game::with_board(start, ScriptedSource::new(vec![0], vec![false]));
        let step = game.step(Direction::Left).unwrap();
        assert!(step.changed);
        assert_eq!(game.board().rows()[0], [8, 4, 16, 4]);
        assert_eq!(step.status, Status::Over);
        assert!(game.step(Direction::Up).is_err());
    }

    #[test]
    fn restart_resets_counters() {
        let mut game = Game::new(StdRng::seed_from_u64(11));
        for dir in Direction::ALL {
            let _ = game.step(dir);
        }
        game.restart();
        assert_eq!(game.moves(), 0);
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.status(), Status::Playing);
    }
}
