//! The randomness injection point used by tile spawning.
//!
//! Any [`rand::Rng`] is a [`RandomSource`], so a seeded `StdRng` gives a
//! reproducible spawn stream. [`ScriptedSource`] replays a fixed sequence of
//! draws for tests that need to pin exact spawn positions and values.

use rand::Rng;

/// Sequential source of the two draw shapes the engine needs.
pub trait RandomSource {
    /// Pick an index uniformly from `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Return `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p)
    }
}

/// Replays scripted draws, cycling when a script runs out.
///
/// Index draws are reduced modulo the requested length. With no scripted
/// chances every weighted draw comes out `true`, i.e. every spawn is a 2.
///
/// ```
/// use board_2048::engine::{Board, ScriptedSource};
///
/// // First empty cell, then a 4.
/// let mut src = ScriptedSource::new(vec![0], vec![false]);
/// let b = Board::EMPTY.spawn_tile(&mut src);
/// assert_eq!(b.get(0, 0), 4);
/// assert_eq!(src.draws(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    chances: Vec<bool>,
    pick_pos: usize,
    chance_pos: usize,
}

impl ScriptedSource {
    pub fn new(picks: impl Into<Vec<usize>>, chances: impl Into<Vec<bool>>) -> Self {
        Self { picks: picks.into(), chances: chances.into(), pick_pos: 0, chance_pos: 0 }
    }

    /// Total number of draws consumed so far (both shapes).
    pub fn draws(&self) -> usize {
        self.pick_pos + self.chance_pos
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        let raw = if self.picks.is_empty() {
            0
        } else {
            self.picks[self.pick_pos % self.picks.len()]
        };
        self.pick_pos += 1;
        raw % len
    }

    fn chance(&mut self, _p: f64) -> bool {
        let hit = if self.chances.is_empty() {
            true
        } else {
            self.chances[self.chance_pos % self.chances.len()]
        };
        self.chance_pos += 1;
        hit
    }
}
