use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ops;
use super::random::RandomSource;
use super::transform::Transform;
use crate::error::EngineError;

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// Largest tile value: the highest power of two a `Tile` holds.
///
/// Two `MAX_TILE` tiles never merge, so every move result stays within the
/// range [`Board::from_rows`] accepts.
pub const MAX_TILE: Tile = 1 << 31;

/// A cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u32;

pub(crate) type Row = [Tile; SIZE];
pub(crate) type Cells = [Row; SIZE];

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Stable numeric code (0..=3), the inverse of `Direction::try_from(u8)`.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// The transform that turns this direction's leading edge into the left edge.
    #[inline]
    pub fn transform(self) -> Transform {
        match self {
            Direction::Left => Transform::Identity,
            Direction::Right => Transform::Mirror,
            Direction::Up => Transform::RotateCcw,
            Direction::Down => Transform::RotateCw,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Up),
            3 => Ok(Direction::Down),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = EngineError;

    /// WASD keys, case-insensitive.
    fn try_from(key: char) -> Result<Self, Self::Error> {
        match key.to_ascii_lowercase() {
            'a' => Ok(Direction::Left),
            'd' => Ok(Direction::Right),
            'w' => Ok(Direction::Up),
            's' => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirection(key.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => {
                let mut chars = trimmed.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) => Direction::try_from(key),
                    _ => Err(EngineError::InvalidDirection(trimmed.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Result of sliding a board in one direction.
///
/// `changed` is false exactly when `board` equals the input, i.e. the move
/// was a no-op and must not be followed by a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub changed: bool,
    /// Number of pairs merged by the move.
    pub merges: u32,
}

/// A 4x4 2048 board stored row-major as plain tile values.
///
/// `Board` is an immutable value: every operation returns a fresh board and
/// leaves `self` untouched, so "before" and "after" can be compared freely.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[[u32; 4]; 4]", into = "[[u32; 4]; 4]")]
pub struct Board(pub(crate) Cells);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from rows of tile values, checking every cell is 0 or a
    /// power of two in `2..=MAX_TILE`.
    ///
    /// ```
    /// use board_2048::engine::Board;
    /// let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
    /// assert_eq!(b.get(3, 3), 4);
    /// assert!(Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// ```
    pub fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Result<Self, EngineError> {
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(EngineError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Board(rows))
    }

    /// Copy of the rows.
    #[inline]
    pub fn rows(self) -> [[Tile; SIZE]; SIZE] {
        self.0
    }

    /// Value at `(row, col)`; panics if either index is out of `0..4`.
    #[inline]
    pub fn get(self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Empty board plus two spawned tiles.
    ///
    /// ```
    /// use board_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let b = Board::initialize(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn initialize<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        ops::initialize(rng)
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no spawn).
    ///
    /// ```
    /// use board_2048::engine::{Board, Direction};
    /// let b = Board::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.apply_move(Direction::Left).rows()[0], [4, 4, 0, 0]);
    /// ```
    #[inline]
    pub fn apply_move(self, dir: Direction) -> Self {
        ops::apply_move(self, dir)
    }

    /// Like [`Board::apply_move`] but also reports whether anything moved.
    #[inline]
    pub fn slide(self, dir: Direction) -> MoveOutcome {
        ops::slide(self, dir)
    }

    /// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// A full board is returned unchanged.
    #[inline]
    pub fn spawn_tile<R: RandomSource + ?Sized>(self, rng: &mut R) -> Self {
        ops::spawn_tile(self, rng)
    }

    /// Slide in `dir`, then spawn a tile if the slide changed the board.
    ///
    /// ```
    /// use board_2048::engine::{Board, Direction};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let b0 = Board::initialize(&mut rng);
    /// let out = b0.play(Direction::Up, &mut rng);
    /// assert_eq!(out.changed, out.board != b0);
    /// ```
    pub fn play<R: RandomSource + ?Sized>(self, dir: Direction, rng: &mut R) -> MoveOutcome {
        let outcome = self.slide(dir);
        if outcome.changed {
            MoveOutcome { board: outcome.board.spawn_tile(rng), ..outcome }
        } else {
            outcome
        }
    }

    /// True when the board is full and no two orthogonal neighbours are equal.
    #[inline]
    pub fn is_terminal(self) -> bool {
        ops::is_terminal(self)
    }

    /// The board re-oriented by `t`.
    #[inline]
    pub fn transformed(self, t: Transform) -> Self {
        Board(t.apply(&self.0))
    }

    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Highest tile value on the board, 0 if empty.
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::highest_tile(self)
    }

    /// Sum of all tile values.
    #[inline]
    pub fn tile_sum(self) -> u64 {
        ops::tile_sum(self)
    }

    /// Row-major iterator over `(row, col, value)`.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize, Tile)> {
        (0..SIZE * SIZE).map(move |idx| {
            let (row, col) = (idx / SIZE, idx % SIZE);
            (row, col, self.0[row][col])
        })
    }
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

impl TryFrom<[[Tile; SIZE]; SIZE]> for Board {
    type Error = EngineError;

    fn try_from(rows: [[Tile; SIZE]; SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for [[Tile; SIZE]; SIZE] {
    fn from(b: Board) -> Self {
        b.0
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{v:^7}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_codes_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.code()), Ok(dir));
        }
        assert_eq!(Direction::try_from(4u8), Err(EngineError::InvalidDirection("4".into())));
    }

    #[test]
    fn direction_parsing_fails_fast_on_unknown_input() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("w".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("D".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("a".parse::<Direction>(), Ok(Direction::Left));
        // Initials like `l`/`r`/`u` and vim keys are ambiguous and rejected.
        for key in ["l", "h", "r", "u", "j", "k"] {
            assert!(matches!(key.parse::<Direction>(), Err(EngineError::InvalidDirection(_))), "{key}");
        }
        assert!(matches!("sideways".parse::<Direction>(), Err(EngineError::InvalidDirection(s)) if s == "sideways"));
        assert!("".parse::<Direction>().is_err());
        assert!(Direction::try_from('x').is_err());
    }

    #[test]
    fn from_rows_checks_tile_invariant() {
        assert!(Board::from_rows([[0; 4]; 4]).is_ok());
        assert!(Board::from_rows([[2, 4, 8, MAX_TILE], [0; 4], [0; 4], [0; 4]]).is_ok());
        assert_eq!(
            Board::from_rows([[0; 4], [0, 0, 1, 0], [0; 4], [0; 4]]),
            Err(EngineError::InvalidTile { row: 1, col: 2, value: 1 })
        );
        assert!(Board::from_rows([[6, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
        assert!(Board::from_rows([[u32::MAX, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    }

    #[test]
    fn cells_iterates_row_major() {
        let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
        let non_empty: Vec<_> = b.cells().filter(|&(_, _, v)| v != 0).collect();
        assert_eq!(non_empty, vec![(0, 0, 2), (3, 3, 4)]);
        assert_eq!(b.cells().count(), 16);
    }

    #[test]
    fn display_blanks_empty_cells() {
        let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]).unwrap();
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "   2   |       |       |       ");
        assert_eq!(lines[7], "       |       |       | 2048  ");
    }

    #[test]
    fn serde_uses_row_arrays_and_validates() {
        let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);
        assert!(serde_json::from_str::<Board>("[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
    }

    #[test]
    fn largest_merge_result_survives_serde() {
        let half = MAX_TILE / 2;
        let b = Board::from_rows([[half, half, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let moved = b.apply_move(Direction::Left);
        assert_eq!(moved.highest_tile(), MAX_TILE);
        let json = serde_json::to_string(&moved).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), moved);
    }
}
