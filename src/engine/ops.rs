use log::debug;

use super::random::RandomSource;
use super::state::{Board, Cells, Direction, MoveOutcome, Row, Tile, MAX_TILE, SIZE};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Slide non-zero values toward index 0, keeping their order; pad with zeros.
pub fn compress_row(row: Row) -> Row {
    let mut out = [0; SIZE];
    for (slot, value) in out.iter_mut().zip(row.into_iter().filter(|&v| v != 0)) {
        *slot = value;
    }
    out
}

/// Merge equal neighbours of a compressed row, scanning left to right.
///
/// The left cell of a pair doubles and the right cell empties. The scan
/// skips past the consumed right-hand cell, so no cell takes part in more
/// than one merge per call. Returns the row (not re-compressed) and the
/// number of merges.
pub fn merge_row(mut row: Row) -> (Row, u32) {
    let mut merges = 0;
    let mut col = 0;
    while col + 1 < SIZE {
        if mergeable(row[col], row[col + 1]) {
            row[col] *= 2;
            row[col + 1] = 0;
            merges += 1;
            col += 2;
        } else {
            col += 1;
        }
    }
    (row, merges)
}

/// Equal, non-empty and below the cap. Every merge result stays a valid tile.
#[inline]
fn mergeable(a: Tile, b: Tile) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// Compress, merge, compress: one row moved left.
pub fn slide_row_left(row: Row) -> (Row, u32) {
    let (merged, merges) = merge_row(compress_row(row));
    (compress_row(merged), merges)
}

fn move_left(cells: &Cells) -> (Cells, u32) {
    let mut out = [[0; SIZE]; SIZE];
    let mut merges = 0;
    for (dst, &src) in out.iter_mut().zip(cells.iter()) {
        let (row, n) = slide_row_left(src);
        *dst = row;
        merges += n;
    }
    (out, merges)
}

/// Slide/merge tiles in the given direction and report whether the board changed.
pub fn slide(board: Board, direction: Direction) -> MoveOutcome {
    let t = direction.transform();
    let (moved, merges) = move_left(&t.apply(&board.0));
    let result = Board(t.inverse().apply(&moved));
    MoveOutcome { board: result, changed: result != board, merges }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn apply_move(board: Board, direction: Direction) -> Board {
    slide(board, direction).board
}

/// Empty board with two spawned tiles.
pub fn initialize<R: RandomSource + ?Sized>(rng: &mut R) -> Board {
    Board::EMPTY.spawn_tile(rng).spawn_tile(rng)
}

/// Fill one uniformly chosen empty cell with a 2 (90%) or 4 (10%).
///
/// Draws the cell first, then the value. A full board is returned unchanged
/// and consumes no draws.
pub fn spawn_tile<R: RandomSource + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty = count_empty(board);
    if empty == 0 {
        return board;
    }
    // Out-of-range picks from a custom source wrap instead of dropping the spawn.
    let pick = rng.pick_index(empty) % empty;
    let value = generate_tile(rng);
    let Some((row, col, _)) = board.cells().filter(|&(_, _, v)| v == 0).nth(pick) else {
        return board;
    };
    debug!("spawn {value} at ({row}, {col})");
    let mut cells = board.0;
    cells[row][col] = value;
    Board(cells)
}

fn generate_tile<R: RandomSource + ?Sized>(rng: &mut R) -> Tile {
    if rng.chance(TWO_PROBABILITY) {
        2
    } else {
        4
    }
}

/// True if the board is full and no two horizontally or vertically adjacent
/// cells hold the same (mergeable) value.
pub fn is_terminal(board: Board) -> bool {
    let cells = &board.0;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = cells[row][col];
            if value == 0 {
                return false;
            }
            if col + 1 < SIZE && mergeable(value, cells[row][col + 1]) {
                return false;
            }
            if row + 1 < SIZE && mergeable(value, cells[row + 1][col]) {
                return false;
            }
        }
    }
    true
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.0.iter().flatten().filter(|&&v| v == 0).count()
}

pub fn highest_tile(board: Board) -> Tile {
    board.0.iter().flatten().copied().max().unwrap_or(0)
}

pub fn tile_sum(board: Board) -> u64 {
    board.0.iter().flatten().map(|&v| u64::from(v)).sum()
}
