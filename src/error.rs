/// Errors raised at the boundaries of the engine.
///
/// Ordinary game states (empty board, full board, blocked move) are never
/// errors; these variants only cover caller contract violations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0:?} (expected left, right, up or down)")]
    InvalidDirection(String),
    #[error("invalid tile {value} at row {row}, col {col}: must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("game is over; no further moves are accepted")]
    GameOver,
}
