use thiserror::Error;

/// Reasons a tile grid or its text form cannot become a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has no tiles")]
    Empty,

    #[error("row {row} has {len} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("dimension {dimension} is too large to hold its tiles")]
    DimensionTooLarge { dimension: usize },

    #[error("tile {value} at index {index} is outside 0..{limit}")]
    TileOutOfRange {
        value: u32,
        index: usize,
        limit: usize,
    },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u32 },

    #[error("input does not start with a board dimension")]
    MissingDimension,

    #[error("`{token}` is not a non-negative integer")]
    InvalidToken { token: String },

    #[error("expected {expected} tiles, found {found}")]
    MissingTiles { expected: usize, found: usize },

    #[error("unexpected input after the last tile: `{token}`")]
    TrailingInput { token: String },
}
