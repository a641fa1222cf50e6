//! Text form of a board: the dimension `N` followed by `N²` tile values,
//! all separated by whitespace.
//!
//! ```text
//! 3
//!  0  1  3
//!  4  2  5
//!  7  8  6
//! ```
//!
//! This is the same layout [`Board`]'s `Display` produces, so printed boards
//! parse back unchanged.

use std::str::FromStr;

use crate::board::Board;
use crate::error::BoardError;

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let dimension = tokens
            .next()
            .ok_or(BoardError::MissingDimension)
            .and_then(parse_number)? as usize;
        let expected = dimension
            .checked_mul(dimension)
            .ok_or(BoardError::DimensionTooLarge { dimension })?;

        let mut tiles = Vec::with_capacity(expected.min(1 << 12));
        for token in tokens.by_ref().take(expected) {
            tiles.push(parse_number(token)?);
        }
        if tiles.len() < expected {
            return Err(BoardError::MissingTiles {
                expected,
                found: tiles.len(),
            });
        }
        if let Some(token) = tokens.next() {
            return Err(BoardError::TrailingInput {
                token: token.to_string(),
            });
        }

        Board::from_tiles(dimension, tiles)
    }
}

fn parse_number(token: &str) -> Result<u32, BoardError> {
    token.parse().map_err(|_| BoardError::InvalidToken {
        token: token.to_string(),
    })
}
