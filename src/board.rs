use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::BoardError;

/// Direction a tile slides into the blank.
///
/// `Up` means the tile below the blank moves up, so the blank itself moves
/// down one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Row and column offset applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    fn from_offset(offset: (isize, isize)) -> Option<Self> {
        Move::ALL.into_iter().find(|m| m.as_offset() == offset)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Neighbor order, expressed as blank movement: up, down, left, right.
const NEIGHBOR_ORDER: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

/// An immutable N×N sliding puzzle position.
///
/// Tiles are stored row-major; `0` is the blank. Both scores are computed
/// once at construction, so every query after that is O(1).
#[derive(Debug, Clone)]
pub struct Board {
    dimension: usize,
    tiles: Vec<u32>,
    blank: usize,
    hamming: usize,
    manhattan: usize,
}

impl Board {
    /// Builds a board from row-major rows of tile values.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, BoardError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(BoardError::Empty);
        }

        let mut tiles = Vec::with_capacity(dimension * dimension);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != dimension {
                return Err(BoardError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: dimension,
                });
            }
            tiles.extend(cells);
        }

        Self::from_tiles(dimension, tiles)
    }

    /// Builds a board from a flat row-major tile sequence of length `dimension²`.
    pub fn from_tiles(dimension: usize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        if dimension == 0 || tiles.is_empty() {
            return Err(BoardError::Empty);
        }

        let limit = dimension
            .checked_mul(dimension)
            .ok_or(BoardError::DimensionTooLarge { dimension })?;
        if tiles.len() != limit {
            return Err(BoardError::MissingTiles {
                expected: limit,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; limit];
        for (index, &value) in tiles.iter().enumerate() {
            let slot = value as usize;
            if slot >= limit {
                return Err(BoardError::TileOutOfRange {
                    value,
                    index,
                    limit,
                });
            }
            if seen[slot] {
                return Err(BoardError::DuplicateTile { value });
            }
            seen[slot] = true;
        }

        Ok(Self::from_valid_tiles(dimension, tiles))
    }

    /// The solved board of the given dimension.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn goal(n: usize) -> Self {
        assert!(n > 0, "board dimension must be positive");
        let len = n * n;
        let tiles = (0..len).map(|i| goal_value(i, len)).collect();
        Self::from_valid_tiles(n, tiles)
    }

    /// A uniformly random permutation. Half of these are unsolvable.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero, like [`Board::goal`].
    pub fn shuffled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut flattened = Self::goal(n).tiles;
        flattened.shuffle(rng);
        Self::from_valid_tiles(n, flattened)
    }

    /// A random walk of `steps` slides away from the goal, never undoing the
    /// previous slide. Always solvable in at most `steps` moves.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero, like [`Board::goal`].
    pub fn scrambled<R: Rng + ?Sized>(n: usize, steps: usize, rng: &mut R) -> Self {
        let mut board = Self::goal(n);
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let choices: Vec<(Move, Board)> = Move::ALL
                .into_iter()
                .filter(|m| last.map_or(true, |prev| *m != prev.opposite()))
                .filter_map(|m| board.slide(m).map(|next| (m, next)))
                .collect();

            match choices.choose(rng) {
                Some((m, next)) => {
                    last = Some(*m);
                    board = next.clone();
                }
                // 1×1 boards have nowhere to go
                None => break,
            }
        }

        board
    }

    // Callers guarantee `tiles` is a permutation of 0..dimension².
    fn from_valid_tiles(dimension: usize, tiles: Vec<u32>) -> Self {
        let len = tiles.len();
        let mut blank = 0;
        let mut hamming = 0;
        let mut manhattan = 0;

        for (i, &value) in tiles.iter().enumerate() {
            if value == 0 {
                blank = i;
                continue;
            }
            if value != goal_value(i, len) {
                hamming += 1;
            }
            let target = value as usize - 1;
            manhattan += (i / dimension).abs_diff(target / dimension);
            manhattan += (i % dimension).abs_diff(target % dimension);
        }

        Self {
            dimension,
            tiles,
            blank,
            hamming,
            manhattan,
        }
    }

    /// Copies the tiles and exchanges the cells at `i` and `j`.
    fn with_swap(&self, i: usize, j: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(i, j);
        Self::from_valid_tiles(self.dimension, tiles)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row-major tile values.
    #[inline]
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.dimension + col]
    }

    /// Row and column of the blank.
    #[inline]
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.dimension, self.blank % self.dimension)
    }

    /// Number of non-blank tiles out of place.
    #[inline]
    pub fn hamming(&self) -> usize {
        self.hamming
    }

    /// Sum of the grid distances of each non-blank tile from its goal cell.
    #[inline]
    pub fn manhattan(&self) -> usize {
        self.manhattan
    }

    /// With every numbered tile in place the blank can only be in the last cell.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.hamming == 0
    }

    /// The board with one fixed pair of adjacent non-blank tiles exchanged.
    ///
    /// Swaps the two leftmost tiles of the first row, or of the second row if
    /// the blank is among the first pair. Exactly one of a board and its twin
    /// is solvable. A 1×1 board has no such pair and is returned unchanged.
    pub fn twin(&self) -> Self {
        let n = self.dimension;
        if n < 2 {
            return self.clone();
        }
        if self.tiles[0] != 0 && self.tiles[1] != 0 {
            self.with_swap(0, 1)
        } else {
            self.with_swap(n, n + 1)
        }
    }

    /// Boards one slide away, ordered by blank movement up, down, left, right.
    pub fn neighbors(&self) -> impl Iterator<Item = Board> + '_ {
        NEIGHBOR_ORDER.into_iter().filter_map(move |m| self.slide(m))
    }

    /// Slides a tile into the blank, or `None` if no tile sits on that side.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (dx, dy) = movement.as_offset();
        let n = self.dimension as isize;

        let new_x = (self.blank / self.dimension) as isize + dx;
        let new_y = (self.blank % self.dimension) as isize + dy;

        if new_x >= 0 && new_x < n && new_y >= 0 && new_y < n {
            Some(self.with_swap(self.blank, (new_x * n + new_y) as usize))
        } else {
            None
        }
    }

    /// The slide that turns `self` into `next`, if they are one move apart.
    pub fn move_to(&self, next: &Board) -> Option<Move> {
        if next.dimension != self.dimension {
            return None;
        }
        let (from_x, from_y) = self.blank();
        let (to_x, to_y) = next.blank();
        let offset = (
            to_x as isize - from_x as isize,
            to_y as isize - from_y as isize,
        );

        let movement = Move::from_offset(offset)?;
        match self.slide(movement) {
            Some(ref b) if b == next => Some(movement),
            _ => None,
        }
    }
}

/// Value that belongs at `index` in a solved board of `len` cells.
#[inline]
fn goal_value(index: usize, len: usize) -> u32 {
    if index + 1 == len {
        0
    } else {
        (index + 1) as u32
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.tiles.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
