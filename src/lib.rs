//! Optimal solver for the N×N sliding tile puzzle.
//!
//! A [`Board`] is an immutable arrangement of the tiles `0..N²` (`0` is the
//! blank). [`Solver`] runs A* with the Manhattan heuristic and, in lock-step,
//! a second A* on the board's [`twin`](Board::twin). Exactly one of the two
//! is solvable, so whichever search finishes first decides the verdict.
//!
//! ```
//! use npuzzle::{Board, Solver};
//!
//! let board: Board = "3  0 1 3  4 2 5  7 8 6".parse().unwrap();
//! let solver = Solver::new(board);
//!
//! assert!(solver.is_solvable());
//! assert_eq!(solver.moves(), Some(4));
//! assert!(solver.solution().unwrap().last().unwrap().is_goal());
//! ```

pub mod board;
pub mod error;
pub mod parse;
pub mod solver;

pub use board::{Board, Move};
pub use error::BoardError;
pub use solver::{Outcome, SearchStats, Solver};
