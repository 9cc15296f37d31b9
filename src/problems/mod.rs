//! Reference problems for the local search engines.

mod nqueens;

pub use nqueens::NQueens;
