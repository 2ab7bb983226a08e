pub mod board;

pub use board::{Board, BoardAction};
