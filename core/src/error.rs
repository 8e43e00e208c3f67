use thiserror::Error;

use crate::types::{CellCount, Coord};

/// Invalid construction parameters, the only hard failure the crate
/// raises. In-game misuse (stale clicks, out-of-bounds coordinates,
/// moves after the game ended) is a defined no-op instead.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1")]
    EmptyBoard,
    #[error("{mines} mines do not leave a safe cell on a {width}x{height} board")]
    TooManyMines {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("mine coordinates outside the board")]
    MineOutOfBounds,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
