#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scores::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod scores;
mod types;

/// Validated board parameters. Field access is free, but a `Board` is
/// only ever built from a config that passed [`BoardConfig::validated`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub safe_first_click: bool,
}

impl BoardConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount, safe_first_click: bool) -> Result<Self> {
        Self {
            width,
            height,
            mines,
            safe_first_click,
        }
        .validated()
    }

    /// At least one cell, and at least one cell left safe.
    pub fn validated(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(ConfigError::TooManyMines {
                width: self.width,
                height: self.height,
                mines: self.mines,
            });
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_product(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Where the mines are. Immutable once built; adjacency counts are
/// derived from the mask on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minefield {
    mask: Array2<bool>,
    count: CellCount,
}

impl Minefield {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask.iter().filter(|&&mine| mine).count() as CellCount;
        Self { mask, count }
    }

    pub fn from_coords(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(grid_index(size));

        for &coords in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(ConfigError::MineOutOfBounds);
            }
            mask[grid_index(coords)] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.mask.dim();
        (width as Coord, height as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len() as CellCount
    }

    pub const fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mask[grid_index(coords)]
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.is_mine(pos))
            .count() as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of a reveal or chord: the overall outcome plus every cell
/// whose state changed, so a renderer can redraw incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealUpdate {
    pub outcome: RevealOutcome,
    pub changed: Vec<Coord2>,
}

impl RevealUpdate {
    pub const fn none() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changed: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}
