use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

const CUSTOM_SIZE: Coord2 = (24, 16);
const CUSTOM_DENSITY: f32 = 0.21;

/// Standard board presets. `Custom` derives its mine count from a
/// fixed density instead of a fixed number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Custom];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Custom => "Custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub const fn size(self) -> Coord2 {
        match self {
            Self::Easy => (9, 9),
            Self::Medium => (16, 16),
            Self::Hard => (30, 16),
            Self::Custom => CUSTOM_SIZE,
        }
    }

    pub fn mine_count(self) -> CellCount {
        match self {
            Self::Easy => 10,
            Self::Medium => 40,
            Self::Hard => 99,
            Self::Custom => {
                let (width, height) = CUSTOM_SIZE;
                let cells = cell_product(width, height) as f32;
                ((cells * CUSTOM_DENSITY) as CellCount).max(1)
            }
        }
    }

    pub fn board_config(self, safe_first_click: bool) -> BoardConfig {
        let (width, height) = self.size();
        BoardConfig {
            width,
            height,
            mines: self.mine_count(),
            safe_first_click,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
