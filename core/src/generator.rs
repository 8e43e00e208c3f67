use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// How much of the first-click neighborhood must stay free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeStart {
    /// No exclusion at all; the first click may hit a mine.
    Anywhere,
    /// Only the clicked cell is kept safe.
    CellOnly,
    /// The clicked cell and all its neighbors are kept safe, so the
    /// first reveal always lands on a zero and spreads.
    ZeroNeighborhood,
}

/// Scatters exactly `mines` mines over a `size` grid, keeping the
/// requested start cells free. When the non-excluded pool is too small
/// the exclusion is relaxed step by step; the mine count always wins
/// over the safety guarantee.
pub fn scatter(size: Coord2, mines: CellCount, start: Coord2, safety: SafeStart, seed: u64) -> Minefield {
    use rand::prelude::*;

    let total = cell_product(size.0, size.1);
    let neighborhood = 1 + neighbors(start, size).count() as CellCount;

    let safety = match safety {
        SafeStart::ZeroNeighborhood if mines + neighborhood > total => {
            log::warn!("not enough room for a zero start, keeping only the clicked cell safe");
            SafeStart::CellOnly
        }
        other => other,
    };
    let safety = match safety {
        SafeStart::CellOnly if mines + 1 > total => {
            log::warn!("not enough room for a safe start, placing mines anywhere");
            SafeStart::Anywhere
        }
        other => other,
    };

    let excluded: Vec<Coord2> = match safety {
        SafeStart::Anywhere => Vec::new(),
        SafeStart::CellOnly => [start].into(),
        SafeStart::ZeroNeighborhood => {
            core::iter::once(start).chain(neighbors(start, size)).collect()
        }
    };

    // Excluded cells are marked as placed so the scatter below skips
    // them, then cleared again before the mask is handed out.
    let mut mask: Array2<bool> = Array2::default(grid_index(size));
    for &coords in &excluded {
        mask[grid_index(coords)] = true;
    }

    let mut free = total - excluded.len() as CellCount;
    let mut placed: CellCount = 0;
    let mut rng = SmallRng::seed_from_u64(seed);

    while placed < mines && free > 0 {
        let mut skip = rng.random_range(0..free);
        for cell in mask.iter_mut() {
            if *cell {
                continue;
            }
            if skip == 0 {
                *cell = true;
                placed += 1;
                free -= 1;
                break;
            }
            skip -= 1;
        }
    }

    for &coords in &excluded {
        mask[grid_index(coords)] = false;
    }

    if placed != mines {
        log::warn!("placed {placed} of {mines} requested mines");
    }

    Minefield::from_mask(mask)
}
