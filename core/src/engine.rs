use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Top-level game state. Transitions are one-directional and terminal
/// at `Won`/`Lost`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// The board engine: owns the cell grid and the mine layout, applies
/// reveal/flag/chord events, and decides win or loss.
///
/// Mines are placed lazily on the first reveal so that the first click
/// can be kept safe. Every operation is a defined no-op on stale or
/// out-of-bounds input; only construction can fail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    minefield: Option<Minefield>,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
    exploded: Option<Coord2>,
    seed: u64,
}

impl Board {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        let config = config.validated()?;
        Ok(Self {
            config,
            minefield: None,
            cells: Array2::default(grid_index(config.size())),
            revealed_count: 0,
            flagged_count: 0,
            phase: Phase::default(),
            exploded: None,
            seed,
        })
    }

    /// Board over a pre-placed minefield, for tests and tooling that
    /// need a deterministic layout.
    pub fn from_minefield(minefield: Minefield) -> Self {
        let (width, height) = minefield.size();
        let config = BoardConfig {
            width,
            height,
            mines: minefield.mine_count(),
            safe_first_click: false,
        };
        Self {
            config,
            minefield: Some(minefield),
            cells: Array2::default(grid_index(config.size())),
            revealed_count: 0,
            flagged_count: 0,
            phase: Phase::default(),
            exploded: None,
            seed: 0,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Remaining-flags counter. Negative when over-flagged; a display
    /// layer may clamp.
    pub fn mines_left(&self) -> isize {
        self.config.mines as isize - self.flagged_count as isize
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.in_bounds(coords)
            .then(|| self.cells[grid_index(coords)])
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn exploded(&self) -> Option<Coord2> {
        self.exploded
    }

    /// Whether `coords` holds a mine, known only once that cell is
    /// revealed or the game is over.
    pub fn is_mine(&self, coords: Coord2) -> Option<bool> {
        if !self.in_bounds(coords) {
            return None;
        }
        let field = self.minefield.as_ref()?;
        let visible =
            self.phase.is_finished() || self.cells[grid_index(coords)].is_revealed();
        visible.then(|| field.is_mine(coords))
    }

    /// All cells with their coordinates, for full redraws.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> {
        iter_coords(self.size()).map(move |coords| (coords, self.cells[grid_index(coords)]))
    }

    /// Reveals a cell. The first reveal places the mines, keeping the
    /// clicked neighborhood free when the config asks for a safe first
    /// click. Revealing a mine loses the game and exposes every mine;
    /// revealing a zero flood-fills its whole region. Flagged,
    /// revealed, out-of-bounds, or post-game targets are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> RevealUpdate {
        if !self.in_bounds(coords) || self.phase.is_finished() {
            return RevealUpdate::none();
        }
        if !matches!(self.cells[grid_index(coords)], Cell::Hidden) {
            return RevealUpdate::none();
        }

        if self.minefield.is_none() {
            let safety = if self.config.safe_first_click {
                SafeStart::ZeroNeighborhood
            } else {
                SafeStart::CellOnly
            };
            self.minefield = Some(scatter(
                self.config.size(),
                self.config.mines,
                coords,
                safety,
                self.seed,
            ));
        }
        if matches!(self.phase, Phase::NotStarted) {
            self.phase = Phase::InProgress;
        }

        let mut changed = Vec::new();
        let outcome = self.reveal_cell(coords, &mut changed);
        RevealUpdate { outcome, changed }
    }

    /// Toggles a flag on a hidden cell. Over-flagging is allowed;
    /// revealed cells and finished games are no-ops.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.in_bounds(coords) || self.phase.is_finished() {
            return MarkOutcome::NoChange;
        }

        match self.cells[grid_index(coords)] {
            Cell::Hidden => {
                self.cells[grid_index(coords)] = Cell::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Changed
            }
            Cell::Flagged => {
                self.cells[grid_index(coords)] = Cell::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Changed
            }
            Cell::Revealed(_) => MarkOutcome::NoChange,
        }
    }

    /// Chord on a satisfied number: when the flagged-neighbor count
    /// matches the cell's count, reveals every remaining hidden
    /// neighbor under the normal reveal rules. Anything else is a
    /// no-op, including a mismatched flag count.
    pub fn chord(&mut self, coords: Coord2) -> RevealUpdate {
        if !self.in_bounds(coords) || self.phase.is_finished() {
            return RevealUpdate::none();
        }
        let Cell::Revealed(count) = self.cells[grid_index(coords)] else {
            return RevealUpdate::none();
        };
        if count == 0 || count != self.count_flagged_neighbors(coords) {
            return RevealUpdate::none();
        }

        let mut changed = Vec::new();
        let mut outcome = RevealOutcome::NoChange;
        for neighbor in neighbors(coords, self.size()) {
            if self.phase.is_finished() {
                break;
            }
            if matches!(self.cells[grid_index(neighbor)], Cell::Hidden) {
                outcome = outcome | self.reveal_cell(neighbor, &mut changed);
            }
        }
        RevealUpdate { outcome, changed }
    }

    /// Reveals one hidden cell, flood-filling from zeros. The cell
    /// state itself is the visited marker: anything no longer `Hidden`
    /// is skipped, so the worklist is bounded by the grid size.
    fn reveal_cell(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) -> RevealOutcome {
        let Some(field) = self.minefield.as_ref() else {
            return RevealOutcome::NoChange;
        };
        if !matches!(self.cells[grid_index(coords)], Cell::Hidden) {
            return RevealOutcome::NoChange;
        }

        if field.is_mine(coords) {
            self.phase = Phase::Lost;
            self.exploded = Some(coords);

            // Expose the whole layout; hidden safe cells stay hidden.
            for pos in iter_coords(field.size()) {
                if !field.is_mine(pos) {
                    continue;
                }
                let cell = self.cells[grid_index(pos)];
                if !cell.is_revealed() {
                    if matches!(cell, Cell::Flagged) {
                        self.flagged_count -= 1;
                    }
                    self.cells[grid_index(pos)] = Cell::Revealed(field.adjacent_mines(pos));
                    changed.push(pos);
                }
            }
            return RevealOutcome::HitMine;
        }

        let mut worklist = VecDeque::from([coords]);
        while let Some(pos) = worklist.pop_front() {
            if !matches!(self.cells[grid_index(pos)], Cell::Hidden) {
                continue;
            }

            let adjacent = field.adjacent_mines(pos);
            self.cells[grid_index(pos)] = Cell::Revealed(adjacent);
            self.revealed_count += 1;
            changed.push(pos);

            // Zeros spread; numbered cells are revealed but stop the
            // flood. Mines never enter the list: a zero cell has none
            // adjacent, and flagged cells are not `Hidden`.
            if adjacent == 0 {
                worklist.extend(
                    neighbors(pos, field.size())
                        .filter(|&n| matches!(self.cells[grid_index(n)], Cell::Hidden)),
                );
            }
        }

        if self.revealed_count == field.safe_cell_count() {
            self.phase = Phase::Won;

            // Flag the leftover mines; they are not revealed, which is
            // what tells a win apart from a loss on screen.
            for pos in iter_coords(field.size()) {
                if field.is_mine(pos) && matches!(self.cells[grid_index(pos)], Cell::Hidden) {
                    self.cells[grid_index(pos)] = Cell::Flagged;
                    self.flagged_count += 1;
                    changed.push(pos);
                }
            }
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| matches!(self.cells[grid_index(pos)], Cell::Flagged))
            .count() as u8
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        coords.0 < self.config.width && coords.1 < self.config.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, mines: &[Coord2]) -> Minefield {
        Minefield::from_coords(size, mines).unwrap()
    }

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_minefield(field(size, mines))
    }

    #[test]
    fn first_reveal_places_the_configured_mine_count() {
        let config = BoardConfig::new(9, 9, 10, true).unwrap();
        let mut board = Board::new(config, 3).unwrap();

        assert_eq!(board.phase(), Phase::NotStarted);
        assert!(board.minefield.is_none());

        board.reveal((4, 4));

        let field = board.minefield.as_ref().unwrap();
        assert_eq!(field.mine_count(), 10);

        // Counts derived from the mask match a brute-force recount.
        for coords in iter_coords(board.size()) {
            let expected = neighbors(coords, board.size())
                .filter(|&pos| field.is_mine(pos))
                .count() as u8;
            assert_eq!(field.adjacent_mines(coords), expected);
        }
    }

    #[test]
    fn safe_first_click_always_starts_on_a_zero() {
        for seed in 0..10 {
            let config = BoardConfig::new(9, 9, 10, true).unwrap();
            let mut board = Board::new(config, seed).unwrap();

            board.reveal((4, 4));

            assert_eq!(board.cell_at((4, 4)), Some(Cell::Revealed(0)));
            assert_ne!(board.phase(), Phase::Lost);
        }
    }

    #[test]
    fn numbered_reveal_does_not_spread() {
        let mut board = board((3, 3), &[(1, 1)]);

        let update = board.reveal((0, 0));

        assert_eq!(update.outcome, RevealOutcome::Revealed);
        assert_eq!(update.changed, [(0, 0)]);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(1)));
        assert_eq!(board.cell_at((0, 1)), Some(Cell::Hidden));
        assert_eq!(board.phase(), Phase::InProgress);
    }

    #[test]
    fn one_by_one_board_wins_immediately() {
        let config = BoardConfig::new(1, 1, 0, true).unwrap();
        let mut board = Board::new(config, 0).unwrap();

        let update = board.reveal((0, 0));

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(board.phase(), Phase::Won);
    }

    #[test]
    fn flood_fill_opens_the_whole_safe_region() {
        // Mines across the bottom row only: one reveal at the top
        // opens everything down to the numbered border and wins.
        let mines: alloc::vec::Vec<_> = (0..5).map(|x| (x, 4)).collect();
        let mut board = board((5, 5), &mines);

        let update = board.reveal((0, 0));

        assert_eq!(update.outcome, RevealOutcome::Won);
        let revealed = board
            .cells()
            .filter(|(_, cell)| cell.is_revealed())
            .count();
        assert_eq!(revealed, 20);
        assert_eq!(board.cell_at((2, 3)), Some(Cell::Revealed(3)));
        // Won, so the mines were flagged rather than revealed.
        assert_eq!(board.cell_at((2, 4)), Some(Cell::Flagged));
        assert_eq!(board.mines_left(), 0);
        assert_eq!(update.changed.len(), 25);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let mut board = board((9, 1), &[(4, 0)]);

        let update = board.reveal((0, 0));

        assert_eq!(update.outcome, RevealOutcome::Revealed);
        assert_eq!(update.changed.len(), 4);
        assert_eq!(board.cell_at((3, 0)), Some(Cell::Revealed(1)));
        assert_eq!(board.cell_at((5, 0)), Some(Cell::Hidden));
        assert_eq!(board.phase(), Phase::InProgress);
    }

    #[test]
    fn flood_fill_does_not_cross_flags() {
        let mut board = board((9, 1), &[(4, 0)]);

        board.toggle_flag((2, 0));
        let update = board.reveal((0, 0));

        assert_eq!(update.changed, [(0, 0), (1, 0)]);
        assert_eq!(board.cell_at((2, 0)), Some(Cell::Flagged));
        assert_eq!(board.cell_at((3, 0)), Some(Cell::Hidden));
    }

    #[test]
    fn revealing_a_mine_loses_and_exposes_every_mine() {
        let mut board = board((3, 3), &[(1, 1), (2, 2)]);
        board.toggle_flag((2, 2));

        let update = board.reveal((1, 1));

        assert_eq!(update.outcome, RevealOutcome::HitMine);
        assert_eq!(board.phase(), Phase::Lost);
        assert_eq!(board.exploded(), Some((1, 1)));
        assert!(board.cell_at((1, 1)).unwrap().is_revealed());
        // The flagged mine is exposed too, and its flag released.
        assert!(board.cell_at((2, 2)).unwrap().is_revealed());
        assert_eq!(board.mines_left(), 2);
        // Hidden safe cells are untouched.
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Hidden));
    }

    #[test]
    fn finished_game_ignores_every_input() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((0, 0));
        assert_eq!(board.phase(), Phase::Lost);

        let before = board.clone();
        assert_eq!(board.reveal((1, 1)).outcome, RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::NoChange);
        assert_eq!(board.chord((1, 1)).outcome, RevealOutcome::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn stale_and_out_of_bounds_input_is_a_noop() {
        let config = BoardConfig::new(5, 5, 4, true).unwrap();
        let mut board = Board::new(config, 1).unwrap();

        assert!(!board.reveal((9, 9)).has_update());
        assert_eq!(board.toggle_flag((5, 0)), MarkOutcome::NoChange);
        assert_eq!(board.phase(), Phase::NotStarted);

        board.reveal((2, 2));
        let repeat = board.reveal((2, 2));
        assert_eq!(repeat.outcome, RevealOutcome::NoChange);
        assert!(repeat.changed.is_empty());
    }

    #[test]
    fn first_click_on_a_flag_does_not_place_mines() {
        let config = BoardConfig::new(5, 5, 4, true).unwrap();
        let mut board = Board::new(config, 1).unwrap();

        board.toggle_flag((2, 2));
        let update = board.reveal((2, 2));

        assert!(!update.has_update());
        assert!(board.minefield.is_none());
        assert_eq!(board.phase(), Phase::NotStarted);
    }

    #[test]
    fn over_flagging_drives_the_counter_negative() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.toggle_flag((0, 0));
        board.toggle_flag((0, 1));
        board.toggle_flag((1, 0));
        assert_eq!(board.mines_left(), -2);

        board.toggle_flag((0, 1));
        assert_eq!(board.mines_left(), -1);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_noop() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((0, 0));

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(1)));
    }

    #[test]
    fn chord_requires_a_matching_flag_count() {
        let mut board = board((3, 3), &[(0, 1), (2, 1)]);
        board.reveal((1, 1));

        let before = board.clone();
        assert!(!board.chord((1, 1)).has_update());
        assert_eq!(board, before);

        board.toggle_flag((0, 1));
        board.toggle_flag((2, 1));
        let update = board.chord((1, 1));

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(update.changed.len(), 6);
        assert_eq!(board.cell_at((1, 0)), Some(Cell::Revealed(2)));
        assert_eq!(board.cell_at((1, 2)), Some(Cell::Revealed(2)));
    }

    #[test]
    fn chord_with_a_misplaced_flag_hits_the_mine() {
        let mut board = board((3, 3), &[(0, 1)]);
        board.reveal((1, 1));
        board.toggle_flag((0, 0));

        let update = board.chord((1, 1));

        assert_eq!(update.outcome, RevealOutcome::HitMine);
        assert_eq!(board.phase(), Phase::Lost);
        assert_eq!(board.exploded(), Some((0, 1)));
    }

    #[test]
    fn chord_on_hidden_flagged_or_zero_cells_is_a_noop() {
        let mut board = board((6, 1), &[(4, 0)]);

        // Nothing revealed yet.
        assert!(!board.chord((1, 0)).has_update());

        board.toggle_flag((0, 0));
        assert!(!board.chord((0, 0)).has_update());

        board.toggle_flag((0, 0));
        board.reveal((0, 0));
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(0)));
        assert_eq!(board.phase(), Phase::InProgress);
        assert!(!board.chord((0, 0)).has_update());
    }

    #[test]
    fn mine_visibility_is_gated_on_reveal_or_game_over() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.is_mine((1, 1)), None);
        board.reveal((0, 0));
        assert_eq!(board.is_mine((0, 0)), Some(false));
        assert_eq!(board.is_mine((1, 1)), None);

        board.reveal((1, 1));
        assert_eq!(board.phase(), Phase::Lost);
        assert_eq!(board.is_mine((1, 1)), Some(true));
        assert_eq!(board.is_mine((2, 2)), Some(false));
        assert_eq!(board.is_mine((3, 3)), None);
    }
}
