use crate::outcome::{Outcome, OutcomeKind};
use crate::rng::SeededRng;
use crate::tile::{Tile, CHAOS_TILES, GRID_WIDTH, WIN_TILES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// One row of tiles
pub type Row = [Tile; GRID_WIDTH];

/// The tile grid revealed for a result, top row first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl Index<usize> for Grid {
    type Output = Row;

    fn index(&self, row: usize) -> &Row {
        &self.rows[row]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds the tile grid matching a selected outcome
///
/// Draws are consumed strictly row-major, then left to right within a row,
/// so the same seed always reproduces the same grid.
pub struct GridSynthesizer {
    rng: SeededRng,
}

impl GridSynthesizer {
    /// Synthesizer for a play seed (usually the play timestamp in milliseconds)
    pub fn new(play_seed: u64) -> Self {
        Self {
            rng: SeededRng::for_grid(play_seed),
        }
    }

    /// Synthesizer over an already constructed generator
    pub fn with_rng(rng: SeededRng) -> Self {
        Self { rng }
    }

    /// Generate `outcome.rows` rows of tiles
    pub fn synthesize(mut self, outcome: &Outcome) -> Grid {
        let total = usize::from(outcome.rows);
        let rows = (0..total)
            .map(|row| self.row(outcome.kind, row, total))
            .collect();
        Grid::new(rows)
    }

    fn row(&mut self, kind: OutcomeKind, row: usize, total: usize) -> Row {
        let is_last = row + 1 == total;

        match kind {
            OutcomeKind::SpecialWin => self.chaos_row(),
            OutcomeKind::SpecialStar if is_last => [Tile::Star; GRID_WIDTH],
            OutcomeKind::SpecialBulb if is_last => [Tile::Lightbulb; GRID_WIDTH],
            OutcomeKind::Win if is_last => {
                let tile = WIN_TILES[self.rng.next_index(WIN_TILES.len())];
                [tile; GRID_WIDTH]
            }
            _ => self.progress_row(row, total),
        }
    }

    fn chaos_row(&mut self) -> Row {
        std::array::from_fn(|_| CHAOS_TILES[self.rng.next_index(CHAOS_TILES.len())])
    }

    fn progress_row(&mut self, row: usize, total: usize) -> Row {
        let progress = row as f64 / total as f64;
        std::array::from_fn(|_| progress_tile(self.rng.next_f64(), progress))
    }
}

/// Pick a tile for a non-final row; green and yellow grow more likely as
/// `progress` (row / total rows) approaches 1
pub fn progress_tile(roll: f64, progress: f64) -> Tile {
    if roll < 0.2 + progress * 0.3 {
        Tile::Green
    } else if roll < 0.5 + progress * 0.2 {
        Tile::Yellow
    } else if roll < 0.7 {
        Tile::Empty
    } else if roll < 0.85 {
        Tile::Blue
    } else {
        Tile::Purple
    }
}

/// Convenience wrapper: grid for `outcome` from `play_seed`
pub fn synthesize_grid(play_seed: u64, outcome: &Outcome) -> Grid {
    GridSynthesizer::new(play_seed).synthesize(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::select_outcome;
    use crate::tile::Tile::{Blue, Empty, Green, Lightbulb, Purple, Star, Yellow};

    #[test]
    fn test_win_grid_fixture() {
        let grid = synthesize_grid(7, &select_outcome(1));
        assert_eq!(
            grid.rows(),
            &[
                [Blue, Empty, Empty, Green, Yellow],
                [Blue, Yellow, Empty, Green, Green],
                [Purple; 5],
            ]
        );
    }

    #[test]
    fn test_fail_grid_fixture() {
        let grid = synthesize_grid(7, &select_outcome(16));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], [Blue, Empty, Empty, Green, Yellow]);
        assert_eq!(grid[2], [Empty, Yellow, Blue, Green, Purple]);
        assert_eq!(grid[5], [Yellow, Blue, Empty, Blue, Green]);
    }

    #[test]
    fn test_star_and_bulb_finales() {
        let star = synthesize_grid(42, &select_outcome(28));
        assert_eq!(
            star.rows(),
            &[
                [Purple, Blue, Empty, Purple, Blue],
                [Purple, Empty, Empty, Purple, Empty],
                [Star; 5],
            ]
        );

        let bulb = synthesize_grid(42, &select_outcome(67));
        assert_eq!(bulb.len(), 6);
        assert_eq!(bulb[4], [Empty, Empty, Purple, Purple, Green]);
        assert_eq!(bulb[5], [Lightbulb; 5]);
    }

    #[test]
    fn test_special_fail_has_seven_mixed_rows() {
        let grid = synthesize_grid(1, &select_outcome(147));
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0], [Yellow, Yellow, Green, Blue, Yellow]);
        assert_eq!(grid[6], [Blue, Blue, Green, Yellow, Green]);
    }

    #[test]
    fn test_special_win_grid_is_empty() {
        let grid = synthesize_grid(7, &select_outcome(223));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_chaos_row() {
        let mut outcome = select_outcome(223);
        outcome.rows = 1;
        let grid = synthesize_grid(9, &outcome);
        assert_eq!(grid.rows(), &[[Green, Lightbulb, Yellow, Lightbulb, Star]]);
        assert!(grid[0].iter().all(|t| CHAOS_TILES.contains(t)));
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        for index in 1..200 {
            let outcome = select_outcome(index);
            assert_eq!(
                synthesize_grid(1_766_300_000_000, &outcome),
                synthesize_grid(1_766_300_000_000, &outcome)
            );
        }
    }

    #[test]
    fn test_progress_tile_bias() {
        // First row has no bias
        assert_eq!(progress_tile(0.19, 0.0), Green);
        assert_eq!(progress_tile(0.2, 0.0), Yellow);
        assert_eq!(progress_tile(0.5, 0.0), Empty);
        assert_eq!(progress_tile(0.7, 0.0), Blue);
        assert_eq!(progress_tile(0.85, 0.0), Purple);

        // Near the end green and yellow swallow the neutral slice
        assert_eq!(progress_tile(0.44, 5.0 / 6.0), Green);
        assert_eq!(progress_tile(0.66, 5.0 / 6.0), Yellow);
        assert_eq!(progress_tile(0.69, 5.0 / 6.0), Empty);
        assert_eq!(progress_tile(0.7, 5.0 / 6.0), Blue);
    }

    #[test]
    fn test_serializes_as_nested_names() {
        let grid = Grid::new(vec![[Star; 5]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["star","star","star","star","star"]]"#);

        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
