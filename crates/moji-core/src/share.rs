use crate::grid::{Grid, Row};
use crate::outcome::Outcome;
use crate::tile::{Tile, GRID_WIDTH};

/// Game name leading the share text
pub const GAME_NAME: &str = "Moji";

/// Streak line shown under a result, e.g. `🔥 4 day streak`
pub fn streak_line(streak: u32) -> String {
    format!("🔥 {} day streak", streak)
}

/// Build the shareable text for a result
///
/// ```text
/// Moji #12 4/6
///
/// 🟨⬜🟩⬜🟦
/// ...
///
/// 🔥 3 day streak
/// ```
///
/// The streak line only appears for streaks above one on non-failed results.
pub fn format_share(puzzle_number: u32, outcome: &Outcome, grid: &Grid, streak: u32) -> String {
    let mut text = format!("{} #{} {}\n\n", GAME_NAME, puzzle_number, outcome.score_label());

    for row in grid {
        text.extend(row.iter().map(|tile| tile.emoji()));
        text.push('\n');
    }

    if streak > 1 && !outcome.is_fail {
        text.push('\n');
        text.push_str(&streak_line(streak));
    }

    text.trim().to_string()
}

/// Parse one share body line back into tiles
pub fn parse_share_row(line: &str) -> Option<Row> {
    let mut tiles = Vec::with_capacity(GRID_WIDTH);
    let mut rest = line.trim();

    while !rest.is_empty() {
        let tile = Tile::ALL
            .into_iter()
            .find(|t| rest.starts_with(t.emoji()))?;
        tiles.push(tile);
        rest = &rest[tile.emoji().len()..];
    }

    tiles.try_into().ok()
}

/// Recover the grid from a share text's body
pub fn parse_share_grid(text: &str) -> Grid {
    Grid::new(text.lines().filter_map(parse_share_row).collect())
}
