//! Declarative presentation description
//!
//! Front ends render these values; nothing here touches a terminal or a DOM.
//! The reveal animation is an explicit timeline of view transitions, consumed
//! after the play has already been persisted.

use crate::grid::Grid;
use crate::outcome::Outcome;
use crate::share::streak_line;
use crate::stats::{DistributionBar, HistoryEntry, StatsRecord};
use crate::tile::{Tile, GRID_WIDTH};
use serde::Serialize;

/// Delay before the first tile flips
pub const START_DELAY_MS: u64 = 100;
/// Delay between tiles within a row
pub const TILE_DELAY_MS: u64 = 80;
/// Extra pause after each row
pub const ROW_GAP_MS: u64 = 150;
/// Delay between the score header and the footer
pub const FOOTER_DELAY_MS: u64 = 300;
/// Delay before offering another practice play
pub const REPLAY_PROMPT_DELAY_MS: u64 = 1000;

/// A tile as rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub class: &'static str,
    pub symbol: &'static str,
}

impl From<Tile> for TileView {
    fn from(tile: Tile) -> Self {
        Self {
            class: tile.style_class(),
            symbol: tile.emoji(),
        }
    }
}

/// Streak message under the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "streak", rename_all = "lowercase")]
pub enum StreakBadge {
    Active(u32),
    Lost,
    Hidden,
}

impl StreakBadge {
    pub fn for_result(streak: u32, is_fail: bool) -> Self {
        if is_fail {
            StreakBadge::Lost
        } else if streak > 1 {
            StreakBadge::Active(streak)
        } else {
            StreakBadge::Hidden
        }
    }

    pub fn text(self) -> String {
        match self {
            StreakBadge::Active(streak) => streak_line(streak),
            StreakBadge::Lost => "Streak lost 💔".to_string(),
            StreakBadge::Hidden => String::new(),
        }
    }
}

/// Everything needed to draw a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub puzzle_number: u32,
    pub score_label: String,
    pub rows: Vec<[TileView; GRID_WIDTH]>,
    pub streak: StreakBadge,
}

impl ResultView {
    pub fn new(puzzle_number: u32, outcome: &Outcome, grid: &Grid, streak: u32) -> Self {
        Self {
            puzzle_number,
            score_label: outcome.score_label(),
            rows: grid.iter().map(|row| row.map(TileView::from)).collect(),
            streak: StreakBadge::for_result(streak, outcome.is_fail),
        }
    }
}

/// Statistics panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub played: u32,
    pub win_percentage: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub bars: Vec<DistributionBar>,
}

impl StatsView {
    pub fn new(stats: &StatsRecord, today: Option<&HistoryEntry>) -> Self {
        Self {
            played: stats.games_played,
            win_percentage: stats.win_percentage(),
            current_streak: stats.current_streak,
            max_streak: stats.max_streak,
            bars: stats.distribution_bars(today),
        }
    }
}

/// One transition of the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum RevealStep {
    ShowContainer,
    RevealTile { row: usize, col: usize },
    RevealHeader,
    RevealFooter,
    OfferReplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub step: RevealStep,
}

/// Ordered schedule of view transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealTimeline {
    steps: Vec<ScheduledStep>,
}

impl RevealTimeline {
    /// Tiles flip left to right, row by row, then the header and footer appear
    pub fn animated(rows: usize, offer_replay: bool) -> Self {
        let mut steps = vec![ScheduledStep {
            at_ms: 0,
            step: RevealStep::ShowContainer,
        }];

        let row_slot = GRID_WIDTH as u64 * TILE_DELAY_MS + ROW_GAP_MS;
        let mut row_start = START_DELAY_MS;
        for row in 0..rows {
            for col in 0..GRID_WIDTH {
                steps.push(ScheduledStep {
                    at_ms: row_start + col as u64 * TILE_DELAY_MS,
                    step: RevealStep::RevealTile { row, col },
                });
            }
            row_start += row_slot;
        }

        let header_at = row_start;
        let footer_at = header_at + FOOTER_DELAY_MS;
        steps.push(ScheduledStep {
            at_ms: header_at,
            step: RevealStep::RevealHeader,
        });
        steps.push(ScheduledStep {
            at_ms: footer_at,
            step: RevealStep::RevealFooter,
        });
        if offer_replay {
            steps.push(ScheduledStep {
                at_ms: footer_at + REPLAY_PROMPT_DELAY_MS,
                step: RevealStep::OfferReplay,
            });
        }

        Self { steps }
    }

    /// Everything visible at once, for returning visitors
    pub fn instant(rows: usize) -> Self {
        let mut steps = Self::animated(rows, false).steps;
        for step in &mut steps {
            step.at_ms = 0;
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// Time of the last transition
    pub fn duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0)
    }

    /// Transitions due in the half-open window `(from_ms, to_ms]`
    pub fn due_between(&self, from_ms: u64, to_ms: u64) -> impl Iterator<Item = &ScheduledStep> {
        self.steps
            .iter()
            .filter(move |s| s.at_ms > from_ms && s.at_ms <= to_ms)
    }
}
