//! Play session
//!
//! Ties the outcome selector, grid synthesizer and statistics engine into the
//! daily flow: one recorded play per day, replays of the recorded result, and
//! unpersisted practice plays when unlimited plays are on.

use crate::calendar::{format_countdown, puzzle_number, time_until_next_puzzle, Clock};
use crate::engine::StatsEngine;
use crate::error::StoreResult;
use crate::grid::{synthesize_grid, Grid};
use crate::outcome::{select_outcome, Outcome};
use crate::share::format_share;
use crate::stats::StatsRecord;
use crate::store::KeyValueStore;
use crate::view::{ResultView, RevealTimeline, StatsView};
use chrono::NaiveDate;
use serde::Serialize;

/// Practice plays on puzzle `n` draw outcomes from indices `n * 1000 + attempt`
pub const PRACTICE_STRIDE: u32 = 1000;

/// How a play came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// First play of the day, persisted before it is shown
    New,
    /// Today's recorded result shown again
    Replay,
    /// Unlimited-plays round, never persisted
    Practice,
}

/// A result ready for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    pub mode: PlayMode,
    pub day: NaiveDate,
    pub puzzle_number: u32,
    pub outcome: Outcome,
    pub grid: Grid,
    /// Statistics as they stand after this play
    pub stats: StatsRecord,
}

impl Play {
    pub fn share_text(&self) -> String {
        format_share(
            self.puzzle_number,
            &self.outcome,
            &self.grid,
            self.stats.current_streak,
        )
    }

    pub fn view(&self) -> ResultView {
        ResultView::new(
            self.puzzle_number,
            &self.outcome,
            &self.grid,
            self.stats.current_streak,
        )
    }

    /// Replays appear at once; new and practice plays are revealed tile by tile
    pub fn timeline(&self) -> RevealTimeline {
        match self.mode {
            PlayMode::Replay => RevealTimeline::instant(self.grid.len()),
            PlayMode::New => RevealTimeline::animated(self.grid.len(), false),
            PlayMode::Practice => RevealTimeline::animated(self.grid.len(), true),
        }
    }

    pub fn stats_view(&self) -> StatsView {
        StatsView::new(&self.stats, self.stats.entry_for(self.day))
    }
}

/// Daily game session over a store and a clock
pub struct Session<S, C> {
    engine: StatsEngine<S, C>,
    current: Option<Play>,
    practice_attempts: u32,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    pub fn new(engine: StatsEngine<S, C>) -> Self {
        Self {
            engine,
            current: None,
            practice_attempts: 0,
        }
    }

    pub fn engine(&self) -> &StatsEngine<S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StatsEngine<S, C> {
        &mut self.engine
    }

    /// Puzzle number of the clock's current day
    pub fn puzzle_number(&self) -> u32 {
        puzzle_number(
            self.engine.config().first_puzzle_date,
            self.engine.clock().today(),
        )
    }

    /// The play shown most recently
    pub fn current(&self) -> Option<&Play> {
        self.current.as_ref()
    }

    pub fn has_played_today(&self) -> bool {
        self.engine.has_played_today()
    }

    /// Restore today's recorded result, if any, without consuming a play
    pub fn resume(&mut self) -> Option<&Play> {
        let play = self.replay().unwrap_or_else(|e| {
            log::warn!("could not read today's result: {}", e);
            None
        })?;
        Some(&*self.current.insert(play))
    }

    /// Play today's puzzle with `play_seed` driving the grid
    ///
    /// The first play of a day is persisted before this returns. Later calls
    /// the same day return the recorded result unchanged, whatever the seed.
    pub fn play(&mut self, play_seed: u64) -> StoreResult<&Play> {
        let day = self.engine.clock().today();
        let puzzle_number = self.puzzle_number();

        let play = if self.engine.config().unlimited_plays {
            let index = puzzle_number
                .wrapping_mul(PRACTICE_STRIDE)
                .wrapping_add(self.practice_attempts);
            self.practice_attempts += 1;

            let outcome = select_outcome(index);
            let grid = synthesize_grid(play_seed, &outcome);
            log::debug!(
                "practice play {} on puzzle #{}: {}",
                self.practice_attempts,
                puzzle_number,
                outcome.score_label()
            );
            Play {
                mode: PlayMode::Practice,
                day,
                puzzle_number,
                outcome,
                grid,
                stats: self.engine.load(),
            }
        } else if let Some(play) = self.replay()? {
            log::info!("puzzle #{} already played today", play.puzzle_number);
            play
        } else {
            let outcome = select_outcome(puzzle_number);
            let grid = synthesize_grid(play_seed, &outcome);
            let stats = self.engine.record_result(puzzle_number, &outcome, &grid)?;
            Play {
                mode: PlayMode::New,
                day,
                puzzle_number,
                outcome,
                grid,
                stats,
            }
        };

        Ok(&*self.current.insert(play))
    }

    /// Play seeded from the clock's current timestamp
    pub fn play_now(&mut self) -> StoreResult<&Play> {
        let seed = self.engine.clock().timestamp_millis();
        self.play(seed)
    }

    /// Share text of the current play
    pub fn share_text(&self) -> Option<String> {
        self.current.as_ref().map(Play::share_text)
    }

    /// View of the current play
    pub fn view(&self) -> Option<ResultView> {
        self.current.as_ref().map(Play::view)
    }

    /// Statistics panel from the persisted record
    pub fn stats_view(&self) -> StatsView {
        let stats = self.engine.load();
        StatsView::new(&stats, stats.entry_for(self.engine.clock().today()))
    }

    /// Countdown to the next puzzle as HH:MM:SS
    pub fn next_puzzle_countdown(&self) -> String {
        format_countdown(time_until_next_puzzle(self.engine.clock().now()))
    }

    fn replay(&self) -> StoreResult<Option<Play>> {
        if self.engine.config().unlimited_plays {
            return Ok(None);
        }
        let day = self.engine.clock().today();
        let stats = self.engine.try_load()?;
        let Some(entry) = stats.entry_for(day).cloned() else {
            return Ok(None);
        };

        Ok(Some(Play {
            mode: PlayMode::Replay,
            day,
            puzzle_number: entry.puzzle_number,
            outcome: entry.outcome(),
            grid: entry.grid,
            stats,
        }))
    }
}
