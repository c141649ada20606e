use crate::calendar::{day_string, Clock};
use crate::config::MojiConfig;
use crate::error::StoreResult;
use crate::grid::Grid;
use crate::outcome::Outcome;
use crate::stats::{HistoryEntry, StatsRecord};
use crate::store::KeyValueStore;

/// Owns the durable statistics record and applies results to it
pub struct StatsEngine<S, C> {
    store: S,
    clock: C,
    config: MojiConfig,
}

impl<S: KeyValueStore, C: Clock> StatsEngine<S, C> {
    pub fn new(store: S, clock: C, config: MojiConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &MojiConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read the statistics record for display
    ///
    /// Missing, unreadable or malformed state yields the empty record.
    pub fn load(&self) -> StatsRecord {
        self.try_load().unwrap_or_else(|e| {
            log::warn!("{} store unreadable: {}", self.store.backend_name(), e);
            StatsRecord::default()
        })
    }

    /// Read the statistics record, failing when the store cannot be read
    ///
    /// Missing state yields the empty record and malformed state is
    /// reinitialized; a read error is returned so nothing overwrites it.
    pub fn try_load(&self) -> StoreResult<StatsRecord> {
        let Some(raw) = self.store.get(&self.config.storage_key)? else {
            return Ok(StatsRecord::default());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("malformed statistics record, reinitializing: {}", e);
            StatsRecord::default()
        }))
    }

    /// Whether today's puzzle has already been recorded
    pub fn has_played_today(&self) -> bool {
        if self.config.unlimited_plays {
            return false;
        }
        self.load().last_played_date == Some(self.clock.today())
    }

    /// Today's recorded entry, if any
    pub fn today_result(&self) -> Option<HistoryEntry> {
        self.load().entry_for(self.clock.today()).cloned()
    }

    /// Record a new play and persist the whole record before returning
    ///
    /// Must complete before any presentation starts. Calling it twice on the
    /// same day double counts; gate with [`has_played_today`](Self::has_played_today).
    pub fn record_result(
        &mut self,
        puzzle_number: u32,
        outcome: &Outcome,
        grid: &Grid,
    ) -> StoreResult<StatsRecord> {
        let today = self.clock.today();
        let mut stats = self.try_load()?;
        stats.apply(today, puzzle_number, outcome, grid);

        let json = serde_json::to_string(&stats)?;
        self.store.set(&self.config.storage_key, &json)?;

        log::info!(
            "recorded puzzle #{} on {}: {} (streak {}, best {})",
            puzzle_number,
            day_string(today),
            outcome.score_label(),
            stats.current_streak,
            stats.max_streak
        );
        Ok(stats)
    }
}
