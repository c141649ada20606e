//! Moji daily game engine
//!
//! Each calendar day maps to a puzzle number, and each puzzle number maps
//! deterministically to an outcome. A per-play seed decorates that outcome
//! with a grid of colored tiles. Results are recorded once per day into a
//! persistent statistics record with streaks and a score distribution.
//!
//! Front ends supply a [`KeyValueStore`] and a [`Clock`], drive a [`Session`],
//! and render the returned [`ResultView`], [`RevealTimeline`] and
//! [`StatsView`].

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod outcome;
pub mod rng;
pub mod session;
pub mod share;
pub mod stats;
pub mod store;
pub mod tile;
pub mod view;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use config::MojiConfig;
pub use engine::StatsEngine;
pub use error::{StoreError, StoreResult};
pub use grid::{synthesize_grid, Grid, GridSynthesizer, Row};
pub use outcome::{select_outcome, Outcome, OutcomeKind};
pub use rng::SeededRng;
pub use session::{Play, PlayMode, Session};
pub use share::{format_share, parse_share_grid};
pub use stats::{BarKind, DistributionBar, HistoryEntry, StatsRecord};
pub use store::{KeyValueStore, MemoryStore};
pub use tile::Tile;
pub use view::{ResultView, RevealStep, RevealTimeline, ScheduledStep, StatsView, StreakBadge, TileView};
