use chrono::NaiveDate;

/// Date of puzzle #1
pub const FIRST_PUZZLE_DATE: (i32, u32, u32) = (2025, 12, 21);
/// Key the statistics record is stored under
pub const STATS_KEY: &str = "moji-stats";
/// Environment variable enabling unlimited plays
pub const UNLIMITED_PLAYS_ENV: &str = "MOJI_UNLIMITED_PLAYS";

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MojiConfig {
    /// Allow any number of practice plays per day; practice plays are never persisted
    pub unlimited_plays: bool,
    /// Day puzzle numbers are counted from
    pub first_puzzle_date: NaiveDate,
    /// Store key of the statistics record
    pub storage_key: String,
}

impl Default for MojiConfig {
    fn default() -> Self {
        let (y, m, d) = FIRST_PUZZLE_DATE;
        Self {
            unlimited_plays: false,
            first_puzzle_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            storage_key: STATS_KEY.to_string(),
        }
    }
}

impl MojiConfig {
    /// Defaults, with unlimited plays switched on by `MOJI_UNLIMITED_PLAYS`
    pub fn from_env() -> Self {
        let unlimited_plays = std::env::var(UNLIMITED_PLAYS_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self {
            unlimited_plays,
            ..Self::default()
        }
    }

    pub fn with_unlimited_plays(mut self, unlimited: bool) -> Self {
        self.unlimited_plays = unlimited;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
