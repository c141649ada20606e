use crate::calendar::yesterday;
use crate::grid::Grid;
use crate::outcome::{score_label, Outcome, OutcomeKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score labels of the normal distribution, in display order
pub const SCORE_LABELS: [&str; 7] = ["1", "2", "3", "4", "5", "6", "X"];
/// Label of the failed score
pub const FAIL_LABEL: &str = "X";

/// Minimum bar width so empty buckets stay visible
const MIN_BAR_WIDTH: f64 = 8.0;

/// One recorded day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub puzzle_number: u32,
    pub score: String,
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    pub is_fail: bool,
    pub is_special: bool,
    pub grid: Grid,
}

impl HistoryEntry {
    /// Rebuild the outcome this entry was recorded from
    pub fn outcome(&self) -> Outcome {
        Outcome {
            kind: self.kind,
            score: self.score.clone(),
            rows: u8::try_from(self.grid.len()).unwrap_or(u8::MAX),
            is_special: self.is_special,
            is_fail: self.is_fail,
        }
    }

    /// Label of the statistics bucket this entry was counted in
    pub fn bucket_label(&self) -> &str {
        self.kind.special_label().unwrap_or(&self.score)
    }

    pub fn score_label(&self) -> String {
        score_label(self.kind, &self.score)
    }
}

/// Persisted player statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub games_played: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub distribution: BTreeMap<String, u32>,
    pub special_outcomes: BTreeMap<String, u32>,
    pub last_played_date: Option<NaiveDate>,
    pub history: Vec<HistoryEntry>,
}

impl Default for StatsRecord {
    fn default() -> Self {
        Self {
            games_played: 0,
            current_streak: 0,
            max_streak: 0,
            distribution: SCORE_LABELS.iter().map(|l| (l.to_string(), 0)).collect(),
            special_outcomes: BTreeMap::new(),
            last_played_date: None,
            history: Vec::new(),
        }
    }
}

/// Style of a distribution bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    Normal,
    Special,
    Fail,
}

/// One bar of the score distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBar {
    pub label: String,
    pub count: u32,
    pub width_percent: f64,
    pub kind: BarKind,
    pub highlight: bool,
}

impl StatsRecord {
    /// Apply one play recorded on `today`
    ///
    /// Does not de-duplicate by date; callers gate on "already played today".
    pub fn apply(&mut self, today: NaiveDate, puzzle_number: u32, outcome: &Outcome, grid: &Grid) {
        self.games_played += 1;
        self.last_played_date = Some(today);

        match outcome.kind.special_label() {
            Some(label) => *self.special_outcomes.entry(label.to_string()).or_default() += 1,
            None => *self.distribution.entry(outcome.score.clone()).or_default() += 1,
        }

        if outcome.is_fail {
            self.current_streak = 0;
        } else {
            let continues = self
                .history
                .last()
                .is_some_and(|last| last.date == yesterday(today));
            // A fail yesterday already reset the streak to zero, so continuing
            // from it counts up from that baseline
            self.current_streak = if continues {
                self.current_streak + 1
            } else {
                1
            };
            self.max_streak = self.max_streak.max(self.current_streak);
        }

        self.history.push(HistoryEntry {
            date: today,
            puzzle_number,
            score: outcome.score.clone(),
            kind: outcome.kind,
            is_fail: outcome.is_fail,
            is_special: outcome.is_special,
            grid: grid.clone(),
        });
    }

    /// Entry recorded on `day`, if it is the latest one
    pub fn entry_for(&self, day: NaiveDate) -> Option<&HistoryEntry> {
        if self.last_played_date != Some(day) {
            return None;
        }
        self.history.last()
    }

    /// Share of games not scored X, rounded to a whole percent
    pub fn win_percentage(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        let fails = self.distribution.get(FAIL_LABEL).copied().unwrap_or(0);
        let wins = self.games_played.saturating_sub(fails);
        (f64::from(wins) / f64::from(self.games_played) * 100.0).round() as u32
    }

    /// Distribution chart bars: `0`, `1`..`6`, `7`, `⭐`, `💡` and `X`, with the
    /// special buckets only present once they have been hit
    pub fn distribution_bars(&self, today: Option<&HistoryEntry>) -> Vec<DistributionBar> {
        let special = |label: &str| self.special_outcomes.get(label).copied().unwrap_or(0);

        let mut labels: Vec<&str> = Vec::with_capacity(11);
        if special("0") > 0 {
            labels.push("0");
        }
        labels.extend(&SCORE_LABELS[..6]);
        for label in ["7", "⭐", "💡"] {
            if special(label) > 0 {
                labels.push(label);
            }
        }
        labels.push(FAIL_LABEL);

        let max_count = self
            .distribution
            .values()
            .chain(self.special_outcomes.values())
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);

        labels
            .into_iter()
            .map(|label| {
                let is_special = ["0", "7", "⭐", "💡"].contains(&label);
                let count = if is_special {
                    special(label)
                } else {
                    self.distribution.get(label).copied().unwrap_or(0)
                };
                let kind = if is_special {
                    BarKind::Special
                } else if label == FAIL_LABEL {
                    BarKind::Fail
                } else {
                    BarKind::Normal
                };
                let width_percent = if count > 0 {
                    (f64::from(count) / f64::from(max_count) * 100.0).max(MIN_BAR_WIDTH)
                } else {
                    MIN_BAR_WIDTH
                };
                DistributionBar {
                    label: label.to_string(),
                    count,
                    width_percent,
                    kind,
                    highlight: today.is_some_and(|e| e.bucket_label() == label),
                }
            })
            .collect()
    }

    /// Check the record's structural invariants, returning every violation found
    pub fn check_invariants(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let counted: u32 = self
            .distribution
            .values()
            .chain(self.special_outcomes.values())
            .sum();
        if counted != self.games_played {
            issues.push(format!(
                "games played {} but {} results counted",
                self.games_played, counted
            ));
        }

        if self.history.len() != self.games_played as usize {
            issues.push(format!(
                "games played {} but {} history entries",
                self.games_played,
                self.history.len()
            ));
        }

        if self.current_streak > self.max_streak {
            issues.push(format!(
                "current streak {} exceeds max streak {}",
                self.current_streak, self.max_streak
            ));
        }

        if self.history.windows(2).any(|w| w[0].date >= w[1].date) {
            issues.push("history dates are not strictly increasing".to_string());
        }

        if let Some(last) = self.history.last() {
            if self.last_played_date != Some(last.date) {
                issues.push(format!(
                    "last played date {:?} differs from last entry {}",
                    self.last_played_date, last.date
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::synthesize_grid;
    use crate::outcome::{normal_outcome, select_outcome};
    use chrono::Datelike;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn win(score: &str) -> Outcome {
        let roll = match score {
            "1" => 0.0,
            "2" => 0.05,
            "3" => 0.2,
            "4" => 0.5,
            "5" => 0.7,
            _ => 0.9,
        };
        normal_outcome(roll)
    }

    fn play(stats: &mut StatsRecord, today: NaiveDate, outcome: &Outcome) {
        let grid = synthesize_grid(u64::from(today.ordinal()), outcome);
        stats.apply(today, 1, outcome, &grid);
    }

    #[test]
    fn test_default_record() {
        let stats = StatsRecord::default();
        assert_eq!(stats.distribution.len(), 7);
        assert!(stats.distribution.values().all(|&c| c == 0));
        assert!(stats.check_invariants().is_empty());
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let mut stats = StatsRecord::default();
        for d in 1..=3 {
            play(&mut stats, day(d), &win("4"));
        }
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.max_streak, 3);

        play(&mut stats, day(4), &win("2"));
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.max_streak, 4);
        assert!(stats.check_invariants().is_empty());
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let mut stats = StatsRecord::default();
        for d in 1..=5 {
            play(&mut stats, day(d), &win("3"));
        }
        play(&mut stats, day(7), &win("3"));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 5);
    }

    #[test]
    fn test_fail_resets_streak_to_zero() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(1), &win("5"));
        play(&mut stats, day(2), &normal_outcome(0.95));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.distribution["X"], 1);

        // The day after a fail starts again from zero
        play(&mut stats, day(3), &win("5"));
        assert_eq!(stats.current_streak, 1);
        assert!(stats.check_invariants().is_empty());
    }

    #[test]
    fn test_special_fail_keeps_streak() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(1), &win("4"));
        play(&mut stats, day(2), &select_outcome(147));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.special_outcomes["7"], 1);
        assert_eq!(stats.history[1].grid.len(), 7);
    }

    #[test]
    fn test_special_buckets() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(1), &select_outcome(223));
        play(&mut stats, day(2), &select_outcome(28));
        play(&mut stats, day(3), &select_outcome(67));

        assert_eq!(stats.special_outcomes["0"], 1);
        assert_eq!(stats.special_outcomes["⭐"], 1);
        assert_eq!(stats.special_outcomes["💡"], 1);
        // Specials are never counted in the normal buckets
        assert_eq!(stats.distribution["6"], 0);
        assert_eq!(stats.games_played, 3);
        assert!(stats.check_invariants().is_empty());
    }

    #[test]
    fn test_max_streak_never_decreases() {
        let mut stats = StatsRecord::default();
        let mut previous_max = 0;
        for d in 1..=28 {
            let outcome = select_outcome(d * 7);
            play(&mut stats, day(d), &outcome);
            assert!(stats.max_streak >= previous_max);
            if outcome.is_fail {
                assert_eq!(stats.current_streak, 0);
            }
            previous_max = stats.max_streak;
        }
        assert!(stats.check_invariants().is_empty());
    }

    #[test]
    fn test_entry_for_today() {
        let mut stats = StatsRecord::default();
        assert!(stats.entry_for(day(1)).is_none());

        play(&mut stats, day(1), &win("2"));
        assert_eq!(stats.entry_for(day(1)).map(|e| e.score.as_str()), Some("2"));
        assert!(stats.entry_for(day(2)).is_none());
    }

    #[test]
    fn test_win_percentage() {
        let mut stats = StatsRecord::default();
        assert_eq!(stats.win_percentage(), 0);

        play(&mut stats, day(1), &win("1"));
        play(&mut stats, day(2), &win("1"));
        play(&mut stats, day(3), &normal_outcome(0.99));
        assert_eq!(stats.win_percentage(), 67);
    }

    #[test]
    fn test_distribution_bars() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(1), &win("4"));
        play(&mut stats, day(2), &win("4"));
        play(&mut stats, day(3), &select_outcome(67));

        let today = stats.entry_for(day(3)).cloned();
        let bars = stats.distribution_bars(today.as_ref());
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "💡", "X"]);

        let four = &bars[3];
        assert_eq!(four.count, 2);
        assert_eq!(four.width_percent, 100.0);
        assert!(!four.highlight);

        let bulb = &bars[6];
        assert_eq!(bulb.kind, BarKind::Special);
        assert_eq!(bulb.width_percent, 50.0);
        assert!(bulb.highlight);
        // The bulb's six rows do not light the `6` bar
        assert_eq!(bars[5].label, "6");
        assert!(!bars[5].highlight);
        assert_eq!(bars.iter().filter(|b| b.highlight).count(), 1);

        assert_eq!(bars[0].width_percent, 8.0);
        assert_eq!(bars[7].kind, BarKind::Fail);
    }

    #[test]
    fn test_check_invariants_reports_violations() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(2), &win("3"));
        play(&mut stats, day(2), &win("3"));
        stats.current_streak = 9;
        stats.games_played = 5;

        let issues = stats.check_invariants();
        assert_eq!(issues.len(), 4, "{:?}", issues);
    }

    #[test]
    fn test_json_shape() {
        let mut stats = StatsRecord::default();
        play(&mut stats, day(5), &win("3"));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["gamesPlayed"], 1);
        assert_eq!(json["lastPlayedDate"], "2026-01-05");
        assert_eq!(json["distribution"]["3"], 1);
        assert_eq!(json["history"][0]["type"], "win");
        assert_eq!(json["history"][0]["puzzleNumber"], 1);
        assert_eq!(json["history"][0]["grid"].as_array().unwrap().len(), 3);

        let empty = serde_json::to_value(StatsRecord::default()).unwrap();
        assert!(empty["lastPlayedDate"].is_null());
    }

    #[test]
    fn test_parses_browser_record() {
        let json = r#"{
            "gamesPlayed": 1,
            "currentStreak": 1,
            "maxStreak": 1,
            "distribution": {"1":0,"2":0,"3":0,"4":0,"5":0,"6":0,"X":0},
            "specialOutcomes": {"⭐": 1},
            "lastPlayedDate": "2026-01-02",
            "history": [{
                "date": "2026-01-02",
                "puzzleNumber": 13,
                "score": "⭐",
                "type": "special-star",
                "isFail": false,
                "isSpecial": true,
                "grid": [["star","star","star","star","star"]]
            }]
        }"#;

        let stats: StatsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(stats.history[0].kind, OutcomeKind::SpecialStar);
        assert_eq!(stats.history[0].outcome().rows, 1);
        assert!(stats.check_invariants().is_empty());
    }
}
