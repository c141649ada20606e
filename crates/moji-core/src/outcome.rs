use crate::rng::SeededRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum rows of a normal puzzle
pub const MAX_ROWS: u8 = 6;
/// Rows of the seven-row special fail
pub const SPECIAL_FAIL_ROWS: u8 = 7;

/// Category of a puzzle result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    Win,
    Fail,
    SpecialWin,
    SpecialFail,
    SpecialStar,
    SpecialBulb,
}

impl OutcomeKind {
    pub fn is_special(self) -> bool {
        !matches!(self, OutcomeKind::Win | OutcomeKind::Fail)
    }

    /// Only a plain fail breaks the streak; the seven-row special does not
    pub fn is_fail(self) -> bool {
        self == OutcomeKind::Fail
    }

    /// Bucket label in the special-outcome counts
    pub fn special_label(self) -> Option<&'static str> {
        match self {
            OutcomeKind::SpecialWin => Some("0"),
            OutcomeKind::SpecialFail => Some("7"),
            OutcomeKind::SpecialStar => Some("⭐"),
            OutcomeKind::SpecialBulb => Some("💡"),
            OutcomeKind::Win | OutcomeKind::Fail => None,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Win => "win",
            OutcomeKind::Fail => "fail",
            OutcomeKind::SpecialWin => "special-win",
            OutcomeKind::SpecialFail => "special-fail",
            OutcomeKind::SpecialStar => "special-star",
            OutcomeKind::SpecialBulb => "special-bulb",
        };
        write!(f, "{}", name)
    }
}

/// The result of one puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    pub score: String,
    pub rows: u8,
    pub is_special: bool,
    pub is_fail: bool,
}

impl Outcome {
    fn new(kind: OutcomeKind, score: impl Into<String>, rows: u8) -> Self {
        Self {
            kind,
            score: score.into(),
            rows,
            is_special: kind.is_special(),
            is_fail: kind.is_fail(),
        }
    }

    /// Label of the statistics bucket this result is counted in
    pub fn bucket_label(&self) -> &str {
        self.kind.special_label().unwrap_or(&self.score)
    }

    /// Score token shown next to the puzzle number
    pub fn score_label(&self) -> String {
        score_label(self.kind, &self.score)
    }
}

/// Score token for a result kind and score, e.g. `4/6` or `3/💡`
pub fn score_label(kind: OutcomeKind, score: &str) -> String {
    match kind {
        OutcomeKind::SpecialBulb => format!("{}/💡", score),
        _ => format!("{}/6", score),
    }
}

/// Upper bounds of the special branches, checked in order
const SPECIAL_WIN_BELOW: f64 = 0.0125;
const SPECIAL_FAIL_BELOW: f64 = 0.025;
const SPECIAL_STAR_BELOW: f64 = 0.0375;
const SPECIAL_BULB_BELOW: f64 = 0.05;

/// Cumulative thresholds of the normal branch: 1(3%) 2(8%) 3(20%) 4(30%) 5(20%) 6(12%); the rest is X
const NORMAL_THRESHOLDS: [(f64, &str); 6] = [
    (0.03, "1"),
    (0.11, "2"),
    (0.31, "3"),
    (0.61, "4"),
    (0.81, "5"),
    (0.93, "6"),
];

/// Select the outcome of puzzle `index`
pub fn select_outcome(index: u32) -> Outcome {
    let mut rng = SeededRng::for_outcome(index);
    let outcome = outcome_from_rng(&mut rng);
    log::debug!("puzzle index {} -> {} ({})", index, outcome.kind, outcome.score);
    outcome
}

/// Select an outcome from the next draws of `rng`
pub fn outcome_from_rng(rng: &mut SeededRng) -> Outcome {
    match special_kind(rng.next_f64()) {
        Some(OutcomeKind::SpecialWin) => Outcome::new(OutcomeKind::SpecialWin, "0", 0),
        Some(OutcomeKind::SpecialFail) => {
            Outcome::new(OutcomeKind::SpecialFail, "7", SPECIAL_FAIL_ROWS)
        }
        Some(OutcomeKind::SpecialStar) => {
            let rows = draw_rows(rng);
            Outcome::new(OutcomeKind::SpecialStar, "⭐", rows)
        }
        Some(OutcomeKind::SpecialBulb) => {
            let rows = draw_rows(rng);
            Outcome::new(OutcomeKind::SpecialBulb, rows.to_string(), rows)
        }
        Some(OutcomeKind::Win | OutcomeKind::Fail) | None => normal_outcome(rng.next_f64()),
    }
}

/// Map the special roll to a special kind, or `None` for the normal branch
pub fn special_kind(special_roll: f64) -> Option<OutcomeKind> {
    if special_roll < SPECIAL_WIN_BELOW {
        Some(OutcomeKind::SpecialWin)
    } else if special_roll < SPECIAL_FAIL_BELOW {
        Some(OutcomeKind::SpecialFail)
    } else if special_roll < SPECIAL_STAR_BELOW {
        Some(OutcomeKind::SpecialStar)
    } else if special_roll < SPECIAL_BULB_BELOW {
        Some(OutcomeKind::SpecialBulb)
    } else {
        None
    }
}

fn draw_rows(rng: &mut SeededRng) -> u8 {
    (rng.next_f64() * f64::from(MAX_ROWS)) as u8 + 1
}

/// Map the normal-branch roll to a score
pub fn normal_outcome(outcome_roll: f64) -> Outcome {
    for (rows, (below, score)) in (1..).zip(NORMAL_THRESHOLDS) {
        if outcome_roll < below {
            return Outcome::new(OutcomeKind::Win, score, rows);
        }
    }
    Outcome::new(OutcomeKind::Fail, "X", MAX_ROWS)
}
