use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a single hole result relative to par.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreName {
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    BogeyPlus,
}

impl fmt::Display for ScoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreName::Albatross => "Albatross",
            ScoreName::Eagle => "Eagle",
            ScoreName::Birdie => "Birdie",
            ScoreName::Par => "Par",
            ScoreName::Bogey => "Bogey",
            ScoreName::DoubleBogey => "Double Bogey",
            ScoreName::TripleBogey => "Triple Bogey",
            ScoreName::BogeyPlus => "Bogey+",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub name: ScoreName,
    pub relative_label: String,
}

/// Statistics bucket for a hole differential. Coarser than [`ScoreName`] at
/// the top end: everything above a double bogey lands in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifferentialBucket {
    AlbatrossOrBetter,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogeyPlus,
}

impl DifferentialBucket {
    pub fn emoji(self) -> &'static str {
        match self {
            DifferentialBucket::AlbatrossOrBetter => "🦅🦅",
            DifferentialBucket::Eagle => "🦅",
            DifferentialBucket::Birdie => "🐦",
            DifferentialBucket::Par => "🟢",
            DifferentialBucket::Bogey => "🟡",
            DifferentialBucket::DoubleBogey => "🟠",
            DifferentialBucket::TripleBogeyPlus => "🔴",
        }
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Classify a hole result. Returns `None` while the hole is unscored
    /// (`throws == 0`).
    pub fn classify(throws: u32, par: u8) -> Option<Classification> {
        if throws == 0 {
            return None;
        }

        let diff = i64::from(throws) - i64::from(par);
        let name = match diff {
            d if d <= -3 => ScoreName::Albatross,
            -2 => ScoreName::Eagle,
            -1 => ScoreName::Birdie,
            0 => ScoreName::Par,
            1 => ScoreName::Bogey,
            2 => ScoreName::DoubleBogey,
            3 => ScoreName::TripleBogey,
            _ => ScoreName::BogeyPlus,
        };

        Some(Classification {
            name,
            relative_label: Self::relative_label(diff),
        })
    }

    /// `"E"` for even, `"+n"` over par, `"-n"` under par.
    pub fn relative_label(diff: i64) -> String {
        match diff {
            0 => "E".to_string(),
            d if d > 0 => format!("+{d}"),
            d => d.to_string(),
        }
    }

    /// Same convention as [`relative_label`](Self::relative_label) for a
    /// fractional average, rendered with two decimals. Anything that rounds
    /// to zero is even.
    pub fn relative_average(value: f64) -> String {
        let formatted = format!("{value:.2}");
        match formatted.as_str() {
            "0.00" | "-0.00" => "E".to_string(),
            _ if value > 0.0 => format!("+{formatted}"),
            _ => formatted,
        }
    }

    pub fn bucket(diff: i64) -> DifferentialBucket {
        match diff {
            d if d <= -3 => DifferentialBucket::AlbatrossOrBetter,
            -2 => DifferentialBucket::Eagle,
            -1 => DifferentialBucket::Birdie,
            0 => DifferentialBucket::Par,
            1 => DifferentialBucket::Bogey,
            2 => DifferentialBucket::DoubleBogey,
            _ => DifferentialBucket::TripleBogeyPlus,
        }
    }
}
