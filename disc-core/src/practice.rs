use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Challenge {
    Target,
    Speed,
    Consistency,
}

impl Challenge {
    pub const ALL: [Challenge; 3] = [Challenge::Target, Challenge::Speed, Challenge::Consistency];

    pub fn name(self) -> &'static str {
        match self {
            Challenge::Target => "Target Practice",
            Challenge::Speed => "Speed Challenge",
            Challenge::Consistency => "Consistency Drill",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Challenge::Target => "Hit targets from different distances",
            Challenge::Speed => "Measure your throwing speed",
            Challenge::Consistency => "Maintain consistent throws",
        }
    }

    pub fn max_score(self) -> u32 {
        match self {
            Challenge::Target => 100,
            Challenge::Speed => 200,
            Challenge::Consistency => 150,
        }
    }

    /// Key of this challenge's section in the persisted stats record.
    fn stats_key(self) -> &'static str {
        match self {
            Challenge::Target => "targetChallenge",
            Challenge::Speed => "speedChallenge",
            Challenge::Consistency => "consistencyChallenge",
        }
    }

    fn default_section(self) -> Value {
        match self {
            Challenge::Target => json!({ "bestAccuracy": 0, "gamesPlayed": 0, "lastScore": 0 }),
            Challenge::Speed => json!({ "bestTime": null, "gamesPlayed": 0, "lastTime": null }),
            Challenge::Consistency => {
                json!({ "bestStreak": 0, "totalThrows": 0, "gamesPlayed": 0 })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    pub challenge_id: Challenge,
    pub score: u32,
    pub attempts: u32,
    pub date: String,
}

/// One run of a practice drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    challenge: Challenge,
    score: u32,
    attempts: u32,
}

impl PracticeSession {
    pub fn start(challenge: Challenge) -> Self {
        Self {
            challenge,
            score: 0,
            attempts: 0,
        }
    }

    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Count one attempt worth `points`. The score never exceeds the
    /// challenge maximum.
    pub fn add_points(&mut self, points: u32) -> u32 {
        self.score = self
            .score
            .saturating_add(points)
            .min(self.challenge.max_score());
        self.attempts += 1;
        self.score
    }

    /// `None` when nothing was attempted.
    pub fn finish(self) -> Option<ChallengeResult> {
        (self.attempts > 0).then(|| ChallengeResult {
            challenge_id: self.challenge,
            score: self.score,
            attempts: self.attempts,
            date: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Practice and achievement record. Stored as a free-form JSON object:
/// anything a newer client writes is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeStats(Map<String, Value>);

impl Default for PracticeStats {
    fn default() -> Self {
        let mut stats = Map::new();
        for challenge in Challenge::ALL {
            stats.insert(challenge.stats_key().to_string(), challenge.default_section());
        }
        stats.insert("achievements".to_string(), Value::Array(Vec::new()));
        Self(stats)
    }
}

impl PracticeStats {
    /// Accept a loaded document wholesale if it is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn achievement_count(&self) -> usize {
        self.0
            .get("achievements")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn games_played(&self, challenge: Challenge) -> u64 {
        self.0
            .get(challenge.stats_key())
            .and_then(|section| section.get("gamesPlayed"))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// Fold a finished drill into the record: every drill bumps `gamesPlayed`;
    /// target and speed keep `lastScore` and the best score seen; consistency
    /// keeps the best streak and a running throw count.
    pub fn record(&mut self, result: &ChallengeResult) {
        let challenge = result.challenge_id;
        let entry = self
            .0
            .entry(challenge.stats_key())
            .or_insert_with(|| challenge.default_section());
        if !entry.is_object() {
            *entry = challenge.default_section();
        }
        let Value::Object(section) = entry else {
            return;
        };

        let score = u64::from(result.score);
        bump(section, "gamesPlayed", 1);
        match challenge {
            Challenge::Target => {
                section.insert("lastScore".to_string(), json!(score));
                keep_max(section, "bestAccuracy", score);
            }
            // Sessions score points, not times; the time keys stay as stored
            Challenge::Speed => {
                section.insert("lastScore".to_string(), json!(score));
                keep_max(section, "bestScore", score);
            }
            Challenge::Consistency => {
                keep_max(section, "bestStreak", score);
                bump(section, "totalThrows", u64::from(result.attempts));
            }
        }
    }
}

fn bump(section: &mut Map<String, Value>, key: &str, by: u64) {
    let current = section.get(key).and_then(Value::as_u64).unwrap_or(0);
    section.insert(key.to_string(), json!(current + by));
}

fn keep_max(section: &mut Map<String, Value>, key: &str, candidate: u64) {
    let best = match section.get(key).and_then(Value::as_u64) {
        Some(current) => current.max(candidate),
        None => candidate,
    };
    section.insert(key.to_string(), json!(best));
}
