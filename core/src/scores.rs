use alloc::collections::BTreeMap;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// Best completion times in seconds, keyed by difficulty name. The
/// engine never touches disk; the embedding layer decides where the
/// JSON produced by [`BestTimes::to_json`] lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredTimes")]
pub struct BestTimes {
    best_times: BTreeMap<String, f64>,
}

/// On-disk shapes: the per-difficulty map, or the legacy single value
/// that only tracked the Custom preset.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimes {
    PerDifficulty { best_times: BTreeMap<String, f64> },
    Legacy { best_time_s: f64 },
}

impl From<StoredTimes> for BestTimes {
    fn from(stored: StoredTimes) -> Self {
        match stored {
            StoredTimes::PerDifficulty { best_times } => Self { best_times },
            StoredTimes::Legacy { best_time_s } => {
                let mut best_times = BTreeMap::new();
                best_times.insert(Difficulty::Custom.name().into(), best_time_s);
                Self { best_times }
            }
        }
    }
}

impl BestTimes {
    pub fn best(&self, difficulty: Difficulty) -> Option<f64> {
        self.best_times.get(difficulty.name()).copied()
    }

    /// Records a completion time, returning whether it set a new best.
    /// Non-positive times are ignored.
    pub fn record(&mut self, difficulty: Difficulty, seconds: f64) -> bool {
        if seconds <= 0.0 {
            return false;
        }
        match self.best(difficulty) {
            Some(best) if best <= seconds => false,
            _ => {
                self.best_times.insert(difficulty.name().into(), seconds);
                true
            }
        }
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
