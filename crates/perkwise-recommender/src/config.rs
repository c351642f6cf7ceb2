//! Tunable recommender parameters.
//!
//! [`RecommenderConfig`] bundles the scoring weights and the mutex tag groups. Every field
//! has a default, so a configuration file only needs to list what it overrides:
//!
//! ```
//! use perkwise_recommender::config::RecommenderConfig;
//!
//! let config: RecommenderConfig = serde_json::from_str(r#"{
//!     "weights": { "tag_match": 12.0 },
//!     "mutex_tags": { "survivor": ["exhaustion", "endurance"] }
//! }"#).unwrap();
//!
//! assert_eq!(config.weights.tag_match, 12.0);
//! assert_eq!(config.weights.synergy, 8.0);
//! ```

use std::{fs::File, io::BufReader, path::Path};

use perkwise_catalog::Tier;
use serde::{Deserialize, Serialize};

use crate::mutex::MutexModel;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("failed to open config file {}", path.display())]
    Open {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[display("failed to parse config file {}", path.display())]
    Parse {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub weights: ScoreWeights,
    pub mutex_tags: MutexModel,
}

impl RecommenderConfig {
    /// Reads a configuration from a JSON file.
    pub fn open<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

/// Weights of the scoring rules.
///
/// Penalties (`anti_synergy`, `mutex_penalty`) are stored as positive magnitudes and
/// subtracted by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Bonus per desired tag the candidate carries.
    pub tag_match: f32,
    /// Bonus per locked or already-picked perk the candidate synergizes with.
    pub synergy: f32,
    /// Penalty per already-picked perk the candidate clashes with.
    pub anti_synergy: f32,
    /// Penalty when the candidate shares a mutex tag with an already-picked perk.
    pub mutex_penalty: f32,
    pub tier: TierBonuses,
    /// Multiplier applied to `clamp(rate, 0, 5) - 2.5`.
    pub rate_factor: f32,
    /// Focus bonus for rank 1.
    pub focus_top_bonus: f32,
    /// Focus bonus lost per rank below the top.
    pub focus_rank_step: f32,
    /// Tie-break bonus per character a name is shorter than 100.
    pub stability_step: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tag_match: 10.0,
            synergy: 8.0,
            anti_synergy: 12.0,
            mutex_penalty: 100.0,
            tier: TierBonuses::default(),
            rate_factor: 3.0,
            focus_top_bonus: 14.0,
            focus_rank_step: 2.0,
            stability_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierBonuses {
    pub s: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for TierBonuses {
    fn default() -> Self {
        Self {
            s: 10.0,
            a: 6.0,
            b: 3.0,
            c: 0.0,
            d: -2.0,
            e: -4.0,
            f: -6.0,
        }
    }
}

impl TierBonuses {
    #[must_use]
    pub fn bonus(&self, tier: Tier) -> f32 {
        match tier {
            Tier::S => self.s,
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => self.c,
            Tier::D => self.d,
            Tier::E => self.e,
            Tier::F => self.f,
        }
    }
}
