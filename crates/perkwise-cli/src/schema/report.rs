use chrono::{DateTime, Utc};
use perkwise_catalog::{Build, Perk, Role};
use perkwise_recommender::{
    mutex::MutexModel,
    random::BuildSeed,
    scoring::ScoreBreakdown,
    selector::{PickReason, Selection},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PerkEntry {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl PerkEntry {
    fn from_perk(perk: &Perk) -> Self {
        Self {
            id: perk.id().to_owned(),
            name: perk.name().to_owned(),
            tags: perk.tags().iter().cloned().collect(),
            locked: None,
            score: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendReport {
    pub generated_at: DateTime<Utc>,
    pub role: Role,
    pub perks: Vec<PerkEntry>,
    pub mutex_conflicts: usize,
}

impl RecommendReport {
    pub fn new(role: Role, selection: &Selection<'_>, mutex: &MutexModel) -> Self {
        let perks = selection
            .picks()
            .iter()
            .map(|pick| {
                let (locked, score) = match pick.reason {
                    PickReason::Locked => (true, None),
                    PickReason::Scored(score) => (false, Some(score)),
                };
                PerkEntry {
                    locked: Some(locked),
                    score,
                    ..PerkEntry::from_perk(pick.perk)
                }
            })
            .collect();
        Self {
            generated_at: Utc::now(),
            role,
            perks,
            mutex_conflicts: mutex.conflicting_pairs(selection.build()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomBuildEntry {
    pub perks: Vec<PerkEntry>,
    pub mutex_conflicts: usize,
}

impl RandomBuildEntry {
    pub fn new(build: &Build<'_>, mutex: &MutexModel) -> Self {
        Self {
            perks: build.iter().map(PerkEntry::from_perk).collect(),
            mutex_conflicts: mutex.conflicting_pairs(build),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomReport {
    pub generated_at: DateTime<Utc>,
    pub role: Role,
    pub seed: BuildSeed,
    pub builds: Vec<RandomBuildEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainEntry {
    pub id: String,
    pub name: String,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

impl ExplainEntry {
    pub fn new(perk: &Perk, breakdown: ScoreBreakdown) -> Self {
        Self {
            id: perk.id().to_owned(),
            name: perk.name().to_owned(),
            score: breakdown.total(),
            breakdown,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainReport {
    pub generated_at: DateTime<Utc>,
    pub role: Role,
    pub partial_build: Vec<String>,
    pub candidates: Vec<ExplainEntry>,
}
