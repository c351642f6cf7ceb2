//! Candidate scoring: how desirable is this perk given the build so far?
//!
//! A score is the sum of independent rule contributions:
//!
//! | Rule          | Contribution (default weights)                                     |
//! |---------------|--------------------------------------------------------------------|
//! | Tag match     | +10 per desired tag the candidate carries                          |
//! | Synergy       | +8 per locked or picked perk named in the candidate's synergy list |
//! | Anti-synergy  | −12 per picked perk named in the candidate's anti-synergy list     |
//! | Mutex         | −100 if the candidate shares a mutex tag with any picked perk      |
//! | Tier          | S +10, A +6, B +3, C 0, D −2, E −4, F −6                           |
//! | Rate          | `(clamp(rate, 0, 5) − 2.5) × 3`                                    |
//! | Focus         | `max(0, 14 − (rank − 1) × 2)` when the requested focus is ranked   |
//! | Stability     | `(100 − min(100, name length)) × 0.01`                             |
//!
//! Missing optional data (tier, rate, focus ranking) contributes zero. A candidate of the
//! wrong role, or one that is banned, is rejected with [`REJECTED_SCORE`].
//!
//! The score depends on the partial build (synergy, anti-synergy and mutex rules look at
//! already-picked perks), so it is only meaningful for the build snapshot it was computed
//! against.
//!
//! The mutex penalty is larger than any combination of bonuses under the default weights,
//! which makes it behave like a hard constraint in practice even though it is a penalty.

use std::{collections::BTreeSet, fmt};

use perkwise_catalog::{Build, Perk, SelectionContext};
use serde::Serialize;

use crate::{
    config::{RecommenderConfig, ScoreWeights},
    mutex::MutexModel,
};

/// Score assigned to candidates that must never be selected.
pub const REJECTED_SCORE: f32 = -1.0e9;

const MAX_RATE: f32 = 5.0;
const RATE_MIDPOINT: f32 = 2.5;
const NAME_LENGTH_CAP: usize = 100;

/// Assigns a desirability score to a candidate perk (higher is better).
pub trait PerkScorer: fmt::Debug {
    fn score(&self, candidate: &Perk, build: &Build<'_>, context: &SelectionContext) -> f32;
}

/// Per-rule contributions of one candidate's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub tag_match: f32,
    pub synergy: f32,
    pub anti_synergy: f32,
    pub mutex_penalty: f32,
    pub tier: f32,
    pub rate: f32,
    pub focus: f32,
    pub stability: f32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> f32 {
        self.tag_match
            + self.synergy
            + self.anti_synergy
            + self.mutex_penalty
            + self.tier
            + self.rate
            + self.focus
            + self.stability
    }
}

/// The rule-based scorer described in the [module documentation](self).
#[derive(Debug, Clone, Default)]
pub struct RuleBasedScorer {
    weights: ScoreWeights,
    mutex: MutexModel,
}

impl RuleBasedScorer {
    #[must_use]
    pub fn new(weights: ScoreWeights, mutex: MutexModel) -> Self {
        Self { weights, mutex }
    }

    #[must_use]
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(config.weights.clone(), config.mutex_tags.clone())
    }

    #[must_use]
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    #[must_use]
    pub fn mutex(&self) -> &MutexModel {
        &self.mutex
    }

    /// Computes each rule's contribution, or `None` if the candidate is rejected.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn breakdown(
        &self,
        candidate: &Perk,
        build: &Build<'_>,
        context: &SelectionContext,
    ) -> Option<ScoreBreakdown> {
        if candidate.role() != context.role() || context.banned().matches(candidate) {
            return None;
        }
        let w = &self.weights;

        let tag_hits = context
            .desired_tags()
            .iter()
            .filter(|tag| candidate.has_tag(tag))
            .count();

        let partners: BTreeSet<&str> = context.locked().keys().chain(build.name_keys()).collect();
        let synergy_hits = partners
            .iter()
            .filter(|name| candidate.synergizes_with(name))
            .count();

        let clash_hits = build
            .name_keys()
            .filter(|name| candidate.clashes_with(name))
            .count();

        let mutex_penalty = if self.mutex.conflicts_with_build(candidate, build) {
            -w.mutex_penalty
        } else {
            0.0
        };

        let tier = candidate.tier().map_or(0.0, |tier| w.tier.bonus(tier));

        let rate = candidate.rate().map_or(0.0, |rate| {
            (rate.clamp(0.0, MAX_RATE) - RATE_MIDPOINT) * w.rate_factor
        });

        let focus = context
            .focus_key()
            .and_then(|key| candidate.focus_rank(key))
            .map_or(0.0, |rank| {
                (w.focus_top_bonus - (rank as f32 - 1.0) * w.focus_rank_step).max(0.0)
            });

        let name_length = candidate.name().chars().count().min(NAME_LENGTH_CAP);
        let stability = (NAME_LENGTH_CAP - name_length) as f32 * w.stability_step;

        Some(ScoreBreakdown {
            tag_match: tag_hits as f32 * w.tag_match,
            synergy: synergy_hits as f32 * w.synergy,
            anti_synergy: -(clash_hits as f32) * w.anti_synergy,
            mutex_penalty,
            tier,
            rate,
            focus,
            stability,
        })
    }
}

impl PerkScorer for RuleBasedScorer {
    fn score(&self, candidate: &Perk, build: &Build<'_>, context: &SelectionContext) -> f32 {
        self.breakdown(candidate, build, context)
            .map_or(REJECTED_SCORE, |b| b.total())
    }
}

#[cfg(test)]
mod tests {
    use perkwise_catalog::{Role, Tier};

    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn stability(name: &str) -> f32 {
        (100.0 - name.chars().count() as f32) * 0.01
    }

    fn survivor(name: &str) -> Perk {
        Perk::new(name, name, Role::Survivor)
    }

    #[test]
    fn test_wrong_role_is_rejected() {
        let scorer = RuleBasedScorer::default();
        let perk = Perk::new("ruin", "Ruin", Role::Killer).with_tier(Tier::S);
        let context = SelectionContext::new(Role::Survivor);
        assert!(scorer.breakdown(&perk, &Build::new(), &context).is_none());
        assert_eq!(scorer.score(&perk, &Build::new(), &context), REJECTED_SCORE);
    }

    #[test]
    fn test_banned_by_name_or_id_is_rejected() {
        let scorer = RuleBasedScorer::default();
        let perk = Perk::new("p_dv", "Déjà Vu", Role::Survivor);
        for ban in ["DEJA VU", "P_DV"] {
            let context = SelectionContext::new(Role::Survivor).with_banned([ban]);
            assert_eq!(scorer.score(&perk, &Build::new(), &context), REJECTED_SCORE);
        }
    }

    #[test]
    fn test_bare_perk_scores_only_stability() {
        let scorer = RuleBasedScorer::default();
        let perk = survivor("Lithe");
        let context = SelectionContext::new(Role::Survivor);
        let breakdown = scorer.breakdown(&perk, &Build::new(), &context).unwrap();
        assert_close(breakdown.total(), stability("Lithe"));
        assert_eq!(breakdown.tier, 0.0);
        assert_eq!(breakdown.rate, 0.0);
        assert_eq!(breakdown.focus, 0.0);
    }

    #[test]
    fn test_tag_match_counts_each_desired_tag() {
        let scorer = RuleBasedScorer::default();
        let perk = survivor("Adrenaline").with_tags(["Chase", "Healing", "endgame"]);
        let context = SelectionContext::new(Role::Survivor).with_desired_tags(["chase", "HEALING", "aura"]);
        let breakdown = scorer.breakdown(&perk, &Build::new(), &context).unwrap();
        assert_close(breakdown.tag_match, 20.0);
    }

    #[test]
    fn test_synergy_counts_locks_and_picks_once() {
        let scorer = RuleBasedScorer::default();
        let bond = survivor("Bond");
        let kindred = survivor("Kindred");
        let candidate = survivor("Empathy").with_synergy(["bond", "Kindred", "Lithe"]);

        let mut build = Build::new();
        build.try_push(&bond).unwrap();
        build.try_push(&kindred).unwrap();
        // Bond is both locked and picked; it must count once.
        let context = SelectionContext::new(Role::Survivor).with_locked(["Bond", "Lithe"]);

        let breakdown = scorer.breakdown(&candidate, &build, &context).unwrap();
        assert_close(breakdown.synergy, 24.0);
    }

    #[test]
    fn test_anti_synergy_only_counts_picked_perks() {
        let scorer = RuleBasedScorer::default();
        let picked = survivor("Sprint Burst");
        let candidate = survivor("Dead Hard").with_anti_synergy(["sprint burst", "Lithe"]);

        let mut build = Build::new();
        build.try_push(&picked).unwrap();
        let context = SelectionContext::new(Role::Survivor).with_locked(["Lithe"]);

        let breakdown = scorer.breakdown(&candidate, &build, &context).unwrap();
        assert_close(breakdown.anti_synergy, -12.0);
    }

    #[test]
    fn test_mutex_penalty_applies_once() {
        let scorer = RuleBasedScorer::default();
        let a = survivor("Lithe").with_tags(["exhaustion"]);
        let b = survivor("Balanced Landing").with_tags(["exhaustion"]);
        let candidate = survivor("Sprint Burst").with_tags(["exhaustion"]);

        let mut build = Build::new();
        build.try_push(&a).unwrap();
        build.try_push(&b).unwrap();
        let context = SelectionContext::new(Role::Survivor);

        let breakdown = scorer.breakdown(&candidate, &build, &context).unwrap();
        assert_close(breakdown.mutex_penalty, -100.0);
    }

    #[test]
    fn test_rate_is_clamped_and_centered() {
        let scorer = RuleBasedScorer::default();
        let context = SelectionContext::new(Role::Survivor);
        for (rate, expected) in [(5.0, 7.5), (9.0, 7.5), (0.0, -7.5), (-3.0, -7.5), (2.5, 0.0), (3.5, 3.0)] {
            let perk = survivor("X").with_rate(rate);
            let breakdown = scorer.breakdown(&perk, &Build::new(), &context).unwrap();
            assert_close(breakdown.rate, expected);
        }
    }

    #[test]
    fn test_focus_bonus_by_rank() {
        let scorer = RuleBasedScorer::default();
        let context = SelectionContext::new(Role::Survivor).with_focus("Nurse");
        for (rank, expected) in [(1, 14.0), (2, 12.0), (7, 2.0), (8, 0.0), (20, 0.0)] {
            let perk = survivor("X").with_focus_rank("NURSE", rank);
            let breakdown = scorer.breakdown(&perk, &Build::new(), &context).unwrap();
            assert_close(breakdown.focus, expected);
        }

        let unranked = survivor("X").with_focus_rank("Hag", 1);
        let breakdown = scorer.breakdown(&unranked, &Build::new(), &context).unwrap();
        assert_eq!(breakdown.focus, 0.0);

        let no_focus = SelectionContext::new(Role::Survivor);
        let ranked = survivor("X").with_focus_rank("Nurse", 1);
        let breakdown = scorer.breakdown(&ranked, &Build::new(), &no_focus).unwrap();
        assert_eq!(breakdown.focus, 0.0);
    }

    #[test]
    fn test_tier_bonus() {
        let scorer = RuleBasedScorer::default();
        let context = SelectionContext::new(Role::Survivor);
        let perk = survivor("X").with_tier(Tier::D);
        let breakdown = scorer.breakdown(&perk, &Build::new(), &context).unwrap();
        assert_close(breakdown.tier, -2.0);
    }

    #[test]
    fn test_stability_favors_shorter_names_and_is_bounded() {
        let scorer = RuleBasedScorer::default();
        let context = SelectionContext::new(Role::Survivor);
        let short = scorer.score(&survivor("Bond"), &Build::new(), &context);
        let long = scorer.score(&survivor("Borrowed Time"), &Build::new(), &context);
        assert!(short > long);

        let huge = survivor(&"x".repeat(250));
        let breakdown = scorer.breakdown(&huge, &Build::new(), &context).unwrap();
        assert_eq!(breakdown.stability, 0.0);
        assert!(stability("") <= 1.0);
    }

    #[test]
    fn test_default_bonuses_never_outweigh_mutex_penalty() {
        let scorer = RuleBasedScorer::default();
        let picked = survivor("Lithe").with_tags(["exhaustion"]);
        let candidate = survivor("Sprint Burst")
            .with_tags(["exhaustion", "chase", "escape"])
            .with_synergy(["Lithe", "Bond"])
            .with_tier(Tier::S)
            .with_rate(5.0)
            .with_focus_rank("nurse", 1);

        let mut build = Build::new();
        build.try_push(&picked).unwrap();
        let context = SelectionContext::new(Role::Survivor)
            .with_desired_tags(["chase", "escape"])
            .with_locked(["Bond"])
            .with_focus("nurse");

        assert!(scorer.score(&candidate, &build, &context) < 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            tag_match: 1.0,
            stability_step: 0.0,
            ..ScoreWeights::default()
        };
        let scorer = RuleBasedScorer::new(weights, MutexModel::empty());
        let perk = survivor("X").with_tags(["chase"]);
        let context = SelectionContext::new(Role::Survivor).with_desired_tags(["chase"]);
        assert_close(scorer.score(&perk, &Build::new(), &context), 1.0);
    }
}
