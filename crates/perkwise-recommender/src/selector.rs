//! Greedy build selection.
//!
//! The [`BuildSelector`] grows a build one perk at a time:
//!
//! 1. **Seed with locks** - Locked perks of the requested role that are not banned are added
//!    first, in catalog order, deduplicated by normalized name. Locks beyond the build size
//!    are dropped.
//! 2. **Form the pool** - Every other non-banned perk of the role, deduplicated by name.
//! 3. **Re-score and pick** - Each iteration scores the whole remaining pool against the
//!    current partial build and takes the best candidate, until the build is full or the
//!    pool is empty.
//!
//! Re-scoring every iteration matters: synergy, anti-synergy and mutex rules depend on what
//! has already been picked, so a perk that was mediocre in the first round can become the
//! best choice once its partner is in the build.
//!
//! # Design: Greedy, No Backtracking
//!
//! Each pick is final. The selector never revisits earlier picks, so it can miss builds
//! whose members are only good together. Mutex conflicts are penalized through the
//! scorer, not filtered, so a conflicting perk can still be picked when nothing else is
//! left.
//!
//! Ties resolve to the candidate that comes first in catalog order.
//!
//! # Usage
//!
//! ```
//! use perkwise_catalog::{Perk, Role, SelectionContext, Tier};
//! use perkwise_recommender::selector::BuildSelector;
//!
//! let catalog = vec![
//!     Perk::new("1", "Kindred", Role::Survivor).with_tier(Tier::A),
//!     Perk::new("2", "Bond", Role::Survivor).with_tier(Tier::B),
//! ];
//! let context = SelectionContext::new(Role::Survivor);
//!
//! let build = BuildSelector::default().select_build(&catalog, &context);
//! assert_eq!(build.names(), ["Kindred", "Bond"]);
//! ```

use log::{debug, trace};
use perkwise_catalog::{Build, Perk, SelectionContext, unique_by_name};

use crate::scoring::{PerkScorer, RuleBasedScorer};

/// How a perk got into the build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickReason {
    /// Pinned by the user.
    Locked,
    /// Chosen by score; the value is the score it had when picked.
    Scored(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct Pick<'c> {
    pub perk: &'c Perk,
    pub reason: PickReason,
}

/// A selected build together with the reason behind each member.
#[derive(Debug, Clone, Default)]
pub struct Selection<'c> {
    build: Build<'c>,
    picks: Vec<Pick<'c>>,
}

impl<'c> Selection<'c> {
    #[must_use]
    pub fn build(&self) -> &Build<'c> {
        &self.build
    }

    #[must_use]
    pub fn into_build(self) -> Build<'c> {
        self.build
    }

    /// Picks in build order.
    #[must_use]
    pub fn picks(&self) -> &[Pick<'c>] {
        &self.picks
    }

    fn push(&mut self, perk: &'c Perk, reason: PickReason) {
        if self.build.try_push(perk).is_ok() {
            self.picks.push(Pick { perk, reason });
        }
    }
}

/// Selects builds by repeatedly taking the best-scoring remaining perk.
#[derive(Debug)]
pub struct BuildSelector<'a> {
    scorer: Box<dyn PerkScorer + 'a>,
}

impl Default for BuildSelector<'_> {
    fn default() -> Self {
        Self::new(Box::new(RuleBasedScorer::default()))
    }
}

impl<'a> BuildSelector<'a> {
    #[must_use]
    pub fn new(scorer: Box<dyn PerkScorer + 'a>) -> Self {
        Self { scorer }
    }

    /// Selects up to [`MAX_BUILD_SIZE`](perkwise_catalog::MAX_BUILD_SIZE) perks.
    ///
    /// The result may be shorter (even empty) when the catalog has too few usable perks.
    #[must_use]
    pub fn select_build<'c>(&self, catalog: &'c [Perk], context: &SelectionContext) -> Build<'c> {
        self.select(catalog, context).into_build()
    }

    /// Like [`Self::select_build`], but also reports why each member was chosen.
    #[must_use]
    pub fn select<'c>(&self, catalog: &'c [Perk], context: &SelectionContext) -> Selection<'c> {
        let role = context.role();
        let usable = |perk: &&Perk| perk.role() == role && !context.banned().matches(perk);

        let mut selection = Selection::default();
        for perk in unique_by_name(
            catalog
                .iter()
                .filter(usable)
                .filter(|perk| context.locked().matches(perk)),
        ) {
            if selection.build.is_full() {
                debug!("dropping excess lock '{}'", perk.name());
                continue;
            }
            selection.push(perk, PickReason::Locked);
        }
        if selection.build.is_full() {
            return selection;
        }

        let mut pool: Vec<&Perk> = unique_by_name(catalog.iter().filter(usable))
            .filter(|perk| !selection.build.contains_name(perk.name_key()))
            .collect();

        while !selection.build.is_full() && !pool.is_empty() {
            let mut best: Option<(usize, f32)> = None;
            for (index, perk) in pool.iter().enumerate() {
                let score = self.scorer.score(perk, &selection.build, context);
                trace!("candidate '{}' scored {score:.2}", perk.name());
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((index, score));
                }
            }
            let Some((index, score)) = best else {
                break;
            };
            let perk = pool.remove(index);
            debug!("picked '{}' with score {score:.2}", perk.name());
            selection.push(perk, PickReason::Scored(score));
        }

        selection
    }
}
