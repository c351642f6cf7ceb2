//! Perk build recommendation engine.
//!
//! This crate turns a read-only [`perkwise_catalog`] catalog plus user constraints into a
//! build of up to four perks. It offers two strategies over a shared constraint model:
//!
//! 1. **Greedy selection** ([`selector`]) - Seeds the build with locked perks, then
//!    repeatedly re-scores the remaining pool and takes the best candidate.
//!
//! 2. **Random generation** ([`random`]) - Shuffles the pool and fills the build with
//!    mutex as a hard constraint, falling back to a conflict-tolerant pass when needed.
//!
//! # Architecture
//!
//! ```text
//! Greedy Build Selector          Random Build Generator
//!     ↓ uses                         ↓ uses
//! Scoring Function ──uses──→ Mutex Model
//! ```
//!
//! # Supporting Modules
//!
//! - [`scoring`] - Rule-based candidate scoring with per-rule breakdown
//! - [`mutex`] - Per-role mutually exclusive tag groups
//! - [`config`] - Scoring weights and mutex groups, loadable from JSON
//!
//! # Soft vs. Hard Mutex
//!
//! The greedy selector only penalizes mutex conflicts (−100 by default), while the random
//! generator refuses them until it runs out of alternatives. With the default weights no
//! combination of bonuses reaches 100, so the greedy penalty acts as a hard constraint in
//! practice; that is a property of the weights, not a structural guarantee.
//!
//! # Example
//!
//! ```
//! use perkwise_catalog::{Perk, Role, SelectionContext, Tier};
//!
//! let catalog = vec![
//!     Perk::new("1", "Sprint Burst", Role::Survivor).with_tags(["exhaustion"]).with_tier(Tier::S),
//!     Perk::new("2", "Lithe", Role::Survivor).with_tags(["exhaustion"]).with_tier(Tier::A),
//!     Perk::new("3", "Kindred", Role::Survivor).with_tags(["aura"]).with_tier(Tier::B),
//! ];
//! let context = SelectionContext::new(Role::Survivor);
//!
//! let build = perkwise_recommender::select_build(&catalog, &context);
//! assert_eq!(build.names(), ["Sprint Burst", "Kindred", "Lithe"]);
//! assert!(perkwise_recommender::conflicts(&catalog[0], &catalog[1]));
//! ```

use std::sync::LazyLock;

use perkwise_catalog::{Build, NameSet, Perk, Role, SelectionContext};

pub use perkwise_catalog::normalize;

use self::{mutex::MutexModel, selector::BuildSelector};

pub mod config;
pub mod mutex;
pub mod random;
pub mod scoring;
pub mod selector;

static DEFAULT_MUTEX: LazyLock<MutexModel> = LazyLock::new(MutexModel::default);

/// Returns `true` if the two perks share a mutex tag under the default mutex groups.
#[must_use]
pub fn conflicts(a: &Perk, b: &Perk) -> bool {
    DEFAULT_MUTEX.conflicts(a, b)
}

/// Selects a build greedily using the default scoring weights and mutex groups.
#[must_use]
pub fn select_build<'c>(catalog: &'c [Perk], context: &SelectionContext) -> Build<'c> {
    BuildSelector::default().select_build(catalog, context)
}

/// Generates a random build using the default mutex groups and the thread-local RNG.
#[must_use]
pub fn random_build<'c>(catalog: &'c [Perk], role: Role, banned: &NameSet) -> Build<'c> {
    random::generate_build(catalog, role, banned, &DEFAULT_MUTEX, &mut rand::rng())
}
