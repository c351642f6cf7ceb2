//! Constrained random builds.
//!
//! Random builds ignore scores entirely. The role's non-banned pool (deduplicated by
//! normalized name) is shuffled uniformly and then filled in two passes:
//!
//! 1. **Strict pass** - Take perks in shuffled order, skipping any that conflicts with a
//!    perk already taken. Mutex is a hard constraint here.
//! 2. **Fallback pass** - If the build is still short because the mutex constraint exhausted
//!    the pool, walk the same shuffled order again and take anything not yet present.
//!
//! The fallback trades purity for size: it is the only way a random build can contain a
//! mutex conflict, and it only runs when the strict pass could not fill every slot.
//!
//! # Example
//!
//! ```
//! use perkwise_catalog::{NameSet, Perk, Role};
//! use perkwise_recommender::{
//!     mutex::MutexModel,
//!     random::{BuildSeed, RandomBuildGenerator},
//! };
//!
//! let catalog: Vec<_> = ["Bond", "Kindred", "Lithe", "Dead Hard", "Empathy"]
//!     .into_iter()
//!     .map(|name| Perk::new(name, name, Role::Survivor))
//!     .collect();
//!
//! let seed: BuildSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut generator1 = RandomBuildGenerator::with_seed(MutexModel::default(), seed);
//! let mut generator2 = RandomBuildGenerator::with_seed(MutexModel::default(), seed);
//!
//! let bans: NameSet = ["Bond"].into_iter().collect();
//! let build1 = generator1.generate(&catalog, Role::Survivor, &bans);
//! let build2 = generator2.generate(&catalog, Role::Survivor, &bans);
//!
//! assert_eq!(build1.names(), build2.names());
//! assert!(!build1.contains_name("bond"));
//! ```

use std::{fmt::Write as _, str::FromStr};

use log::debug;
use perkwise_catalog::{Build, NameSet, Perk, Role, unique_by_name};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mutex::MutexModel;

/// Generates a random build for `role` using the given random number generator.
///
/// The returned build has at most [`MAX_BUILD_SIZE`](perkwise_catalog::MAX_BUILD_SIZE)
/// perks, fewer when the non-banned pool is smaller than that.
pub fn generate_build<'c, R>(
    catalog: &'c [Perk],
    role: Role,
    banned: &NameSet,
    mutex: &MutexModel,
    rng: &mut R,
) -> Build<'c>
where
    R: Rng + ?Sized,
{
    let mut pool: Vec<&Perk> =
        unique_by_name(catalog.iter().filter(|p| p.role() == role && !banned.matches(p)))
            .collect();
    pool.shuffle(rng);

    let mut build = Build::new();
    for &perk in &pool {
        if build.is_full() {
            break;
        }
        if mutex.conflicts_with_build(perk, &build) {
            continue;
        }
        // Names are unique within the pool, so this cannot fail.
        let _ = build.try_push(perk);
    }

    let strict_len = build.len();
    if !build.is_full() {
        for &perk in &pool {
            if build.is_full() {
                break;
            }
            if !build.contains_name(perk.name_key()) {
                let _ = build.try_push(perk);
            }
        }
    }
    debug!(
        "random {role} build: {strict_len} strict, {} fallback, pool of {}",
        build.len() - strict_len,
        pool.len()
    );

    build
}

/// Seed for deterministic random builds.
///
/// A 128-bit value, written as a 32-character hex string in JSON and on the command line.
/// The same seed, catalog and bans always yield the same sequence of builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed '{input}': expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for BuildSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BuildSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for BuildSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<BuildSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BuildSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BuildSeed(seed)
    }
}

/// Produces random builds from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomBuildGenerator {
    rng: Pcg32,
    mutex: MutexModel,
}

impl RandomBuildGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new(mutex: MutexModel) -> Self {
        Self::with_seed(mutex, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible builds.
    #[must_use]
    pub fn with_seed(mutex: MutexModel, seed: BuildSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            mutex,
        }
    }

    pub fn generate<'c>(&mut self, catalog: &'c [Perk], role: Role, banned: &NameSet) -> Build<'c> {
        generate_build(catalog, role, banned, &self.mutex, &mut self.rng)
    }
}
