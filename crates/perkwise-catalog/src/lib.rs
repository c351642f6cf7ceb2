//! Read-only perk catalog and the constraint types the recommender operates over.
//!
//! This crate holds the data shapes shared by every selection strategy:
//!
//! - [`Perk`] - An immutable catalog entry (role, tags, synergy lists, tier, rate, focus ranks)
//! - [`Catalog`] - An ordered collection of perks loaded from JSON
//! - [`SelectionContext`] - Per-call user constraints (desired tags, locks, bans, focus key)
//! - [`Build`] - The output of a selection: up to [`MAX_BUILD_SIZE`] distinct perks
//! - [`normalize`] - Case- and accent-insensitive canonical form for names
//!
//! # Identity
//!
//! Perks are identified by their *normalized name*, not by `id`. Catalogs assembled from
//! several data sources may carry near-duplicate names ("Déjà Vu" and "deja vu"), and every
//! comparison in the recommender (lock/ban matching, deduplication, synergy lookup) goes
//! through [`normalize`] so that such entries collapse into one.
//!
//! # Example
//!
//! ```
//! use perkwise_catalog::{Build, Perk, Role, SelectionContext, Tier};
//!
//! let sprint = Perk::new("sb", "Sprint Burst", Role::Survivor)
//!     .with_tags(["exhaustion", "chase"])
//!     .with_tier(Tier::S);
//!
//! let context = SelectionContext::new(Role::Survivor)
//!     .with_desired_tags(["Chase"])
//!     .with_banned(["DEAD HARD"]);
//!
//! let mut build = Build::new();
//! build.try_push(&sprint).unwrap();
//! assert!(build.contains_name("sprint burst"));
//! assert!(context.desired_tags().contains("chase"));
//! ```

pub use self::{build::*, catalog::*, context::*, name::*, perk::*};

mod build;
mod catalog;
mod context;
mod name;
mod perk;
