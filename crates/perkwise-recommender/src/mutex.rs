//! Mutual-exclusion tag groups.
//!
//! Some tags describe effects that cannot usefully coexist in one build (two survivor
//! perks that both cause *exhaustion* compete for the same cooldown). The [`MutexModel`]
//! maps each role to the set of such tags and answers whether two perks clash.
//!
//! The model is enforced differently by the two selection strategies: the greedy
//! [`BuildSelector`](crate::selector::BuildSelector) subtracts a large penalty (soft), the
//! [`random generator`](crate::random) refuses conflicting perks in its first pass (hard).

use std::collections::{BTreeMap, BTreeSet};

use perkwise_catalog::{Build, Perk, Role, normalize};
use serde::{Deserialize, Serialize};

type MutexTagMap = BTreeMap<Role, BTreeSet<String>>;

/// Per-role sets of mutually exclusive tags.
///
/// Two perks conflict only when they *share* a tag that is in their role's set. Holding
/// two different mutex tags is not a conflict.
///
/// # Example
///
/// ```
/// use perkwise_catalog::{Perk, Role};
/// use perkwise_recommender::mutex::MutexModel;
///
/// let model = MutexModel::default();
/// let sprint = Perk::new("sb", "Sprint Burst", Role::Survivor).with_tags(["Exhaustion"]);
/// let lithe = Perk::new("li", "Lithe", Role::Survivor).with_tags(["exhaustion"]);
/// let bond = Perk::new("bo", "Bond", Role::Survivor).with_tags(["aura"]);
///
/// assert!(model.conflicts(&sprint, &lithe));
/// assert!(!model.conflicts(&sprint, &bond));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MutexTagMap", into = "MutexTagMap")]
pub struct MutexModel {
    tags: MutexTagMap,
}

impl Default for MutexModel {
    fn default() -> Self {
        Self::empty().with_role_tags(Role::Survivor, ["exhaustion"])
    }
}

impl From<MutexTagMap> for MutexModel {
    fn from(tags: MutexTagMap) -> Self {
        tags.into_iter()
            .fold(Self::empty(), |model, (role, tags)| {
                model.with_role_tags(role, tags)
            })
    }
}

impl From<MutexModel> for MutexTagMap {
    fn from(model: MutexModel) -> Self {
        model.tags
    }
}

impl MutexModel {
    /// A model with no mutex tags for any role.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Adds mutex tags for `role`; tags are normalized.
    #[must_use]
    pub fn with_role_tags<I, S>(mut self, role: Role, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags
            .entry(role)
            .or_default()
            .extend(tags.into_iter().map(|t| normalize(t.as_ref())));
        self
    }

    /// Mutex tags configured for `role`.
    pub fn role_tags(&self, role: Role) -> impl Iterator<Item = &str> + '_ {
        self.tags
            .get(&role)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Returns `true` if both perks are of the same role and share a mutex tag of that role.
    #[must_use]
    pub fn conflicts(&self, a: &Perk, b: &Perk) -> bool {
        if a.role() != b.role() {
            return false;
        }
        let Some(mutex_tags) = self.tags.get(&a.role()) else {
            return false;
        };
        a.tags()
            .intersection(b.tags())
            .any(|tag| mutex_tags.contains(tag))
    }

    /// Returns `true` if `candidate` conflicts with any member of `build`.
    #[must_use]
    pub fn conflicts_with_build(&self, candidate: &Perk, build: &Build<'_>) -> bool {
        build.iter().any(|member| self.conflicts(candidate, member))
    }

    /// Number of conflicting member pairs in `build`.
    #[must_use]
    pub fn conflicting_pairs(&self, build: &Build<'_>) -> usize {
        let perks = build.perks();
        perks
            .iter()
            .enumerate()
            .map(|(i, a)| {
                perks[i + 1..]
                    .iter()
                    .filter(|b| self.conflicts(a, b))
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survivor(name: &str, tags: &[&str]) -> Perk {
        Perk::new(name, name, Role::Survivor).with_tags(tags)
    }

    #[test]
    fn test_shared_mutex_tag_conflicts() {
        let model = MutexModel::default();
        let a = survivor("A", &["exhaustion", "chase"]);
        let b = survivor("B", &["Exhaustion"]);
        assert!(model.conflicts(&a, &b));
        assert!(model.conflicts(&b, &a));
    }

    #[test]
    fn test_shared_non_mutex_tag_does_not_conflict() {
        let model = MutexModel::default();
        let a = survivor("A", &["chase"]);
        let b = survivor("B", &["chase"]);
        assert!(!model.conflicts(&a, &b));
    }

    #[test]
    fn test_different_mutex_tags_do_not_conflict() {
        let model = MutexModel::empty().with_role_tags(Role::Survivor, ["exhaustion", "endurance"]);
        let a = survivor("A", &["exhaustion"]);
        let b = survivor("B", &["endurance"]);
        assert!(!model.conflicts(&a, &b));
    }

    #[test]
    fn test_cross_role_never_conflicts() {
        let model = MutexModel::default().with_role_tags(Role::Killer, ["exhaustion"]);
        let a = survivor("A", &["exhaustion"]);
        let b = Perk::new("B", "B", Role::Killer).with_tags(["exhaustion"]);
        assert!(!model.conflicts(&a, &b));
    }

    #[test]
    fn test_role_without_group_never_conflicts() {
        let model = MutexModel::default();
        let a = Perk::new("A", "A", Role::Killer).with_tags(["hex"]);
        let b = Perk::new("B", "B", Role::Killer).with_tags(["hex"]);
        assert!(!model.conflicts(&a, &b));
        assert_eq!(model.role_tags(Role::Killer).count(), 0);
    }

    #[test]
    fn test_conflicts_with_build_and_pair_count() {
        let model = MutexModel::default();
        let perks = [
            survivor("A", &["exhaustion"]),
            survivor("B", &["exhaustion"]),
            survivor("C", &["aura"]),
            survivor("D", &["exhaustion"]),
        ];
        let mut build = Build::new();
        build.try_push(&perks[0]).unwrap();
        build.try_push(&perks[2]).unwrap();
        assert!(model.conflicts_with_build(&perks[1], &build));
        assert!(!model.conflicts_with_build(&perks[2], &Build::new()));
        assert_eq!(model.conflicting_pairs(&build), 0);

        build.try_push(&perks[1]).unwrap();
        build.try_push(&perks[3]).unwrap();
        assert_eq!(model.conflicting_pairs(&build), 3);
    }

    #[test]
    fn test_deserialize_normalizes_tags() {
        let json = r#"{ "survivor": ["EXHAUSTION"], "killer": ["Hëx"] }"#;
        let model: MutexModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.role_tags(Role::Survivor).collect::<Vec<_>>(), ["exhaustion"]);
        assert_eq!(model.role_tags(Role::Killer).collect::<Vec<_>>(), ["hex"]);

        let roundtrip: MutexModel =
            serde_json::from_str(&serde_json::to_string(&model).unwrap()).unwrap();
        assert_eq!(roundtrip, model);
    }
}
