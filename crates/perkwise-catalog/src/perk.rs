use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::name::normalize;

/// The side a perk belongs to.
///
/// Every selection and scoring operation is scoped to a single role; perks of the other
/// role are never recommended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("survivor")]
    Survivor,
    #[display("killer")]
    Killer,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Survivor, Self::Killer];
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown role '{input}' (expected 'survivor' or 'killer')")]
pub struct ParseRoleError {
    input: String,
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s.trim()).as_str() {
            "survivor" => Ok(Self::Survivor),
            "killer" => Ok(Self::Killer),
            _ => Err(ParseRoleError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Community tier rank, best (`S`) to worst (`F`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Tier {
    pub const ALL: [Self; 7] = [
        Self::S,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
    ];
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown tier '{input}' (expected one of S, A, B, C, D, E, F)")]
pub struct ParseTierError {
    input: String,
}

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| s.trim().eq_ignore_ascii_case(&tier.to_string()))
            .ok_or_else(|| ParseTierError {
                input: s.to_owned(),
            })
    }
}

/// Popularity rank of a perk against one focus (for example a specific opponent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRank {
    pub focus_key: String,
    pub rank: u32,
}

/// Raw catalog record as produced by the ingestion step.
///
/// Optional fields may be missing or `null`. An unrecognized tier string is read as "no
/// tier" rather than rejected, since the ranking sources are loosely typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerkRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub synergy: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub anti_synergy: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tier")]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub rate: Option<f32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role_focus_ranking: Vec<FocusRank>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let tier = Option::<String>::deserialize(deserializer)?;
    Ok(tier.and_then(|s| s.parse().ok()))
}

/// An immutable catalog entry.
///
/// Tags, synergy and anti-synergy names, and focus keys are stored in normalized form
/// (see [`normalize`]); membership is all that matters for them. The display name and id
/// are kept verbatim alongside their normalized keys.
///
/// # Example
///
/// ```
/// use perkwise_catalog::{Perk, Role, Tier};
///
/// let perk = Perk::new("bond", "Bond", Role::Survivor)
///     .with_tags(["Altruism"])
///     .with_synergy(["Kindred"])
///     .with_tier(Tier::B)
///     .with_rate(3.2);
///
/// assert!(perk.has_tag("altruism"));
/// assert!(perk.synergizes_with("kindred"));
/// assert_eq!(perk.tier(), Some(Tier::B));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PerkRecord")]
pub struct Perk {
    id: String,
    name: String,
    role: Role,
    tags: BTreeSet<String>,
    synergy: BTreeSet<String>,
    anti_synergy: BTreeSet<String>,
    tier: Option<Tier>,
    rate: Option<f32>,
    focus_ranking: Vec<FocusRank>,
    id_key: String,
    name_key: String,
}

impl From<PerkRecord> for Perk {
    fn from(record: PerkRecord) -> Self {
        let normalize_all = |values: Vec<String>| -> BTreeSet<String> {
            values.iter().map(|v| normalize(v)).collect()
        };
        Self {
            id_key: normalize(&record.id),
            name_key: normalize(&record.name),
            id: record.id,
            name: record.name,
            role: record.role,
            tags: normalize_all(record.tags),
            synergy: normalize_all(record.synergy),
            anti_synergy: normalize_all(record.anti_synergy),
            tier: record.tier,
            rate: record.rate.filter(|rate| rate.is_finite()),
            focus_ranking: record
                .role_focus_ranking
                .into_iter()
                .map(|rank| FocusRank {
                    focus_key: normalize(&rank.focus_key),
                    rank: rank.rank,
                })
                .collect(),
        }
    }
}

impl Perk {
    /// Creates a perk with no tags, synergies, tier, rate or focus ranking.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self::from(PerkRecord {
            id: id.into(),
            name: name.into(),
            role,
            tags: vec![],
            synergy: vec![],
            anti_synergy: vec![],
            tier: None,
            rate: None,
            role_focus_ranking: vec![],
        })
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags
            .extend(tags.into_iter().map(|t| normalize(t.as_ref())));
        self
    }

    #[must_use]
    pub fn with_synergy<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.synergy
            .extend(names.into_iter().map(|n| normalize(n.as_ref())));
        self
    }

    #[must_use]
    pub fn with_anti_synergy<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.anti_synergy
            .extend(names.into_iter().map(|n| normalize(n.as_ref())));
        self
    }

    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Sets the usage rate. Non-finite values are ignored.
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate).filter(|rate| rate.is_finite());
        self
    }

    #[must_use]
    pub fn with_focus_rank(mut self, focus_key: &str, rank: u32) -> Self {
        self.focus_ranking.push(FocusRank {
            focus_key: normalize(focus_key),
            rank,
        });
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Normalized form of [`Self::id`].
    #[must_use]
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    /// Normalized form of [`Self::name`]; the identity of the perk.
    #[must_use]
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// Returns `true` if `key` (already normalized) equals this perk's normalized name or id.
    #[must_use]
    pub fn matches_key(&self, key: &str) -> bool {
        self.name_key == key || (!self.id_key.is_empty() && self.id_key == key)
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Tag membership test; `tag` must already be normalized.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn synergy(&self) -> &BTreeSet<String> {
        &self.synergy
    }

    /// Synergy membership test; `name_key` must already be normalized.
    #[must_use]
    pub fn synergizes_with(&self, name_key: &str) -> bool {
        self.synergy.contains(name_key)
    }

    #[must_use]
    pub fn anti_synergy(&self) -> &BTreeSet<String> {
        &self.anti_synergy
    }

    /// Anti-synergy membership test; `name_key` must already be normalized.
    #[must_use]
    pub fn clashes_with(&self, name_key: &str) -> bool {
        self.anti_synergy.contains(name_key)
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// Usage rate as published by the source; not clamped.
    #[must_use]
    pub fn rate(&self) -> Option<f32> {
        self.rate
    }

    #[must_use]
    pub fn focus_ranking(&self) -> &[FocusRank] {
        &self.focus_ranking
    }

    /// Rank of this perk for the given (normalized) focus key, if ranked.
    #[must_use]
    pub fn focus_rank(&self, focus_key: &str) -> Option<u32> {
        self.focus_ranking
            .iter()
            .find(|r| r.focus_key == focus_key)
            .map(|r| r.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("survivor".parse::<Role>().unwrap(), Role::Survivor);
        assert_eq!(" Killer ".parse::<Role>().unwrap(), Role::Killer);
        let err = "hunter".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("hunter"));
    }

    #[test]
    fn test_tier_from_str_is_case_insensitive() {
        assert_eq!("s".parse::<Tier>().unwrap(), Tier::S);
        assert_eq!("F".parse::<Tier>().unwrap(), Tier::F);
        assert!("SS".parse::<Tier>().is_err());
        assert!(Tier::S < Tier::F);
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "p_dh",
            "name": "Dead Hard",
            "role": "survivor",
            "tags": ["Exhaustion", "Chase"],
            "synergy": ["Résilience"],
            "antiSynergy": ["Sprint Burst"],
            "tier": "a",
            "rate": 4.1,
            "roleFocusRanking": [{ "focusKey": "Nurse", "rank": 3 }]
        }"#;
        let perk: Perk = serde_json::from_str(json).unwrap();

        assert_eq!(perk.id(), "p_dh");
        assert_eq!(perk.name(), "Dead Hard");
        assert_eq!(perk.name_key(), "dead hard");
        assert_eq!(perk.role(), Role::Survivor);
        assert!(perk.has_tag("exhaustion"));
        assert!(perk.has_tag("chase"));
        assert!(perk.synergizes_with("resilience"));
        assert!(perk.clashes_with("sprint burst"));
        assert_eq!(perk.tier(), Some(Tier::A));
        assert_eq!(perk.rate(), Some(4.1));
        assert_eq!(perk.focus_rank("nurse"), Some(3));
        assert_eq!(perk.focus_rank("hag"), None);
    }

    #[test]
    fn test_deserialize_degrades_missing_and_malformed_fields() {
        let json = r#"{
            "name": "Kindred",
            "role": "survivor",
            "tags": null,
            "synergy": null,
            "tier": "legendary",
            "rate": null
        }"#;
        let perk: Perk = serde_json::from_str(json).unwrap();

        assert!(perk.tags().is_empty());
        assert!(perk.synergy().is_empty());
        assert!(perk.anti_synergy().is_empty());
        assert_eq!(perk.tier(), None);
        assert_eq!(perk.rate(), None);
        assert!(perk.focus_ranking().is_empty());
        assert_eq!(perk.id(), "");
    }

    #[test]
    fn test_deserialize_rejects_unknown_role() {
        let json = r#"{ "name": "Kindred", "role": "spectator" }"#;
        assert!(serde_json::from_str::<Perk>(json).is_err());
    }

    #[test]
    fn test_matches_key_uses_name_or_id() {
        let perk = Perk::new("P_SB", "Sprint Burst", Role::Survivor);
        assert!(perk.matches_key("sprint burst"));
        assert!(perk.matches_key("p_sb"));
        assert!(!perk.matches_key("sprint"));

        let anonymous = Perk::new("", "Lithe", Role::Survivor);
        assert!(!anonymous.matches_key(""));
    }

    #[test]
    fn test_with_rate_ignores_non_finite() {
        let perk = Perk::new("x", "X", Role::Killer).with_rate(f32::NAN);
        assert_eq!(perk.rate(), None);
    }
}
