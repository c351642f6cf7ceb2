use std::collections::BTreeSet;

use crate::{
    name::normalize,
    perk::{Perk, Role},
};

/// A set of user-entered perk names or ids, stored normalized.
///
/// Used for both locks and bans. Entries that normalize to the empty string are dropped.
///
/// # Example
///
/// ```
/// use perkwise_catalog::{NameSet, Perk, Role};
///
/// let bans: NameSet = ["DÉJÀ VU", "p_sb"].into_iter().collect();
///
/// assert!(bans.matches(&Perk::new("p_dv", "Deja Vu", Role::Survivor)));
/// assert!(bans.matches(&Perk::new("p_sb", "Sprint Burst", Role::Survivor)));
/// assert!(!bans.matches(&Perk::new("p_dh", "Dead Hard", Role::Survivor)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    keys: BTreeSet<String>,
}

impl NameSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, entry: &str) {
        let key = normalize(entry);
        if !key.is_empty() {
            self.keys.insert(key);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Membership test for an already-normalized key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if the perk's normalized name or id is in the set.
    #[must_use]
    pub fn matches(&self, perk: &Perk) -> bool {
        self.contains_key(perk.name_key())
            || (!perk.id_key().is_empty() && self.contains_key(perk.id_key()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }
}

impl<S> FromIterator<S> for NameSet
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S> Extend<S> for NameSet
where
    S: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry.as_ref());
        }
    }
}

/// User constraints for one selection call.
///
/// Built fresh on every user action and never mutated while a selection runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    role: Role,
    desired_tags: BTreeSet<String>,
    locked: NameSet,
    banned: NameSet,
    focus_key: Option<String>,
}

impl SelectionContext {
    /// Creates a context for `role` with no tags, locks, bans or focus.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            desired_tags: BTreeSet::new(),
            locked: NameSet::new(),
            banned: NameSet::new(),
            focus_key: None,
        }
    }

    #[must_use]
    pub fn with_desired_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.desired_tags
            .extend(tags.into_iter().map(|t| normalize(t.as_ref())));
        self
    }

    #[must_use]
    pub fn with_locked<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.locked.extend(names);
        self
    }

    #[must_use]
    pub fn with_banned<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.banned.extend(names);
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focus_key: &str) -> Self {
        self.focus_key = Some(normalize(focus_key));
        self
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Normalized desired tags.
    #[must_use]
    pub fn desired_tags(&self) -> &BTreeSet<String> {
        &self.desired_tags
    }

    #[must_use]
    pub fn locked(&self) -> &NameSet {
        &self.locked
    }

    #[must_use]
    pub fn banned(&self) -> &NameSet {
        &self.banned
    }

    /// Normalized focus key, if any.
    #[must_use]
    pub fn focus_key(&self) -> Option<&str> {
        self.focus_key.as_deref()
    }
}
