use arrayvec::ArrayVec;

use crate::perk::Perk;

/// Maximum number of perks a build can hold.
pub const MAX_BUILD_SIZE: usize = 4;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BuildPushError {
    #[display("build already holds {MAX_BUILD_SIZE} perks")]
    Full,
    #[display("build already contains a perk named '{name}'")]
    DuplicateName { name: String },
}

/// An ordered set of up to [`MAX_BUILD_SIZE`] perks, distinct by normalized name.
///
/// A build borrows its perks from the catalog it was selected from. It has no identity
/// beyond its contents and is replaced wholesale on every recomputation.
///
/// # Example
///
/// ```
/// use perkwise_catalog::{Build, Perk, Role};
///
/// let kindred = Perk::new("k", "Kindred", Role::Survivor);
/// let shouty = Perk::new("k2", "KINDRED", Role::Survivor);
///
/// let mut build = Build::new();
/// assert!(build.try_push(&kindred).is_ok());
/// assert!(build.try_push(&shouty).is_err());
/// assert_eq!(build.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Build<'a> {
    perks: ArrayVec<&'a Perk, MAX_BUILD_SIZE>,
}

impl<'a> Build<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            perks: ArrayVec::new_const(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.perks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.perks.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.perks.is_full()
    }

    #[must_use]
    pub fn perks(&self) -> &[&'a Perk] {
        &self.perks
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Perk> + '_ {
        self.perks.iter().copied()
    }

    /// Returns `true` if a member has the given normalized name.
    #[must_use]
    pub fn contains_name(&self, name_key: &str) -> bool {
        self.perks.iter().any(|p| p.name_key() == name_key)
    }

    /// Normalized names of the members, in build order.
    pub fn name_keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.perks.iter().map(|p| p.name_key())
    }

    /// Display names of the members, in build order.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.perks.iter().map(|p| p.name()).collect()
    }

    /// Appends a perk, refusing when full or when its normalized name is already present.
    pub fn try_push(&mut self, perk: &'a Perk) -> Result<(), BuildPushError> {
        if self.is_full() {
            return Err(BuildPushError::Full);
        }
        if self.contains_name(perk.name_key()) {
            return Err(BuildPushError::DuplicateName {
                name: perk.name().to_owned(),
            });
        }
        self.perks.push(perk);
        Ok(())
    }
}

impl<'a, 'b> IntoIterator for &'b Build<'a> {
    type Item = &'a Perk;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a Perk>>;

    fn into_iter(self) -> Self::IntoIter {
        self.perks.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perk::Role;

    fn perks(names: &[&str]) -> Vec<Perk> {
        names
            .iter()
            .map(|name| Perk::new(*name, *name, Role::Survivor))
            .collect()
    }

    #[test]
    fn test_push_until_full() {
        let catalog = perks(&["A", "B", "C", "D", "E"]);
        let mut build = Build::new();
        for perk in &catalog[..4] {
            build.try_push(perk).unwrap();
        }
        assert!(build.is_full());
        assert!(matches!(
            build.try_push(&catalog[4]),
            Err(BuildPushError::Full)
        ));
        assert_eq!(build.names(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_duplicate_by_normalized_name_is_rejected() {
        let catalog = perks(&["Déjà Vu", "deja vu"]);
        let mut build = Build::new();
        build.try_push(&catalog[0]).unwrap();
        let err = build.try_push(&catalog[1]).unwrap_err();
        assert!(matches!(err, BuildPushError::DuplicateName { .. }));
        assert_eq!(build.len(), 1);
        assert!(build.contains_name("deja vu"));
    }

    #[test]
    fn test_iteration_preserves_order() {
        let catalog = perks(&["Lithe", "Bond", "Kindred"]);
        let mut build = Build::new();
        for perk in catalog.iter().rev() {
            build.try_push(perk).unwrap();
        }
        let keys: Vec<_> = build.name_keys().collect();
        assert_eq!(keys, ["kindred", "bond", "lithe"]);
        assert_eq!((&build).into_iter().count(), 3);
    }
}
