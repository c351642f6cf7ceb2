use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    name::normalize,
    perk::{Perk, Role},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("failed to open catalog file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse catalog file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An ordered, read-only list of perks.
///
/// The catalog is deserialized from a JSON array of perk records. Catalog order is
/// significant: it decides which of several locked perks win when there are too many, and
/// which near-duplicate survives deduplication.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    perks: Vec<Perk>,
}

impl From<Vec<Perk>> for Catalog {
    fn from(perks: Vec<Perk>) -> Self {
        Self { perks }
    }
}

impl FromIterator<Perk> for Catalog {
    fn from_iter<I: IntoIterator<Item = Perk>>(iter: I) -> Self {
        Self {
            perks: iter.into_iter().collect(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(perks: Vec<Perk>) -> Self {
        Self { perks }
    }

    /// Reads a catalog from a JSON file.
    pub fn open<P>(path: P) -> Result<Self, CatalogError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    #[must_use]
    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.perks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.perks.is_empty()
    }

    /// Finds the first perk whose normalized name or id equals the normalized query.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&Perk> {
        let key = normalize(query);
        self.perks.iter().find(|p| p.matches_key(&key))
    }

    /// Perks of `role` in catalog order, deduplicated by normalized name.
    pub fn role_pool(&self, role: Role) -> impl Iterator<Item = &Perk> + '_ {
        unique_by_name(self.perks.iter().filter(move |p| p.role() == role))
    }
}

/// Drops perks whose normalized name was already yielded, keeping the first occurrence.
pub fn unique_by_name<'a, I>(perks: I) -> impl Iterator<Item = &'a Perk>
where
    I: IntoIterator<Item = &'a Perk>,
{
    let mut seen = HashSet::new();
    perks
        .into_iter()
        .filter(move |p| seen.insert(p.name_key()))
}
