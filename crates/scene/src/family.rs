use std::collections::{BTreeMap, BTreeSet};

use crate::occurrence::Occurrence;

/// Family name to the genera observed with it. Built once at load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FamilyIndex {
    genera_by_family: BTreeMap<String, BTreeSet<String>>,
}

impl FamilyIndex {
    pub fn build<'a>(occurrences: impl IntoIterator<Item = &'a Occurrence>) -> Self {
        let mut genera_by_family: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for occ in occurrences {
            let Some(family) = &occ.family else { continue };
            genera_by_family
                .entry(family.clone())
                .or_default()
                .insert(occ.genus.clone());
        }
        Self { genera_by_family }
    }

    pub fn len(&self) -> usize {
        self.genera_by_family.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genera_by_family.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &str> + '_ {
        self.genera_by_family.keys().map(String::as_str)
    }

    pub fn genera(&self, family: &str) -> impl Iterator<Item = &str> + '_ {
        self.genera_by_family
            .get(family)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Other genera of `family`, in name order, at most `limit`.
    pub fn related(&self, family: &str, genus: &str, limit: usize) -> Vec<String> {
        self.genera(family)
            .filter(|g| *g != genus)
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}
