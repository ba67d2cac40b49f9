use std::collections::BTreeSet;

use scene::{DataStore, SelectionSet, SpeciesKey};

/// User-pinned species. Independent of the filter dimensions; survives filter
/// changes until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionBasket {
    keys: BTreeSet<SpeciesKey>,
}

impl SelectionBasket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &SpeciesKey) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SpeciesKey> + '_ {
        self.keys.iter()
    }

    /// Adds or removes `key`. Returns `true` if membership changed.
    pub fn set(&mut self, key: SpeciesKey, selected: bool) -> bool {
        if selected {
            self.keys.insert(key)
        } else {
            self.keys.remove(&key)
        }
    }

    /// Adds the key of every occurrence of `genus`. Returns how many keys were
    /// new.
    pub fn add_genus(&mut self, store: &DataStore, genus: &str) -> usize {
        let before = self.keys.len();
        for (_, occ) in store.resolve(&store.occurrences_of_genus(genus)) {
            self.keys.insert(occ.species_key());
        }
        self.keys.len() - before
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Every occurrence whose key is pinned, over the whole dataset.
    pub fn occurrences(&self, store: &DataStore) -> SelectionSet {
        store.occurrences_with_keys(&self.keys)
    }
}
