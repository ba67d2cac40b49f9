use std::collections::HashMap;

use scene::{DataStore, SelectionSet, SpeciesKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesCount {
    pub key: SpeciesKey,
    pub count: usize,
}

/// The `n` most frequent genus+species keys of `subset`.
///
/// Ties keep first-encounter order. Occurrences of the unidentified genus are
/// not counted.
pub fn top_species(store: &DataStore, subset: &SelectionSet, n: usize) -> Vec<SpeciesCount> {
    let mut counts: Vec<SpeciesCount> = Vec::new();
    let mut slots: HashMap<SpeciesKey, usize> = HashMap::new();

    for (_, occ) in store.resolve(subset) {
        if !occ.is_identified() {
            continue;
        }
        let key = occ.species_key();
        match slots.get(&key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push(SpeciesCount { key, count: 1 });
            }
        }
    }

    // Stable sort keeps encounter order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}
