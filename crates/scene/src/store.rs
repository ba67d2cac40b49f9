use std::collections::BTreeSet;

use tracing::debug;

use crate::country::CountryFeature;
use crate::family::FamilyIndex;
use crate::occurrence::{Occurrence, OccurrenceId, SpeciesKey};
use crate::selection::SelectionSet;

/// Occurrences and country boundaries, read-only after load.
#[derive(Debug, Clone)]
pub struct DataStore {
    occurrences: Vec<Occurrence>,
    countries: Vec<CountryFeature>,
    families: FamilyIndex,
}

impl DataStore {
    /// Builds the store. Adds a synthetic Antarctica feature when the
    /// boundary collection lacks one.
    pub fn new(occurrences: Vec<Occurrence>, mut countries: Vec<CountryFeature>) -> Self {
        if !countries.iter().any(CountryFeature::is_antarctica) {
            debug!("boundary collection has no Antarctica feature, adding latitude-only region");
            countries.push(CountryFeature::antarctica());
        }
        let families = FamilyIndex::build(&occurrences);
        Self {
            occurrences,
            countries,
            families,
        }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn get(&self, id: OccurrenceId) -> Option<&Occurrence> {
        self.occurrences.get(id.index() as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OccurrenceId, &Occurrence)> + '_ {
        self.occurrences
            .iter()
            .enumerate()
            .map(|(i, occ)| (OccurrenceId(i as u32), occ))
    }

    /// Resolves the ids of `set` in ascending order, skipping unknown ids.
    pub fn resolve<'a>(
        &'a self,
        set: &'a SelectionSet,
    ) -> impl Iterator<Item = (OccurrenceId, &'a Occurrence)> + 'a {
        set.iter().filter_map(|id| self.get(id).map(|occ| (id, occ)))
    }

    pub fn all(&self) -> SelectionSet {
        SelectionSet::full(self.occurrences.len())
    }

    pub fn families(&self) -> &FamilyIndex {
        &self.families
    }

    pub fn countries(&self) -> &[CountryFeature] {
        &self.countries
    }

    pub fn country(&self, id: &str) -> Option<&CountryFeature> {
        self.countries.iter().find(|c| c.id == id)
    }

    /// Countries with at least one occurrence of `set`, sorted by name.
    pub fn countries_with_occurrences(&self, set: &SelectionSet) -> Vec<&CountryFeature> {
        let mut out: Vec<&CountryFeature> = self
            .countries
            .iter()
            .filter(|country| self.resolve(set).any(|(_, occ)| country.contains(occ.position)))
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        out
    }

    pub fn occurrences_of_genus(&self, genus: &str) -> SelectionSet {
        self.iter()
            .filter(|(_, occ)| occ.genus == genus)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn occurrences_with_keys(&self, keys: &BTreeSet<SpeciesKey>) -> SelectionSet {
        self.iter()
            .filter(|(_, occ)| keys.contains(&occ.species_key()))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DataStore;
    use crate::country::{ANTARCTICA_ID, CountryFeature};
    use crate::occurrence::{Occurrence, OccurrenceId, SpeciesKey};
    use crate::period::Period;
    use foundation::math::LatLng;
    use foundation::time::AgeSpan;
    use geo::{MultiPolygon, polygon};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn occ(genus: &str, species: Option<&str>, lat: f64, lng: f64) -> Occurrence {
        Occurrence {
            genus: genus.to_string(),
            species: species.map(str::to_string),
            family: None,
            formation: String::new(),
            period: Period::Jurassico,
            age: AgeSpan::new(160.0, 150.0),
            position: LatLng::new(lat, lng),
            image_url: None,
        }
    }

    fn square(id: &str, name: &str, min: f64, max: f64) -> CountryFeature {
        let poly = polygon![
            (x: min, y: min),
            (x: max, y: min),
            (x: max, y: max),
            (x: min, y: max),
            (x: min, y: min),
        ];
        CountryFeature::new(id, name, MultiPolygon::new(vec![poly]))
    }

    #[test]
    fn adds_antarctica_when_missing() {
        let store = DataStore::new(vec![], vec![square("BBB", "Beta", 0.0, 1.0)]);
        assert!(store.country(ANTARCTICA_ID).is_some());
        assert_eq!(store.countries().len(), 2);
    }

    #[test]
    fn countries_with_occurrences_sorted_by_name() {
        let store = DataStore::new(
            vec![occ("A", None, 5.0, 5.0), occ("B", None, 25.0, 25.0), occ("C", None, -70.0, 0.0)],
            vec![
                square("ZZZ", "Zeta", 0.0, 10.0),
                square("AAA", "Alpha", 20.0, 30.0),
                square("EEE", "Empty", 50.0, 60.0),
            ],
        );
        let names: Vec<&str> = store
            .countries_with_occurrences(&store.all())
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Antarctica", "Zeta"]);
    }

    #[test]
    fn genus_and_key_lookups() {
        let store = DataStore::new(
            vec![
                occ("Rex", Some("a"), 0.0, 0.0),
                occ("Other", None, 0.0, 0.0),
                occ("Rex", Some("b"), 0.0, 0.0),
            ],
            vec![],
        );
        let rex: Vec<u32> = store
            .occurrences_of_genus("Rex")
            .iter()
            .map(OccurrenceId::index)
            .collect();
        assert_eq!(rex, vec![0, 2]);

        let keys: BTreeSet<SpeciesKey> = [SpeciesKey::new("Other", None)].into_iter().collect();
        let hits: Vec<u32> = store
            .occurrences_with_keys(&keys)
            .iter()
            .map(OccurrenceId::index)
            .collect();
        assert_eq!(hits, vec![1]);
    }
}
