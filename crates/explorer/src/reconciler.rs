use std::collections::{BTreeSet, HashSet};

use compute::TemporalAnalysis;
use foundation::time::AgeWindow;
use scene::{ALL_COUNTRIES, DataStore, SelectionSet, query_occurrences};
use tracing::debug;

use crate::basket::SelectionBasket;
use crate::filter::FilterState;
use crate::ports::{ControlPanel, SearchResult, SearchResults, SelectOption};

/// Range-control bounds for the current filters.
///
/// Working set is period AND country over the whole dataset, narrowed to the
/// family when one is chosen. Empty working set falls back to the full range.
pub fn range_with_priority(store: &DataStore, state: &FilterState) -> AgeWindow {
    let mut working = query_occurrences(store, &state.range_query()).hits;
    if let Some(family) = state.family.as_deref() {
        working.retain(|id| store.get(id).is_some_and(|occ| occ.has_family(family)));
    }
    TemporalAnalysis::subset_extent(store, &working).unwrap_or(AgeWindow::FULL)
}

/// Search within `visible`: genus contains the trimmed, lower-cased term.
/// One entry per species key, first occurrence wins.
pub fn search(
    store: &DataStore,
    visible: &SelectionSet,
    term: &str,
    basket: &SelectionBasket,
) -> SearchResults {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }

    let mut seen = HashSet::new();
    let entries = store
        .resolve(visible)
        .filter(|(_, occ)| occ.genus.to_lowercase().contains(&needle))
        .filter(|(_, occ)| seen.insert(occ.species_key()))
        .map(|(_, occ)| {
            let key = occ.species_key();
            SearchResult {
                selected: basket.contains(&key),
                key,
                title: occ.display_name(),
                family: occ.family.clone(),
                formation: occ.formation.clone(),
                period: occ.period.display_name(),
                start_ma: occ.age.start,
                end_ma: occ.age.end,
            }
        })
        .collect();

    SearchResults {
        term: needle,
        entries,
    }
}

/// Keeps the family and country selectors in line with the visible subset.
///
/// Each option list is recomputed only while its selector has no explicit
/// choice, so a chosen value is never pulled out from under the user.
#[derive(Debug, Default, Clone)]
pub struct Reconciler {
    family_options: Vec<SelectOption>,
    country_options: Vec<SelectOption>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family_options(&self) -> &[SelectOption] {
        &self.family_options
    }

    pub fn country_options(&self) -> &[SelectOption] {
        &self.country_options
    }

    pub fn reconcile<P: ControlPanel>(
        &mut self,
        store: &DataStore,
        visible: &SelectionSet,
        state: &FilterState,
        panel: &mut P,
    ) {
        if state.family.is_none() {
            let families: BTreeSet<&str> = store
                .resolve(visible)
                .filter_map(|(_, occ)| occ.family.as_deref())
                .collect();
            self.family_options = families
                .into_iter()
                .map(|f| SelectOption::new(f, f))
                .collect();
        }
        if state.country.is_all() {
            self.country_options = store
                .countries_with_occurrences(visible)
                .into_iter()
                .map(|c| SelectOption::new(c.id.clone(), c.name.clone()))
                .collect();
        }

        let family_selected = state
            .family
            .as_deref()
            .filter(|f| self.family_options.iter().any(|o| o.value == *f));
        let country_selected = state
            .country
            .region_id()
            .filter(|id| self.country_options.iter().any(|o| o.value == *id))
            .unwrap_or(ALL_COUNTRIES);

        debug!(
            families = self.family_options.len(),
            countries = self.country_options.len(),
            "reconciled option lists"
        );
        panel.set_family_options(&self.family_options, family_selected);
        panel.set_country_options(&self.country_options, country_selected);
    }
}
