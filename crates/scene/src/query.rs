use foundation::time::AgeWindow;

use crate::country::{CountryFeature, CountryFilter, in_antarctica};
use crate::occurrence::Occurrence;
use crate::period::Period;
use crate::selection::SelectionSet;
use crate::store::DataStore;

/// Conjunction of filter dimensions over the occurrence list.
///
/// Every `None`/`All` dimension is inactive. Active dimensions are ANDed, so
/// evaluation order does not affect the result.
///
/// Ordering contract:
/// - `query_occurrences` returns a `SelectionSet` iterating in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceQuery {
    pub age_window: Option<AgeWindow>,
    pub period: Option<Period>,
    pub country: CountryFilter,
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub hits: SelectionSet,
    /// Set when the country filter named an id without geometry. The country
    /// step was skipped.
    pub missing_country: Option<String>,
}

enum CountryTest<'a> {
    Any,
    Antarctica,
    Feature(&'a CountryFeature),
}

impl CountryTest<'_> {
    fn admits(&self, occ: &Occurrence) -> bool {
        match self {
            CountryTest::Any => true,
            CountryTest::Antarctica => in_antarctica(occ.position),
            CountryTest::Feature(feature) => feature.contains(occ.position),
        }
    }
}

fn window_allows(window: Option<AgeWindow>, occ: &Occurrence) -> bool {
    window.is_none_or(|w| w.overlaps(occ.age))
}

fn period_allows(period: Option<Period>, occ: &Occurrence) -> bool {
    period.is_none_or(|p| p.admits(occ.period))
}

fn family_allows(family: Option<&str>, occ: &Occurrence) -> bool {
    family.is_none_or(|f| occ.has_family(f))
}

pub fn query_occurrences(store: &DataStore, query: &OccurrenceQuery) -> QueryOutcome {
    let mut missing_country = None;
    let country = match &query.country {
        CountryFilter::All => CountryTest::Any,
        CountryFilter::Region(id) => match store.country(id) {
            Some(feature) if feature.is_antarctica() => CountryTest::Antarctica,
            Some(feature) => CountryTest::Feature(feature),
            None => {
                missing_country = Some(id.clone());
                CountryTest::Any
            }
        },
    };

    let hits = store
        .iter()
        .filter(|(_, occ)| window_allows(query.age_window, occ))
        .filter(|(_, occ)| period_allows(query.period, occ))
        .filter(|(_, occ)| country.admits(occ))
        .filter(|(_, occ)| family_allows(query.family.as_deref(), occ))
        .map(|(id, _)| id)
        .collect();

    QueryOutcome {
        hits,
        missing_country,
    }
}
