use foundation::time::AgeWindow;
use scene::{
    CountryFilter, DataStore, OccurrenceQuery, Period, QueryOutcome, query_occurrences,
};
use serde::Serialize;

/// The filter dimensions a user can set. One instance per explorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub period: Option<Period>,
    pub family: Option<String>,
    pub country: CountryFilter,
    pub age_window: AgeWindow,
    /// Drives the search list only. Never narrows the visible subset.
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            period: None,
            family: None,
            country: CountryFilter::All,
            age_window: AgeWindow::FULL,
            search_term: String::new(),
        }
    }
}

impl FilterState {
    /// Every dimension, as used for the visible subset.
    pub fn to_query(&self) -> OccurrenceQuery {
        OccurrenceQuery {
            age_window: Some(self.age_window),
            period: self.period,
            country: self.country.clone(),
            family: self.family.clone(),
        }
    }

    /// Period and country only. The range control derives its bounds from
    /// this working set before narrowing to the family.
    pub fn range_query(&self) -> OccurrenceQuery {
        OccurrenceQuery {
            age_window: None,
            period: self.period,
            country: self.country.clone(),
            family: None,
        }
    }

    pub fn evaluate(&self, store: &DataStore) -> QueryOutcome {
        query_occurrences(store, &self.to_query())
    }

    /// Most specific active filter, for the summary headline.
    pub fn context(&self, store: &DataStore) -> FilterContext {
        if let Some(family) = &self.family {
            return FilterContext::Family(family.clone());
        }
        if let Some(id) = self.country.region_id()
            && let Some(country) = store.country(id)
        {
            return if country.is_antarctica() {
                FilterContext::Antarctica
            } else {
                FilterContext::Country(country.name.clone())
            };
        }
        if let Some(period) = self.period {
            return FilterContext::Period(period);
        }
        FilterContext::Overall
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterContext {
    Overall,
    Period(Period),
    Country(String),
    Antarctica,
    Family(String),
    Selected,
}

impl FilterContext {
    pub fn label(&self) -> String {
        match self {
            FilterContext::Overall => "overall".to_string(),
            FilterContext::Period(p) => format!("from the {} period", p.display_name()),
            FilterContext::Country(name) => format!("in {name}"),
            FilterContext::Antarctica => "in the Antarctic region".to_string(),
            FilterContext::Family(family) => format!("of the family {family}"),
            FilterContext::Selected => "selected".to_string(),
        }
    }
}
