use compute::top_species;
use scene::{DataStore, SelectionSet};
use serde::Serialize;

use crate::filter::FilterContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSpecies {
    pub name: String,
    pub count: usize,
}

/// Info-panel summary of the rendered subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub context: FilterContext,
    pub total: usize,
    pub top_species: Vec<RankedSpecies>,
}

impl SummaryView {
    pub fn build(
        store: &DataStore,
        subset: &SelectionSet,
        context: FilterContext,
        top_n: usize,
    ) -> Self {
        let top_species = top_species(store, subset, top_n)
            .into_iter()
            .map(|c| RankedSpecies {
                name: c.key.to_string(),
                count: c.count,
            })
            .collect();
        Self {
            context,
            total: subset.len(),
            top_species,
        }
    }

    pub fn headline(&self) -> String {
        if self.total == 0 {
            return "No fossils found for the current filter.".to_string();
        }
        format!("Showing {} occurrence(s) {}.", self.total, self.context.label())
    }

    pub fn abundance_line(&self) -> Option<String> {
        if self.top_species.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.top_species.iter().map(|s| s.name.as_str()).collect();
        Some(format!("Most abundant species: {}", names.join(", ")))
    }
}
