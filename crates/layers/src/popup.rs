use scene::{DataStore, Occurrence, OccurrenceId};
use serde::Serialize;

/// Popup content for one occurrence of a marker group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupEntry {
    pub id: OccurrenceId,
    pub title: String,
    pub genus: String,
    pub family: Option<String>,
    pub formation: String,
    pub period: String,
    pub start_ma: f64,
    pub end_ma: f64,
    pub image_url: Option<String>,
    /// Other genera of the same family, offered as quick-add links.
    pub related_genera: Vec<String>,
}

impl PopupEntry {
    pub fn new(id: OccurrenceId, occ: &Occurrence, related_genera: Vec<String>) -> Self {
        Self {
            id,
            title: occ.display_name(),
            genus: occ.genus.clone(),
            family: occ.family.clone(),
            formation: occ.formation.clone(),
            period: occ.period.display_name(),
            start_ma: occ.age.start,
            end_ma: occ.age.end,
            image_url: occ.image_url.clone(),
            related_genera,
        }
    }
}

pub fn popup_entries(
    store: &DataStore,
    members: &[OccurrenceId],
    related_limit: usize,
) -> Vec<PopupEntry> {
    members
        .iter()
        .filter_map(|&id| {
            let occ = store.get(id)?;
            let related = occ
                .family
                .as_deref()
                .map(|family| store.families().related(family, &occ.genus, related_limit))
                .unwrap_or_default();
            Some(PopupEntry::new(id, occ, related))
        })
        .collect()
}
