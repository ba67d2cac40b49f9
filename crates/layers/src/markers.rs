use std::collections::HashMap;

use foundation::bounds::LonLatBounds;
use foundation::math::LatLng;
use scene::{DataStore, OccurrenceId, SelectionSet};
use serde::Serialize;
use tracing::debug;

use crate::popup::{PopupEntry, popup_entries};
use crate::symbology::MarkerStyle;

/// Occurrences sharing one exact location. Drawn as a single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub position: LatLng,
    pub members: Vec<OccurrenceId>,
}

impl MarkerGroup {
    /// First member in dataset order. Picks the marker colour and stands in
    /// for the whole group on comparison clicks.
    pub fn representative(&self) -> OccurrenceId {
        self.members[0]
    }
}

/// One marker ready for the map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub representative: OccurrenceId,
    pub style: MarkerStyle,
    pub popup: Vec<PopupEntry>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerLayerSnapshot {
    pub markers: Vec<MarkerSpec>,
    /// Bounds of every marker, unpadded. `None` when nothing is drawn.
    pub bounds: Option<LonLatBounds>,
}

fn location_key(at: LatLng) -> (u64, u64) {
    // +0.0 folds -0.0 into 0.0 so both land in the same group.
    ((at.lat + 0.0).to_bits(), (at.lng + 0.0).to_bits())
}

/// Groups `subset` by exact coordinates, in first-seen order.
pub fn group_markers(store: &DataStore, subset: &SelectionSet) -> Vec<MarkerGroup> {
    let mut groups: Vec<MarkerGroup> = Vec::new();
    let mut by_location: HashMap<(u64, u64), usize> = HashMap::new();

    for (id, occ) in store.resolve(subset) {
        let key = location_key(occ.position);
        match by_location.get(&key) {
            Some(&slot) => groups[slot].members.push(id),
            None => {
                by_location.insert(key, groups.len());
                groups.push(MarkerGroup {
                    position: occ.position,
                    members: vec![id],
                });
            }
        }
    }
    groups
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MarkerLayer {
    related_limit: usize,
}

impl MarkerLayer {
    /// `related_limit` caps the related genera listed in each popup entry.
    pub fn new(related_limit: usize) -> Self {
        Self { related_limit }
    }

    pub fn extract(&self, store: &DataStore, subset: &SelectionSet) -> MarkerLayerSnapshot {
        let groups = group_markers(store, subset);
        let bounds = LonLatBounds::from_points(groups.iter().map(|g| g.position));

        let markers: Vec<MarkerSpec> = groups
            .iter()
            .filter_map(|group| {
                let representative = group.representative();
                let rep = store.get(representative)?;
                Some(MarkerSpec {
                    position: group.position,
                    representative,
                    style: MarkerStyle::occurrence(rep.period),
                    popup: popup_entries(store, &group.members, self.related_limit),
                })
            })
            .collect();

        debug!(
            occurrences = subset.len(),
            markers = markers.len(),
            "extracted marker layer"
        );
        MarkerLayerSnapshot { markers, bounds }
    }
}
