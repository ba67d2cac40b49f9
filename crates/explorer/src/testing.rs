use std::collections::BTreeMap;

use foundation::bounds::LonLatBounds;
use foundation::math::LatLng;
use foundation::time::{AgeSpan, AgeWindow};
use geo::{MultiPolygon, polygon};
use layers::{LayerId, LineStyle, MarkerSpec, MarkerStyle};
use scene::Period::{Cretaceo, Jurassico, Other, Permiano, Triassico};
use scene::{CountryFeature, DataStore, Occurrence, Period, UNIDENTIFIED_GENUS};

use crate::ports::{
    ComparisonView, ControlPanel, MapSurface, RangeControl, SearchResults, SelectOption,
};
use crate::summary::SummaryView;

fn occ(taxon: &str, family: &str, period: Period, age: (f64, f64), at: (f64, f64)) -> Occurrence {
    let (genus, species) = match taxon.split_once(' ') {
        Some((genus, species)) if taxon != UNIDENTIFIED_GENUS => (genus, Some(species)),
        _ => (taxon, None),
    };
    Occurrence {
        genus: genus.to_string(),
        species: species.map(str::to_string),
        family: (!family.is_empty()).then(|| family.to_string()),
        formation: "Test formation".to_string(),
        period,
        age: AgeSpan::new(age.0, age.1),
        position: LatLng::new(at.0, at.1),
        image_url: None,
    }
}

fn rect(id: &str, name: &str, lng: (f64, f64), lat: (f64, f64)) -> CountryFeature {
    let poly = polygon![
        (x: lng.0, y: lat.0),
        (x: lng.1, y: lat.0),
        (x: lng.1, y: lat.1),
        (x: lng.0, y: lat.1),
        (x: lng.0, y: lat.0),
    ];
    CountryFeature::new(id, name, MultiPolygon::new(vec![poly]))
}

/// Ten occurrences over Brazil, the United States, Antarctica and open sea.
/// Rex a and Rex b share one spot.
///
/// | id | taxon                      | family          | period      | age          | place |
/// |----|----------------------------|-----------------|-------------|--------------|-------|
/// | 0  | Irritator challengeri      | Spinosauridae   | cretaceo    | 113 - 100.5  | BRA   |
/// | 1  | Oxalaia quilombensis       | Spinosauridae   | cretaceo    | 100.5 - 93.9 | BRA   |
/// | 2  | Tyrannosaurus rex          | Tyrannosauridae | cretaceo    | 68 - 66      | USA   |
/// | 3  | Allosaurus fragilis        | Allosauridae    | jurassico   | 155 - 145    | USA   |
/// | 4  | Cryolophosaurus ellioti    |                 | jurassico   | 190 - 183    | ATA   |
/// | 5  | Não identificado           |                 | triassico   | 230 - 220    | BRA   |
/// | 6  | Rex a                      | Rexidae         | outro       | 20 - 10      | sea   |
/// | 7  | Rex b                      | Rexidae         | outro       | 30 - 25      | sea   |
/// | 8  | Rex c                      | Rexidae         | permiano    | 290 - 280    | BRA   |
/// | 9  | Irritator challengeri      | Spinosauridae   | cretaceo    | 110 - 105    | BRA   |
pub fn fixture_store() -> DataStore {
    DataStore::new(
        vec![
            occ("Irritator challengeri", "Spinosauridae", Cretaceo, (113.0, 100.5), (-7.2, -39.4)),
            occ("Oxalaia quilombensis", "Spinosauridae", Cretaceo, (100.5, 93.9), (-2.5, -44.3)),
            occ("Tyrannosaurus rex", "Tyrannosauridae", Cretaceo, (68.0, 66.0), (47.0, -106.0)),
            occ("Allosaurus fragilis", "Allosauridae", Jurassico, (155.0, 145.0), (39.0, -108.0)),
            occ("Cryolophosaurus ellioti", "", Jurassico, (190.0, 183.0), (-84.3, 166.0)),
            occ(UNIDENTIFIED_GENUS, "", Triassico, (230.0, 220.0), (-29.6, -53.8)),
            occ("Rex a", "Rexidae", Other, (20.0, 10.0), (10.0, 10.0)),
            occ("Rex b", "Rexidae", Other, (30.0, 25.0), (10.0, 10.0)),
            occ("Rex c", "Rexidae", Permiano, (290.0, 280.0), (-20.0, -50.0)),
            occ("Irritator challengeri", "Spinosauridae", Cretaceo, (110.0, 105.0), (-7.3, -39.5)),
        ],
        vec![
            rect("BRA", "Brazil", (-74.0, -34.0), (-34.0, 5.0)),
            rect("USA", "United States", (-125.0, -66.0), (24.0, 50.0)),
        ],
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawnLayer {
    Highlight(LatLng),
    Line(LatLng, LatLng),
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub markers: Vec<MarkerSpec>,
    pub clears: usize,
    pub fits: Vec<LonLatBounds>,
    pub layers: BTreeMap<u64, DrawnLayer>,
    next_layer: u64,
}

impl RecordingMap {
    fn push_layer(&mut self, layer: DrawnLayer) -> LayerId {
        self.next_layer += 1;
        self.layers.insert(self.next_layer, layer);
        LayerId(self.next_layer)
    }

    /// Occurrence ids currently drawn, across all marker groups.
    pub fn drawn_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .markers
            .iter()
            .flat_map(|m| m.popup.iter().map(|p| p.id.index()))
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl MapSurface for RecordingMap {
    fn clear_markers(&mut self) {
        self.markers.clear();
        self.clears += 1;
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.markers.push(marker.clone());
    }

    fn fit_bounds(&mut self, bounds: LonLatBounds) {
        self.fits.push(bounds);
    }

    fn add_highlight(&mut self, at: LatLng, _style: &MarkerStyle) -> LayerId {
        self.push_layer(DrawnLayer::Highlight(at))
    }

    fn add_line(&mut self, from: LatLng, to: LatLng, _style: &LineStyle) -> LayerId {
        self.push_layer(DrawnLayer::Line(from, to))
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id.0);
    }
}

#[derive(Debug, Default)]
pub struct RecordingRange {
    pub sets: Vec<AgeWindow>,
}

impl RecordingRange {
    pub fn last(&self) -> Option<AgeWindow> {
        self.sets.last().copied()
    }
}

impl RangeControl for RecordingRange {
    fn set(&mut self, window: AgeWindow) {
        self.sets.push(window);
    }
}

#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub summaries: Vec<SummaryView>,
    pub family_options: Vec<SelectOption>,
    pub family_selected: Option<Option<String>>,
    pub country_options: Vec<SelectOption>,
    pub country_selected: Option<String>,
    pub search: Option<SearchResults>,
    pub active_period: Option<Period>,
    pub comparison: Vec<ComparisonView>,
    pub search_input_clears: usize,
}

impl RecordingPanel {
    pub fn last_summary(&self) -> Option<&SummaryView> {
        self.summaries.last()
    }
}

impl ControlPanel for RecordingPanel {
    fn show_summary(&mut self, summary: &SummaryView) {
        self.summaries.push(summary.clone());
    }

    fn set_family_options(&mut self, options: &[SelectOption], selected: Option<&str>) {
        self.family_options = options.to_vec();
        self.family_selected = Some(selected.map(str::to_string));
    }

    fn set_country_options(&mut self, options: &[SelectOption], selected: &str) {
        self.country_options = options.to_vec();
        self.country_selected = Some(selected.to_string());
    }

    fn show_search_results(&mut self, results: &SearchResults) {
        self.search = Some(results.clone());
    }

    fn set_active_period(&mut self, period: Option<Period>) {
        self.active_period = period;
    }

    fn show_comparison(&mut self, view: &ComparisonView) {
        self.comparison.push(view.clone());
    }

    fn clear_search_input(&mut self) {
        self.search_input_clears += 1;
    }
}
