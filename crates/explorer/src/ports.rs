//! Interfaces to the collaborators the explorer drives: the map surface, the
//! range slider and the filter panel. The wasm host implements them on top of
//! the page's JavaScript widgets; tests use recording fakes.

use foundation::bounds::LonLatBounds;
use foundation::math::LatLng;
use foundation::time::AgeWindow;
use layers::{LayerId, LineStyle, MarkerSpec, MarkerStyle};
use scene::{Period, SpeciesKey};
use serde::Serialize;

use crate::summary::SummaryView;

pub trait MapSurface {
    /// Removes every occurrence marker. Comparison layers are untouched.
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: &MarkerSpec);
    fn fit_bounds(&mut self, bounds: LonLatBounds);
    fn add_highlight(&mut self, at: LatLng, style: &MarkerStyle) -> LayerId;
    fn add_line(&mut self, from: LatLng, to: LatLng, style: &LineStyle) -> LayerId;
    fn remove_layer(&mut self, id: LayerId);
}

pub trait RangeControl {
    /// Moves both handles. Must not report the move back as a user change.
    fn set(&mut self, window: AgeWindow);
}

pub trait ControlPanel {
    fn show_summary(&mut self, summary: &SummaryView);
    /// `selected` is `None` when the control should show its placeholder.
    fn set_family_options(&mut self, options: &[SelectOption], selected: Option<&str>);
    fn set_country_options(&mut self, options: &[SelectOption], selected: &str);
    fn show_search_results(&mut self, results: &SearchResults);
    fn set_active_period(&mut self, period: Option<Period>);
    fn show_comparison(&mut self, view: &ComparisonView);
    fn clear_search_input(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub key: SpeciesKey,
    pub title: String,
    pub family: Option<String>,
    pub formation: String,
    pub period: String,
    pub start_ma: f64,
    pub end_ma: f64,
    /// Whether the key is in the selection basket.
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub term: String,
    pub entries: Vec<SearchResult>,
}

impl SearchResults {
    /// A term was typed but nothing matched. The panel says so instead of
    /// showing an empty list.
    pub fn is_miss(&self) -> bool {
        !self.term.is_empty() && self.entries.is_empty()
    }
}

/// What the info panel shows while a comparison is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComparisonView {
    AwaitingFirstPoint,
    AwaitingSecondPoint { first: String },
    Measured { from: String, to: String, distance_km: f64 },
    Closed,
}

impl ComparisonView {
    pub fn message(&self) -> String {
        match self {
            ComparisonView::AwaitingFirstPoint => {
                "Comparison mode: click the first fossil on the map.".to_string()
            }
            ComparisonView::AwaitingSecondPoint { first } => {
                format!("Point 1: {first} selected. Click the second fossil.")
            }
            ComparisonView::Measured {
                from,
                to,
                distance_km,
            } => format!("From {from} to {to}: {distance_km:.2} km"),
            ComparisonView::Closed => String::new(),
        }
    }
}
