//! Port implementations backed by a JavaScript callbacks object.
//!
//! Every payload crosses the boundary as a JSON string so the page script can
//! `JSON.parse` it without wasm-bindgen glue types. Missing callbacks are
//! logged once per call and otherwise ignored.

use explorer::{
    ComparisonView, ControlPanel, MapSurface, RangeControl, SearchResults, SelectOption,
    SummaryView,
};
use foundation::bounds::LonLatBounds;
use foundation::math::LatLng;
use foundation::time::AgeWindow;
use js_sys::{Array, Function, Object, Reflect};
use layers::{LayerId, LineStyle, MarkerSpec, MarkerStyle};
use scene::Period;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

/// The page's callbacks object, e.g. `{ clearMarkers() {...}, addMarker(json) {...} }`.
#[derive(Debug, Clone)]
pub struct Callbacks {
    target: Object,
}

impl Callbacks {
    pub fn new(value: JsValue) -> Result<Self, JsValue> {
        let target = value
            .dyn_into::<Object>()
            .map_err(|_| JsValue::from_str("callbacks must be an object"))?;
        Ok(Self { target })
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let func = Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok());
        let Some(func) = func else {
            warn!(callback = name, "missing page callback");
            return None;
        };
        let args: Array = args.iter().collect();
        match func.apply(&self.target, &args) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(callback = name, error = ?err, "page callback threw");
                None
            }
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> JsValue {
    match serde_json::to_string(value) {
        Ok(s) => JsValue::from_str(&s),
        Err(err) => {
            warn!(%err, "failed to encode callback payload");
            JsValue::NULL
        }
    }
}

fn opt_str(value: Option<&str>) -> JsValue {
    value.map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

#[derive(Debug, Clone)]
pub struct JsMap(pub Callbacks);

impl JsMap {
    fn layer_id(value: Option<JsValue>) -> LayerId {
        LayerId(value.and_then(|v| v.as_f64()).unwrap_or_default() as u64)
    }
}

impl MapSurface for JsMap {
    fn clear_markers(&mut self) {
        self.0.call("clearMarkers", &[]);
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.0.call("addMarker", &[json(marker)]);
    }

    fn fit_bounds(&mut self, bounds: LonLatBounds) {
        self.0.call("fitBounds", &[json(&bounds)]);
    }

    fn add_highlight(&mut self, at: LatLng, style: &MarkerStyle) -> LayerId {
        Self::layer_id(self.0.call("addHighlight", &[json(&at), json(style)]))
    }

    fn add_line(&mut self, from: LatLng, to: LatLng, style: &LineStyle) -> LayerId {
        Self::layer_id(self.0.call("addLine", &[json(&from), json(&to), json(style)]))
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.0.call("removeLayer", &[JsValue::from_f64(id.0 as f64)]);
    }
}

#[derive(Debug, Clone)]
pub struct JsRange(pub Callbacks);

impl RangeControl for JsRange {
    fn set(&mut self, window: AgeWindow) {
        self.0.call(
            "setRange",
            &[JsValue::from_f64(window.max()), JsValue::from_f64(window.min())],
        );
    }
}

#[derive(Debug, Clone)]
pub struct JsPanel(pub Callbacks);

#[derive(Serialize)]
struct SummaryPayload<'a> {
    headline: String,
    abundance: Option<String>,
    #[serde(flatten)]
    view: &'a SummaryView,
}

#[derive(Serialize)]
struct ComparisonPayload<'a> {
    message: String,
    #[serde(flatten)]
    view: &'a ComparisonView,
}

impl ControlPanel for JsPanel {
    fn show_summary(&mut self, summary: &SummaryView) {
        let payload = SummaryPayload {
            headline: summary.headline(),
            abundance: summary.abundance_line(),
            view: summary,
        };
        self.0.call("showSummary", &[json(&payload)]);
    }

    fn set_family_options(&mut self, options: &[SelectOption], selected: Option<&str>) {
        self.0
            .call("setFamilyOptions", &[json(options), opt_str(selected)]);
    }

    fn set_country_options(&mut self, options: &[SelectOption], selected: &str) {
        self.0
            .call("setCountryOptions", &[json(options), JsValue::from_str(selected)]);
    }

    fn show_search_results(&mut self, results: &SearchResults) {
        self.0.call("showSearchResults", &[json(results)]);
    }

    fn set_active_period(&mut self, period: Option<Period>) {
        self.0
            .call("setActivePeriod", &[opt_str(period.map(Period::key))]);
    }

    fn show_comparison(&mut self, view: &ComparisonView) {
        let payload = ComparisonPayload {
            message: view.message(),
            view,
        };
        self.0.call("showComparison", &[json(&payload)]);
    }

    fn clear_search_input(&mut self) {
        self.0.call("clearSearchInput", &[]);
    }
}
