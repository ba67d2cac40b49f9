use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use explorer::bootstrap::{build_store, fatal_message};
use explorer::{Explorer, ExplorerConfig, ExplorerError, ScheduledReset};
use foundation::math::LatLng;
use scene::{OccurrenceId, Period, SpeciesKey};
use tracing::{debug, error, info, warn};

mod bridge;
mod logging;

use bridge::{Callbacks, JsMap, JsPanel, JsRange};

type WebExplorer = Explorer<JsMap, JsRange, JsPanel>;

thread_local! {
    static EXPLORER: RefCell<Option<WebExplorer>> = const { RefCell::new(None) };
}

/// Runs `f` against the live explorer. Returns `None` before `boot` finishes
/// or when a handler is already running (a widget event fired from inside a
/// port call); such events are dropped.
fn with_explorer<T>(f: impl FnOnce(&mut WebExplorer) -> T) -> Option<T> {
    EXPLORER.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            debug!("dropped reentrant event");
            return None;
        };
        guard.as_mut().map(f)
    })
}

fn to_js(err: ExplorerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    logging::init();
    Ok(())
}

/// Loads the dataset and the country geography, then performs the first
/// render. `config_json` may be empty or a partial `ExplorerConfig`.
#[wasm_bindgen]
pub async fn boot(config_json: String, callbacks: JsValue) -> Result<(), JsValue> {
    let callbacks = Callbacks::new(callbacks)?;
    match load(&config_json).await {
        Ok((store, config)) => {
            let mut explorer = Explorer::new(
                store,
                config,
                JsMap(callbacks.clone()),
                JsRange(callbacks.clone()),
                JsPanel(callbacks),
            );
            explorer.start();
            EXPLORER.with(|cell| match cell.try_borrow_mut() {
                Ok(mut slot) => {
                    *slot = Some(explorer);
                    Ok(())
                }
                Err(_) => Err(JsValue::from_str("explorer is busy")),
            })
        }
        Err(err) => {
            error!(%err, "startup failed");
            show_fatal(&err);
            Err(to_js(err))
        }
    }
}

async fn load(config_json: &str) -> Result<(scene::DataStore, ExplorerConfig), ExplorerError> {
    let config = ExplorerConfig::from_json(config_json)?;
    let dataset = fetch_text(&config.dataset_url).await?;
    let countries = fetch_text(&config.countries_url).await?;
    let store = build_store(&dataset, &countries)?;
    info!(occurrences = store.len(), "dataset loaded");
    Ok((store, config))
}

async fn fetch_text(url: &str) -> Result<String, ExplorerError> {
    let failure = |reason: String| ExplorerError::FetchFailure {
        url: url.to_string(),
        reason,
    };
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| failure(e.to_string()))?;
    if !resp.ok() {
        return Err(failure(format!("HTTP {}", resp.status())));
    }
    resp.text().await.map_err(|e| failure(e.to_string()))
}

fn show_fatal(err: &ExplorerError) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        body.set_text_content(Some(&fatal_message(err)));
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Arms the browser timer that closes a finished comparison.
fn arm_reset(reset: ScheduledReset) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || {
        with_explorer(|ex| ex.comparison_timeout(reset.token));
    });
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        reset.delay_ms as i32,
    ) {
        warn!(error = ?err, "failed to arm comparison reset");
    }
}

#[wasm_bindgen]
pub fn toggle_period(key: &str) {
    let period = Period::from_key(key);
    with_explorer(|ex| ex.toggle_period(period));
}

#[wasm_bindgen]
pub fn select_country(value: &str) {
    with_explorer(|ex| ex.select_country(value));
}

#[wasm_bindgen]
pub fn select_family(value: &str) {
    with_explorer(|ex| ex.select_family(value));
}

#[wasm_bindgen]
pub fn range_drag_start() {
    with_explorer(|ex| ex.begin_range_drag());
}

#[wasm_bindgen]
pub fn range_drag_end() {
    with_explorer(|ex| ex.end_range_drag());
}

#[wasm_bindgen]
pub fn range_changed(a: f64, b: f64) {
    with_explorer(|ex| ex.on_range_changed(a, b));
}

#[wasm_bindgen]
pub fn search(term: &str) {
    with_explorer(|ex| ex.set_search_term(term));
}

#[wasm_bindgen]
pub fn toggle_basket(genus: &str, species: &str, selected: bool) {
    let key = SpeciesKey::new(genus, Some(species));
    with_explorer(|ex| ex.toggle_basket(key, selected));
}

#[wasm_bindgen]
pub fn show_selected() {
    if let Some(Err(err)) = with_explorer(|ex| ex.show_selected()) {
        alert(&err.to_string());
    }
}

#[wasm_bindgen]
pub fn quick_add_genus(genus: &str) {
    if let Some(Err(err)) = with_explorer(|ex| ex.quick_add_genus(genus)) {
        alert(&err.to_string());
    }
}

#[wasm_bindgen]
pub fn reset_filters() {
    with_explorer(|ex| ex.reset_filters());
}

#[wasm_bindgen]
pub fn toggle_comparison() {
    with_explorer(|ex| ex.toggle_comparison());
}

/// `id` is the marker's `representative` occurrence.
#[wasm_bindgen]
pub fn marker_clicked(id: u32) {
    if let Some(Some(reset)) = with_explorer(|ex| ex.marker_click(OccurrenceId(id))) {
        arm_reset(reset);
    }
}

#[wasm_bindgen]
pub fn map_clicked(lat: f64, lng: f64) {
    if let Some(Some(reset)) = with_explorer(|ex| ex.map_click(LatLng::new(lat, lng))) {
        arm_reset(reset);
    }
}
