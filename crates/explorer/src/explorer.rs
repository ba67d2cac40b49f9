use foundation::math::LatLng;
use foundation::time::AgeWindow;
use layers::MarkerLayer;
use runtime::{EventBus, Origin, UpdateSource};
use scene::{CountryFilter, DataStore, OccurrenceId, Period, SelectionSet, SpeciesKey};
use tracing::{debug, info, warn};

use crate::basket::SelectionBasket;
use crate::comparison::{ComparisonPoint, ComparisonSession, ComparisonStep, ScheduledReset};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::filter::{FilterContext, FilterState};
use crate::ports::{ComparisonView, ControlPanel, MapSurface, RangeControl};
use crate::reconciler::{Reconciler, range_with_priority, search};
use crate::summary::SummaryView;

/// Which subset the map currently shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rendered {
    Filtered,
    Basket,
}

/// Composition root of the fossil map: owns the filter state, the selection
/// basket and the comparison session, and drives the map, the range control
/// and the panel through their ports.
///
/// Every handler runs to completion on the caller's thread. Mutations carry an
/// `UpdateSource`; only user-initiated updates that did not come from the
/// range control re-derive the range bounds, so writing bounds back into the
/// control can never loop.
pub struct Explorer<M, R, P> {
    store: DataStore,
    config: ExplorerConfig,
    state: FilterState,
    basket: SelectionBasket,
    comparison: ComparisonSession,
    reconciler: Reconciler,
    markers: MarkerLayer,
    visible: SelectionSet,
    rendered: Rendered,
    dragging: bool,
    bus: EventBus,
    map: M,
    range: R,
    panel: P,
}

impl<M: MapSurface, R: RangeControl, P: ControlPanel> Explorer<M, R, P> {
    pub fn new(store: DataStore, config: ExplorerConfig, map: M, range: R, panel: P) -> Self {
        let comparison = ComparisonSession::new(config.comparison_reset_ms);
        let markers = MarkerLayer::new(config.related_genera_limit);
        Self {
            store,
            config,
            state: FilterState::default(),
            basket: SelectionBasket::new(),
            comparison,
            reconciler: Reconciler::new(),
            markers,
            visible: SelectionSet::new(),
            rendered: Rendered::Filtered,
            dragging: false,
            bus: EventBus::new(),
            map,
            range,
            panel,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn visible(&self) -> &SelectionSet {
        &self.visible
    }

    pub fn rendered(&self) -> Rendered {
        self.rendered
    }

    pub fn basket(&self) -> &SelectionBasket {
        &self.basket
    }

    pub fn comparison(&self) -> &ComparisonSession {
        &self.comparison
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn range(&self) -> &R {
        &self.range
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// First render after load.
    pub fn start(&mut self) {
        info!(occurrences = self.store.len(), "explorer started");
        self.apply_filters(UpdateSource::user(Origin::Startup));
    }

    /// Legend click. Clicking the active period clears it. Either way the
    /// window jumps to the clicked period's canonical range first.
    pub fn toggle_period(&mut self, period: Period) {
        self.state.period = if self.state.period == Some(period) {
            None
        } else {
            Some(period)
        };
        self.panel.set_active_period(self.state.period);
        self.write_window(period.canonical_range());
        self.apply_filters(UpdateSource::user(Origin::Legend));
    }

    pub fn select_country(&mut self, value: &str) {
        self.state.country = CountryFilter::from_select_value(value);
        self.apply_filters(UpdateSource::user(Origin::CountrySelect));
    }

    /// Empty value clears the family filter.
    pub fn select_family(&mut self, value: &str) {
        let value = value.trim();
        self.state.family = (!value.is_empty()).then(|| value.to_string());
        self.apply_filters(UpdateSource::user(Origin::FamilySelect));
    }

    pub fn begin_range_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_range_drag(&mut self) {
        self.dragging = false;
    }

    /// The user released the range control on new handle values.
    pub fn on_range_changed(&mut self, a: f64, b: f64) {
        self.state.age_window = AgeWindow::new(a, b);
        self.apply_filters(UpdateSource::user(Origin::RangeControl));
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.state.search_term = term.to_string();
        self.refresh_search();
    }

    /// Search-result checkbox.
    pub fn toggle_basket(&mut self, key: SpeciesKey, selected: bool) {
        if self.basket.set(key, selected) {
            debug!(pinned = self.basket.len(), "basket changed");
        }
    }

    pub fn show_selected(&mut self) -> Result<(), ExplorerError> {
        if self.basket.is_empty() {
            return Err(ExplorerError::NoOccurrencesInBasket);
        }
        self.show_basket();
        Ok(())
    }

    /// Popup link: pin every species of `genus` and show the basket.
    pub fn quick_add_genus(&mut self, genus: &str) -> Result<(), ExplorerError> {
        let added = self.basket.add_genus(&self.store, genus);
        debug!(genus, added, "quick add");
        self.show_selected()
    }

    pub fn reset_filters(&mut self) {
        self.state = FilterState::default();
        self.basket.clear();
        self.panel.set_active_period(None);
        self.panel.clear_search_input();
        self.write_window(AgeWindow::FULL);
        self.bus.emit(Some(UpdateSource::user(Origin::Reset)), "reset", "filters reset");
        self.apply_filters(UpdateSource::user(Origin::Reset));
    }

    pub fn toggle_comparison(&mut self) {
        if self.comparison.is_active() {
            self.close_comparison();
        } else {
            self.comparison.start(&mut self.map);
            self.panel.show_comparison(&ComparisonView::AwaitingFirstPoint);
            self.bus.emit(None, "comparison_started", "awaiting first point");
        }
    }

    /// Marker click. The host passes the representative occurrence of the
    /// clicked group.
    pub fn marker_click(&mut self, id: OccurrenceId) -> Option<ScheduledReset> {
        if !self.comparison.is_active() {
            return None;
        }
        let occ = self.store.get(id)?;
        let point = ComparisonPoint {
            label: occ.genus.clone(),
            position: occ.position,
            occurrence: Some(id),
        };
        self.record_comparison_point(point)
    }

    /// Click on the map away from any marker.
    pub fn map_click(&mut self, at: LatLng) -> Option<ScheduledReset> {
        if !self.comparison.is_active() {
            return None;
        }
        let point = ComparisonPoint {
            label: self.comparison.free_point_label(),
            position: at,
            occurrence: None,
        };
        self.record_comparison_point(point)
    }

    /// Fired by the host timer armed after a measurement.
    pub fn comparison_timeout(&mut self, token: u64) {
        if self.comparison.expire(&mut self.map, token) {
            self.after_comparison_closed();
        }
    }

    fn record_comparison_point(&mut self, point: ComparisonPoint) -> Option<ScheduledReset> {
        let step = self.comparison.select(&mut self.map, point)?;
        self.panel.show_comparison(&step.view());
        match step {
            ComparisonStep::First(point) => {
                self.bus.emit(None, "comparison_point", point.label);
                None
            }
            ComparisonStep::Measured {
                distance_km,
                reset,
                ..
            } => {
                self.bus.emit(None, "comparison_measured", format!("{distance_km:.2} km"));
                Some(reset)
            }
        }
    }

    fn close_comparison(&mut self) {
        self.comparison.cancel(&mut self.map);
        self.after_comparison_closed();
    }

    fn after_comparison_closed(&mut self) {
        self.panel.show_comparison(&ComparisonView::Closed);
        self.bus.emit(None, "comparison_closed", "comparison closed");
        self.apply_filters(UpdateSource::user(Origin::ComparisonClosed));
    }

    /// Recomputes the visible subset from the filter state and pushes it to
    /// every dependent control.
    pub fn apply_filters(&mut self, source: UpdateSource) {
        let outcome = self.state.evaluate(&self.store);
        if let Some(id) = outcome.missing_country {
            let err = ExplorerError::MissingGeometryForCountry(id);
            warn!(%err, "country filter skipped");
            self.bus.emit(Some(source), "missing_geometry", err.to_string());
        }
        self.visible = outcome.hits;
        self.rendered = Rendered::Filtered;

        let context = self.state.context(&self.store);
        let visible = self.visible.clone();
        self.render(&visible, context);
        self.reconciler.reconcile(&self.store, &self.visible, &self.state, &mut self.panel);
        self.refresh_search();

        debug!(?source, visible = self.visible.len(), "filters applied");
        self.bus.emit(
            Some(source),
            "filters_applied",
            format!("{} visible", self.visible.len()),
        );

        if source.may_derive_range() && !self.dragging {
            self.derive_range();
        }
    }

    fn derive_range(&mut self) {
        let window = range_with_priority(&self.store, &self.state);
        self.write_window(window);
        self.bus.emit(
            Some(UpdateSource::Programmatic),
            "range_derived",
            format!("[{}, {}]", window.max(), window.min()),
        );

        // The visible subset must match the window now on the control.
        if self.state.evaluate(&self.store).hits != self.visible {
            self.apply_filters(UpdateSource::Programmatic);
        }
    }

    fn show_basket(&mut self) {
        let subset = self.basket.occurrences(&self.store);
        self.render(&subset, FilterContext::Selected);
        if let Some(window) = compute::TemporalAnalysis::subset_extent(&self.store, &subset) {
            self.write_window(window);
        }
        self.rendered = Rendered::Basket;
        self.bus.emit(
            None,
            "basket_shown",
            format!("{} keys, {} occurrences", self.basket.len(), subset.len()),
        );
    }

    fn render(&mut self, subset: &SelectionSet, context: FilterContext) {
        let snapshot = self.markers.extract(&self.store, subset);
        self.map.clear_markers();
        for marker in &snapshot.markers {
            self.map.add_marker(marker);
        }
        if let Some(bounds) = snapshot.bounds {
            self.map.fit_bounds(bounds.pad(self.config.fit_padding));
        }
        let summary = SummaryView::build(&self.store, subset, context, self.config.summary_top_n);
        self.panel.show_summary(&summary);
    }

    fn refresh_search(&mut self) {
        let results = search(&self.store, &self.visible, &self.state.search_term, &self.basket);
        self.panel.show_search_results(&results);
    }

    fn write_window(&mut self, window: AgeWindow) {
        self.state.age_window = window;
        self.range.set(window);
    }
}

#[cfg(test)]
mod tests {
    use super::{Explorer, Rendered};
    use crate::config::ExplorerConfig;
    use crate::error::ExplorerError;
    use crate::filter::FilterContext;
    use crate::ports::ComparisonView;
    use crate::testing::{RecordingMap, RecordingPanel, RecordingRange, fixture_store};
    use foundation::math::LatLng;
    use foundation::time::{AgeSpan, AgeWindow};
    use pretty_assertions::assert_eq;
    use scene::{DataStore, Occurrence, OccurrenceId, Period, SpeciesKey};

    type TestExplorer = Explorer<RecordingMap, RecordingRange, RecordingPanel>;

    fn explorer_for(store: DataStore) -> TestExplorer {
        let mut ex = Explorer::new(
            store,
            ExplorerConfig::default(),
            RecordingMap::default(),
            RecordingRange::default(),
            RecordingPanel::default(),
        );
        ex.start();
        ex
    }

    fn explorer() -> TestExplorer {
        explorer_for(fixture_store())
    }

    fn visible_ids(ex: &TestExplorer) -> Vec<u32> {
        ex.visible().iter().map(OccurrenceId::index).collect()
    }

    #[test]
    fn startup_renders_everything_and_frames_the_data() {
        let ex = explorer();
        assert_eq!(ex.visible().len(), 10);
        assert_eq!(ex.map().drawn_ids(), (0..10).collect::<Vec<u32>>());
        assert_eq!(ex.range().last(), Some(AgeWindow::new(290.0, 10.0)));
        assert_eq!(ex.map().fits.len(), 1);
        assert_eq!(ex.panel().last_summary().map(|s| s.total), Some(10));
        assert_eq!(ex.events().count("filters_applied"), 1);
    }

    #[test]
    fn range_window_is_an_overlap_filter() {
        let rex = Occurrence {
            genus: "Rex".to_string(),
            species: None,
            family: None,
            formation: String::new(),
            period: Period::Cretaceo,
            age: AgeSpan::new(100.0, 66.0),
            position: LatLng::new(0.0, 0.0),
            image_url: None,
        };
        let mut ex = explorer_for(DataStore::new(vec![rex], vec![]));

        ex.on_range_changed(80.0, 70.0);
        assert_eq!(visible_ids(&ex), vec![0]);

        ex.on_range_changed(60.0, 50.0);
        assert!(ex.visible().is_empty());
        assert_eq!(
            ex.panel().last_summary().map(|s| s.headline()),
            Some("No fossils found for the current filter.".to_string())
        );
    }

    #[test]
    fn range_control_changes_never_rederive_bounds() {
        let mut ex = explorer();
        let sets = ex.range().sets.len();
        ex.on_range_changed(95.0, 110.0);
        assert_eq!(ex.range().sets.len(), sets);
        assert_eq!(ex.state().age_window, AgeWindow::new(110.0, 95.0));
        assert_eq!(visible_ids(&ex), vec![0, 1, 9]);
    }

    #[test]
    fn visible_subset_is_the_intersection_of_every_dimension() {
        let mut ex = explorer();
        ex.select_country("BRA");
        ex.toggle_period(Period::Cretaceo);
        ex.select_family("Spinosauridae");

        let store = fixture_store();
        let expected: Vec<u32> = store
            .iter()
            .filter(|(_, o)| ex.state().age_window.overlaps(o.age))
            .filter(|(_, o)| o.period == Period::Cretaceo)
            .filter(|(_, o)| store.country("BRA").is_some_and(|c| c.contains(o.position)))
            .filter(|(_, o)| o.has_family("Spinosauridae"))
            .map(|(id, _)| id.index())
            .collect();
        assert_eq!(visible_ids(&ex), expected);
        assert_eq!(expected, vec![0, 1, 9]);
        assert_eq!(
            ex.panel().last_summary().map(|s| s.context.clone()),
            Some(FilterContext::Family("Spinosauridae".into()))
        );
    }

    #[test]
    fn legend_sets_canonical_range_then_derives() {
        let mut ex = explorer();
        ex.toggle_period(Period::Jurassico);
        let sets = &ex.range().sets;
        assert_eq!(sets[sets.len() - 2], AgeWindow::new(201.3, 145.0));
        assert_eq!(ex.range().last(), Some(AgeWindow::new(190.0, 145.0)));
        assert_eq!(visible_ids(&ex), vec![3, 4]);
        assert_eq!(ex.panel().active_period, Some(Period::Jurassico));

        ex.toggle_period(Period::Jurassico);
        assert_eq!(ex.state().period, None);
        assert_eq!(ex.panel().active_period, None);
        assert_eq!(ex.visible().len(), 10);
    }

    #[test]
    fn dragging_suppresses_derivation() {
        let mut ex = explorer();
        ex.begin_range_drag();
        ex.toggle_period(Period::Jurassico);
        assert_eq!(ex.range().last(), Some(AgeWindow::new(201.3, 145.0)));
        assert_eq!(ex.events().count("range_derived"), 1);

        ex.end_range_drag();
        ex.select_family("");
        assert_eq!(ex.range().last(), Some(AgeWindow::new(190.0, 145.0)));
        assert_eq!(ex.events().count("range_derived"), 2);
    }

    #[test]
    fn derived_window_reapplies_programmatically_when_subset_changes() {
        let mut ex = explorer();
        // Window holds nothing in Brazil.
        ex.on_range_changed(20.0, 10.0);
        assert_eq!(visible_ids(&ex), vec![6]);

        // Selecting Brazil derives the Brazil extent and re-renders with it.
        ex.select_country("BRA");
        assert_eq!(ex.state().age_window, AgeWindow::new(290.0, 93.9));
        assert_eq!(visible_ids(&ex), vec![0, 1, 5, 8, 9]);
        let last = ex.events().last("filters_applied").expect("applied");
        assert_eq!(last.source, Some(runtime::UpdateSource::Programmatic));
    }

    #[test]
    fn family_missing_from_country_falls_back_to_full_range() {
        let mut ex = explorer();
        ex.select_country("USA");
        ex.select_family("Spinosauridae");
        assert_eq!(ex.range().last(), Some(AgeWindow::FULL));
        assert!(ex.visible().is_empty());
    }

    #[test]
    fn antarctica_uses_latitude() {
        let mut ex = explorer();
        ex.select_country("ATA");
        assert_eq!(visible_ids(&ex), vec![4]);
        assert_eq!(
            ex.panel().last_summary().map(|s| s.context.clone()),
            Some(FilterContext::Antarctica)
        );
    }

    #[test]
    fn unknown_country_is_skipped_and_logged() {
        let mut ex = explorer();
        ex.select_country("ZZZ");
        assert_eq!(ex.visible().len(), 10);
        assert_eq!(ex.events().count("missing_geometry"), 1);
        assert_eq!(ex.panel().country_selected.as_deref(), Some("all"));
    }

    #[test]
    fn reset_reproduces_the_initial_render() {
        let mut ex = explorer();
        let initial_ids = ex.map().drawn_ids();
        let initial_summary = ex.panel().last_summary().cloned();
        let initial_window = ex.range().last();
        let initial_state = ex.state().clone();

        ex.toggle_period(Period::Cretaceo);
        ex.select_country("BRA");
        ex.select_family("Spinosauridae");
        ex.set_search_term("irr");
        ex.toggle_basket(SpeciesKey::new("Rex", Some("a")), true);
        ex.reset_filters();

        assert_eq!(ex.map().drawn_ids(), initial_ids);
        assert_eq!(ex.panel().last_summary().cloned(), initial_summary);
        assert_eq!(ex.range().last(), initial_window);
        assert_eq!(ex.state(), &initial_state);
        assert!(ex.basket().is_empty());
        assert_eq!(ex.panel().search_input_clears, 1);
        assert_eq!(ex.panel().family_selected, Some(None));
    }

    #[test]
    fn quick_add_overrides_filters_with_the_basket() {
        let mut ex = explorer();
        ex.toggle_period(Period::Cretaceo);
        ex.quick_add_genus("Rex").expect("rex exists");

        assert_eq!(ex.basket().len(), 3);
        assert_eq!(ex.map().drawn_ids(), vec![6, 7, 8]);
        assert_eq!(ex.rendered(), Rendered::Basket);
        assert_eq!(ex.range().last(), Some(AgeWindow::new(290.0, 10.0)));
        assert_eq!(
            ex.panel().last_summary().map(|s| s.context.clone()),
            Some(FilterContext::Selected)
        );

        // Any filter change returns to the filtered view; the basket stays.
        ex.select_family("");
        assert_eq!(ex.rendered(), Rendered::Filtered);
        assert_eq!(ex.basket().len(), 3);
    }

    #[test]
    fn show_selected_with_empty_basket_is_an_error_without_mutation() {
        let mut ex = explorer();
        let clears = ex.map().clears;
        let state = ex.state().clone();
        let err = ex.show_selected().unwrap_err();
        assert!(matches!(err, ExplorerError::NoOccurrencesInBasket));
        assert_eq!(ex.map().clears, clears);
        assert_eq!(ex.state(), &state);

        assert!(matches!(
            ex.quick_add_genus("Nobody"),
            Err(ExplorerError::NoOccurrencesInBasket)
        ));
    }

    #[test]
    fn search_narrows_within_visible_and_follows_filters() {
        let mut ex = explorer();
        ex.set_search_term("rex");
        assert_eq!(ex.panel().search.as_ref().map(|r| r.entries.len()), Some(3));

        ex.select_country("BRA");
        let titles: Vec<String> = ex
            .panel()
            .search
            .as_ref()
            .map(|r| r.entries.iter().map(|e| e.title.clone()).collect())
            .unwrap_or_default();
        assert_eq!(titles, vec!["Rex c".to_string()]);
    }

    #[test]
    fn comparison_measures_between_marker_and_free_point() {
        let mut ex = explorer();
        assert!(ex.marker_click(OccurrenceId(0)).is_none());

        ex.toggle_comparison();
        assert_eq!(ex.panel().comparison.last(), Some(&ComparisonView::AwaitingFirstPoint));
        assert!(ex.marker_click(OccurrenceId(0)).is_none());
        assert_eq!(
            ex.panel().comparison.last(),
            Some(&ComparisonView::AwaitingSecondPoint {
                first: "Irritator".into()
            })
        );

        let reset = ex.map_click(LatLng::new(-7.2, -39.4)).expect("measured");
        assert_eq!(reset.delay_ms, 5000);
        match ex.panel().comparison.last() {
            Some(ComparisonView::Measured { from, to, distance_km }) => {
                assert_eq!(from, "Irritator");
                assert_eq!(to, "Point 2");
                assert_eq!(*distance_km, 0.0);
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(ex.map().layers.len(), 3);

        let applied = ex.events().count("filters_applied");
        ex.comparison_timeout(reset.token);
        assert!(!ex.comparison().is_active());
        assert!(ex.map().layers.is_empty());
        assert_eq!(ex.panel().comparison.last(), Some(&ComparisonView::Closed));
        assert!(ex.events().count("filters_applied") > applied);
    }

    #[test]
    fn closing_a_comparison_keeps_the_user_window() {
        let mut ex = explorer();
        ex.on_range_changed(110.0, 95.0);
        let window = ex.state().age_window;
        let before = visible_ids(&ex);
        let sets = ex.range().sets.len();

        // Toggle off before measuring.
        ex.toggle_comparison();
        ex.marker_click(OccurrenceId(0));
        ex.toggle_comparison();
        assert_eq!(ex.state().age_window, window);
        assert_eq!(visible_ids(&ex), before);
        assert_eq!(ex.map().drawn_ids(), before);
        assert_eq!(ex.range().sets.len(), sets);

        // Timer closes a finished measurement.
        ex.toggle_comparison();
        ex.marker_click(OccurrenceId(0));
        let reset = ex.marker_click(OccurrenceId(1)).expect("measured");
        ex.comparison_timeout(reset.token);
        assert!(!ex.comparison().is_active());
        assert_eq!(ex.state().age_window, window);
        assert_eq!(visible_ids(&ex), before);
        assert_eq!(ex.map().drawn_ids(), before);
        assert_eq!(ex.range().sets.len(), sets);
        assert_eq!(ex.events().count("range_derived"), 1);
    }

    #[test]
    fn manual_toggle_off_beats_the_timer() {
        let mut ex = explorer();
        ex.toggle_comparison();
        ex.marker_click(OccurrenceId(2));
        let reset = ex.marker_click(OccurrenceId(3)).expect("measured");

        ex.toggle_comparison();
        assert!(ex.map().layers.is_empty());
        ex.toggle_comparison();
        ex.marker_click(OccurrenceId(0));

        ex.comparison_timeout(reset.token);
        assert!(ex.comparison().is_active());
        assert_eq!(ex.map().layers.len(), 1);
    }
}
