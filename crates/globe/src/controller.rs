use std::time::Duration;

use runtime::{Frame, TimerId, TimerScheduler};
use scene::{
    FeatureKey, RenderSet, SelectionState, SharedFeature, Transition, style_for,
};
use tracing::{debug, info, warn};

use crate::camera::CameraDirector;
use crate::capability::{GlobeCapability, OverlayPolygon};
use crate::clock::InteractionClock;
use crate::config::GlobeConfig;
use crate::dossier::DossierBridge;
use crate::layout::LayoutReconciler;

/// Input to [`GlobeScene::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Pointer over a feature, or over empty space.
    Hover(Option<SharedFeature>),
    Click(SharedFeature),
    /// Click on the globe surface outside any feature.
    ClickBackground,
    Escape,
    /// Explicit "back" action from the panel.
    Back,
    /// The user rotated or zoomed with the globe's own controls.
    Drag,
    Resize { width_px: f64 },
    TimerFired(TimerId),
}

/// Ticket for a region load started by a selection.
///
/// The result must come back through [`GlobeScene::commit_regions`], which
/// discards it if the selection moved on in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRequest {
    pub country: FeatureKey,
    pub country_name: String,
    pub epoch: u64,
}

pub type SelectionCallback = Box<dyn FnMut(bool)>;

/// Interactive globe controller.
///
/// All input arrives as [`SceneEvent`]s. Side effects go out through the
/// globe capability, the timer scheduler and the dossier bridge. Async
/// region loads are represented by [`RegionRequest`] tickets.
pub struct GlobeScene<G, S> {
    globe: G,
    scheduler: S,
    config: GlobeConfig,
    selection: SelectionState,
    render: RenderSet,
    clock: InteractionClock,
    camera: CameraDirector,
    layout: LayoutReconciler,
    dossier: DossierBridge,
    on_selection_change: Option<SelectionCallback>,
    // Bumped on every selection change and on dispose; tickets from an
    // older epoch are stale.
    epoch: u64,
    pending_regions: Option<RegionRequest>,
    reported_open: bool,
    disposed: bool,
}

impl<G: GlobeCapability, S: TimerScheduler> GlobeScene<G, S> {
    /// Mounts the scene: auto-rotation on, no overlays yet.
    pub fn new(mut globe: G, scheduler: S, config: GlobeConfig, dossier: DossierBridge) -> Self {
        globe.set_auto_rotate(true);
        Self {
            clock: InteractionClock::new(config.idle_delay()),
            camera: CameraDirector::new(config.camera.clone()),
            layout: LayoutReconciler::new(config.layout.clone(), config.initial_width_px),
            globe,
            scheduler,
            config,
            selection: SelectionState::new(),
            render: RenderSet::new(),
            dossier,
            on_selection_change: None,
            epoch: 0,
            pending_regions: None,
            reported_open: false,
            disposed: false,
        }
    }

    /// Invoked with the new state whenever the panel opens or closes.
    pub fn on_selection_change(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_selection_change = Some(Box::new(callback));
    }

    pub fn globe(&self) -> &G {
        &self.globe
    }

    pub fn globe_mut(&mut self) -> &mut G {
        &mut self.globe
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<&SharedFeature> {
        self.selection.selected()
    }

    pub fn render_set(&self) -> &RenderSet {
        &self.render
    }

    pub fn camera(&self) -> &CameraDirector {
        &self.camera
    }

    pub fn layout(&self) -> &LayoutReconciler {
        &self.layout
    }

    pub fn clock(&self) -> &InteractionClock {
        &self.clock
    }

    pub fn dossier(&self) -> &DossierBridge {
        &self.dossier
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_regions(&self) -> Option<&RegionRequest> {
        self.pending_regions.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Applies one input. Returns a ticket when a region load should start.
    pub fn dispatch(&mut self, event: SceneEvent) -> Option<RegionRequest> {
        if self.disposed {
            debug!(?event, "event after dispose ignored");
            return None;
        }
        match event {
            SceneEvent::Hover(target) => {
                let transition = self.selection.hover(target);
                self.apply(transition)
            }
            SceneEvent::Click(target) => {
                let transition = self.selection.click(target);
                self.apply(transition)
            }
            SceneEvent::ClickBackground | SceneEvent::Escape | SceneEvent::Back => {
                let transition = self.selection.click_background();
                self.apply(transition)
            }
            SceneEvent::Drag => {
                self.camera.forget_target();
                self.touch();
                None
            }
            SceneEvent::Resize { width_px } => {
                self.layout.resize(width_px);
                None
            }
            SceneEvent::TimerFired(id) => {
                self.on_timer(id);
                None
            }
        }
    }

    /// Country boundaries arrived (possibly empty after a failed fetch).
    pub fn countries_loaded(&mut self, countries: Vec<SharedFeature>) {
        if self.disposed {
            return;
        }
        info!(count = countries.len(), "country overlays ready");
        self.render.set_countries(countries);
        self.push_overlays();
    }

    /// Commits the result of a region load.
    ///
    /// The result is dropped when the scene is disposed, when a newer
    /// selection happened since `request` was issued, or when `request`
    /// names a country other than the current selection. `None` (fetch
    /// failure) leaves the country without regions.
    ///
    /// Returns `true` if regions were applied.
    pub fn commit_regions(
        &mut self,
        request: &RegionRequest,
        regions: Option<Vec<SharedFeature>>,
    ) -> bool {
        if self.disposed || request.epoch != self.epoch {
            debug!(country = %request.country_name, "stale region load discarded");
            return false;
        }
        let selected_key = self.selection.selected().map(|f| &f.key);
        if selected_key != Some(&request.country) {
            debug!(country = %request.country_name, "region load for unselected country discarded");
            return false;
        }
        self.pending_regions = None;

        let Some(regions) = regions else {
            warn!(country = %request.country_name, "regions unavailable, showing country only");
            return false;
        };
        debug!(country = %request.country_name, count = regions.len(), "regions applied");
        self.render.replace_regions(request.country.clone(), regions);
        self.push_overlays();
        true
    }

    /// Advances time-based presentation (viewport offset).
    pub fn tick(&mut self, frame: &Frame) {
        if self.disposed {
            return;
        }
        self.layout.tick(frame, &mut self.globe);
    }

    /// Unmount: cancels the idle timer, invalidates in-flight loads,
    /// closes the dossier and releases overlays. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clock.teardown(&mut self.scheduler);
        self.epoch += 1;
        self.pending_regions = None;
        self.selection = SelectionState::new();
        self.render.clear_regions();
        self.dossier.close();
        self.layout.set_open(false);
        self.sync_open_state();
        self.globe.release();
        self.disposed = true;
        info!("globe scene disposed");
    }

    fn apply(&mut self, transition: Transition) -> Option<RegionRequest> {
        match transition {
            Transition::Unchanged => None,
            Transition::HoverChanged => {
                self.touch();
                self.push_overlays();
                None
            }
            Transition::Selected(country) => Some(self.select(country)),
            Transition::Cleared => {
                self.clear();
                None
            }
            Transition::RegionClicked(region) => {
                self.touch();
                if self.render.contains_region(&region.key) {
                    self.dossier.refine_region(&region);
                }
                None
            }
        }
    }

    fn select(&mut self, country: SharedFeature) -> RegionRequest {
        debug!(country = country.name(), "selected");
        self.touch();
        self.epoch += 1;
        self.render.clear_regions();
        self.camera.focus_feature(&mut self.globe, &country);
        self.dossier.open(&country);
        self.layout.set_open(true);
        self.sync_open_state();
        self.push_overlays();

        let request = RegionRequest {
            country: country.key.clone(),
            country_name: country.name().to_string(),
            epoch: self.epoch,
        };
        self.pending_regions = Some(request.clone());
        request
    }

    fn clear(&mut self) {
        debug!("selection cleared");
        self.touch();
        self.epoch += 1;
        self.pending_regions = None;
        self.render.clear_regions();
        self.camera.return_to_overview(&mut self.globe);
        self.dossier.close();
        self.layout.set_open(false);
        self.sync_open_state();
        self.push_overlays();
    }

    fn touch(&mut self) {
        self.clock.on_interaction(&mut self.scheduler, &mut self.globe);
    }

    fn on_timer(&mut self, id: TimerId) {
        if !self.clock.on_timer(id) {
            return;
        }
        if self.selection.is_open() {
            debug!("idle while a country is open, rotation stays off");
            return;
        }
        debug!("idle, resuming rotation");
        self.globe.set_auto_rotate(true);
    }

    fn sync_open_state(&mut self) {
        let open = self.selection.is_open();
        if open == self.reported_open {
            return;
        }
        self.reported_open = open;
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(open);
        }
    }

    fn push_overlays(&mut self) {
        let palette = &self.config.palette;
        let overlays: Vec<OverlayPolygon> = self
            .render
            .iter()
            .map(|feature| {
                let state = self.selection.classify(feature);
                OverlayPolygon {
                    feature: feature.clone(),
                    state,
                    style: style_for(state, palette),
                }
            })
            .collect();
        self.globe.set_overlays(&overlays);
    }
}

impl<G, S> GlobeScene<G, S> {
    /// Idle delay the scene arms after each interaction.
    pub fn idle_delay(&self) -> Duration {
        self.clock.idle_delay()
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeScene, RegionRequest, SceneEvent};
    use crate::camera::CameraPov;
    use crate::config::GlobeConfig;
    use crate::dossier::DossierBridge;
    use crate::testing::{DossierEvent, FakeGlobe, RecordingSink};
    use catalog::{CrisisCatalog, CrisisRecord, NameTable};
    use foundation::LatLng;
    use pretty_assertions::assert_eq;
    use runtime::{Frame, ManualScheduler};
    use scene::{BoundaryFeature, FeatureState, SharedFeature};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    type Scene = GlobeScene<FakeGlobe, ManualScheduler>;

    fn rect(lng0: f64, lat0: f64, lng1: f64, lat1: f64) -> Vec<Vec<Vec<LatLng>>> {
        vec![vec![vec![
            LatLng::from_lng_lat(lng0, lat0),
            LatLng::from_lng_lat(lng0, lat1),
            LatLng::from_lng_lat(lng1, lat1),
            LatLng::from_lng_lat(lng1, lat0),
        ]]]
    }

    fn country(name: &str, ordinal: u32, iso: &str, lng: f64) -> SharedFeature {
        Arc::new(BoundaryFeature::country(
            name,
            ordinal,
            Some(iso.to_string()),
            rect(lng, 0.0, lng + 10.0, 10.0),
        ))
    }

    fn region(iso: &str, name: &str, ordinal: u32) -> SharedFeature {
        Arc::new(BoundaryFeature::region(iso, name, ordinal, rect(0.0, 0.0, 1.0, 1.0)))
    }

    struct Harness {
        scene: Scene,
        sink: RecordingSink,
        panel: Rc<RefCell<Vec<bool>>>,
        kenya: SharedFeature,
        sudan: SharedFeature,
        chad: SharedFeature,
    }

    fn harness() -> Harness {
        let mut catalog = CrisisCatalog::new(NameTable::with_defaults());
        catalog.insert(CrisisRecord {
            country: "Sudan".to_string(),
            severity: 4.8,
            people_in_need: 24_800_000,
            funding_required_usd: 2.7e9,
            funding_received_usd: 1.3e9,
            summary: String::new(),
        });
        let sink = RecordingSink::default();
        let dossier = DossierBridge::new(catalog, Box::new(sink.clone()));
        let mut scene = GlobeScene::new(
            FakeGlobe::default(),
            ManualScheduler::new(),
            GlobeConfig::default(),
            dossier,
        );
        let panel = Rc::new(RefCell::new(Vec::new()));
        let log = panel.clone();
        scene.on_selection_change(move |open| log.borrow_mut().push(open));

        let kenya = country("Kenya", 0, "KE", 34.0);
        let sudan = country("Sudan", 1, "SD", 22.0);
        let chad = country("Chad", 2, "TD", 14.0);
        scene.countries_loaded(vec![kenya.clone(), sudan.clone(), chad.clone()]);
        Harness {
            scene,
            sink,
            panel,
            kenya,
            sudan,
            chad,
        }
    }

    fn elapse(scene: &mut Scene, dt: Duration) {
        let fired = scene.scheduler_mut().advance(dt);
        for id in fired {
            scene.dispatch(SceneEvent::TimerFired(id));
        }
    }

    fn state_of(scene: &Scene, name: &str) -> FeatureState {
        scene
            .globe()
            .overlays
            .iter()
            .find(|o| o.feature.name() == name)
            .map(|o| o.state)
            .unwrap_or_else(|| panic!("{name} not rendered"))
    }

    #[test]
    fn mount_enables_rotation_and_renders_countries() {
        let h = harness();
        assert!(h.scene.globe().auto_rotate);
        assert_eq!(h.scene.globe().overlay_names(), vec!["Kenya", "Sudan", "Chad"]);
        assert!(h.scene.globe().flights.is_empty());
    }

    #[test]
    fn click_focuses_opens_and_requests_regions() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));

        assert_eq!(
            req,
            Some(RegionRequest {
                country: h.kenya.key.clone(),
                country_name: "Kenya".to_string(),
                epoch: h.scene.epoch(),
            })
        );
        assert_eq!(h.scene.globe().flights.len(), 1);
        assert_eq!(h.scene.globe().flights[0].0.lat, 5.0);
        assert_eq!(h.scene.globe().flights[0].0.lng, 39.0);
        assert_eq!(h.scene.globe().flights[0].1, Duration::from_millis(1200));
        assert!(h.scene.dossier().is_open());
        assert_eq!(*h.panel.borrow(), vec![true]);
        assert!(h.scene.layout().is_open());
    }

    #[test]
    fn background_click_twice_equals_once() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Click(h.sudan.clone()));
        h.scene.dispatch(SceneEvent::ClickBackground);
        let flights = h.scene.globe().flights.len();
        let events = h.sink.events();

        assert_eq!(h.scene.dispatch(SceneEvent::ClickBackground), None);
        assert!(h.scene.selected().is_none());
        assert_eq!(h.scene.globe().flights.len(), flights);
        assert_eq!(h.sink.events(), events);
        assert_eq!(h.sink.closes(), 1);
        assert_eq!(*h.panel.borrow(), vec![true, false]);
    }

    #[test]
    fn reclick_matches_background_click() {
        let mut a = harness();
        let mut b = harness();

        a.scene.dispatch(SceneEvent::Click(a.chad.clone()));
        a.scene.dispatch(SceneEvent::Click(a.chad.clone()));
        b.scene.dispatch(SceneEvent::Click(b.chad.clone()));
        b.scene.dispatch(SceneEvent::ClickBackground);

        assert!(a.scene.selected().is_none());
        assert_eq!(a.scene.globe().flights, b.scene.globe().flights);
        assert_eq!(a.scene.globe().overlays, b.scene.globe().overlays);
        assert_eq!(a.sink.events(), b.sink.events());
        assert_eq!(*a.panel.borrow(), *b.panel.borrow());
        assert_eq!(
            a.scene.globe().flights.last().map(|f| f.0),
            Some(CameraPov::new(15.0, 20.0, 2.5))
        );
    }

    #[test]
    fn escape_and_back_close_like_background() {
        for event in [SceneEvent::Escape, SceneEvent::Back] {
            let mut h = harness();
            h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
            h.scene.dispatch(event);
            assert!(h.scene.selected().is_none());
            assert!(!h.scene.dossier().is_open());
            assert_eq!(h.sink.closes(), 1);
        }
    }

    #[test]
    fn stale_region_load_is_discarded() {
        let mut h = harness();
        let req_a = h.scene.dispatch(SceneEvent::Click(h.kenya.clone())).expect("request");
        let req_b = h.scene.dispatch(SceneEvent::Click(h.sudan.clone())).expect("request");

        assert!(!h.scene.commit_regions(&req_a, Some(vec![region("KE", "Turkana", 0)])));
        assert!(h.scene.render_set().regions().is_empty());

        assert!(h.scene.commit_regions(&req_b, Some(vec![region("SD", "North Darfur", 0)])));
        let names: Vec<&str> = h.scene.render_set().regions().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["North Darfur"]);
    }

    #[test]
    fn region_load_after_close_is_discarded() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.kenya.clone())).expect("request");
        h.scene.dispatch(SceneEvent::Escape);
        assert!(!h.scene.commit_regions(&req, Some(vec![region("KE", "Turkana", 0)])));
        assert!(h.scene.render_set().regions().is_empty());
        assert!(!h.scene.dossier().is_open());
    }

    #[test]
    fn reselecting_replaces_regions() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.kenya.clone())).expect("request");
        h.scene.commit_regions(&req, Some(vec![region("KE", "Turkana", 0)]));
        assert_eq!(h.scene.render_set().regions().len(), 1);

        h.scene.dispatch(SceneEvent::Click(h.chad.clone()));
        assert!(h.scene.render_set().regions().is_empty());
        assert!(!h.scene.globe().overlay_names().contains(&"Turkana"));
    }

    #[test]
    fn failed_region_load_keeps_selection() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.sudan.clone())).expect("request");
        assert!(!h.scene.commit_regions(&req, None));
        assert!(h.scene.selection().is_selected(&h.sudan));
        assert!(h.scene.dossier().is_open());
        assert!(h.scene.pending_regions().is_none());
    }

    #[test]
    fn idle_rotation_resumes_only_without_selection() {
        let mut h = harness();
        let delay = h.scene.idle_delay();

        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        assert!(!h.scene.globe().auto_rotate);
        elapse(&mut h.scene, delay);
        assert!(!h.scene.globe().auto_rotate);

        h.scene.dispatch(SceneEvent::ClickBackground);
        elapse(&mut h.scene, delay - Duration::from_secs(1));
        assert!(!h.scene.globe().auto_rotate);
        elapse(&mut h.scene, Duration::from_secs(1));
        assert!(h.scene.globe().auto_rotate);
    }

    #[test]
    fn repeated_interactions_never_stack_timers() {
        let mut h = harness();
        for _ in 0..4 {
            h.scene.dispatch(SceneEvent::Drag);
            h.scene.dispatch(SceneEvent::Hover(Some(h.chad.clone())));
            h.scene.dispatch(SceneEvent::Hover(None));
        }
        assert_eq!(h.scene.scheduler().pending_count(), 1);
    }

    #[test]
    fn others_dim_while_selected_even_if_hovered_before() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Hover(Some(h.chad.clone())));
        assert_eq!(state_of(&h.scene, "Chad"), FeatureState::Hovered);

        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        h.scene.dispatch(SceneEvent::Hover(None));
        assert_eq!(state_of(&h.scene, "Kenya"), FeatureState::Selected);
        assert_eq!(state_of(&h.scene, "Chad"), FeatureState::Dimmed);
        assert_eq!(state_of(&h.scene, "Sudan"), FeatureState::Dimmed);
    }

    #[test]
    fn region_click_leaves_selection_and_camera() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.kenya.clone())).expect("request");
        let turkana = region("KE", "Turkana", 0);
        h.scene.commit_regions(&req, Some(vec![turkana.clone()]));
        let flights = h.scene.globe().flights.len();

        assert_eq!(h.scene.dispatch(SceneEvent::Click(turkana)), None);
        assert!(h.scene.selection().is_selected(&h.kenya));
        assert_eq!(h.scene.globe().flights.len(), flights);
        assert_eq!(*h.panel.borrow(), vec![true]);

        let last = h.sink.events().last().cloned();
        match last {
            Some(DossierEvent::Refine(ctx)) => {
                assert_eq!(ctx.region_display_name.as_deref(), Some("Turkana"));
                assert_eq!(ctx.country_display_name, "Kenya");
            }
            other => panic!("expected refine, got {other:?}"),
        }
    }

    #[test]
    fn region_click_without_selection_is_ignored() {
        let mut h = harness();
        let stray = region("TD", "Ouaddaï", 0);
        h.scene.dispatch(SceneEvent::Click(stray));
        assert!(h.scene.selected().is_none());
        assert!(h.sink.events().is_empty());
        assert!(h.scene.globe().flights.is_empty());
    }

    #[test]
    fn dossier_carries_matched_record() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Click(h.sudan.clone()));
        let ctx = h.scene.dossier().current().cloned().expect("open");
        assert_eq!(ctx.matched_record.map(|r| r.country), Some("Sudan".to_string()));
    }

    #[test]
    fn switching_countries_keeps_panel_open() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        h.scene.dispatch(SceneEvent::Click(h.sudan.clone()));
        assert_eq!(*h.panel.borrow(), vec![true]);
        assert_eq!(h.sink.closes(), 0);
        assert_eq!(h.scene.globe().flights.len(), 2);
    }

    #[test]
    fn deselect_mid_flight_ends_at_overview() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        h.scene.dispatch(SceneEvent::ClickBackground);
        assert_eq!(h.scene.globe().pov, CameraPov::new(15.0, 20.0, 2.5));
    }

    #[test]
    fn drag_forgets_camera_target_and_pauses_rotation() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        assert!(h.scene.camera().last_target().is_some());

        h.scene.dispatch(SceneEvent::Drag);
        assert_eq!(h.scene.camera().last_target(), None);
        assert!(h.scene.clock().armed().is_some());
        assert!(!h.scene.globe().auto_rotate);
    }

    #[test]
    fn layout_follows_panel_and_resize() {
        let mut h = harness();
        h.scene.dispatch(SceneEvent::Resize { width_px: 1000.0 });
        h.scene.dispatch(SceneEvent::Click(h.kenya.clone()));
        assert_eq!(h.scene.layout().target_px(), -200.0);

        let mut frame = Frame::first(1.0 / 60.0);
        for _ in 0..300 {
            h.scene.tick(&frame);
            frame = frame.advance(1.0 / 60.0);
        }
        assert_eq!(h.scene.globe().offsets.last().copied(), Some(-200.0));

        h.scene.dispatch(SceneEvent::Escape);
        assert_eq!(h.scene.layout().target_px(), 0.0);
    }

    #[test]
    fn dispose_cancels_timer_and_rejects_late_work() {
        let mut h = harness();
        let req = h.scene.dispatch(SceneEvent::Click(h.kenya.clone())).expect("request");
        assert_eq!(h.scene.scheduler().pending_count(), 1);

        h.scene.dispose();
        h.scene.dispose();

        assert_eq!(h.scene.scheduler().pending_count(), 0);
        assert!(h.scene.globe().released);
        assert_eq!(h.sink.closes(), 1);
        assert_eq!(*h.panel.borrow(), vec![true, false]);
        assert!(!h.scene.commit_regions(&req, Some(vec![region("KE", "Turkana", 0)])));
        assert_eq!(h.scene.dispatch(SceneEvent::Click(h.sudan.clone())), None);
        assert!(h.scene.selected().is_none());

        elapse(&mut h.scene, Duration::from_secs(60));
        assert!(!h.scene.globe().auto_rotate);
    }
}
