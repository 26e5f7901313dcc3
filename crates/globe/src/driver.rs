use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use runtime::TimerScheduler;
use streaming::GeoBoundaryLoader;

use crate::capability::GlobeCapability;
use crate::controller::{GlobeScene, RegionRequest, SceneEvent};

/// Async glue between a [`GlobeScene`] and the boundary loader.
///
/// Single-threaded: the scene lives in an `Rc<RefCell<_>>` and is never
/// borrowed across an await, so overlapping dispatches interleave freely
/// and stale region loads are rejected by the scene itself.
pub struct SceneDriver<G, S> {
    scene: Rc<RefCell<GlobeScene<G, S>>>,
    loader: Arc<GeoBoundaryLoader>,
}

impl<G, S> Clone for SceneDriver<G, S> {
    fn clone(&self) -> Self {
        Self {
            scene: self.scene.clone(),
            loader: self.loader.clone(),
        }
    }
}

impl<G: GlobeCapability, S: TimerScheduler> SceneDriver<G, S> {
    pub fn new(scene: GlobeScene<G, S>, loader: Arc<GeoBoundaryLoader>) -> Self {
        Self {
            scene: Rc::new(RefCell::new(scene)),
            loader,
        }
    }

    pub fn scene(&self) -> &Rc<RefCell<GlobeScene<G, S>>> {
        &self.scene
    }

    pub fn loader(&self) -> &Arc<GeoBoundaryLoader> {
        &self.loader
    }

    /// Loads country boundaries and hands them to the scene.
    pub async fn mount(&self) {
        let countries = self.loader.load_countries().await;
        self.scene.borrow_mut().countries_loaded(countries);
    }

    /// Dispatches `event` and, if it started a region load, awaits and
    /// commits it. Returns `true` if regions were applied.
    pub async fn dispatch(&self, event: SceneEvent) -> bool {
        let request = self.scene.borrow_mut().dispatch(event);
        match request {
            Some(request) => self.complete(request).await,
            None => false,
        }
    }

    /// Loads the regions named by `request` and offers them to the scene.
    pub async fn complete(&self, request: RegionRequest) -> bool {
        let regions = self.loader.load_regions_for(&request.country_name).await;
        self.scene.borrow_mut().commit_regions(&request, regions)
    }
}
