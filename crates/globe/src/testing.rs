use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::CameraPov;
use crate::capability::{GlobeCapability, OverlayPolygon};
use crate::dossier::{DossierContext, DossierSink};

/// Records every capability call. Flights land instantly.
#[derive(Debug)]
pub struct FakeGlobe {
    pub auto_rotate: bool,
    pub auto_rotate_calls: Vec<bool>,
    pub flights: Vec<(CameraPov, Duration)>,
    pub overlays: Vec<OverlayPolygon>,
    pub overlay_pushes: usize,
    pub offsets: Vec<f64>,
    pub released: bool,
    pub pov: CameraPov,
}

impl Default for FakeGlobe {
    fn default() -> Self {
        Self {
            auto_rotate: false,
            auto_rotate_calls: Vec::new(),
            flights: Vec::new(),
            overlays: Vec::new(),
            overlay_pushes: 0,
            offsets: Vec::new(),
            released: false,
            pov: CameraPov::new(15.0, 20.0, 2.5),
        }
    }
}

impl FakeGlobe {
    pub fn overlay_names(&self) -> Vec<&str> {
        self.overlays.iter().map(|o| o.feature.name()).collect()
    }
}

impl GlobeCapability for FakeGlobe {
    fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        self.auto_rotate_calls.push(enabled);
    }

    fn fly_to(&mut self, pov: CameraPov, duration: Duration) {
        self.flights.push((pov, duration));
        self.pov = pov;
    }

    fn current_pov(&self) -> CameraPov {
        self.pov
    }

    fn set_overlays(&mut self, overlays: &[OverlayPolygon]) {
        self.overlays = overlays.to_vec();
        self.overlay_pushes += 1;
    }

    fn set_viewport_offset(&mut self, offset_px: f64) {
        self.offsets.push(offset_px);
    }

    fn release(&mut self) {
        self.released = true;
        self.overlays.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DossierEvent {
    Open(DossierContext),
    Refine(DossierContext),
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Rc<RefCell<Vec<DossierEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DossierEvent> {
        self.events.borrow().clone()
    }

    pub fn closes(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, DossierEvent::Close))
            .count()
    }
}

impl DossierSink for RecordingSink {
    fn open(&mut self, context: &DossierContext) {
        self.events.borrow_mut().push(DossierEvent::Open(context.clone()));
    }

    fn refine(&mut self, context: &DossierContext) {
        self.events.borrow_mut().push(DossierEvent::Refine(context.clone()));
    }

    fn close(&mut self) {
        self.events.borrow_mut().push(DossierEvent::Close);
    }
}
