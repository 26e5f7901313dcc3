use std::time::Duration;

use globe::{CameraPov, DossierContext, DossierSink, GlobeCapability, OverlayPolygon};
use scene::FeatureState;
use tracing::{debug, info, trace};

/// Globe stand-in that logs what a renderer would be asked to draw.
#[derive(Debug)]
pub struct ConsoleGlobe {
    pov: CameraPov,
    auto_rotate: bool,
}

impl ConsoleGlobe {
    pub fn new(initial: CameraPov) -> Self {
        Self {
            pov: initial,
            auto_rotate: false,
        }
    }
}

impl GlobeCapability for ConsoleGlobe {
    fn set_auto_rotate(&mut self, enabled: bool) {
        if self.auto_rotate != enabled {
            info!(enabled, "auto-rotate");
        }
        self.auto_rotate = enabled;
    }

    fn fly_to(&mut self, pov: CameraPov, duration: Duration) {
        info!(
            lat = pov.lat,
            lng = pov.lng,
            altitude = pov.altitude,
            ms = duration.as_millis() as u64,
            "fly to"
        );
        self.pov = pov;
    }

    fn current_pov(&self) -> CameraPov {
        self.pov
    }

    fn set_overlays(&mut self, overlays: &[OverlayPolygon]) {
        let selected = overlays
            .iter()
            .find(|o| o.state == FeatureState::Selected)
            .map(|o| o.feature.name());
        let hovered = overlays
            .iter()
            .find(|o| matches!(o.state, FeatureState::Hovered | FeatureState::RegionHovered))
            .map(|o| o.feature.name());
        let regions = overlays.iter().filter(|o| o.feature.is_region()).count();
        debug!(total = overlays.len(), regions, ?selected, ?hovered, "overlays");
    }

    fn set_viewport_offset(&mut self, offset_px: f64) {
        trace!(offset_px, "viewport offset");
    }

    fn release(&mut self) {
        info!("overlays released");
    }
}

/// Dossier stand-in that logs the hand-off.
#[derive(Debug, Default)]
pub struct ConsoleDossier;

impl DossierSink for ConsoleDossier {
    fn open(&mut self, context: &DossierContext) {
        match &context.matched_record {
            Some(record) => info!(
                country = %context.country_display_name,
                severity = record.severity,
                people_in_need = record.people_in_need,
                funding_gap = ?record.funding_gap_ratio(),
                "dossier open"
            ),
            None => info!(country = %context.country_display_name, "dossier open, no crisis data"),
        }
    }

    fn refine(&mut self, context: &DossierContext) {
        info!(
            country = %context.country_display_name,
            region = ?context.region_display_name,
            "dossier refined"
        );
    }

    fn close(&mut self) {
        info!("dossier closed");
    }
}
