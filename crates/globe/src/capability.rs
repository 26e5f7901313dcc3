use std::time::Duration;

use scene::{FeatureState, FeatureStyle, SharedFeature};

use crate::camera::CameraPov;

/// One feature as handed to the renderer, with its resolved material.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPolygon {
    pub feature: SharedFeature,
    pub state: FeatureState,
    pub style: FeatureStyle,
}

/// The narrow surface of the 3-D globe the controller drives.
///
/// Implementations are expected to retarget cleanly when `fly_to` is called
/// while a previous flight is still running.
pub trait GlobeCapability {
    fn set_auto_rotate(&mut self, enabled: bool);

    /// Starts an animated flight to an absolute point of view.
    fn fly_to(&mut self, pov: CameraPov, duration: Duration);

    fn current_pov(&self) -> CameraPov;

    /// Replaces the full overlay set.
    fn set_overlays(&mut self, overlays: &[OverlayPolygon]);

    /// Horizontal translation of the globe container in CSS pixels.
    fn set_viewport_offset(&mut self, offset_px: f64);

    /// Drops generated overlay geometry. Called once on dispose.
    fn release(&mut self);
}
