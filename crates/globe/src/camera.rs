use std::time::Duration;

use foundation::GeoBounds;
use scene::BoundaryFeature;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::GlobeCapability;

/// Camera target. `altitude` is a unit-less distance factor, not meters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPov {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl CameraPov {
    pub const fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Altitude for a zero-span feature.
    pub base_altitude: f64,
    pub altitude_per_degree: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub overview: CameraPov,
    pub focus_duration_ms: u64,
    pub overview_duration_ms: u64,
}

impl CameraConfig {
    /// `(min, max)` altitude, in order even if the config swapped them.
    pub fn altitude_range(&self) -> (f64, f64) {
        let (a, b) = (self.min_altitude, self.max_altitude);
        (a.min(b), a.max(b))
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_altitude: 0.3,
            altitude_per_degree: 0.035,
            min_altitude: 0.25,
            max_altitude: 2.35,
            overview: CameraPov::new(15.0, 20.0, 2.5),
            focus_duration_ms: 1200,
            overview_duration_ms: 1000,
        }
    }
}

/// Derives camera targets and issues flights.
///
/// Targets are always absolute, so a selection undone mid-flight still ends
/// at the overview.
#[derive(Debug, Clone)]
pub struct CameraDirector {
    config: CameraConfig,
    last_target: Option<CameraPov>,
}

impl CameraDirector {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            last_target: None,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn last_target(&self) -> Option<CameraPov> {
        self.last_target
    }

    /// Centroid of `bounds`, with an altitude that grows with its angular span.
    ///
    /// Longitude span is scaled by the cosine of the center latitude so high
    /// latitude countries are not framed from too far away.
    pub fn focus_on(&self, bounds: &GeoBounds) -> CameraPov {
        let center = bounds.center();
        let lng_span = bounds.lng_span_deg() * center.lat_deg.to_radians().cos().abs();
        let span = bounds.lat_span_deg().max(lng_span);
        let c = &self.config;
        let (lo, hi) = c.altitude_range();
        let altitude = (c.base_altitude + span * c.altitude_per_degree).max(lo).min(hi);
        CameraPov::new(center.lat_deg, center.lng_deg, altitude)
    }

    pub fn overview(&self) -> CameraPov {
        self.config.overview
    }

    /// Issues one flight. Re-issuing the target already in flight is skipped.
    ///
    /// Returns `true` if the capability was called.
    pub fn fly_to(
        &mut self,
        globe: &mut dyn GlobeCapability,
        pov: CameraPov,
        duration: Duration,
    ) -> bool {
        if self.last_target == Some(pov) {
            debug!(?pov, "camera already headed to target");
            return false;
        }
        debug!(from = ?globe.current_pov(), to = ?pov, ?duration, "camera flight");
        globe.fly_to(pov, duration);
        self.last_target = Some(pov);
        true
    }

    pub fn focus_feature(&mut self, globe: &mut dyn GlobeCapability, feature: &BoundaryFeature) -> bool {
        let pov = self.focus_on(&feature.bounds_or_default());
        let duration = Duration::from_millis(self.config.focus_duration_ms);
        self.fly_to(globe, pov, duration)
    }

    pub fn return_to_overview(&mut self, globe: &mut dyn GlobeCapability) -> bool {
        let duration = Duration::from_millis(self.config.overview_duration_ms);
        self.fly_to(globe, self.config.overview, duration)
    }

    /// The user moved the camera by hand; the last target no longer holds.
    pub fn forget_target(&mut self) {
        self.last_target = None;
    }
}
