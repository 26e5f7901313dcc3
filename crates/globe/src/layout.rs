use runtime::Frame;
use serde::{Deserialize, Serialize};

use crate::capability::GlobeCapability;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Shift as a fraction of the viewport width, before clamping.
    pub shift_ratio: f64,
    pub min_shift_px: f64,
    pub max_shift_px: f64,
    /// Exponential smoothing rate (per second).
    pub smoothing: f64,
    /// Distance below which the offset snaps to its target.
    pub snap_px: f64,
}

impl LayoutConfig {
    /// `(min, max)` shift in pixels, in order even if the config swapped them.
    pub fn shift_range(&self) -> (f64, f64) {
        let (a, b) = (self.min_shift_px, self.max_shift_px);
        (a.min(b), a.max(b))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shift_ratio: 0.2,
            min_shift_px: 80.0,
            max_shift_px: 280.0,
            smoothing: 8.0,
            snap_px: 0.5,
        }
    }
}

/// Horizontal globe offset for a right-anchored panel.
///
/// Zero while closed. While open the globe moves left by a width-proportional
/// amount clamped to `[min_shift_px, max_shift_px]`, and never by more than
/// half the viewport.
pub fn target_offset(config: &LayoutConfig, width_px: f64, open: bool) -> f64 {
    if !open || !(width_px.is_finite() && width_px > 0.0) {
        return 0.0;
    }
    let (lo, hi) = config.shift_range();
    let shift = (width_px * config.shift_ratio).max(lo).min(hi).min(width_px * 0.5);
    -shift
}

/// Eases the applied offset toward [`target_offset`] once per frame.
#[derive(Debug, Clone)]
pub struct LayoutReconciler {
    config: LayoutConfig,
    width_px: f64,
    open: bool,
    applied_px: f64,
}

impl LayoutReconciler {
    pub fn new(config: LayoutConfig, width_px: f64) -> Self {
        Self {
            config,
            width_px,
            open: false,
            applied_px: 0.0,
        }
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target_px(&self) -> f64 {
        target_offset(&self.config, self.width_px, self.open)
    }

    pub fn applied_px(&self) -> f64 {
        self.applied_px
    }

    pub fn is_settled(&self) -> bool {
        self.applied_px == self.target_px()
    }

    pub fn resize(&mut self, width_px: f64) {
        if width_px.is_finite() && width_px >= 0.0 {
            self.width_px = width_px;
        }
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Advances the animation. The capability is told only about changes.
    pub fn tick(&mut self, frame: &Frame, globe: &mut dyn GlobeCapability) -> bool {
        let target = self.target_px();
        if self.applied_px == target {
            return false;
        }
        let alpha = 1.0 - (-self.config.smoothing * frame.dt_s).exp();
        let mut next = self.applied_px + (target - self.applied_px) * alpha;
        if (target - next).abs() < self.config.snap_px {
            next = target;
        }
        if next == self.applied_px {
            return false;
        }
        self.applied_px = next;
        globe.set_viewport_offset(next);
        true
    }
}
