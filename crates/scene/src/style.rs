use serde::{Deserialize, Serialize};

use crate::selection::FeatureState;

pub type Rgba = [f32; 4];

/// Resolved overlay material for one feature.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    /// Extrusion as a fraction of the globe radius.
    pub elevation: f32,
}

/// Colors and extrusions per [`FeatureState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub base_fill: Rgba,
    pub hover_fill: Rgba,
    pub selected_fill: Rgba,
    pub dimmed_fill: Rgba,
    pub region_fill: Rgba,
    pub region_hover_fill: Rgba,

    pub neutral_stroke: Rgba,
    pub hover_stroke: Rgba,
    pub selected_stroke: Rgba,
    pub dimmed_stroke: Rgba,
    pub region_stroke: Rgba,
    pub region_hover_stroke: Rgba,

    pub baseline_elevation: f32,
    pub hover_elevation: f32,
    /// Sits just above the baseline so regions draw over their country.
    pub region_elevation: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_fill: [0.33, 0.52, 0.82, 0.25],
            hover_fill: [0.45, 0.70, 1.00, 0.55],
            selected_fill: [1.00, 0.55, 0.20, 0.75],
            dimmed_fill: [0.20, 0.25, 0.30, 0.04],
            region_fill: [1.00, 1.00, 1.00, 0.02],
            region_hover_fill: [1.00, 0.85, 0.60, 0.35],

            neutral_stroke: [0.70, 0.80, 0.90, 0.25],
            hover_stroke: [0.55, 0.80, 1.00, 0.90],
            selected_stroke: [1.00, 0.75, 0.40, 1.00],
            dimmed_stroke: [0.60, 0.60, 0.60, 0.08],
            region_stroke: [1.00, 0.70, 0.40, 0.35],
            region_hover_stroke: [1.00, 0.80, 0.50, 0.85],

            baseline_elevation: 0.006,
            hover_elevation: 0.04,
            region_elevation: 0.012,
        }
    }
}

pub fn fill_color(state: FeatureState, palette: &Palette) -> Rgba {
    match state {
        FeatureState::Selected => palette.selected_fill,
        FeatureState::Dimmed => palette.dimmed_fill,
        FeatureState::Hovered => palette.hover_fill,
        FeatureState::Idle => palette.base_fill,
        FeatureState::Region => palette.region_fill,
        FeatureState::RegionHovered => palette.region_hover_fill,
    }
}

pub fn stroke_color(state: FeatureState, palette: &Palette) -> Rgba {
    match state {
        FeatureState::Selected => palette.selected_stroke,
        FeatureState::Dimmed => palette.dimmed_stroke,
        FeatureState::Hovered => palette.hover_stroke,
        FeatureState::Idle => palette.neutral_stroke,
        FeatureState::Region => palette.region_stroke,
        FeatureState::RegionHovered => palette.region_hover_stroke,
    }
}

/// Hovered features are raised the most; an opened selection lies flat.
pub fn elevation(state: FeatureState, palette: &Palette) -> f32 {
    match state {
        FeatureState::Hovered => palette.hover_elevation,
        FeatureState::Region | FeatureState::RegionHovered => palette.region_elevation,
        FeatureState::Selected | FeatureState::Dimmed | FeatureState::Idle => {
            palette.baseline_elevation
        }
    }
}

pub fn style_for(state: FeatureState, palette: &Palette) -> FeatureStyle {
    FeatureStyle {
        fill: fill_color(state, palette),
        stroke: stroke_color(state, palette),
        elevation: elevation(state, palette),
    }
}
