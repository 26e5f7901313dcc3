use crate::feature::{BoundaryFeature, SharedFeature};

/// Visual state of one rendered feature, derived from [`SelectionState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureState {
    Idle,
    Hovered,
    Selected,
    /// A selection exists and this country is neither selected nor hovered.
    Dimmed,
    Region,
    RegionHovered,
}

/// What a transition changed. The caller turns this into side effects
/// (camera, region loading, dossier, idle timer).
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Unchanged,
    HoverChanged,
    /// A different country became the selection.
    Selected(SharedFeature),
    /// The selection was cleared.
    Cleared,
    /// A region overlay was clicked. Selection is untouched.
    RegionClicked(SharedFeature),
}

/// Hover/selection state of the globe.
///
/// Invariants:
/// - `selected` is always a country-tier feature.
/// - At most one of `hovered` and `hovered_region` is set.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    hovered: Option<SharedFeature>,
    selected: Option<SharedFeature>,
    hovered_region: Option<SharedFeature>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&SharedFeature> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&SharedFeature> {
        self.selected.as_ref()
    }

    pub fn hovered_region(&self) -> Option<&SharedFeature> {
        self.hovered_region.as_ref()
    }

    /// `true` while a country is selected (the detail panel is open).
    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, feature: &BoundaryFeature) -> bool {
        is_same(self.selected.as_ref(), feature)
    }

    pub fn hover(&mut self, target: Option<SharedFeature>) -> Transition {
        match target {
            None => {
                if self.hovered.is_none() && self.hovered_region.is_none() {
                    return Transition::Unchanged;
                }
                self.hovered = None;
                self.hovered_region = None;
            }
            Some(f) if f.is_region() => {
                if self.hovered.is_none() && is_same(self.hovered_region.as_ref(), &f) {
                    return Transition::Unchanged;
                }
                self.hovered = None;
                self.hovered_region = Some(f);
            }
            Some(f) => {
                if self.hovered_region.is_none() && is_same(self.hovered.as_ref(), &f) {
                    return Transition::Unchanged;
                }
                self.hovered_region = None;
                self.hovered = Some(f);
            }
        }
        Transition::HoverChanged
    }

    /// Clicking the current selection toggles it off.
    pub fn click(&mut self, target: SharedFeature) -> Transition {
        if target.is_region() {
            return Transition::RegionClicked(target);
        }
        if self.is_selected(&target) {
            return self.click_background();
        }
        self.hovered_region = None;
        self.selected = Some(target.clone());
        Transition::Selected(target)
    }

    /// Background click, Escape, or an explicit back action.
    pub fn click_background(&mut self) -> Transition {
        let had_region_hover = self.hovered_region.take().is_some();
        if self.selected.take().is_some() {
            Transition::Cleared
        } else if had_region_hover {
            Transition::HoverChanged
        } else {
            Transition::Unchanged
        }
    }

    /// Pure classification of `feature` against the current state.
    ///
    /// Selected wins over Hovered when the pointer rests on the selection.
    pub fn classify(&self, feature: &BoundaryFeature) -> FeatureState {
        if feature.is_region() {
            return if is_same(self.hovered_region.as_ref(), feature) {
                FeatureState::RegionHovered
            } else {
                FeatureState::Region
            };
        }
        if self.is_selected(feature) {
            FeatureState::Selected
        } else if is_same(self.hovered.as_ref(), feature) {
            FeatureState::Hovered
        } else if self.selected.is_some() {
            FeatureState::Dimmed
        } else {
            FeatureState::Idle
        }
    }
}

fn is_same(slot: Option<&SharedFeature>, feature: &BoundaryFeature) -> bool {
    slot.is_some_and(|f| f.same_feature(feature))
}
