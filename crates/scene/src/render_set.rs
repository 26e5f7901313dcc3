use crate::feature::{FeatureKey, SharedFeature};

/// The features currently handed to the globe: every country plus, at
/// most, the admin-1 regions of one owning country.
///
/// Region sets are always replaced wholesale, never merged, so regions of
/// a previously selected country cannot linger.
#[derive(Debug, Clone, Default)]
pub struct RenderSet {
    countries: Vec<SharedFeature>,
    regions: Option<RegionLayer>,
}

#[derive(Debug, Clone)]
struct RegionLayer {
    owner: FeatureKey,
    features: Vec<SharedFeature>,
}

impl RenderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Country-tier features only; region-tagged input is dropped.
    pub fn set_countries(&mut self, countries: Vec<SharedFeature>) {
        self.countries = countries.into_iter().filter(|f| !f.is_region()).collect();
    }

    pub fn countries(&self) -> &[SharedFeature] {
        &self.countries
    }

    pub fn regions(&self) -> &[SharedFeature] {
        self.regions
            .as_ref()
            .map(|layer| layer.features.as_slice())
            .unwrap_or(&[])
    }

    pub fn region_owner(&self) -> Option<&FeatureKey> {
        self.regions.as_ref().map(|layer| &layer.owner)
    }

    /// Replaces any prior region set. Non-region input is dropped.
    pub fn replace_regions(&mut self, owner: FeatureKey, regions: Vec<SharedFeature>) {
        let features = regions.into_iter().filter(|f| f.is_region()).collect();
        self.regions = Some(RegionLayer { owner, features });
    }

    /// Returns `true` if a region set was present.
    pub fn clear_regions(&mut self) -> bool {
        self.regions.take().is_some()
    }

    /// Countries first, then regions.
    pub fn iter(&self) -> impl Iterator<Item = &SharedFeature> + '_ {
        self.countries.iter().chain(self.regions().iter())
    }

    pub fn len(&self) -> usize {
        self.countries.len() + self.regions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive lookup by dataset name.
    pub fn find_country(&self, name: &str) -> Option<&SharedFeature> {
        let wanted = name.trim();
        self.countries
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
    }

    pub fn contains_region(&self, key: &FeatureKey) -> bool {
        self.regions().iter().any(|f| &f.key == key)
    }
}
