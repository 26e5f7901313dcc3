use std::sync::Arc;

use foundation::{GeoBounds, LatLng};

pub type Ring = Vec<LatLng>;
pub type Polygon = Vec<Ring>;

/// Features are immutable once decoded and shared between the loader
/// cache, the render set and the selection state.
pub type SharedFeature = Arc<BoundaryFeature>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureTier {
    Country,
    /// Admin-1 subdivision of the country with this ISO 3166-1 alpha-2 code.
    Region { country_code: String },
}

/// Stable identity of a boundary feature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureKey {
    pub tier: FeatureTier,
    pub name: String,
    /// Position in the source document; disambiguates repeated names.
    pub ordinal: u32,
}

impl FeatureKey {
    pub fn country(name: impl Into<String>, ordinal: u32) -> Self {
        Self {
            tier: FeatureTier::Country,
            name: name.into(),
            ordinal,
        }
    }

    pub fn region(country_code: impl Into<String>, name: impl Into<String>, ordinal: u32) -> Self {
        Self {
            tier: FeatureTier::Region {
                country_code: country_code.into(),
            },
            name: name.into(),
            ordinal,
        }
    }

    pub fn is_region(&self) -> bool {
        matches!(self.tier, FeatureTier::Region { .. })
    }
}

/// A named country or admin-1 polygon set.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub key: FeatureKey,
    /// ISO 3166-1 alpha-2 code when the source document carries one.
    pub iso_a2: Option<String>,
    pub polygons: Vec<Polygon>,
}

impl BoundaryFeature {
    pub fn country(
        name: impl Into<String>,
        ordinal: u32,
        iso_a2: Option<String>,
        polygons: Vec<Polygon>,
    ) -> Self {
        Self {
            key: FeatureKey::country(name, ordinal),
            iso_a2,
            polygons,
        }
    }

    pub fn region(
        country_code: impl Into<String>,
        name: impl Into<String>,
        ordinal: u32,
        polygons: Vec<Polygon>,
    ) -> Self {
        let country_code = country_code.into();
        Self {
            key: FeatureKey::region(country_code.clone(), name, ordinal),
            iso_a2: Some(country_code),
            polygons,
        }
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn is_region(&self) -> bool {
        self.key.is_region()
    }

    pub fn region_country_code(&self) -> Option<&str> {
        match &self.key.tier {
            FeatureTier::Region { country_code } => Some(country_code.as_str()),
            FeatureTier::Country => None,
        }
    }

    pub fn same_feature(&self, other: &BoundaryFeature) -> bool {
        self.key == other.key
    }

    /// Every vertex of every ring of every polygon part.
    pub fn vertices(&self) -> impl Iterator<Item = LatLng> + '_ {
        self.polygons
            .iter()
            .flat_map(|poly| poly.iter())
            .flat_map(|ring| ring.iter().copied())
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.vertices())
    }

    /// Bounds, or a zero-span box at (0, 0) for empty/degenerate geometry.
    pub fn bounds_or_default(&self) -> GeoBounds {
        GeoBounds::from_points_or(self.vertices(), LatLng::new(0.0, 0.0))
    }
}
