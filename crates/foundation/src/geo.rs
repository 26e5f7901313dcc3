/// Geographic coordinate in degrees (WGS84 lat/lng).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub const fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    /// GeoJSON positions are ordered `[lng, lat]`.
    pub const fn from_lng_lat(lng_deg: f64, lat_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lng_deg.is_finite()
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn wrap_lng_deg(lng_deg: f64) -> f64 {
    let wrapped = (lng_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}
