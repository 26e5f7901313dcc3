use crate::geo::{LatLng, wrap_lng_deg};

/// Geographic bounding box in degrees.
///
/// `max_lng` may exceed 180 when the box straddles the antimeridian; use
/// [`GeoBounds::center`] to get a wrapped center point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Zero-span box at `p`.
    pub const fn point(p: LatLng) -> Self {
        Self::new(p.lat_deg, p.lat_deg, p.lng_deg, p.lng_deg)
    }

    /// Bounds of all finite points, or `None` when there are none.
    ///
    /// If the plain longitude span exceeds 180 degrees the points are
    /// re-measured with western longitudes shifted by +360, and the narrower
    /// of the two boxes wins. This keeps shapes that cross the antimeridian
    /// (Fiji, Chukotka) from producing a globe-wide box.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut acc: Option<Accumulator> = None;
        for p in points.into_iter().filter(LatLng::is_finite) {
            match acc.as_mut() {
                Some(a) => a.push(p),
                None => acc = Some(Accumulator::start(p)),
            }
        }
        acc.map(Accumulator::finish)
    }

    /// Like [`GeoBounds::from_points`], but degenerate input (empty or
    /// all-NaN rings) yields a zero-span box at `fallback` instead of `None`.
    pub fn from_points_or(points: impl IntoIterator<Item = LatLng>, fallback: LatLng) -> Self {
        Self::from_points(points).unwrap_or(Self::point(fallback))
    }

    pub fn lat_span_deg(&self) -> f64 {
        (self.max_lat - self.min_lat).max(0.0)
    }

    pub fn lng_span_deg(&self) -> f64 {
        (self.max_lng - self.min_lng).max(0.0)
    }

    /// Arithmetic midpoint, longitude wrapped into `[-180, 180)`.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) * 0.5,
            wrap_lng_deg((self.min_lng + self.max_lng) * 0.5),
        )
    }
}

struct Accumulator {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    // Same longitudes measured on [0, 360).
    min_lng_east: f64,
    max_lng_east: f64,
}

impl Accumulator {
    fn start(p: LatLng) -> Self {
        let east = shift_east(p.lng_deg);
        Self {
            min_lat: p.lat_deg,
            max_lat: p.lat_deg,
            min_lng: p.lng_deg,
            max_lng: p.lng_deg,
            min_lng_east: east,
            max_lng_east: east,
        }
    }

    fn push(&mut self, p: LatLng) {
        let east = shift_east(p.lng_deg);
        self.min_lat = self.min_lat.min(p.lat_deg);
        self.max_lat = self.max_lat.max(p.lat_deg);
        self.min_lng = self.min_lng.min(p.lng_deg);
        self.max_lng = self.max_lng.max(p.lng_deg);
        self.min_lng_east = self.min_lng_east.min(east);
        self.max_lng_east = self.max_lng_east.max(east);
    }

    fn finish(self) -> GeoBounds {
        let plain_span = self.max_lng - self.min_lng;
        let east_span = self.max_lng_east - self.min_lng_east;
        if plain_span > 180.0 && east_span < plain_span {
            GeoBounds::new(
                self.min_lat,
                self.max_lat,
                self.min_lng_east,
                self.max_lng_east,
            )
        } else {
            GeoBounds::new(self.min_lat, self.max_lat, self.min_lng, self.max_lng)
        }
    }
}

fn shift_east(lng_deg: f64) -> f64 {
    if lng_deg < 0.0 { lng_deg + 360.0 } else { lng_deg }
}
